use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

const DEFAULT_ROLE: &str = "FREEUSER";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/login", post(login))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn resolve_role(role: Option<String>) -> String {
    role.filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::BadRequest("Password must not be empty".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email is already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let role = resolve_role(payload.role);
    let user = User::create(&state.db, &email, &hash, &role).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(RegisterResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::NotFound("User not found".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Incorrect email or password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = keys.sign_pair(&user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn register_body(email: &str, password: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            email: email.into(),
            password: password.into(),
            role: None,
        })
    }

    #[sqlx::test]
    async fn duplicate_registration_conflicts_on_second_attempt(pool: PgPool) {
        let state = AppState::with_db(pool);

        let first = register(State(state.clone()), register_body("a@x.com", "pw"))
            .await
            .expect("first registration succeeds");
        assert_eq!(first.0.email, "a@x.com");
        assert_eq!(first.0.role, "FREEUSER");

        let second = register(State(state), register_body("a@x.com", "pw2")).await;
        match second {
            Err(ApiError::Conflict(msg)) => assert_eq!(msg, "Email is already registered"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[sqlx::test]
    async fn login_flow_covers_all_three_outcomes(pool: PgPool) {
        let state = AppState::with_db(pool);
        register(State(state.clone()), register_body("b@x.com", "pw"))
            .await
            .expect("registration succeeds");

        let login_body = |email: &str, password: &str| {
            Json(LoginRequest {
                email: email.into(),
                password: password.into(),
            })
        };

        let tokens = login(State(state.clone()), login_body("b@x.com", "pw"))
            .await
            .expect("login succeeds")
            .0;
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_ne!(tokens.access_token, tokens.refresh_token);

        match login(State(state.clone()), login_body("b@x.com", "wrong")).await {
            Err(ApiError::Unauthorized(_)) => {}
            other => panic!("expected unauthorized, got {other:?}"),
        }

        match login(State(state), login_body("nobody@x.com", "pw")).await {
            Err(ApiError::NotFound(_)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_garbage() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("a@nodot"));
    }

    #[test]
    fn role_defaults_when_absent_or_empty() {
        assert_eq!(resolve_role(None), "FREEUSER");
        assert_eq!(resolve_role(Some(String::new())), "FREEUSER");
        assert_eq!(resolve_role(Some("ADMIN".into())), "ADMIN");
    }

    #[test]
    fn register_response_exposes_identity_only() {
        let response = RegisterResponse {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            role: "FREEUSER".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains("FREEUSER"));
        assert!(!json.contains("password"));
    }
}
