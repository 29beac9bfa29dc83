use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    prefs::{
        dto::{GetPreferencesResponse, UpdatePreferencesRequest, UpdatePreferencesResponse},
        repo_types::Customization,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/preferences",
        get(get_preferences).put(update_preferences),
    )
}

#[instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<GetPreferencesResponse>, ApiError> {
    let customization = Customization::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Customization preferences not found for the given user ID.".into())
        })?;

    Ok(Json(GetPreferencesResponse {
        customization_preferences: customization.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<Json<UpdatePreferencesResponse>, ApiError> {
    Customization::upsert_for_user(
        &state.db,
        user_id,
        payload.size,
        &payload.color,
        payload.error_correction,
        &payload.output_format,
    )
    .await?;

    info!(%user_id, "preferences updated");
    Ok(Json(UpdatePreferencesResponse {
        success: true,
        message: "User preferences updated successfully.".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::User;
    use crate::prefs::repo_types::{ErrorCorrectionLevel, OutputFormat};
    use sqlx::PgPool;

    async fn seed_user(db: &PgPool) -> Uuid {
        User::create(db, "handler@x.com", "irrelevant-hash", "FREEUSER")
            .await
            .expect("seed user")
            .id
    }

    #[sqlx::test]
    async fn get_before_any_update_is_not_found(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let state = AppState::with_db(pool);

        match get_preferences(State(state), Path(user_id)).await {
            Err(ApiError::NotFound(msg)) => {
                assert_eq!(msg, "Customization preferences not found for the given user ID.")
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[sqlx::test]
    async fn update_then_get_returns_the_last_write(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let state = AppState::with_db(pool);

        let confirmation = update_preferences(
            State(state.clone()),
            Path(user_id),
            Json(UpdatePreferencesRequest {
                size: 300,
                color: "#FF0000".into(),
                error_correction: ErrorCorrectionLevel::Q,
                output_format: vec![OutputFormat::Svg, OutputFormat::Png],
            }),
        )
        .await
        .expect("update succeeds")
        .0;
        assert!(confirmation.success);
        assert_eq!(confirmation.message, "User preferences updated successfully.");

        let prefs = get_preferences(State(state), Path(user_id))
            .await
            .expect("get succeeds")
            .0
            .customization_preferences;
        assert_eq!(prefs.size, 300);
        assert_eq!(prefs.color, "#FF0000");
        assert_eq!(prefs.error_correction_level, ErrorCorrectionLevel::Q);
        assert_eq!(prefs.format, vec![OutputFormat::Svg, OutputFormat::Png]);
    }
}
