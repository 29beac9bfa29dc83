use crate::auth::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with an already hashed password.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
