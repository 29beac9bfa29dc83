use sqlx::PgPool;
use uuid::Uuid;

use crate::prefs::repo_types::{Customization, CustomizationRow, ErrorCorrectionLevel, OutputFormat};

impl Customization {
    /// Look up the customization linked to a user through qr_code_settings.
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Customization>> {
        let row = sqlx::query_as::<_, CustomizationRow>(
            r#"
            SELECT c.id, c.size, c.color, c.error_correction, c.format
            FROM customizations c
            JOIN qr_code_settings s ON s.customization_id = c.id
            WHERE s.user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        row.map(Customization::try_from).transpose()
    }

    /// Replace the user's customization wholesale, creating the record and
    /// its settings link on first write. The lookup and write run in one
    /// transaction; the unique index on qr_code_settings.user_id keeps
    /// concurrent first writes from leaving a second link behind.
    pub async fn upsert_for_user(
        db: &PgPool,
        user_id: Uuid,
        size: i32,
        color: &str,
        error_correction: ErrorCorrectionLevel,
        format: &[OutputFormat],
    ) -> anyhow::Result<()> {
        let format: Vec<String> = format.iter().map(|f| f.as_str().to_string()).collect();
        let mut tx = db.begin().await?;

        let existing: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT customization_id
            FROM qr_code_settings
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        match existing {
            Some(customization_id) => {
                sqlx::query(
                    r#"
                    UPDATE customizations
                    SET size = $2, color = $3, error_correction = $4, format = $5
                    WHERE id = $1
                    "#,
                )
                .bind(customization_id)
                .bind(size)
                .bind(color)
                .bind(error_correction.as_str())
                .bind(&format)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                let customization_id: Uuid = sqlx::query_scalar(
                    r#"
                    INSERT INTO customizations (size, color, error_correction, format)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(size)
                .bind(color)
                .bind(error_correction.as_str())
                .bind(&format)
                .fetch_one(&mut *tx)
                .await?;

                sqlx::query(
                    r#"
                    INSERT INTO qr_code_settings (user_id, customization_id)
                    VALUES ($1, $2)
                    "#,
                )
                .bind(user_id)
                .bind(customization_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
