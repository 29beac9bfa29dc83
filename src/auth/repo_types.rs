use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub role: String,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$super-secret".into(),
            role: "FREEUSER".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("super-secret"));
        assert!(json.contains("a@x.com"));
    }
}
