use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{UserPreferences, UserProfile};

#[derive(FromRow)]
struct UserRow {
    user_id: Uuid,
    name: Option<String>,
    preferences: Json<UserPreferences>,
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Unknown users get an empty profile rather than an error.
    pub async fn find_profile(&self, user_id: Uuid) -> Result<UserProfile> {
        let row = sqlx::query_as::<_, UserRow>("SELECT user_id, name, preferences FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(match row {
            Some(row) => UserProfile {
                user_id: row.user_id,
                name: row.name,
                preferences: row.preferences.0,
            },
            None => UserProfile {
                user_id,
                name: None,
                preferences: UserPreferences::default(),
            },
        })
    }

    pub async fn get_preferences(&self, user_id: Uuid) -> Result<UserPreferences> {
        Ok(self.find_profile(user_id).await?.preferences)
    }

    pub async fn update_preferences(&self, user_id: Uuid, preferences: &UserPreferences) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, preferences)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET preferences = EXCLUDED.preferences
            "#,
        )
        .bind(user_id)
        .bind(Json(preferences))
        .execute(self.pool)
        .await?;

        tracing::debug!(%user_id, "Preferences updated");
        Ok(())
    }
}
