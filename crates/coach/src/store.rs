use sqlx::PgPool;
use uuid::Uuid;

use crate::Result;
use storage::models::{NewWorkout, UserPreferences, UserProfile, Workout};
use storage::repository::{UserRepository, WorkoutRepository};

/// Persistence the action handlers need.
#[async_trait::async_trait]
pub trait CoachStore: Send + Sync {
    /// Newest first.
    async fn recent_workouts(&self, user_id: Uuid, limit: usize) -> Result<Vec<Workout>>;

    async fn insert_workout(&self, workout: NewWorkout) -> Result<Workout>;

    async fn profile(&self, user_id: Uuid) -> Result<UserProfile>;

    async fn save_preferences(&self, user_id: Uuid, preferences: &UserPreferences) -> Result<()>;
}

#[derive(Clone)]
pub struct PgCoachStore {
    pool: PgPool,
}

impl PgCoachStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CoachStore for PgCoachStore {
    async fn recent_workouts(&self, user_id: Uuid, limit: usize) -> Result<Vec<Workout>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(WorkoutRepository::new(&self.pool).list_recent(user_id, limit).await?)
    }

    async fn insert_workout(&self, workout: NewWorkout) -> Result<Workout> {
        Ok(WorkoutRepository::new(&self.pool).create(&workout).await?)
    }

    async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        Ok(UserRepository::new(&self.pool).find_profile(user_id).await?)
    }

    async fn save_preferences(&self, user_id: Uuid, preferences: &UserPreferences) -> Result<()> {
        Ok(UserRepository::new(&self.pool).update_preferences(user_id, preferences).await?)
    }
}
