use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::{common::PaginationParams, workout::CreateWorkoutRequest},
    error::Result,
    models::{NewWorkout, Workout},
    repository::WorkoutRepository,
};
use uuid::Uuid;

/// List a user's workouts, newest first
pub async fn list_workouts(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &PaginationParams,
) -> Result<(Vec<Workout>, i64)> {
    let repo = WorkoutRepository::new(pool);
    repo.list_paginated(user_id, pagination.offset() as i64, pagination.limit() as i64)
        .await
}

pub async fn get_workout(pool: &PgPool, user_id: Uuid, workout_id: Uuid) -> Result<Workout> {
    let repo = WorkoutRepository::new(pool);
    repo.find_by_id(user_id, workout_id).await
}

/// Log a workout by hand; aggregates come from the completed sets
pub async fn create_workout(
    pool: &PgPool,
    user_id: Uuid,
    req: &CreateWorkoutRequest,
    today: NaiveDate,
) -> Result<Workout> {
    let workout = NewWorkout::from_lifts(
        user_id,
        req.date.unwrap_or(today),
        req.to_lifts(),
        req.notes.clone(),
        req.session_rpe,
    );

    let repo = WorkoutRepository::new(pool);
    repo.create(&workout).await
}

pub async fn delete_workout(pool: &PgPool, user_id: Uuid, workout_id: Uuid) -> Result<()> {
    let repo = WorkoutRepository::new(pool);
    repo.delete(user_id, workout_id).await
}
