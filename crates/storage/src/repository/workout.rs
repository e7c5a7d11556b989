use chrono::{NaiveDate, NaiveDateTime};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Lift, NewWorkout, Workout};

#[derive(FromRow)]
struct WorkoutRow {
    workout_id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    lifts: Json<Vec<Lift>>,
    notes: Option<String>,
    session_rpe: Option<i16>,
    total_reps: i32,
    working_sets: i32,
    total_volume: i64,
    rpe_adjusted_volume: i64,
    created_at: NaiveDateTime,
}

impl From<WorkoutRow> for Workout {
    fn from(row: WorkoutRow) -> Self {
        Self {
            workout_id: row.workout_id,
            user_id: row.user_id,
            date: row.date,
            lifts: row.lifts.0,
            notes: row.notes,
            session_rpe: row.session_rpe,
            total_reps: row.total_reps,
            working_sets: row.working_sets,
            total_volume: row.total_volume,
            rpe_adjusted_volume: row.rpe_adjusted_volume,
            created_at: row.created_at,
        }
    }
}

const WORKOUT_COLUMNS: &str = r#"
    workout_id, user_id, date, lifts, notes, session_rpe,
    total_reps, working_sets, total_volume, rpe_adjusted_volume, created_at
"#;

pub struct WorkoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent workouts first, capped at `limit`
    pub async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<Workout>> {
        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC LIMIT $2"
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&sql)
            .bind(user_id)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Workout::from).collect())
    }

    /// Workouts dated on or after `since`, newest first
    pub async fn list_since(&self, user_id: Uuid, since: NaiveDate) -> Result<Vec<Workout>> {
        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 AND date >= $2 \
             ORDER BY date DESC, created_at DESC"
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&sql)
            .bind(user_id)
            .bind(since)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Workout::from).collect())
    }

    pub async fn list_paginated(&self, user_id: Uuid, offset: i64, limit: i64) -> Result<(Vec<Workout>, i64)> {
        let total_items = self.count(user_id).await?;

        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC OFFSET $2 LIMIT $3"
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&sql)
            .bind(user_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok((rows.into_iter().map(Workout::from).collect(), total_items))
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workouts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, user_id: Uuid, workout_id: Uuid) -> Result<Workout> {
        let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 AND workout_id = $2");

        let row = sqlx::query_as::<_, WorkoutRow>(&sql)
            .bind(user_id)
            .bind(workout_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Inserts the workout, creating the owning user row on first write.
    pub async fn create(&self, workout: &NewWorkout) -> Result<Workout> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO users (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(workout.user_id)
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            r#"
            INSERT INTO workouts (
                user_id, date, lifts, notes, session_rpe,
                total_reps, working_sets, total_volume, rpe_adjusted_volume
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {WORKOUT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, WorkoutRow>(&sql)
            .bind(workout.user_id)
            .bind(workout.date)
            .bind(Json(&workout.lifts))
            .bind(&workout.notes)
            .bind(workout.session_rpe)
            .bind(workout.metrics.total_reps)
            .bind(workout.metrics.working_sets)
            .bind(workout.metrics.total_volume)
            .bind(workout.metrics.rpe_adjusted_volume)
            .fetch_one(&mut *tx)
            .await
            .map_err(constraint_violation)?;

        tx.commit().await?;

        tracing::debug!(workout_id = %row.workout_id, user_id = %row.user_id, "Workout inserted");
        Ok(row.into())
    }

    pub async fn delete(&self, user_id: Uuid, workout_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE user_id = $1 AND workout_id = $2")
            .bind(user_id)
            .bind(workout_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn constraint_violation(err: sqlx::Error) -> StorageError {
    let constraint = match &err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    };

    match constraint {
        Some(name) => StorageError::ConstraintViolation(name),
        None => StorageError::Database(err),
    }
}
