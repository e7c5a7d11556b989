use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use storage::{
    dto::metrics::{DashboardMetrics, MetricsQuery, ProgressMetrics},
    error::Result,
    models::{TrainingType, Units, Workout},
    repository::{UserRepository, WorkoutRepository},
    services::{
        dashboard::{POWERLIFTING_WINDOW_DAYS, compute_dashboard},
        progress::compute_progress,
    },
};
use uuid::Uuid;

pub const DEFAULT_DASHBOARD_DAYS: u32 = 30;
pub const DEFAULT_PROGRESS_DAYS: u32 = 90;

/// Days of history the dashboard loads. Powerlifting maxes compare the last
/// window against the one before it, so it always reaches back two windows;
/// the aggregates are still limited to the requested days.
pub fn dashboard_fetch_days(training_type: TrainingType, days: u32) -> i64 {
    match training_type {
        TrainingType::Powerlifting => i64::from(days).max(POWERLIFTING_WINDOW_DAYS * 2),
        _ => i64::from(days),
    }
}

struct MetricsInput {
    workouts: Vec<Workout>,
    training_type: TrainingType,
    units: Units,
}

async fn load_input(
    pool: &PgPool,
    user_id: Uuid,
    query: &MetricsQuery,
    fetch_days: impl FnOnce(TrainingType) -> i64,
    today: NaiveDate,
) -> Result<MetricsInput> {
    let preferences = UserRepository::new(pool).get_preferences(user_id).await?;
    let training_type = query.training_type.unwrap_or_else(|| preferences.training_type());

    let since = today - Duration::days(fetch_days(training_type));
    let workouts = WorkoutRepository::new(pool).list_since(user_id, since).await?;

    tracing::debug!(
        %user_id,
        training_type = training_type.as_str(),
        workouts = workouts.len(),
        %since,
        "Loaded metrics input"
    );

    Ok(MetricsInput {
        workouts,
        training_type,
        units: preferences.units(),
    })
}

pub async fn get_dashboard(
    pool: &PgPool,
    user_id: Uuid,
    query: &MetricsQuery,
    today: NaiveDate,
) -> Result<DashboardMetrics> {
    let days = query.days.unwrap_or(DEFAULT_DASHBOARD_DAYS);
    let input = load_input(pool, user_id, query, |t| dashboard_fetch_days(t, days), today).await?;

    Ok(compute_dashboard(
        &input.workouts,
        input.training_type,
        input.units,
        today,
        i64::from(days),
    ))
}

pub async fn get_progress(
    pool: &PgPool,
    user_id: Uuid,
    query: &MetricsQuery,
    today: NaiveDate,
) -> Result<ProgressMetrics> {
    let days = query.days.unwrap_or(DEFAULT_PROGRESS_DAYS);
    let input = load_input(pool, user_id, query, |_| i64::from(days), today).await?;

    Ok(compute_progress(&input.workouts, input.training_type, input.units, today))
}
