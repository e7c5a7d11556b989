use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        workout::{CreateWorkoutRequest, WorkoutResponse},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts",
    params(PaginationParams),
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Workouts retrieved successfully", body = PaginatedResponse<WorkoutResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "workouts"
)]
pub async fn list_workouts(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (workouts, total_items) = services::list_workouts(db.pool(), user_id, &pagination).await?;

    let response = PaginatedResponse::new(
        workouts.into_iter().map(WorkoutResponse::from).collect(),
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/{workout_id}",
    params(
        ("workout_id" = Uuid, Path, description = "Workout id")
    ),
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Workout found", body = WorkoutResponse),
        (status = 401, description = "Missing or invalid user id"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(workout_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let workout = services::get_workout(db.pool(), user_id, workout_id).await?;

    Ok(Json(WorkoutResponse::from(workout)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = CreateWorkoutRequest,
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 201, description = "Workout logged successfully", body = WorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateWorkoutRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let workout =
        services::create_workout(db.pool(), user_id, &req, Utc::now().date_naive()).await?;

    tracing::info!(%user_id, workout_id = %workout.workout_id, "Workout logged manually");

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{workout_id}",
    params(
        ("workout_id" = Uuid, Path, description = "Workout id")
    ),
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 204, description = "Workout deleted successfully"),
        (status = 401, description = "Missing or invalid user id"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(workout_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_workout(db.pool(), user_id, workout_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
