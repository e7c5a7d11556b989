use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::metrics::{DashboardMetrics, MetricsQuery, ProgressMetrics},
};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/metrics/dashboard",
    params(MetricsQuery),
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Dashboard metrics for the training type", body = DashboardMetrics),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "metrics"
)]
pub async fn get_dashboard(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<MetricsQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let metrics = services::get_dashboard(db.pool(), user_id, &query, Utc::now().date_naive()).await?;

    Ok(Json(metrics).into_response())
}

#[utoipa::path(
    get,
    path = "/api/metrics/progress",
    params(MetricsQuery),
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Progress page metrics", body = ProgressMetrics),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "metrics"
)]
pub async fn get_progress(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<MetricsQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let metrics = services::get_progress(db.pool(), user_id, &query, Utc::now().date_naive()).await?;

    Ok(Json(metrics).into_response())
}
