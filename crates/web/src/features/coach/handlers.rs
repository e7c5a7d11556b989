use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use coach::{ActionOutcome, ActionParser, AiAction, ChatMessage, ParsedResponse};
use serde::{Deserialize, Serialize};
use storage::Database;
use utoipa::ToSchema;
use validator::Validate;

use crate::app::AppState;
use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000, message = "message must be 1 to 4000 characters"))]
    pub message: String,

    /// Earlier turns of the conversation, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParseRequest {
    #[validate(length(min = 1, message = "reply is required"))]
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmActionRequest {
    pub action: AiAction,
}

#[utoipa::path(
    post,
    path = "/api/coach/chat",
    request_body = ChatRequest,
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Coach reply with the detected action", body = ParsedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid user id"),
        (status = 502, description = "The language model call failed"),
        (status = 503, description = "The AI coach is not configured")
    ),
    tag = "coach"
)]
pub async fn chat(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let parsed = services::chat(
        state.db.pool(),
        state.llm.as_deref(),
        user_id,
        &req.message,
        &req.history,
    )
    .await?;

    Ok(Json(parsed).into_response())
}

#[utoipa::path(
    post,
    path = "/api/coach/parse",
    request_body = ParseRequest,
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Action extracted from the supplied reply", body = ParsedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "coach"
)]
pub async fn parse_reply(Json(req): Json<ParseRequest>) -> Result<Response, WebError> {
    req.validate()?;

    Ok(Json(ActionParser::parse(&req.reply)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/coach/actions",
    request_body = ConfirmActionRequest,
    security(
        ("user_id" = [])
    ),
    responses(
        (status = 200, description = "Action saved", body = ActionOutcome),
        (status = 400, description = "Invalid or non-persistable action"),
        (status = 401, description = "Missing or invalid user id")
    ),
    tag = "coach"
)]
pub async fn confirm_action(
    State(db): State<Database>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<ConfirmActionRequest>,
) -> Result<Response, WebError> {
    let outcome =
        services::confirm_action(db.pool(), user_id, &req.action, Utc::now().date_naive()).await?;

    Ok(Json(outcome).into_response())
}
