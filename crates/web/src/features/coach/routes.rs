use axum::{Router, routing::post};

use super::handlers::{chat, confirm_action, parse_reply};
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/parse", post(parse_reply))
        .route("/actions", post(confirm_action))
}
