use axum::{Router, routing::get};

use super::handlers::{get_dashboard, get_progress};
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/progress", get(get_progress))
}
