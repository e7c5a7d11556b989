use axum::{
    Router,
    routing::get,
};

use super::handlers::{create_workout, delete_workout, get_workout, list_workouts};
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/:workout_id", get(get_workout).delete(delete_workout))
}
