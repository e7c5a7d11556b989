pub mod coach;
pub mod metrics;
pub mod workouts;
