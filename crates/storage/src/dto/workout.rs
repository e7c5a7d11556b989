use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::exercise::{validate_rpe, validate_weight};
use crate::models::{Lift, Workout, WorkoutSet};

/// One set in a manually logged workout
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetInput {
    #[validate(range(min = 1, max = 1000, message = "reps must be between 1 and 1000"))]
    pub reps: u32,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Decimal,

    #[validate(custom(function = "validate_rpe"))]
    pub rpe: Option<Decimal>,

    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LiftInput {
    #[validate(length(min = 1, max = 255, message = "Exercise name is required"))]
    pub exercise: String,

    #[validate(length(min = 1, max = 100, message = "A lift needs 1 to 100 sets"), nested)]
    pub sets: Vec<SetInput>,
}

/// Request payload for logging a workout by hand
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWorkoutRequest {
    /// Defaults to today.
    pub date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50, message = "A workout needs 1 to 50 lifts"), nested)]
    pub lifts: Vec<LiftInput>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[validate(range(min = 1, max = 10, message = "session_rpe must be between 1 and 10"))]
    pub session_rpe: Option<i16>,
}

impl CreateWorkoutRequest {
    pub fn to_lifts(&self) -> Vec<Lift> {
        self.lifts
            .iter()
            .map(|lift| Lift {
                exercise: lift.exercise.trim().to_string(),
                sets: lift
                    .sets
                    .iter()
                    .map(|set| WorkoutSet {
                        reps: set.reps,
                        weight: set.weight,
                        rpe: set.rpe,
                        completed: set.completed,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Workout as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutResponse {
    pub workout_id: Uuid,
    pub date: NaiveDate,
    pub lifts: Vec<Lift>,
    pub notes: Option<String>,
    pub session_rpe: Option<i16>,
    pub total_reps: i32,
    pub working_sets: i32,
    pub total_volume: i64,
    pub rpe_adjusted_volume: i64,
    pub created_at: NaiveDateTime,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            workout_id: workout.workout_id,
            date: workout.date,
            lifts: workout.lifts,
            notes: workout.notes,
            session_rpe: workout.session_rpe,
            total_reps: workout.total_reps,
            working_sets: workout.working_sets,
            total_volume: workout.total_volume,
            rpe_adjusted_volume: workout.rpe_adjusted_volume,
            created_at: workout.created_at,
        }
    }
}
