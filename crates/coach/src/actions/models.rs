use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use storage::models::exercise::{validate_rpe, validate_weight};
use storage::services::round_whole;
use storage::models::{ExerciseEntry, PreferencesPatch, Units};

/// Structured action carried by the trailing `ACTION:` line of a coach reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AiAction {
    Workout(WorkoutAction),
    Pr(PrAction),
    Profile(ProfileAction),
    Chat,
}

impl AiAction {
    pub fn kind(&self) -> &'static str {
        match self {
            AiAction::Workout(_) => "workout",
            AiAction::Pr(_) => "pr",
            AiAction::Profile(_) => "profile",
            AiAction::Chat => "chat",
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            AiAction::Workout(action) => action.validate(),
            AiAction::Pr(action) => action.validate(),
            AiAction::Profile(_) | AiAction::Chat => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct WorkoutAction {
    #[validate(length(max = 50, message = "A workout holds at most 50 exercises"), nested)]
    pub exercises: Vec<ExerciseEntry>,

    /// May be fractional as sent by the model; rounded when stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_rpe"))]
    pub session_rpe: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl WorkoutAction {
    /// Session RPE rounded half away from zero, as stored on the workout.
    pub fn whole_session_rpe(&self) -> Option<i16> {
        self.session_rpe
            .and_then(|rpe| i16::try_from(round_whole(rpe)).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PrAction {
    #[validate(length(min = 1, max = 255, message = "Exercise name is required"))]
    pub exercise: String,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Decimal,

    #[serde(default)]
    pub unit: Units,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_pr: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileAction {
    #[serde(default)]
    pub updates: PreferencesPatch,
}

/// Result of scanning a coach reply for an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParsedResponse {
    pub action: AiAction,
    /// Reply text with the action line removed.
    pub message: String,
    pub confidence: f64,
    pub raw_response: String,
}
