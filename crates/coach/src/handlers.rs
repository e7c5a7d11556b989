use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::actions::{AiAction, PrAction, ProfileAction, WorkoutAction};
use crate::error::{CoachError, Result};
use crate::store::CoachStore;
use storage::models::{ExerciseEntry, NewWorkout};
use storage::services::personal_record::{PR_HISTORY_LIMIT, resolve_personal_record};

pub const DEFAULT_WORKOUT_NOTES: &str = "Logged via AI Coach";
pub const DEFAULT_SESSION_RPE: i16 = 7;
const PR_RPE: i64 = 10;

pub const WORKOUT_LOGGED_MESSAGE: &str = "✅ Workout logged! Check your dashboard and progress page to see updated stats. 💪";
pub const PROFILE_UPDATED_MESSAGE: &str = "✅ Profile updated! Check your settings page to see the changes.";

/// What happened when an action was confirmed, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionOutcome {
    pub action: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new_pr: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_best: Option<Decimal>,
}

fn display_weight(weight: Decimal) -> String {
    weight.normalize().to_string()
}

/// Materializes confirmed coach actions against a store.
pub struct ActionHandler<S> {
    store: S,
}

impl<S: CoachStore> ActionHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn handle(&self, user_id: Uuid, action: &AiAction, today: NaiveDate) -> Result<ActionOutcome> {
        action
            .validate()
            .map_err(|e| CoachError::ValidationError(e.to_string()))?;

        match action {
            AiAction::Workout(workout) => self.save_workout(user_id, workout, today).await,
            AiAction::Pr(pr) => self.save_pr(user_id, pr, today).await,
            AiAction::Profile(profile) => self.save_profile(user_id, profile).await,
            AiAction::Chat => Err(CoachError::ValidationError(
                "A chat reply has nothing to confirm".to_string(),
            )),
        }
    }

    pub async fn save_workout(&self, user_id: Uuid, action: &WorkoutAction, today: NaiveDate) -> Result<ActionOutcome> {
        if action.exercises.is_empty() {
            return Err(CoachError::ValidationError(
                "A workout needs at least one exercise".to_string(),
            ));
        }

        let notes = action
            .notes
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WORKOUT_NOTES.to_string());

        let workout = NewWorkout::from_exercises(
            user_id,
            action.date.unwrap_or(today),
            &action.exercises,
            Some(notes),
            Some(action.whole_session_rpe().unwrap_or(DEFAULT_SESSION_RPE)),
        );

        let saved = self.store.insert_workout(workout).await.inspect_err(|e| {
            tracing::error!(%user_id, "Failed to save workout: {}", e);
        })?;

        tracing::info!(
            %user_id,
            workout_id = %saved.workout_id,
            exercises = action.exercises.len(),
            total_volume = saved.total_volume,
            "Workout logged from coach action"
        );

        Ok(ActionOutcome {
            action: "workout".to_string(),
            message: WORKOUT_LOGGED_MESSAGE.to_string(),
            workout_id: Some(saved.workout_id),
            is_new_pr: None,
            previous_best: None,
        })
    }

    /// Resolves the claim against recent history, then always logs the lift
    /// as a one-rep RPE 10 workout. Concurrent claims are not serialized.
    pub async fn save_pr(&self, user_id: Uuid, action: &PrAction, today: NaiveDate) -> Result<ActionOutcome> {
        let history = self.store.recent_workouts(user_id, PR_HISTORY_LIMIT).await?;
        let resolution = resolve_personal_record(&action.exercise, action.weight, &history);

        let weight = display_weight(action.weight);
        let unit = action.unit.as_str();

        let entry = ExerciseEntry {
            exercise: action.exercise.clone(),
            sets: 1,
            reps: 1,
            weight: action.weight,
            rpe: Some(Decimal::from(PR_RPE)),
            completed: Some(true),
        };
        let workout = NewWorkout::from_exercises(
            user_id,
            today,
            std::slice::from_ref(&entry),
            Some(format!("🏆 New PR: {} {}{}", action.exercise, weight, unit)),
            Some(PR_RPE as i16),
        );

        let saved = self.store.insert_workout(workout).await.inspect_err(|e| {
            tracing::error!(%user_id, "Failed to save PR: {}", e);
        })?;

        tracing::info!(
            %user_id,
            exercise = %action.exercise,
            is_new_pr = resolution.is_new_pr,
            previous_best = %resolution.previous_best,
            "PR claim logged"
        );

        let message = if resolution.is_new_pr {
            let previous = if resolution.previous_best > Decimal::ZERO {
                format!(" Previous: {}{}", display_weight(resolution.previous_best), unit)
            } else {
                String::new()
            };
            format!("🎉 NEW PR LOGGED! {} {}{}!{} 🏆", action.exercise, weight, unit, previous)
        } else {
            format!("Logged your {} workout. Keep pushing! 💪", action.exercise)
        };

        Ok(ActionOutcome {
            action: "pr".to_string(),
            message,
            workout_id: Some(saved.workout_id),
            is_new_pr: Some(resolution.is_new_pr),
            previous_best: Some(resolution.previous_best),
        })
    }

    pub async fn save_profile(&self, user_id: Uuid, action: &ProfileAction) -> Result<ActionOutcome> {
        if action.updates.is_empty() {
            return Err(CoachError::ValidationError(
                "A profile update needs at least one field".to_string(),
            ));
        }

        let mut preferences = self.store.profile(user_id).await?.preferences;
        preferences.apply(&action.updates);

        self.store.save_preferences(user_id, &preferences).await.inspect_err(|e| {
            tracing::error!(%user_id, "Failed to update profile: {}", e);
        })?;

        tracing::info!(%user_id, "Profile updated from coach action");

        Ok(ActionOutcome {
            action: "profile".to_string(),
            message: PROFILE_UPDATED_MESSAGE.to_string(),
            workout_id: None,
            is_new_pr: None,
            previous_best: None,
        })
    }
}
