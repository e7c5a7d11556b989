use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::exercise::ExerciseEntry;
use crate::services::workout_metrics::{WorkoutMetrics, compute_lift_metrics, compute_workout_metrics};

/// A single performed set. Rows written before `completed` existed count as done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<Decimal>,
    #[serde(default = "completed_by_default")]
    pub completed: bool,
}

fn completed_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Lift {
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
}

impl Lift {
    pub fn completed_sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sets.iter().filter(|set| set.completed)
    }

    /// Sum of `weight x reps` over completed sets.
    pub fn volume(&self) -> Decimal {
        self.completed_sets()
            .map(|set| set.weight * Decimal::from(set.reps))
            .sum()
    }

    pub fn completed_reps(&self) -> u32 {
        self.completed_sets().map(|set| set.reps).sum()
    }

    pub fn max_completed_reps(&self) -> u32 {
        self.completed_sets().map(|set| set.reps).max().unwrap_or(0)
    }

    pub fn matches(&self, keyword: &str) -> bool {
        self.exercise.to_lowercase().contains(keyword)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Workout {
    pub workout_id: Uuid,
    pub user_id: Uuid,
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

impl Workout {
    pub fn volume(&self) -> Decimal {
        self.lifts.iter().map(Lift::volume).sum()
    }
}

/// A workout ready to be inserted. The aggregates are snapshots taken here
/// and are never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub lifts: Vec<Lift>,
    pub notes: Option<String>,
    pub session_rpe: Option<i16>,
    pub metrics: WorkoutMetrics,
}

impl NewWorkout {
    pub fn from_exercises(
        user_id: Uuid,
        date: NaiveDate,
        exercises: &[ExerciseEntry],
        notes: Option<String>,
        session_rpe: Option<i16>,
    ) -> Self {
        Self {
            user_id,
            date,
            lifts: exercises.iter().map(ExerciseEntry::to_lift).collect(),
            notes,
            session_rpe,
            metrics: compute_workout_metrics(exercises),
        }
    }

    pub fn from_lifts(
        user_id: Uuid,
        date: NaiveDate,
        lifts: Vec<Lift>,
        notes: Option<String>,
        session_rpe: Option<i16>,
    ) -> Self {
        let metrics = compute_lift_metrics(&lifts);
        Self {
            user_id,
            date,
            lifts,
            notes,
            session_rpe,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(reps: u32, weight: i64, completed: bool) -> WorkoutSet {
        WorkoutSet {
            reps,
            weight: Decimal::from(weight),
            rpe: None,
            completed,
        }
    }

    #[test]
    fn test_lift_volume_ignores_incomplete_sets() {
        let lift = Lift {
            exercise: "Bench Press".to_string(),
            sets: vec![set(5, 100, true), set(5, 100, false), set(3, 110, true)],
        };

        assert_eq!(lift.volume(), Decimal::from(830));
        assert_eq!(lift.completed_reps(), 8);
        assert_eq!(lift.max_completed_reps(), 5);
    }

    #[test]
    fn test_set_without_completed_flag_counts_as_done() {
        let set: WorkoutSet = serde_json::from_str(r#"{"reps":5,"weight":100}"#).unwrap();
        assert!(set.completed);
        assert_eq!(set.rpe, None);
    }

    #[test]
    fn test_new_workout_from_exercises_snapshots_metrics() {
        let exercises = vec![ExerciseEntry {
            exercise: "Bench Press".to_string(),
            sets: 5,
            reps: 5,
            weight: Decimal::from(100),
            rpe: Some(Decimal::from(7)),
            completed: Some(true),
        }];

        let workout = NewWorkout::from_exercises(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            &exercises,
            None,
            Some(7),
        );

        assert_eq!(workout.lifts.len(), 1);
        assert_eq!(workout.lifts[0].sets.len(), 5);
        assert_eq!(workout.metrics.total_volume, 2500);
        assert_eq!(workout.metrics.working_sets, 5);
    }
}
