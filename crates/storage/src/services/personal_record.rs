use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::one_rep_max::best_one_rep_max;
use crate::models::Workout;

/// How many recent workouts are scanned for a previous best.
pub const PR_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrResolution {
    pub is_new_pr: bool,
    /// Zero when the exercise has no history.
    pub previous_best: Decimal,
}

/// Compares a claimed max against the best known max for `exercise` in the
/// most recent `PR_HISTORY_LIMIT` workouts (`history` is newest first).
pub fn resolve_personal_record(exercise: &str, claimed: Decimal, history: &[Workout]) -> PrResolution {
    let wanted = exercise.trim().to_lowercase();

    let previous_best = history
        .iter()
        .take(PR_HISTORY_LIMIT)
        .flat_map(|workout| workout.lifts.iter())
        .filter(|lift| lift.exercise.trim().to_lowercase() == wanted)
        .map(best_one_rep_max)
        .max()
        .unwrap_or(Decimal::ZERO);

    PrResolution {
        is_new_pr: claimed > previous_best,
        previous_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lift, WorkoutSet};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn workout(day: u32, exercise: &str, reps: u32, weight: i64) -> Workout {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        Workout {
            workout_id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            lifts: vec![Lift {
                exercise: exercise.to_string(),
                sets: vec![WorkoutSet {
                    reps,
                    weight: Decimal::from(weight),
                    rpe: None,
                    completed: true,
                }],
            }],
            notes: None,
            session_rpe: None,
            total_reps: 0,
            working_sets: 0,
            total_volume: 0,
            rpe_adjusted_volume: 0,
            created_at: date.and_hms_opt(12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_no_history_is_always_a_pr() {
        let resolution = resolve_personal_record("Squat", Decimal::from(60), &[]);
        assert!(resolution.is_new_pr);
        assert_eq!(resolution.previous_best, Decimal::ZERO);
    }

    #[test]
    fn test_matches_exercise_case_insensitively() {
        let history = vec![workout(2, "squat", 1, 140), workout(1, "Bench Press", 1, 200)];

        let resolution = resolve_personal_record("SQUAT", Decimal::from(145), &history);
        assert!(resolution.is_new_pr);
        assert_eq!(resolution.previous_best, Decimal::from(140));
    }

    #[test]
    fn test_equal_claim_is_not_a_pr() {
        let history = vec![workout(1, "Squat", 1, 140)];

        let resolution = resolve_personal_record("Squat", Decimal::from(140), &history);
        assert!(!resolution.is_new_pr);
    }

    #[test]
    fn test_uses_estimate_when_no_single_exists() {
        // 100 x 5 -> 117
        let history = vec![workout(1, "Bench Press", 5, 100)];

        let resolution = resolve_personal_record("Bench Press", Decimal::from(115), &history);
        assert!(!resolution.is_new_pr);
        assert_eq!(resolution.previous_best, Decimal::from(117));
    }

    #[test]
    fn test_only_scans_the_history_limit() {
        let mut history: Vec<Workout> = (0..PR_HISTORY_LIMIT).map(|_| workout(2, "Squat", 1, 100)).collect();
        history.push(workout(1, "Squat", 1, 300));

        let resolution = resolve_personal_record("Squat", Decimal::from(120), &history);
        assert!(resolution.is_new_pr);
        assert_eq!(resolution.previous_best, Decimal::from(100));
    }
}
