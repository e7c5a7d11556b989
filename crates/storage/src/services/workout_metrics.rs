use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::round_whole;
use crate::models::{DEFAULT_RPE, ExerciseEntry, Lift};

/// Sets at or above this RPE count as working sets.
const WORKING_SET_RPE: Decimal = DEFAULT_RPE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutMetrics {
    pub total_reps: i32,
    pub total_volume: i64,
    pub working_sets: i32,
    pub rpe_adjusted_volume: i64,
}

#[derive(Default)]
struct Accumulator {
    reps: u64,
    volume: Decimal,
    working_sets: u64,
    rpe_adjusted_volume: Decimal,
}

impl Accumulator {
    fn add(&mut self, sets: u32, reps_per_set: u32, weight: Decimal, rpe: Decimal) {
        let reps = u64::from(sets) * u64::from(reps_per_set);
        let volume = Decimal::from(reps) * weight;

        self.reps += reps;
        self.volume += volume;
        self.rpe_adjusted_volume += volume * rpe / Decimal::TEN;
        if rpe >= WORKING_SET_RPE {
            self.working_sets += u64::from(sets);
        }
    }

    fn finish(self) -> WorkoutMetrics {
        WorkoutMetrics {
            total_reps: i32::try_from(self.reps).unwrap_or(i32::MAX),
            total_volume: round_whole(self.volume),
            working_sets: i32::try_from(self.working_sets).unwrap_or(i32::MAX),
            rpe_adjusted_volume: round_whole(self.rpe_adjusted_volume),
        }
    }
}

/// Aggregates for a batch of exercise entries. Entries are expected to be
/// validated (positive sets and reps, non-negative weight).
pub fn compute_workout_metrics(exercises: &[ExerciseEntry]) -> WorkoutMetrics {
    let mut acc = Accumulator::default();
    for entry in exercises {
        acc.add(entry.sets, entry.reps, entry.weight, entry.effective_rpe());
    }
    acc.finish()
}

/// Same rules applied per completed set of stored lifts.
pub fn compute_lift_metrics(lifts: &[Lift]) -> WorkoutMetrics {
    let mut acc = Accumulator::default();
    for set in lifts.iter().flat_map(Lift::completed_sets) {
        acc.add(1, set.reps, set.weight, set.rpe.unwrap_or(DEFAULT_RPE));
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutSet;

    fn entry(name: &str, sets: u32, reps: u32, weight: i64, rpe: Option<i64>) -> ExerciseEntry {
        ExerciseEntry {
            exercise: name.to_string(),
            sets,
            reps,
            weight: Decimal::from(weight),
            rpe: rpe.map(Decimal::from),
            completed: None,
        }
    }

    #[test]
    fn test_bench_five_by_five() {
        let metrics = compute_workout_metrics(&[entry("bench", 5, 5, 100, Some(7))]);

        assert_eq!(
            metrics,
            WorkoutMetrics {
                total_reps: 25,
                total_volume: 2500,
                working_sets: 5,
                rpe_adjusted_volume: 1750,
            }
        );
    }

    #[test]
    fn test_sets_below_rpe_seven_are_not_working_sets() {
        let metrics = compute_workout_metrics(&[
            entry("Squat", 3, 5, 100, Some(6)),
            entry("Bench Press", 4, 8, 60, Some(7)),
        ]);

        assert_eq!(metrics.working_sets, 4);
        assert_eq!(metrics.total_reps, 15 + 32);
    }

    #[test]
    fn test_missing_rpe_defaults_to_seven() {
        let metrics = compute_workout_metrics(&[entry("Deadlift", 2, 3, 200, None)]);

        assert_eq!(metrics.working_sets, 2);
        assert_eq!(metrics.rpe_adjusted_volume, 840);
    }

    #[test]
    fn test_metrics_are_additive() {
        let a = entry("Squat", 3, 5, 120, Some(8));
        let b = entry("Row", 4, 10, 55, Some(6));

        let left = compute_workout_metrics(std::slice::from_ref(&a));
        let right = compute_workout_metrics(std::slice::from_ref(&b));
        let both = compute_workout_metrics(&[a, b]);

        assert_eq!(both.total_reps, left.total_reps + right.total_reps);
        assert_eq!(both.total_volume, left.total_volume + right.total_volume);
        assert_eq!(both.working_sets, left.working_sets + right.working_sets);
    }

    #[test]
    fn test_volume_rounds_half_away_from_zero() {
        let metrics = compute_workout_metrics(&[ExerciseEntry {
            exercise: "Curl".to_string(),
            sets: 1,
            reps: 1,
            weight: Decimal::new(125, 1),
            rpe: Some(Decimal::from(7)),
            completed: None,
        }]);

        assert_eq!(metrics.total_volume, 13);
    }

    #[test]
    fn test_lift_metrics_count_completed_sets_only() {
        let lifts = vec![Lift {
            exercise: "Squat".to_string(),
            sets: vec![
                WorkoutSet {
                    reps: 5,
                    weight: Decimal::from(100),
                    rpe: Some(Decimal::from(8)),
                    completed: true,
                },
                WorkoutSet {
                    reps: 5,
                    weight: Decimal::from(100),
                    rpe: Some(Decimal::from(6)),
                    completed: true,
                },
                WorkoutSet {
                    reps: 5,
                    weight: Decimal::from(100),
                    rpe: None,
                    completed: false,
                },
            ],
        }];

        let metrics = compute_lift_metrics(&lifts);
        assert_eq!(metrics.total_reps, 10);
        assert_eq!(metrics.total_volume, 1000);
        assert_eq!(metrics.working_sets, 1);
        assert_eq!(metrics.rpe_adjusted_volume, 700);
    }
}
