use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::workout::{Lift, WorkoutSet};

/// RPE assumed for any set logged without one.
pub const DEFAULT_RPE: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Heaviest load accepted for a single set, in either unit.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// One line of a logged session: `sets x reps @ weight`, as produced by the
/// coach or by a quick manual entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExerciseEntry {
    #[validate(length(min = 1, max = 255, message = "Exercise name is required"))]
    pub exercise: String,

    #[validate(range(min = 1, max = 100, message = "sets must be between 1 and 100"))]
    pub sets: u32,

    #[validate(range(min = 1, max = 1000, message = "reps must be between 1 and 1000"))]
    pub reps: u32,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_rpe"))]
    pub rpe: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ExerciseEntry {
    pub fn effective_rpe(&self) -> Decimal {
        self.rpe.unwrap_or(DEFAULT_RPE)
    }

    /// Expands the entry into a stored lift with one set record per set.
    /// Callers validate first; `sets` is bounded there.
    pub fn to_lift(&self) -> Lift {
        let set = WorkoutSet {
            reps: self.reps,
            weight: self.weight,
            rpe: Some(self.effective_rpe()),
            completed: self.completed.unwrap_or(true),
        };

        Lift {
            exercise: self.exercise.clone(),
            sets: vec![set; self.sets as usize],
        }
    }
}

pub fn validate_weight(weight: &Decimal) -> Result<(), validator::ValidationError> {
    if weight.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_weight"));
    }
    if *weight > MAX_WEIGHT {
        return Err(validator::ValidationError::new("weight_too_large"));
    }
    Ok(())
}

pub fn validate_rpe(rpe: &Decimal) -> Result<(), validator::ValidationError> {
    if *rpe < Decimal::ONE || *rpe > Decimal::TEN {
        return Err(validator::ValidationError::new("rpe_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sets: u32, reps: u32, weight: i64, rpe: Option<i64>) -> ExerciseEntry {
        ExerciseEntry {
            exercise: "Squat".to_string(),
            sets,
            reps,
            weight: Decimal::from(weight),
            rpe: rpe.map(Decimal::from),
            completed: None,
        }
    }

    #[test]
    fn test_to_lift_expands_sets_with_default_rpe() {
        let lift = entry(3, 5, 140, None).to_lift();

        assert_eq!(lift.exercise, "Squat");
        assert_eq!(lift.sets.len(), 3);
        assert!(lift.sets.iter().all(|s| s.completed));
        assert!(lift.sets.iter().all(|s| s.rpe == Some(DEFAULT_RPE)));
        assert!(lift.sets.iter().all(|s| s.reps == 5));
    }

    #[test]
    fn test_validation_rejects_negative_weight_and_zero_sets() {
        assert!(entry(3, 5, 100, Some(8)).validate().is_ok());
        assert!(entry(3, 5, -5, Some(8)).validate().is_err());
        assert!(entry(0, 5, 100, Some(8)).validate().is_err());
        assert!(entry(3, 0, 100, Some(8)).validate().is_err());
    }

    #[test]
    fn test_validation_bounds_set_rep_and_weight_counts() {
        assert!(entry(100, 1000, 500, None).validate().is_ok());
        assert!(entry(101, 5, 100, None).validate().is_err());
        assert!(entry(4_000_000_000, 5, 100, None).validate().is_err());
        assert!(entry(3, 1001, 100, None).validate().is_err());
        assert!(entry(3, 5, 10_001, None).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_rpe_out_of_range() {
        assert!(entry(1, 1, 100, Some(10)).validate().is_ok());
        assert!(entry(1, 1, 100, Some(11)).validate().is_err());
        assert!(entry(1, 1, 100, Some(0)).validate().is_err());
    }
}
