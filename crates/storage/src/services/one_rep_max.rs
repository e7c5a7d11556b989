use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Lift;

/// Epley estimate: `weight x (1 + reps / 30)`, rounded to a whole number.
/// A single is already a true max and is returned as-is.
pub fn estimate_one_rep_max(weight: Decimal, reps: u32) -> Decimal {
    if reps == 1 {
        return weight;
    }

    let thirty = Decimal::from(30);
    (weight * (thirty + Decimal::from(reps)) / thirty)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Best known max for a lift. Completed singles win over any estimate;
/// without singles the best Epley estimate over completed sets is used.
pub fn best_one_rep_max(lift: &Lift) -> Decimal {
    if let Some(single) = best_single(lift) {
        return single.max(Decimal::ZERO);
    }

    lift.completed_sets()
        .map(|set| estimate_one_rep_max(set.weight, set.reps))
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Heaviest completed single, ignoring estimates.
pub fn best_single(lift: &Lift) -> Option<Decimal> {
    lift.completed_sets()
        .filter(|set| set.reps == 1)
        .map(|set| set.weight)
        .max()
}
