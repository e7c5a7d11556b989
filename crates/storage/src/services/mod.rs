pub mod classification;
pub mod dashboard;
pub mod one_rep_max;
pub mod personal_record;
pub mod progress;
pub mod workout_metrics;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to a whole number.
pub fn round_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Rounds half away from zero to one decimal place.
pub fn round_tenth(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
