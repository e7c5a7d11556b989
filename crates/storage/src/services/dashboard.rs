use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::classification::{
    BODYWEIGHT_KEYWORDS, FUNCTIONAL_KEYWORDS, MuscleGroup, PowerLift, average_session_rpe, capitalize, lifts,
    match_keyword,
};
use super::one_rep_max::best_one_rep_max;
use super::{round_tenth, round_whole};
use crate::dto::metrics::{DashboardMetrics, Highlight, MetricValue, PrimaryMetric, SecondaryMetric};
use crate::models::{TrainingType, Units, Workout};

/// Days counted as "recent" for powerlifting maxes; the comparison window is
/// the same length immediately before it.
pub const POWERLIFTING_WINDOW_DAYS: i64 = 30;

/// Builds the dashboard bundle. Aggregates cover the last `window_days`
/// before `today`; powerlifting maxes read the whole slice, split into the
/// recent and older windows anchored on `today`.
pub fn compute_dashboard(
    workouts: &[Workout],
    training_type: TrainingType,
    units: Units,
    today: NaiveDate,
    window_days: i64,
) -> DashboardMetrics {
    let window_start = today - Duration::days(window_days);
    let windowed: Vec<Workout> = workouts
        .iter()
        .filter(|workout| workout.date >= window_start)
        .cloned()
        .collect();

    let (primary_metric, secondary_metrics, highlights) = match training_type {
        TrainingType::Powerlifting => powerlifting(&windowed, workouts, units, today),
        TrainingType::Bodybuilding => bodybuilding(&windowed, units),
        TrainingType::Crossfit => crossfit(&windowed),
        TrainingType::Calisthenics => calisthenics(&windowed),
        TrainingType::GeneralStrength | TrainingType::Endurance | TrainingType::FunctionalFitness => {
            general(&windowed, units)
        }
    };

    DashboardMetrics {
        training_type,
        units,
        primary_metric,
        secondary_metrics,
        highlights,
    }
}

type Sections = (PrimaryMetric, Vec<SecondaryMetric>, Vec<Highlight>);

fn primary(label: &str, value: impl Into<MetricValue>, unit: &str, description: &str) -> PrimaryMetric {
    PrimaryMetric {
        label: label.to_string(),
        value: value.into(),
        unit: unit.to_string(),
        description: description.to_string(),
    }
}

/// Whole weights stay integers, fractional ones keep their decimals.
pub(crate) fn weight_value(weight: Decimal) -> MetricValue {
    if weight.fract().is_zero() {
        MetricValue::Integer(round_whole(weight))
    } else {
        MetricValue::Decimal(weight.normalize().to_f64().unwrap_or(0.0))
    }
}

fn intensity(workouts: &[Workout]) -> SecondaryMetric {
    SecondaryMetric::new("Avg Intensity", round_tenth(average_session_rpe(workouts)), "RPE")
}

fn frequency(workouts: &[Workout]) -> SecondaryMetric {
    SecondaryMetric::new("Training Frequency", workouts.len() as i64, "sessions")
}

#[derive(Default, Clone, Copy)]
struct PowerMaxes {
    squat: Decimal,
    bench: Decimal,
    deadlift: Decimal,
}

impl PowerMaxes {
    fn slot(&mut self, lift: PowerLift) -> &mut Decimal {
        match lift {
            PowerLift::Squat => &mut self.squat,
            PowerLift::Bench => &mut self.bench,
            PowerLift::Deadlift => &mut self.deadlift,
        }
    }

    fn record(&mut self, lift: PowerLift, best: Decimal) {
        let slot = self.slot(lift);
        if best > *slot {
            *slot = best;
        }
    }

    fn total(&self) -> Decimal {
        self.squat + self.bench + self.deadlift
    }

    fn is_complete(&self) -> bool {
        !self.squat.is_zero() && !self.bench.is_zero() && !self.deadlift.is_zero()
    }
}

fn powerlifting(workouts: &[Workout], history: &[Workout], units: Units, today: NaiveDate) -> Sections {
    let recent_start = today - Duration::days(POWERLIFTING_WINDOW_DAYS);
    let older_start = today - Duration::days(POWERLIFTING_WINDOW_DAYS * 2);

    let mut recent = PowerMaxes::default();
    let mut older = PowerMaxes::default();

    for workout in history {
        let bucket = if workout.date >= recent_start {
            &mut recent
        } else if workout.date >= older_start {
            &mut older
        } else {
            continue;
        };

        for lift in &workout.lifts {
            let Some(kind) = PowerLift::classify(&lift.exercise) else {
                continue;
            };
            let best = best_one_rep_max(lift);
            if best > Decimal::ZERO {
                bucket.record(kind, best);
            }
        }
    }

    let total = recent.total();
    let progress = if older.is_complete() {
        total - older.total()
    } else {
        Decimal::ZERO
    };

    let progress_value = if progress > Decimal::ZERO {
        MetricValue::Text(format!("+{}", progress.normalize()))
    } else {
        weight_value(progress)
    };

    let unit = units.as_str();
    (
        primary("Competition Total", weight_value(total), unit, "Squat + Bench + Deadlift"),
        vec![
            intensity(workouts),
            frequency(workouts),
            SecondaryMetric {
                label: "PR Progress".to_string(),
                value: progress_value,
                unit: unit.to_string(),
            },
        ],
        vec![
            Highlight::new("Squat", weight_value(recent.squat), unit),
            Highlight::new("Bench", weight_value(recent.bench), unit),
            Highlight::new("Deadlift", weight_value(recent.deadlift), unit),
        ],
    )
}

fn bodybuilding(workouts: &[Workout], units: Units) -> Sections {
    let mut total_volume = Decimal::ZERO;
    let mut total_reps: u64 = 0;
    let mut groups: HashMap<MuscleGroup, Decimal> = HashMap::new();

    for lift in lifts(workouts) {
        let volume = lift.volume();
        total_volume += volume;
        total_reps += u64::from(lift.completed_reps());

        if let Some(group) = MuscleGroup::classify(&lift.exercise) {
            *groups.entry(group).or_default() += volume;
        }
    }

    // Ties go to the group listed first.
    let top_group = MuscleGroup::ALL
        .into_iter()
        .filter_map(|group| groups.get(&group).map(|volume| (group, *volume)))
        .fold(None::<(MuscleGroup, Decimal)>, |best, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    let unit = units.as_str();
    let volume = round_whole(total_volume);
    let top_highlight = match top_group {
        Some((group, volume)) => Highlight::new(group.as_str(), round_whole(volume), unit),
        None => Highlight::new("N/A", 0_i64, unit),
    };

    (
        primary("Total Volume", volume, unit, "Across the selected window"),
        vec![
            intensity(workouts),
            frequency(workouts),
            SecondaryMetric::new("Total Reps", total_reps as i64, "reps"),
        ],
        vec![
            top_highlight,
            Highlight::new("Total Volume", volume, unit),
            Highlight::new("Workouts", workouts.len() as i64, "sessions"),
        ],
    )
}

fn consistency_label(sessions: usize) -> &'static str {
    match sessions {
        n if n >= 12 => "Excellent",
        n if n >= 8 => "Good",
        _ => "Building",
    }
}

fn crossfit(workouts: &[Workout]) -> Sections {
    let sessions = workouts.len() as i64;
    let functional = lifts(workouts)
        .filter(|lift| match_keyword(&lift.exercise, FUNCTIONAL_KEYWORDS).is_some())
        .count() as i64;
    let avg = round_tenth(average_session_rpe(workouts));

    (
        primary("Workout Frequency", sessions, "WODs", "Across the selected window"),
        vec![
            SecondaryMetric::new("Avg Intensity", avg, "RPE"),
            SecondaryMetric::new("Functional Moves", functional, "exercises"),
            SecondaryMetric::new("Consistency", consistency_label(workouts.len()), ""),
        ],
        vec![
            Highlight::new("WODs Completed", sessions, "sessions"),
            Highlight::new("Functional Exercises", functional, "exercises"),
            Highlight::new("Avg Intensity", avg, "RPE"),
        ],
    )
}

/// Best rep count per bodyweight keyword, sorted by reps (ties keep keyword order).
pub(crate) fn rep_records(workouts: &[Workout], keywords: &[&'static str]) -> Vec<(&'static str, u32)> {
    let mut best: HashMap<&'static str, u32> = HashMap::new();

    for lift in lifts(workouts) {
        let Some(keyword) = match_keyword(&lift.exercise, keywords) else {
            continue;
        };
        let reps = lift.max_completed_reps();
        if reps > 0 {
            let entry = best.entry(keyword).or_default();
            *entry = (*entry).max(reps);
        }
    }

    let mut records: Vec<(&'static str, u32)> = keywords
        .iter()
        .filter_map(|kw| best.get(kw).map(|reps| (*kw, *reps)))
        .collect();
    records.sort_by(|a, b| b.1.cmp(&a.1));
    records
}

fn calisthenics(workouts: &[Workout]) -> Sections {
    let records = rep_records(workouts, BODYWEIGHT_KEYWORDS);

    let headline = match records.first() {
        Some((keyword, reps)) => primary(
            &format!("{} PR", capitalize(keyword)),
            i64::from(*reps),
            "reps",
            "Best bodyweight exercise",
        ),
        None => primary("Bodyweight Training", 0_i64, "reps", "Best bodyweight exercise"),
    };

    (
        headline,
        vec![
            intensity(workouts),
            frequency(workouts),
            SecondaryMetric::new("Bodyweight PRs", records.len() as i64, "exercises"),
        ],
        records
            .iter()
            .take(3)
            .map(|(keyword, reps)| Highlight::new(&capitalize(keyword), i64::from(*reps), "reps"))
            .collect(),
    )
}

/// Exercise names ranked by how many sessions logged them. Ties keep the
/// order in which the names were first seen.
pub(crate) fn exercise_frequency(workouts: &[Workout]) -> Vec<(String, u32)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for lift in lifts(workouts) {
        let count = counts.entry(lift.exercise.clone()).or_insert_with(|| {
            order.push(lift.exercise.clone());
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(String, u32)> = order
        .into_iter()
        .map(|name| {
            let count = counts.get(&name).copied().unwrap_or(0);
            (name, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn general(workouts: &[Workout], units: Units) -> Sections {
    let mut total_volume = Decimal::ZERO;
    let mut total_reps: u64 = 0;
    for lift in lifts(workouts) {
        total_volume += lift.volume();
        total_reps += u64::from(lift.completed_reps());
    }

    let top_exercise = exercise_frequency(workouts)
        .into_iter()
        .next()
        .map(|(name, _)| name)
        .unwrap_or_else(|| "N/A".to_string());

    let unit = units.as_str();
    let volume = round_whole(total_volume);
    (
        primary("Total Volume", volume, unit, "Across the selected window"),
        vec![
            intensity(workouts),
            frequency(workouts),
            SecondaryMetric::new("Top Exercise", top_exercise, ""),
        ],
        vec![
            Highlight::new("Total Volume", volume, unit),
            Highlight::new("Total Reps", total_reps as i64, "reps"),
            Highlight::new("Workouts", workouts.len() as i64, "sessions"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lift, WorkoutSet};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn lift(exercise: &str, sets: &[(u32, i64)]) -> Lift {
        Lift {
            exercise: exercise.to_string(),
            sets: sets
                .iter()
                .map(|(reps, weight)| WorkoutSet {
                    reps: *reps,
                    weight: Decimal::from(*weight),
                    rpe: None,
                    completed: true,
                })
                .collect(),
        }
    }

    fn workout(days_ago: i64, session_rpe: Option<i16>, lifts: Vec<Lift>) -> Workout {
        let date = today() - Duration::days(days_ago);
        Workout {
            workout_id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            lifts,
            notes: None,
            session_rpe,
            total_reps: 0,
            working_sets: 0,
            total_volume: 0,
            rpe_adjusted_volume: 0,
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn secondary<'a>(metrics: &'a DashboardMetrics, label: &str) -> &'a MetricValue {
        &metrics
            .secondary_metrics
            .iter()
            .find(|m| m.label == label)
            .unwrap()
            .value
    }

    #[test]
    fn test_branch_headlines() {
        let workouts = vec![workout(1, Some(8), vec![lift("Squat", &[(5, 100)])])];

        let cases = [
            (TrainingType::Powerlifting, "Competition Total"),
            (TrainingType::Bodybuilding, "Total Volume"),
            (TrainingType::Crossfit, "Workout Frequency"),
            (TrainingType::GeneralStrength, "Total Volume"),
            (TrainingType::Endurance, "Total Volume"),
            (TrainingType::FunctionalFitness, "Total Volume"),
        ];
        for (training_type, label) in cases {
            let metrics = compute_dashboard(&workouts, training_type, Units::Kg, today(), 30);
            assert_eq!(metrics.primary_metric.label, label, "{training_type:?}");
            assert_eq!(metrics.secondary_metrics.len(), 3);
        }
    }

    #[test]
    fn test_powerlifting_total_prefers_singles() {
        let workouts = vec![
            workout(3, Some(9), vec![lift("Squat", &[(5, 140), (1, 150)])]),
            workout(5, None, vec![lift("Bench Press", &[(3, 100)])]),
            workout(7, Some(8), vec![lift("Deadlift", &[(1, 200)])]),
        ];

        let metrics = compute_dashboard(&workouts, TrainingType::Powerlifting, Units::Kg, today(), 30);

        // 150 + 110 + 200
        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(460));
        assert_eq!(metrics.highlights[1].value, MetricValue::Integer(110));
        assert_eq!(secondary(&metrics, "Avg Intensity"), &MetricValue::Decimal(8.5));
        assert_eq!(secondary(&metrics, "Training Frequency"), &MetricValue::Integer(3));
    }

    #[test]
    fn test_powerlifting_progress_requires_complete_older_window() {
        let recent = vec![lift("Squat", &[(1, 150)]), lift("Bench", &[(1, 100)]), lift("Deadlift", &[(1, 200)])];

        let partial_older = vec![
            workout(2, None, recent.clone()),
            workout(40, None, vec![lift("Squat", &[(1, 140)]), lift("Bench", &[(1, 95)])]),
        ];
        let metrics = compute_dashboard(&partial_older, TrainingType::Powerlifting, Units::Kg, today(), 30);
        assert_eq!(secondary(&metrics, "PR Progress"), &MetricValue::Integer(0));

        let full_older = vec![
            workout(2, None, recent),
            workout(
                40,
                None,
                vec![lift("Squat", &[(1, 140)]), lift("Bench", &[(1, 95)]), lift("Deadlift", &[(1, 190)])],
            ),
        ];
        let metrics = compute_dashboard(&full_older, TrainingType::Powerlifting, Units::Kg, today(), 30);
        assert_eq!(secondary(&metrics, "PR Progress"), &MetricValue::Text("+25".to_string()));
    }

    #[test]
    fn test_powerlifting_aggregates_stay_inside_requested_window() {
        let workouts = vec![
            workout(2, Some(6), vec![lift("Squat", &[(1, 150)])]),
            workout(20, Some(8), vec![lift("Bench", &[(1, 100)])]),
            workout(45, Some(10), vec![lift("Deadlift", &[(1, 200)])]),
        ];

        let metrics = compute_dashboard(&workouts, TrainingType::Powerlifting, Units::Kg, today(), 7);

        assert_eq!(secondary(&metrics, "Training Frequency"), &MetricValue::Integer(1));
        assert_eq!(secondary(&metrics, "Avg Intensity"), &MetricValue::Decimal(6.0));
        // maxes still come from the 30-day recent window
        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(250));

        let metrics = compute_dashboard(&workouts, TrainingType::Powerlifting, Units::Kg, today(), 30);
        assert_eq!(secondary(&metrics, "Training Frequency"), &MetricValue::Integer(2));
        assert_eq!(secondary(&metrics, "Avg Intensity"), &MetricValue::Decimal(7.0));
    }

    #[test]
    fn test_workouts_beyond_sixty_days_are_ignored_for_maxes() {
        let workouts = vec![workout(75, None, vec![lift("Squat", &[(1, 300)])])];
        let metrics = compute_dashboard(&workouts, TrainingType::Powerlifting, Units::Lbs, today(), 30);

        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(0));
        assert_eq!(metrics.primary_metric.unit, "lbs");
    }

    #[test]
    fn test_bodybuilding_top_group_and_unmatched_volume() {
        let workouts = vec![workout(
            1,
            None,
            vec![
                lift("Incline Bench", &[(10, 60)]),
                lift("Barbell Row", &[(10, 80)]),
                lift("Sled Push", &[(1, 1000)]),
            ],
        )];

        let metrics = compute_dashboard(&workouts, TrainingType::Bodybuilding, Units::Kg, today(), 30);

        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(600 + 800 + 1000));
        assert_eq!(metrics.highlights[0].title, "Back");
        assert_eq!(metrics.highlights[0].value, MetricValue::Integer(800));
        assert_eq!(secondary(&metrics, "Total Reps"), &MetricValue::Integer(21));
    }

    #[test]
    fn test_bodybuilding_without_groups_shows_placeholder() {
        let metrics = compute_dashboard(&[], TrainingType::Bodybuilding, Units::Kg, today(), 30);
        assert_eq!(metrics.highlights[0].title, "N/A");
        assert_eq!(secondary(&metrics, "Avg Intensity"), &MetricValue::Decimal(0.0));
    }

    #[test]
    fn test_crossfit_functional_count_and_consistency() {
        let workouts: Vec<Workout> = (0..8)
            .map(|day| workout(day, Some(7), vec![lift("Burpee", &[(20, 0)]), lift("Back Squat", &[(5, 80)])]))
            .collect();

        let metrics = compute_dashboard(&workouts, TrainingType::Crossfit, Units::Kg, today(), 30);

        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(8));
        assert_eq!(metrics.primary_metric.unit, "WODs");
        assert_eq!(secondary(&metrics, "Functional Moves"), &MetricValue::Integer(8));
        assert_eq!(secondary(&metrics, "Consistency"), &MetricValue::Text("Good".to_string()));
    }

    #[test]
    fn test_consistency_labels() {
        assert_eq!(consistency_label(12), "Excellent");
        assert_eq!(consistency_label(8), "Good");
        assert_eq!(consistency_label(7), "Building");
    }

    #[test]
    fn test_calisthenics_rep_prs() {
        let workouts = vec![
            workout(1, None, vec![lift("Pull-ups", &[(8, 0), (12, 0)]), lift("Dips", &[(15, 0)])]),
            workout(2, None, vec![lift("Weighted Pull-up", &[(5, 20)]), lift("Squat", &[(5, 100)])]),
        ];

        let metrics = compute_dashboard(&workouts, TrainingType::Calisthenics, Units::Kg, today(), 30);

        assert_eq!(metrics.primary_metric.label, "Dip PR");
        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(15));
        assert_eq!(secondary(&metrics, "Bodyweight PRs"), &MetricValue::Integer(2));
        assert_eq!(metrics.highlights.len(), 2);
        assert_eq!(metrics.highlights[1].title, "Pull-up");
        assert_eq!(metrics.highlights[1].value, MetricValue::Integer(12));
    }

    #[test]
    fn test_calisthenics_without_matches() {
        let metrics = compute_dashboard(&[], TrainingType::Calisthenics, Units::Kg, today(), 30);
        assert_eq!(metrics.primary_metric.label, "Bodyweight Training");
        assert!(metrics.highlights.is_empty());
    }

    #[test]
    fn test_general_top_exercise_by_sessions() {
        let workouts = vec![
            workout(1, Some(6), vec![lift("Squat", &[(5, 100)]), lift("Overhead Press", &[(5, 50)])]),
            workout(2, None, vec![lift("Overhead Press", &[(5, 50)])]),
        ];

        let metrics = compute_dashboard(&workouts, TrainingType::GeneralStrength, Units::Kg, today(), 30);

        assert_eq!(secondary(&metrics, "Top Exercise"), &MetricValue::Text("Overhead Press".to_string()));
        assert_eq!(metrics.primary_metric.value, MetricValue::Integer(1000));
        assert_eq!(secondary(&metrics, "Avg Intensity"), &MetricValue::Decimal(6.0));
    }

    #[test]
    fn test_fractional_weights_keep_decimals() {
        assert_eq!(weight_value(Decimal::new(1425, 1)), MetricValue::Decimal(142.5));
        assert_eq!(weight_value(Decimal::from(140)), MetricValue::Integer(140));
    }
}
