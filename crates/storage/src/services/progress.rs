use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::classification::{BODYWEIGHT_KEYWORDS, FUNCTIONAL_KEYWORDS, MuscleGroup, capitalize, lifts, match_keyword};
use super::dashboard::{exercise_frequency, rep_records};
use super::one_rep_max::best_single;
use super::{round_tenth, round_whole};
use crate::dto::metrics::{
    Chart, ChartPoint, Highlight, ProgressHeadline, ProgressMetrics, TopExercise, TypeSpecificMetrics,
    UniversalMetrics,
};
use crate::models::{TrainingType, Units, Workout};

const TOP_EXERCISES: usize = 5;
const TOP_HIGHLIGHTS: usize = 3;

/// Builds the progress-page bundle. `today` anchors the consistency figure.
pub fn compute_progress(
    workouts: &[Workout],
    training_type: TrainingType,
    units: Units,
    today: NaiveDate,
) -> ProgressMetrics {
    let mut chronological: Vec<&Workout> = workouts.iter().collect();
    chronological.sort_by_key(|w| w.date);

    let type_specific = match training_type {
        TrainingType::Powerlifting => powerlifting(&chronological, units),
        TrainingType::Bodybuilding => bodybuilding(workouts, &chronological, units),
        TrainingType::Crossfit => crossfit(workouts),
        TrainingType::Calisthenics => calisthenics(&chronological),
        TrainingType::GeneralStrength | TrainingType::Endurance | TrainingType::FunctionalFitness => {
            general(workouts, units)
        }
    };

    ProgressMetrics {
        training_type,
        units,
        universal: universal(workouts, today),
        type_specific,
    }
}

fn chart_point(date: NaiveDate, value: Decimal) -> ChartPoint {
    ChartPoint {
        date,
        label: date.format("%b %-d").to_string(),
        value,
    }
}

fn headline(label: &str, value: i64, unit: &str) -> ProgressHeadline {
    ProgressHeadline {
        label: label.to_string(),
        value,
        unit: unit.to_string(),
    }
}

/// Sessions per week since the oldest workout, one decimal.
pub fn consistency(workouts: &[Workout], today: NaiveDate) -> f64 {
    let Some(oldest) = workouts.iter().map(|w| w.date).min() else {
        return 0.0;
    };

    let days = (today - oldest).num_days();
    if days <= 0 {
        return 0.0;
    }

    round_tenth(Decimal::from(workouts.len()) / Decimal::from(days) * Decimal::from(7))
}

fn universal(workouts: &[Workout], today: NaiveDate) -> UniversalMetrics {
    let mut order: Vec<&str> = Vec::new();
    let mut stats: HashMap<&str, (Decimal, u32)> = HashMap::new();
    let mut total_volume = Decimal::ZERO;

    for lift in lifts(workouts) {
        let volume = lift.volume();
        let entry = stats.entry(lift.exercise.as_str()).or_insert_with(|| {
            order.push(lift.exercise.as_str());
            (Decimal::ZERO, 0)
        });
        entry.0 += volume;
        entry.1 += 1;
        total_volume += volume;
    }

    let mut top_exercises: Vec<TopExercise> = order
        .into_iter()
        .filter_map(|name| {
            stats.get(name).map(|(volume, sessions)| TopExercise {
                name: name.to_string(),
                volume: round_whole(*volume),
                sessions: *sessions,
            })
        })
        .collect();
    top_exercises.sort_by(|a, b| b.volume.cmp(&a.volume));
    top_exercises.truncate(TOP_EXERCISES);

    UniversalMetrics {
        top_exercises,
        total_volume: round_whole(total_volume),
        workout_frequency: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
        consistency: consistency(workouts, today),
    }
}

fn powerlifting(chronological: &[&Workout], units: Units) -> TypeSpecificMetrics {
    let tracked = [("Squat", "squat"), ("Bench Press", "bench"), ("Deadlift", "deadlift")];
    let unit = units.as_str();

    let mut charts = Vec::with_capacity(tracked.len());
    let mut highlights = Vec::with_capacity(tracked.len());
    let mut total = Decimal::ZERO;

    for (title, keyword) in tracked {
        let data: Vec<ChartPoint> = chronological
            .iter()
            .filter_map(|workout| {
                let lift = workout.lifts.iter().find(|lift| lift.matches(keyword))?;
                best_single(lift)
                    .filter(|weight| *weight > Decimal::ZERO)
                    .map(|weight| chart_point(workout.date, weight))
            })
            .collect();

        let current = data.last().map(|p| p.value).unwrap_or(Decimal::ZERO);
        let change = match (data.first(), data.len()) {
            (Some(first), len) if len > 1 => Some(round_whole(current - first.value)),
            _ => None,
        };
        total += current;

        highlights.push(Highlight::new(title, round_whole(current), unit).with_change(change));
        charts.push(Chart {
            title: title.to_string(),
            data,
        });
    }

    TypeSpecificMetrics {
        charts,
        highlights,
        primary_metric: headline("Competition Total", round_whole(total), unit),
    }
}

fn bodybuilding(workouts: &[Workout], chronological: &[&Workout], units: Units) -> TypeSpecificMetrics {
    let mut groups: HashMap<&'static str, Decimal> = HashMap::new();
    let mut total_volume = Decimal::ZERO;

    for lift in lifts(workouts) {
        let volume = lift.volume();
        total_volume += volume;
        let group = MuscleGroup::classify(&lift.exercise)
            .map(|g| g.as_str())
            .unwrap_or("Other");
        *groups.entry(group).or_default() += volume;
    }

    let mut ranked: Vec<(&'static str, Decimal)> = MuscleGroup::ALL
        .iter()
        .map(MuscleGroup::as_str)
        .chain(std::iter::once("Other"))
        .filter_map(|name| groups.get(name).map(|volume| (name, *volume)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut volume_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for workout in chronological {
        *volume_by_date.entry(workout.date).or_default() += workout.volume();
    }

    let unit = units.as_str();
    TypeSpecificMetrics {
        charts: vec![Chart {
            title: "Total Volume".to_string(),
            data: volume_by_date
                .into_iter()
                .map(|(date, volume)| chart_point(date, Decimal::from(round_whole(volume))))
                .collect(),
        }],
        highlights: ranked
            .into_iter()
            .take(TOP_HIGHLIGHTS)
            .map(|(name, volume)| Highlight::new(name, round_whole(volume), unit))
            .collect(),
        primary_metric: headline("Total Volume", round_whole(total_volume), unit),
    }
}

fn crossfit(workouts: &[Workout]) -> TypeSpecificMetrics {
    let records = rep_records(workouts, FUNCTIONAL_KEYWORDS);

    TypeSpecificMetrics {
        charts: Vec::new(),
        highlights: records
            .iter()
            .take(TOP_HIGHLIGHTS)
            .map(|(keyword, reps)| Highlight::new(&capitalize(keyword), i64::from(*reps), "reps"))
            .collect(),
        primary_metric: headline("Functional PRs", records.len() as i64, "exercises"),
    }
}

fn calisthenics(chronological: &[&Workout]) -> TypeSpecificMetrics {
    let mut series: HashMap<&'static str, Vec<ChartPoint>> = HashMap::new();

    for workout in chronological {
        for lift in &workout.lifts {
            let Some(keyword) = match_keyword(&lift.exercise, BODYWEIGHT_KEYWORDS) else {
                continue;
            };
            let reps = lift.max_completed_reps();
            if reps > 0 {
                series
                    .entry(keyword)
                    .or_default()
                    .push(chart_point(workout.date, Decimal::from(reps)));
            }
        }
    }

    let tracked = series.len() as i64;
    let mut ranked: Vec<(&'static str, Vec<ChartPoint>)> = BODYWEIGHT_KEYWORDS
        .iter()
        .filter_map(|kw| series.remove(kw).map(|data| (*kw, data)))
        .collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(TOP_HIGHLIGHTS);

    let highlights = ranked
        .iter()
        .map(|(keyword, data)| {
            let latest = data.last().map(|p| p.value).unwrap_or(Decimal::ZERO);
            Highlight::new(&capitalize(keyword), round_whole(latest), "reps")
        })
        .collect();

    TypeSpecificMetrics {
        charts: ranked
            .into_iter()
            .map(|(keyword, data)| Chart {
                title: capitalize(keyword),
                data,
            })
            .collect(),
        highlights,
        primary_metric: headline("Bodyweight PRs", tracked, "exercises"),
    }
}

fn general(workouts: &[Workout], units: Units) -> TypeSpecificMetrics {
    let total_volume: Decimal = workouts.iter().map(Workout::volume).sum();

    TypeSpecificMetrics {
        charts: Vec::new(),
        highlights: exercise_frequency(workouts)
            .into_iter()
            .take(TOP_HIGHLIGHTS)
            .map(|(name, count)| Highlight::new(&name, i64::from(count), "sessions"))
            .collect(),
        primary_metric: headline("Total Volume", round_whole(total_volume), units.as_str()),
    }
}
