//! Keyword tables used by the dashboard and progress engines. Every match is a
//! case-insensitive substring test on the exercise name.

use rust_decimal::Decimal;

use crate::models::{Lift, Workout};

pub const FUNCTIONAL_KEYWORDS: &[&str] = &["pull-up", "push-up", "burpee", "box jump", "kettlebell", "row"];

pub const BODYWEIGHT_KEYWORDS: &[&str] = &["pull-up", "push-up", "dip", "muscle-up", "handstand", "pistol"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 5] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            MuscleGroup::Chest => &["chest", "bench", "fly"],
            MuscleGroup::Back => &["back", "row", "pull"],
            MuscleGroup::Legs => &["leg", "squat"],
            MuscleGroup::Shoulders => &["shoulder", "press"],
            MuscleGroup::Arms => &["arm", "curl", "tricep"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
        }
    }

    /// First group in table order wins; `None` for unmatched lifts.
    pub fn classify(exercise: &str) -> Option<Self> {
        let name = exercise.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|group| group.keywords().iter().any(|kw| name.contains(kw)))
    }
}

/// The three competition lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerLift {
    Squat,
    Bench,
    Deadlift,
}

impl PowerLift {
    pub const ALL: [PowerLift; 3] = [PowerLift::Squat, PowerLift::Bench, PowerLift::Deadlift];

    pub fn keyword(&self) -> &'static str {
        match self {
            PowerLift::Squat => "squat",
            PowerLift::Bench => "bench",
            PowerLift::Deadlift => "deadlift",
        }
    }

    pub fn classify(exercise: &str) -> Option<Self> {
        let name = exercise.to_lowercase();
        Self::ALL.into_iter().find(|lift| name.contains(lift.keyword()))
    }
}

pub fn match_keyword(exercise: &str, keywords: &[&'static str]) -> Option<&'static str> {
    let name = exercise.to_lowercase();
    keywords.iter().copied().find(|kw| name.contains(kw))
}

/// `pull-up` -> `Pull-up`
pub fn capitalize(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lifts(workouts: &[Workout]) -> impl Iterator<Item = &Lift> {
    workouts
        .iter()
        .flat_map(|workout| workout.lifts.iter())
        .filter(|lift| !lift.exercise.trim().is_empty())
}

/// Mean session RPE over workouts that recorded one, zero when none did.
pub fn average_session_rpe(workouts: &[Workout]) -> Decimal {
    let rated: Vec<i16> = workouts.iter().filter_map(|w| w.session_rpe).collect();
    if rated.is_empty() {
        return Decimal::ZERO;
    }

    let sum: i64 = rated.iter().map(|rpe| i64::from(*rpe)).sum();
    Decimal::from(sum) / Decimal::from(rated.len())
}
