use rust_decimal::Decimal;

use storage::models::{UserProfile, Workout};
use storage::services::one_rep_max::best_single;

/// Workouts listed under "Recent workouts".
const RECENT_WORKOUTS: usize = 3;

/// Heaviest completed single for the first lift per workout whose name
/// contains `keyword`. Estimates are not used here.
fn current_max(workouts: &[Workout], keyword: &str) -> Decimal {
    workouts
        .iter()
        .filter_map(|workout| workout.lifts.iter().find(|lift| lift.matches(keyword)))
        .filter_map(best_single)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Text block appended to the coach system prompt. `workouts` is newest
/// first. Returns an empty string when nothing is known about the athlete.
pub fn build_athlete_context(profile: &UserProfile, workouts: &[Workout]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let prefs = &profile.preferences;

    if let Some(name) = profile.name.as_deref().filter(|n| !n.is_empty()) {
        parts.push(format!("Athlete: {name}"));
    }
    if let Some(experience) = &prefs.experience {
        parts.push(format!("Experience: {experience}"));
    }
    if let Some(goal) = &prefs.goal {
        parts.push(format!("Goal: {goal}"));
    }
    if let Some(focus) = &prefs.focus_area {
        parts.push(format!("Focus: {focus}"));
    }
    if let Some(units) = prefs.units {
        parts.push(format!("Units: {units}"));
    }
    if let Some(training_type) = prefs.training_type {
        parts.push(format!("Training Type: {}", training_type.label()));
    }

    let units = prefs.units();
    let maxes: Vec<String> = [("Squat", "squat"), ("Bench Press", "bench"), ("Deadlift", "deadlift")]
        .into_iter()
        .map(|(label, keyword)| (label, current_max(workouts, keyword)))
        .filter(|(_, max)| *max > Decimal::ZERO)
        .map(|(label, max)| format!("{label}: {} {units}", max.normalize()))
        .collect();
    if !maxes.is_empty() {
        parts.push(format!("Current 1RMs: {}", maxes.join(", ")));
    }

    if !workouts.is_empty() {
        let summaries: Vec<String> = workouts
            .iter()
            .take(RECENT_WORKOUTS)
            .map(|workout| {
                let exercises: Vec<&str> = workout.lifts.iter().map(|l| l.exercise.as_str()).collect();
                format!("{}: {}", workout.date, exercises.join(", "))
            })
            .collect();
        parts.push(format!("Recent workouts: {}", summaries.join(" | ")));
    }

    if parts.is_empty() {
        return String::new();
    }

    format!("\n\nCONTEXT ABOUT THIS ATHLETE:\n{}\n", parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storage::models::{Lift, TrainingType, Units, UserPreferences, WorkoutSet};
    use uuid::Uuid;

    fn workout(day: u32, lifts: Vec<(&str, u32, i64)>) -> Workout {
        let date = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        Workout {
            workout_id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            lifts: lifts
                .into_iter()
                .map(|(exercise, reps, weight)| Lift {
                    exercise: exercise.to_string(),
                    sets: vec![WorkoutSet {
                        reps,
                        weight: Decimal::from(weight),
                        rpe: None,
                        completed: true,
                    }],
                })
                .collect(),
            notes: None,
            session_rpe: None,
            total_reps: 0,
            working_sets: 0,
            total_volume: 0,
            rpe_adjusted_volume: 0,
            created_at: date.and_hms_opt(7, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_profile_has_no_context() {
        let profile = UserProfile {
            user_id: Uuid::nil(),
            name: None,
            preferences: UserPreferences::default(),
        };
        assert_eq!(build_athlete_context(&profile, &[]), "");
    }

    #[test]
    fn test_context_lists_profile_maxes_and_recent_workouts() {
        let profile = UserProfile {
            user_id: Uuid::nil(),
            name: Some("Sam".to_string()),
            preferences: UserPreferences {
                goal: Some("Compete in 6 months".to_string()),
                units: Some(Units::Kg),
                training_type: Some(TrainingType::Powerlifting),
                ..Default::default()
            },
        };
        let workouts = vec![
            workout(20, vec![("Squat", 1, 160), ("Bench Press", 5, 100)]),
            workout(18, vec![("Deadlift", 1, 210)]),
            workout(15, vec![("Squat", 1, 170)]),
            workout(10, vec![("Curl", 10, 20)]),
        ];

        let context = build_athlete_context(&profile, &workouts);

        assert!(context.starts_with("\n\nCONTEXT ABOUT THIS ATHLETE:\n"));
        assert!(context.contains("Athlete: Sam\n"));
        assert!(context.contains("Goal: Compete in 6 months\n"));
        assert!(context.contains("Training Type: Powerlifting\n"));
        // bench has no single, so it is left out
        assert!(context.contains("Current 1RMs: Squat: 170 kg, Deadlift: 210 kg\n"));
        assert!(context.contains("Recent workouts: 2025-05-20: Squat, Bench Press | 2025-05-18: Deadlift | 2025-05-15: Squat\n"));
    }
}
