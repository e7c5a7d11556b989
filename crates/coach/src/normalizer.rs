#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalExercise {
    BenchPress,
    Squat,
    Deadlift,
    OverheadPress,
}

impl CanonicalExercise {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BenchPress => "Bench Press",
            Self::Squat => "Squat",
            Self::Deadlift => "Deadlift",
            Self::OverheadPress => "Overhead Press",
        }
    }

    /// Exact alias lookup on an already lower-cased, trimmed name.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "bench" | "bench press" | "bp" => Some(Self::BenchPress),
            "squat" | "back squat" => Some(Self::Squat),
            "deadlift" | "dl" | "dead lift" => Some(Self::Deadlift),
            "ohp" | "overhead press" | "press" | "military press" => Some(Self::OverheadPress),
            _ => None,
        }
    }
}

/// Maps shorthand to the canonical lift name, otherwise title-cases each
/// space-separated word of the input.
pub fn normalize_exercise_name(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match CanonicalExercise::from_alias(&key) {
        Some(canonical) => canonical.as_str().to_string(),
        None => title_case(raw),
    }
}

fn title_case(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
