use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Deserializes leniently: unrecognised names become [`TrainingType::GeneralStrength`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    Powerlifting,
    Bodybuilding,
    Crossfit,
    Calisthenics,
    #[default]
    GeneralStrength,
    Endurance,
    FunctionalFitness,
}

impl TrainingType {
    pub const ALL: [TrainingType; 7] = [
        TrainingType::Powerlifting,
        TrainingType::Bodybuilding,
        TrainingType::Crossfit,
        TrainingType::Calisthenics,
        TrainingType::GeneralStrength,
        TrainingType::Endurance,
        TrainingType::FunctionalFitness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingType::Powerlifting => "powerlifting",
            TrainingType::Bodybuilding => "bodybuilding",
            TrainingType::Crossfit => "crossfit",
            TrainingType::Calisthenics => "calisthenics",
            TrainingType::GeneralStrength => "general_strength",
            TrainingType::Endurance => "endurance",
            TrainingType::FunctionalFitness => "functional_fitness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrainingType::Powerlifting => "Powerlifting",
            TrainingType::Bodybuilding => "Bodybuilding",
            TrainingType::Crossfit => "CrossFit",
            TrainingType::Calisthenics => "Calisthenics",
            TrainingType::GeneralStrength => "General Strength",
            TrainingType::Endurance => "Endurance",
            TrainingType::FunctionalFitness => "Functional Fitness",
        }
    }

    /// Unknown values fall back to general strength.
    pub fn from_str_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value.trim().to_lowercase())
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for TrainingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&value))
    }
}

impl std::fmt::Display for TrainingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
