use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::training_type::TrainingType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Kg,
    Lbs,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Kg => "kg",
            Units::Lbs => "lbs",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored as JSONB on the user row, camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_type: Option<TrainingType>,
}

/// Partial update coming from a `profile` action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
}

impl PreferencesPatch {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.goal).is_none()
            && non_blank(&self.experience).is_none()
            && non_blank(&self.focus_area).is_none()
            && self.units.is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl UserPreferences {
    pub fn units(&self) -> Units {
        self.units.unwrap_or_default()
    }

    pub fn training_type(&self) -> TrainingType {
        self.training_type.unwrap_or_default()
    }

    /// Merges the non-empty fields of `patch`; everything else is kept.
    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(goal) = non_blank(&patch.goal) {
            self.goal = Some(goal);
        }
        if let Some(experience) = non_blank(&patch.experience) {
            self.experience = Some(experience);
        }
        if let Some(focus_area) = non_blank(&patch.focus_area) {
            self.focus_area = Some(focus_area);
        }
        if let Some(units) = patch.units {
            self.units = Some(units);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub preferences: UserPreferences,
}
