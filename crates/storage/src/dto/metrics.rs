use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{TrainingType, Units};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MetricsQuery {
    /// Window length in days, counted back from today.
    pub days: Option<u32>,
    /// Overrides the training type stored in the user's preferences.
    pub training_type: Option<TrainingType>,
}

impl MetricsQuery {
    pub fn validate(&self) -> Result<(), String> {
        match self.days {
            Some(days) if !(1..=365).contains(&days) => {
                Err("days must be between 1 and 365".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// A display value: whole numbers, one-decimal averages or short labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Integer(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Decimal(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrimaryMetric {
    pub label: String,
    pub value: MetricValue,
    pub unit: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SecondaryMetric {
    pub label: String,
    pub value: MetricValue,
    pub unit: String,
}

impl SecondaryMetric {
    pub fn new(label: &str, value: impl Into<MetricValue>, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Highlight {
    pub title: String,
    pub value: MetricValue,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<i64>,
}

impl Highlight {
    pub fn new(title: &str, value: impl Into<MetricValue>, unit: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            unit: unit.to_string(),
            change: None,
        }
    }

    pub fn with_change(mut self, change: Option<i64>) -> Self {
        self.change = change;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardMetrics {
    pub training_type: TrainingType,
    pub units: Units,
    pub primary_metric: PrimaryMetric,
    pub secondary_metrics: Vec<SecondaryMetric>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopExercise {
    pub name: String,
    pub volume: i64,
    pub sessions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversalMetrics {
    pub top_exercises: Vec<TopExercise>,
    pub total_volume: i64,
    pub workout_frequency: u32,
    /// Average sessions per week over the window.
    pub consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short display form, e.g. `Mar 4`.
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Chart {
    pub title: String,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProgressHeadline {
    pub label: String,
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TypeSpecificMetrics {
    pub charts: Vec<Chart>,
    pub highlights: Vec<Highlight>,
    pub primary_metric: ProgressHeadline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProgressMetrics {
    pub training_type: TrainingType,
    pub units: Units,
    pub universal: UniversalMetrics,
    pub type_specific: TypeSpecificMetrics,
}
