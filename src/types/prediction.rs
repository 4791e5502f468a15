//! The prediction returned for one request.
//!
//! Serializes to a JSON object with `probabilities`, `predicted_values`, `confidence`
//! and `metadata` keys.

use crate::types::location::Location;
use crate::types::parameter::{Condition, Parameter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Buckets a sample count: fewer than 5 is low, fewer than 15 is medium.
    pub fn from_sample_count(count: usize) -> Self {
        match count {
            0..=4 => Confidence::Low,
            5..=14 => Confidence::Medium,
            _ => Confidence::High,
        }
    }
}

/// Coarse feel of the day, split at a fixed temperature with no neutral band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feeling {
    Hot,
    Cold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedValues {
    /// Rounded seasonal mean per parameter, keyed by parameter code.
    #[serde(flatten)]
    pub parameters: BTreeMap<Parameter, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<Feeling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<bool>,
    /// Heuristic score from 1 (poor) to 10 (good).
    pub air_quality: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub location: Location,
    pub data_points_used: BTreeMap<Parameter, usize>,
    pub parameters_requested: Vec<Parameter>,
    pub target_date: String,
    pub target_month: u32,
    pub target_day: u32,
    pub tolerance_days: u32,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probabilities: BTreeMap<Condition, f64>,
    pub predicted_values: PredictedValues,
    pub confidence: BTreeMap<Parameter, Confidence>,
    pub metadata: Metadata,
}

impl PredictionResult {
    pub fn predicted(&self, parameter: Parameter) -> Option<f64> {
        self.predicted_values.parameters.get(&parameter).copied()
    }

    pub fn probability(&self, condition: Condition) -> Option<f64> {
        self.probabilities.get(&condition).copied()
    }
}
