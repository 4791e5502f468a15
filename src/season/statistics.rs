//! Turns seasonal samples into predicted values, confidence labels and exceedance
//! probabilities.

use crate::config::Thresholds;
use crate::season::samples::SeasonalSamples;
use crate::types::parameter::{Condition, Parameter, ThresholdRule};
use crate::types::prediction::{Confidence, Feeling, PredictedValues};
use log::debug;
use std::collections::BTreeMap;

/// Predicted mean temperature above which the day feels hot.
const HOT_FEELING_ABOVE: f64 = 25.0;
/// Predicted precipitation (mm/day) above which rain is expected.
const RAIN_EXPECTED_ABOVE: f64 = 1.0;

const AIR_QUALITY_DEFAULT: u8 = 5;
const AIR_QUALITY_POOR: u8 = 3;
const AIR_QUALITY_FAIR: u8 = 7;
const AIR_QUALITY_GOOD: u8 = 8;

/// Mean and population standard deviation of a sample list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl SampleSummary {
    /// Returns `None` for an empty list.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    pub fn confidence(&self) -> Confidence {
        Confidence::from_sample_count(self.count)
    }
}

/// Rounds to `decimals` places, sending exact ties to the even digit.
///
/// A scaled value that only looks like a tie because the multiplication rounded is
/// resolved towards the side the unrounded product lies on.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Exact error of `value * factor - scaled`.
    let residual = value.mul_add(factor, -scaled);
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / factor
}

/// Percentage of `values` crossing `limit` in the rule's direction, rounded to one decimal.
pub fn exceedance_probability(values: &[f64], rule: ThresholdRule, limit: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let crossing = values
        .iter()
        .filter(|value| rule.comparison.crosses(**value, limit))
        .count();
    round_to((crossing as f64 / values.len() as f64) * 100.0, 1)
}

pub fn feeling_for(temperature: f64) -> Feeling {
    if temperature > HOT_FEELING_ABOVE {
        Feeling::Hot
    } else {
        Feeling::Cold
    }
}

/// Heuristic 1-10 air quality score from predicted humidity (%) and precipitation (mm/day).
///
/// Stays at the default of 5 unless both inputs are known.
pub fn estimate_air_quality(humidity: Option<f64>, precipitation: Option<f64>) -> u8 {
    let (Some(humidity), Some(precipitation)) = (humidity, precipitation) else {
        return AIR_QUALITY_DEFAULT;
    };
    if humidity > 80.0 && precipitation > 5.0 {
        AIR_QUALITY_POOR
    } else if humidity < 40.0 && precipitation < 1.0 {
        AIR_QUALITY_GOOD
    } else if humidity < 60.0 && precipitation < 2.0 {
        AIR_QUALITY_FAIR
    } else {
        AIR_QUALITY_DEFAULT
    }
}

/// Everything the prediction reports except request metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalStatistics {
    pub probabilities: BTreeMap<Condition, f64>,
    pub predicted_values: PredictedValues,
    pub confidence: BTreeMap<Parameter, Confidence>,
    pub data_points_used: BTreeMap<Parameter, usize>,
}

/// Computes statistics for `parameters` in request order.
///
/// Parameters without samples are skipped. When two parameters report the same condition
/// (mean and maximum temperature both report `very_hot`), the later one wins.
pub fn compute_statistics(
    samples: &SeasonalSamples,
    parameters: &[Parameter],
    thresholds: &Thresholds,
) -> SeasonalStatistics {
    let mut probabilities = BTreeMap::new();
    let mut predicted = BTreeMap::new();
    let mut confidence = BTreeMap::new();
    let mut data_points_used = BTreeMap::new();

    for &parameter in parameters {
        let Some(values) = samples.get(parameter) else {
            continue;
        };
        let Some(summary) = SampleSummary::from_values(values) else {
            continue;
        };
        debug!(
            "{}: {} samples, mean {:.3}, std dev {:.3}",
            parameter, summary.count, summary.mean, summary.std_dev
        );

        data_points_used.insert(parameter, summary.count);
        confidence.insert(parameter, summary.confidence());
        predicted.insert(parameter, round_to(summary.mean, 2));

        for rule in parameter.threshold_rules() {
            let limit = thresholds.limit(rule.condition);
            probabilities.insert(rule.condition, exceedance_probability(values, *rule, limit));
        }
    }

    let temperature = predicted.get(&Parameter::Temperature).copied();
    let precipitation = predicted.get(&Parameter::Precipitation).copied();
    let humidity = predicted.get(&Parameter::Humidity).copied();

    SeasonalStatistics {
        probabilities,
        predicted_values: PredictedValues {
            feeling: temperature.map(feeling_for),
            precipitation: precipitation.map(|p| p > RAIN_EXPECTED_ABOVE),
            air_quality: estimate_air_quality(humidity, precipitation),
            parameters: predicted,
        },
        confidence,
        data_points_used,
    }
}
