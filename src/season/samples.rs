//! Collects the historic values that fall inside the day-of-year window.

use crate::power::series::SeriesSet;
use crate::season::window::DayWindow;
use crate::types::parameter::Parameter;
use std::collections::BTreeMap;

/// Per-parameter values inside the window. Parameters without any match are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonalSamples {
    samples: BTreeMap<Parameter, Vec<f64>>,
}

impl SeasonalSamples {
    pub fn get(&self, parameter: Parameter) -> Option<&[f64]> {
        self.samples.get(&parameter).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn counts(&self) -> BTreeMap<Parameter, usize> {
        self.samples
            .iter()
            .map(|(parameter, values)| (*parameter, values.len()))
            .collect()
    }

    pub fn insert(&mut self, parameter: Parameter, values: Vec<f64>) {
        if !values.is_empty() {
            self.samples.insert(parameter, values);
        }
    }
}

/// Splits an 8-digit `YYYYMMDD` key into `(month, day)`.
pub fn parse_date_key(key: &str) -> Option<(u32, u32)> {
    if key.len() != 8 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = key[4..6].parse().ok()?;
    let day = key[6..8].parse().ok()?;
    Some((month, day))
}

/// Builds the seasonal sample set for `parameters` from the fetched series.
///
/// Keys that are not 8 digits and missing values are skipped. Values are kept across years,
/// duplicates included.
pub fn build_seasonal_samples(
    series: &SeriesSet,
    parameters: &[Parameter],
    window: &DayWindow,
) -> SeasonalSamples {
    let mut samples = SeasonalSamples::default();
    for &parameter in parameters {
        let Some(daily) = series.get(parameter) else {
            continue;
        };
        let values: Vec<f64> = daily
            .iter()
            .filter_map(|(key, value)| {
                let value = (*value)?;
                let (month, day) = parse_date_key(key)?;
                window.contains(month, day).then_some(value)
            })
            .collect();
        samples.insert(parameter, values);
    }
    samples
}
