//! Decoding of the NASA POWER daily point JSON response.
//!
//! Only `properties.parameter` is read. Anything else in the document (header, messages,
//! geometry) is ignored.

use crate::power::series::{DailySeries, SeriesSet};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Value the provider reports for days without data.
pub const FILL_VALUE: f64 = -999.0;

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    parameter: HashMap<String, Option<BTreeMap<String, Value>>>,
}

/// Maps one raw JSON value to an observation. Nulls, fill values and non-numbers are missing.
fn observation(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite() && *v != FILL_VALUE)
}

/// Decodes a response body. A document without `properties.parameter` is an error.
pub fn decode_series(body: &[u8]) -> Result<SeriesSet, serde_json::Error> {
    let response: PowerResponse = serde_json::from_slice(body)?;
    Ok(response
        .properties
        .parameter
        .into_iter()
        .map(|(code, values)| {
            let daily: DailySeries = values
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (key, observation(&value)))
                .collect();
            (code, daily)
        })
        .collect())
}
