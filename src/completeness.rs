//! How complete the provider's daily series are for a location and year range.

use crate::power::series::{DailySeries, SeriesSet};
use crate::types::location::Location;
use crate::types::parameter::Parameter;
use crate::types::year_range::YearRange;
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Counts for one parameter's series. Zeros are counted apart from valid values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterCompleteness {
    pub parameter: Parameter,
    pub total_entries: usize,
    pub valid_count: usize,
    pub null_count: usize,
    pub zero_count: usize,
    pub valid_percentage: f64,
    pub null_percentage: f64,
    pub zero_percentage: f64,
    /// Valid values as a percentage of the calendar days in the year range.
    pub completeness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<ValueRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessSummary {
    pub average_completeness: f64,
    pub total_nulls: usize,
    pub total_valid: usize,
    pub most_nulls: Option<Parameter>,
    pub fewest_nulls: Option<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessReport {
    pub location: Location,
    pub years: YearRange,
    pub expected_days: i64,
    pub parameters: Vec<ParameterCompleteness>,
    /// Requested parameters the response did not contain.
    pub missing: Vec<Parameter>,
    pub summary: CompletenessSummary,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn analyze_series(
    parameter: Parameter,
    series: &DailySeries,
    expected_days: i64,
) -> ParameterCompleteness {
    let total_entries = series.len();
    let mut null_count = 0;
    let mut zero_count = 0;
    let mut valid = Vec::with_capacity(total_entries);

    for value in series.values() {
        match value {
            None => null_count += 1,
            Some(v) if *v == 0.0 => zero_count += 1,
            Some(v) => valid.push(*v),
        }
    }

    let value_range = if valid.is_empty() {
        None
    } else {
        Some(ValueRange {
            min: valid.iter().copied().fold(f64::INFINITY, f64::min),
            max: valid.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: valid.iter().sum::<f64>() / valid.len() as f64,
        })
    };
    let completeness = if expected_days > 0 {
        valid.len() as f64 / expected_days as f64 * 100.0
    } else {
        0.0
    };

    ParameterCompleteness {
        parameter,
        total_entries,
        valid_count: valid.len(),
        null_count,
        zero_count,
        valid_percentage: percentage(valid.len(), total_entries),
        null_percentage: percentage(null_count, total_entries),
        zero_percentage: percentage(zero_count, total_entries),
        completeness,
        value_range,
    }
}

fn summarize(results: &[ParameterCompleteness]) -> CompletenessSummary {
    let average_completeness = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.completeness).sum::<f64>() / results.len() as f64
    };

    // Ties go to the earlier parameter.
    let mut most: Option<&ParameterCompleteness> = None;
    let mut fewest: Option<&ParameterCompleteness> = None;
    for result in results {
        if most.map_or(true, |m| result.null_percentage > m.null_percentage) {
            most = Some(result);
        }
        if fewest.map_or(true, |f| result.null_percentage < f.null_percentage) {
            fewest = Some(result);
        }
    }

    CompletenessSummary {
        average_completeness,
        total_nulls: results.iter().map(|r| r.null_count).sum(),
        total_valid: results.iter().map(|r| r.valid_count).sum(),
        most_nulls: most.map(|r| r.parameter),
        fewest_nulls: fewest.map(|r| r.parameter),
    }
}

/// Builds the completeness report for `parameters` from an already fetched series set.
pub fn analyze_completeness(
    series: &SeriesSet,
    parameters: &[Parameter],
    location: Location,
    years: YearRange,
) -> CompletenessReport {
    let expected_days = years.calendar_days().unwrap_or(0);
    let mut results = Vec::with_capacity(parameters.len());
    let mut missing = Vec::new();

    for &parameter in parameters {
        match series.get(parameter) {
            Some(daily) => results.push(analyze_series(parameter, daily, expected_days)),
            None => {
                warn!("{}: parameter not found in response", parameter);
                missing.push(parameter);
            }
        }
    }

    let summary = summarize(&results);
    info!(
        "Average completeness {:.1}% over {} parameters",
        summary.average_completeness,
        results.len()
    );

    CompletenessReport {
        location,
        years,
        expected_days,
        parameters: results,
        missing,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(values: &[Option<f64>]) -> DailySeries {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("202401{:02}", i + 1), *v))
            .collect()
    }

    fn january_2024() -> (Location, YearRange) {
        (
            Location::new(5.0, 52.0).unwrap(),
            YearRange::new(2024, 2024).unwrap(),
        )
    }

    #[test]
    fn test_counts_and_percentages() {
        let mut series = SeriesSet::new();
        series.insert(
            "PRECTOTCORR",
            daily(&[Some(0.0), Some(2.0), None, Some(4.0)]),
        );
        let (location, years) = january_2024();
        let report = analyze_completeness(&series, &[Parameter::Precipitation], location, years);

        assert_eq!(report.expected_days, 366);
        let precipitation = &report.parameters[0];
        assert_eq!(precipitation.total_entries, 4);
        assert_eq!(precipitation.valid_count, 2);
        assert_eq!(precipitation.null_count, 1);
        assert_eq!(precipitation.zero_count, 1);
        assert_eq!(precipitation.valid_percentage, 50.0);
        assert_eq!(precipitation.null_percentage, 25.0);
        assert_eq!(precipitation.zero_percentage, 25.0);
        assert_eq!(
            precipitation.value_range,
            Some(ValueRange {
                min: 2.0,
                max: 4.0,
                mean: 3.0
            })
        );
        assert!((precipitation.completeness - 2.0 / 366.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_and_missing_parameters() {
        let mut series = SeriesSet::new();
        series.insert("T2M", daily(&[Some(1.0), Some(2.0)]));
        series.insert("RH2M", daily(&[None, Some(50.0)]));
        series.insert("WS2M", daily(&[Some(3.0), None]));
        let (location, years) = january_2024();

        let report = analyze_completeness(
            &series,
            &[
                Parameter::Temperature,
                Parameter::Humidity,
                Parameter::WindSpeed,
                Parameter::Precipitation,
            ],
            location,
            years,
        );

        assert_eq!(report.missing, vec![Parameter::Precipitation]);
        assert_eq!(report.summary.total_nulls, 2);
        assert_eq!(report.summary.total_valid, 4);
        assert_eq!(report.summary.most_nulls, Some(Parameter::Humidity));
        assert_eq!(report.summary.fewest_nulls, Some(Parameter::Temperature));
        let expected = (2.0 + 1.0 + 1.0) / 3.0 / 366.0 * 100.0;
        assert!((report.summary.average_completeness - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs() {
        let (location, years) = january_2024();
        let report =
            analyze_completeness(&SeriesSet::new(), &[Parameter::Temperature], location, years);
        assert!(report.parameters.is_empty());
        assert_eq!(report.summary.average_completeness, 0.0);
        assert_eq!(report.summary.most_nulls, None);

        let mut series = SeriesSet::new();
        series.insert("T2M", DailySeries::new());
        let report = analyze_completeness(&series, &[Parameter::Temperature], location, years);
        assert_eq!(report.parameters[0].null_percentage, 0.0);
        assert_eq!(report.parameters[0].value_range, None);
    }

    #[test]
    fn test_report_json() {
        let mut series = SeriesSet::new();
        series.insert("T2M", daily(&[None]));
        let (location, years) = january_2024();
        let report = analyze_completeness(&series, &[Parameter::Temperature], location, years);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["parameters"][0]["parameter"], "T2M");
        assert_eq!(json["parameters"][0]["null_percentage"], 100.0);
        assert!(json["parameters"][0].get("value_range").is_none());
        assert_eq!(json["years"]["start"], 2024);
    }
}
