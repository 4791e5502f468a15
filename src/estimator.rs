//! The request pipeline: validate, parse, fetch once, filter to the seasonal window and
//! aggregate.

use crate::completeness::{analyze_completeness, CompletenessReport};
use crate::config::EstimatorConfig;
use crate::error::SeasonalError;
use crate::power::client::PowerClient;
use crate::power::series::SeriesSet;
use crate::power::source::{SeriesRequest, SeriesSource};
use crate::season::samples::build_seasonal_samples;
use crate::season::statistics::compute_statistics;
use crate::season::window::DayWindow;
use crate::types::location::Location;
use crate::types::parameter::Parameter;
use crate::types::prediction::{Metadata, PredictionResult};
use crate::types::target_date::TargetDate;
use crate::types::year_range::YearRange;
use bon::bon;
use log::{info, warn};

/// Predicts the weather on a calendar day from historic observations around that day.
///
/// Holds the read-only configuration and the series source. Every call to
/// [`SeasonalEstimator::predict`] runs independently with a single fetch and no retries.
///
/// # Examples
///
/// ```no_run
/// # use seasonal_weather::{EstimatorConfig, Location, SeasonalEstimator, SeasonalError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SeasonalError> {
/// let estimator = SeasonalEstimator::from_config(EstimatorConfig::default())?;
///
/// let result = estimator
///     .predict()
///     .location(Location::new(-97.1384, 30.2672)?)
///     .date("07/15")
///     .parameters(vec!["T2M".to_string(), "PRECTOTCORR".to_string()])
///     .tolerance_days(7)
///     .call()
///     .await?;
///
/// println!("{}", serde_json::to_string_pretty(&result).unwrap());
/// # Ok(())
/// # }
/// ```
pub struct SeasonalEstimator<S> {
    source: S,
    config: EstimatorConfig,
}

impl SeasonalEstimator<PowerClient> {
    /// Creates an estimator backed by NASA POWER, validating the configuration first.
    pub fn from_config(config: EstimatorConfig) -> Result<Self, SeasonalError> {
        config.validate()?;
        let client = PowerClient::new(&config.provider).map_err(SeasonalError::ClientSetup)?;
        Ok(Self::new(client, config))
    }
}

#[bon]
impl<S: SeriesSource> SeasonalEstimator<S> {
    pub fn new(source: S, config: EstimatorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Checks requested codes against the catalog. `None` selects the whole catalog.
    ///
    /// Unknown codes are logged and dropped.
    ///
    /// # Errors
    ///
    /// [`SeasonalError::NoValidParameters`] if nothing is left.
    pub fn resolve_parameters(
        &self,
        parameters: Option<&[String]>,
    ) -> Result<Vec<Parameter>, SeasonalError> {
        let Some(codes) = parameters else {
            info!("Using all available parameters");
            return Ok(self.config.catalog.parameters().to_vec());
        };
        let (accepted, rejected) = self.config.catalog.resolve(codes);
        if !rejected.is_empty() {
            warn!("Dropping invalid parameters: {:?}", rejected);
        }
        if accepted.is_empty() {
            return Err(SeasonalError::NoValidParameters);
        }
        Ok(accepted)
    }

    async fn fetch(
        &self,
        parameters: &[Parameter],
        location: Location,
        years: YearRange,
    ) -> Result<SeriesSet, SeasonalError> {
        let request = SeriesRequest {
            parameters: parameters.to_vec(),
            location,
            years,
        };
        info!(
            "Requesting {} for {} over {}",
            request.parameter_codes(),
            location,
            years
        );
        Ok(self.source.fetch_series(&request).await?)
    }

    /// Predicts the weather for a calendar day.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(Location)`: **Required.** Point to predict for.
    /// * `.date(&str)`: **Required.** Target day as `YYYY/MM/DD`, `MM/DD` or `YYYYMMDD`.
    /// * `.parameters(Vec<String>)`: Optional. Parameter codes; defaults to the whole catalog.
    /// * `.tolerance_days(u32)`: Optional. Window half-width; defaults to the configured value.
    /// * `.years(YearRange)`: Optional. Lookback range; defaults to the configured range.
    ///
    /// # Errors
    ///
    /// * [`SeasonalError::NoValidParameters`] if no requested code is in the catalog.
    /// * [`SeasonalError::InvalidDateFormat`] if the date has none of the accepted shapes.
    /// * [`SeasonalError::InvalidLocation`] / [`SeasonalError::InvalidYearRange`] for bad inputs.
    /// * [`SeasonalError::DataUnavailable`] if the fetch fails or the response cannot be decoded.
    /// * [`SeasonalError::NoSeasonalData`] if no observation falls inside the window.
    #[builder]
    pub async fn predict(
        &self,
        location: Location,
        date: &str,
        parameters: Option<Vec<String>>,
        tolerance_days: Option<u32>,
        years: Option<YearRange>,
    ) -> Result<PredictionResult, SeasonalError> {
        let parameters = self.resolve_parameters(parameters.as_deref())?;
        let target = TargetDate::parse(date)?;
        location.validate()?;
        let years = years.unwrap_or(self.config.default_years);
        years.validate()?;
        let tolerance_days = tolerance_days.unwrap_or(self.config.default_tolerance_days);

        let series = self.fetch(&parameters, location, years).await?;

        let window = DayWindow::new(target, tolerance_days);
        let samples = build_seasonal_samples(&series, &parameters, &window);
        if samples.is_empty() {
            warn!(
                "No seasonal data found within {} days of {}",
                tolerance_days, target
            );
            return Err(SeasonalError::NoSeasonalData {
                month: target.month(),
                day: target.day(),
                tolerance_days,
            });
        }
        info!("Seasonal samples per parameter: {:?}", samples.counts());

        let statistics = compute_statistics(&samples, &parameters, &self.config.thresholds);

        Ok(PredictionResult {
            probabilities: statistics.probabilities,
            predicted_values: statistics.predicted_values,
            confidence: statistics.confidence,
            metadata: Metadata {
                location,
                data_points_used: statistics.data_points_used,
                parameters_requested: parameters,
                target_date: date.to_string(),
                target_month: target.month(),
                target_day: target.day(),
                tolerance_days,
                start_year: years.start,
                end_year: years.end,
            },
        })
    }

    /// Reports how complete the provider's series are for a location and year range.
    ///
    /// Uses the same builder pattern and parameter resolution as [`SeasonalEstimator::predict`].
    ///
    /// # Errors
    ///
    /// [`SeasonalError::NoValidParameters`], [`SeasonalError::InvalidLocation`],
    /// [`SeasonalError::InvalidYearRange`] or [`SeasonalError::DataUnavailable`].
    #[builder]
    pub async fn completeness(
        &self,
        location: Location,
        parameters: Option<Vec<String>>,
        years: Option<YearRange>,
    ) -> Result<CompletenessReport, SeasonalError> {
        let parameters = self.resolve_parameters(parameters.as_deref())?;
        location.validate()?;
        let years = years.unwrap_or(self.config.default_years);
        years.validate()?;

        let series = self.fetch(&parameters, location, years).await?;
        Ok(analyze_completeness(&series, &parameters, location, years))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::power::error::FetchError;
    use crate::power::series::DailySeries;
    use crate::types::parameter::Condition;
    use crate::types::prediction::{Confidence, Feeling};
    use chrono::{Datelike, NaiveDate};
    use std::sync::Mutex;

    /// Serves fixed series and records the requests it receives.
    pub(crate) struct StaticSource {
        series: Option<SeriesSet>,
        pub(crate) requests: Mutex<Vec<SeriesRequest>>,
    }

    impl StaticSource {
        pub(crate) fn new(series: SeriesSet) -> Self {
            Self {
                series: Some(series),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                series: None,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl SeriesSource for StaticSource {
        async fn fetch_series(&self, request: &SeriesRequest) -> Result<SeriesSet, FetchError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.series {
                Some(series) => Ok(series.clone()),
                None => {
                    let body = b"<html>Bad Gateway</html>";
                    let error = serde_json::from_slice::<serde_json::Value>(body).unwrap_err();
                    Err(FetchError::JsonParse("static".to_string(), error))
                }
            }
        }
    }

    /// One value per day for 2015-2024, produced by `value(year, month, day)`.
    pub(crate) fn daily_series(value: impl Fn(i32, u32, u32) -> Option<f64>) -> DailySeries {
        let mut series = DailySeries::new();
        let mut date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        while date <= last {
            series.insert(
                date.format("%Y%m%d").to_string(),
                value(date.year(), date.month(), date.day()),
            );
            date = date.succ_opt().unwrap();
        }
        series
    }

    /// Hot, humid, dry July; cold windy January.
    pub(crate) fn austin_series() -> SeriesSet {
        let mut set = SeriesSet::new();
        set.insert(
            "T2M",
            daily_series(|_, month, _| Some(if month == 7 { 30.0 } else { 5.0 })),
        );
        set.insert(
            "T2M_MAX",
            daily_series(|year, month, _| {
                Some(if month == 7 && year % 2 == 0 { 38.0 } else { 33.0 })
            }),
        );
        set.insert(
            "PRECTOTCORR",
            daily_series(|_, month, _| Some(if month == 7 { 0.5 } else { 12.0 })),
        );
        set.insert(
            "WS2M",
            daily_series(|_, month, _| Some(if month == 1 { 11.0 } else { 3.0 })),
        );
        set.insert(
            "RH2M",
            daily_series(|_, month, day| {
                if month == 7 && day == 15 {
                    None
                } else {
                    Some(if month == 7 { 35.0 } else { 90.0 })
                }
            }),
        );
        set.insert("WD2M", daily_series(|_, _, _| Some(180.0)));
        set
    }

    fn estimator(series: SeriesSet) -> SeasonalEstimator<StaticSource> {
        SeasonalEstimator::new(StaticSource::new(series), EstimatorConfig::default())
    }

    fn austin() -> Location {
        Location::new(-97.1384, 30.2672).unwrap()
    }

    fn codes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_predict_summer_day() -> Result<(), SeasonalError> {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .parameters(codes(&["T2M", "T2M_MAX", "PRECTOTCORR", "WS2M", "RH2M"]))
            .tolerance_days(7)
            .call()
            .await?;

        // 15 days a year for 10 years, July 15th has no humidity.
        assert_eq!(result.metadata.data_points_used[&Parameter::Temperature], 150);
        assert_eq!(result.metadata.data_points_used[&Parameter::Humidity], 140);
        assert_eq!(result.predicted(Parameter::Temperature), Some(30.0));
        assert_eq!(result.predicted(Parameter::TemperatureMax), Some(35.5));
        assert_eq!(result.confidence[&Parameter::WindSpeed], Confidence::High);

        assert_eq!(result.probability(Condition::VeryHot), Some(50.0));
        assert_eq!(result.probability(Condition::VeryCold), Some(0.0));
        assert_eq!(result.probability(Condition::VeryWindy), Some(0.0));
        assert_eq!(result.probability(Condition::VeryWet), Some(0.0));
        assert_eq!(result.probability(Condition::VeryUncomfortable), Some(0.0));

        assert_eq!(result.predicted_values.feeling, Some(Feeling::Hot));
        assert_eq!(result.predicted_values.precipitation, Some(false));
        assert_eq!(result.predicted_values.air_quality, 8);

        assert_eq!(result.metadata.target_date, "07/15");
        assert_eq!(result.metadata.target_month, 7);
        assert_eq!(result.metadata.target_day, 15);
        assert_eq!(result.metadata.tolerance_days, 7);
        assert_eq!(result.metadata.start_year, 2015);
        assert_eq!(result.metadata.end_year, 2024);
        Ok(())
    }

    #[tokio::test]
    async fn test_predict_winter_day_across_year_boundary() -> Result<(), SeasonalError> {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("2025/12/30")
            .parameters(codes(&["WS2M", "RH2M", "PRECTOTCORR"]))
            .tolerance_days(3)
            .call()
            .await?;

        // Dec 27-31 and Jan 1-3 of every year; only the January days are windy.
        assert_eq!(result.metadata.data_points_used[&Parameter::WindSpeed], 80);
        assert_eq!(result.probability(Condition::VeryWindy), Some(37.5));
        assert_eq!(result.probability(Condition::VeryWet), Some(100.0));
        assert_eq!(result.predicted_values.air_quality, 3);
        assert_eq!(result.predicted_values.feeling, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_request_sent_to_source() -> Result<(), SeasonalError> {
        let estimator = estimator(austin_series());
        estimator
            .predict()
            .location(austin())
            .date("20240615")
            .parameters(codes(&["RH2M", "WD2M", "T2M"]))
            .years(YearRange::new(2018, 2020)?)
            .call()
            .await?;

        let requests = estimator.source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].parameters, vec![Parameter::Humidity, Parameter::Temperature]);
        assert_eq!(requests[0].years, YearRange::new(2018, 2020)?);
        assert_eq!(requests[0].location, austin());
        Ok(())
    }

    #[tokio::test]
    async fn test_defaults_to_whole_catalog_and_configured_tolerance() -> Result<(), SeasonalError> {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .call()
            .await?;
        assert_eq!(result.metadata.parameters_requested, Parameter::ALL.to_vec());
        assert_eq!(result.metadata.tolerance_days, 7);
        // Parameters the source has no series for are simply absent.
        assert!(!result.confidence.contains_key(&Parameter::ClearSkyIrradiance));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_parameters_only() {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .parameters(codes(&["WD2M", "nope"]))
            .call()
            .await;
        assert!(matches!(result, Err(SeasonalError::NoValidParameters)));
        assert!(estimator.source.requests.lock().unwrap().is_empty());

        let empty = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .parameters(Vec::new())
            .call()
            .await;
        assert!(matches!(empty, Err(SeasonalError::NoValidParameters)));
    }

    #[tokio::test]
    async fn test_invalid_date_is_reported_before_fetching() {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("July 15th")
            .call()
            .await;
        assert!(matches!(result, Err(SeasonalError::InvalidDateFormat(ref d)) if d == "July 15th"));
        assert!(estimator.source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_rejected() {
        let estimator = estimator(austin_series());
        let bad_location = estimator
            .predict()
            .location(Location {
                longitude: 181.0,
                latitude: 0.0,
            })
            .date("07/15")
            .call()
            .await;
        assert!(matches!(bad_location, Err(SeasonalError::InvalidLocation { .. })));

        let bad_years = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .years(YearRange {
                start: 2024,
                end: 2015,
            })
            .call()
            .await;
        assert!(matches!(bad_years, Err(SeasonalError::InvalidYearRange { .. })));
        assert!(estimator.source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_data_unavailable() {
        let estimator =
            SeasonalEstimator::new(StaticSource::failing(), EstimatorConfig::default());
        let result = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .call()
            .await;
        assert!(matches!(result, Err(SeasonalError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_impossible_target_date_has_no_seasonal_data() {
        let estimator = estimator(austin_series());
        let result = estimator
            .predict()
            .location(austin())
            .date("04/31")
            .call()
            .await;
        assert!(matches!(
            result,
            Err(SeasonalError::NoSeasonalData {
                month: 4,
                day: 31,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_series_has_no_seasonal_data() {
        let estimator = estimator(SeriesSet::new());
        let result = estimator
            .predict()
            .location(austin())
            .date("07/15")
            .parameters(codes(&["T2M"]))
            .call()
            .await;
        assert!(matches!(result, Err(SeasonalError::NoSeasonalData { .. })));
    }

    #[tokio::test]
    async fn test_restricted_catalog_drops_other_codes() -> Result<(), SeasonalError> {
        let config = EstimatorConfig {
            catalog: crate::types::parameter::ParameterCatalog::new(vec![Parameter::WindSpeed]),
            ..EstimatorConfig::default()
        };
        let estimator = SeasonalEstimator::new(StaticSource::new(austin_series()), config);
        let result = estimator
            .predict()
            .location(austin())
            .date("01/15")
            .parameters(codes(&["WS2M", "T2M"]))
            .call()
            .await?;
        assert_eq!(result.metadata.parameters_requested, vec![Parameter::WindSpeed]);
        assert_eq!(result.probability(Condition::VeryWindy), Some(100.0));
        Ok(())
    }
}
