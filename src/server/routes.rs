use crate::estimator::SeasonalEstimator;
use crate::power::source::SeriesSource;
use crate::server::error::ApiError;
use crate::types::location::Location;
use crate::types::prediction::PredictionResult;
use crate::types::year_range::YearRange;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared handler state: one estimator for every request.
pub struct AppState<S> {
    pub estimator: Arc<SeasonalEstimator<S>>,
}

// Derived Clone would require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            estimator: Arc::clone(&self.estimator),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
    /// Comma-separated parameter codes.
    pub parameters: Option<String>,
    pub tolerance_days: Option<u32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl WeatherQuery {
    fn parameter_codes(&self) -> Option<Vec<String>> {
        self.parameters.as_ref().map(|codes| {
            codes
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    fn years(&self, defaults: YearRange) -> YearRange {
        defaults.with_bounds(self.start_year, self.end_year)
    }
}

#[derive(Debug, Serialize)]
pub struct ParameterInfo {
    pub code: &'static str,
    pub description: &'static str,
}

pub async fn index() -> Html<String> {
    let today = Local::now().date_naive().format("%Y/%m/%d");
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Seasonal Weather</title></head>
<body>
<h1>Seasonal Weather</h1>
<form action="/getWeather" method="get">
  <label>Latitude <input name="latitude" type="number" step="any" required></label>
  <label>Longitude <input name="longitude" type="number" step="any" required></label>
  <label>Date <input name="date" type="text" value="{today}" required></label>
  <label>Parameters <input name="parameters" type="text" placeholder="T2M,PRECTOTCORR"></label>
  <button type="submit">Predict</button>
</form>
</body>
</html>
"#
    ))
}

pub async fn get_weather<S: SeriesSource>(
    State(state): State<AppState<S>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<PredictionResult>, ApiError> {
    let estimator = &state.estimator;
    let location = Location {
        longitude: query.longitude,
        latitude: query.latitude,
    };
    let result = estimator
        .predict()
        .location(location)
        .date(&query.date)
        .maybe_parameters(query.parameter_codes())
        .maybe_tolerance_days(query.tolerance_days)
        .years(query.years(estimator.config().default_years))
        .call()
        .await?;
    Ok(Json(result))
}

pub async fn parameters<S: SeriesSource>(
    State(state): State<AppState<S>>,
) -> Json<Vec<ParameterInfo>> {
    let catalog = state.estimator.config().catalog.parameters();
    Json(
        catalog
            .iter()
            .map(|p| ParameterInfo {
                code: p.code(),
                description: p.description(),
            })
            .collect(),
    )
}

pub fn router<S: SeriesSource + 'static>(estimator: Arc<SeasonalEstimator<S>>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/getWeather", get(get_weather::<S>))
        .route("/parameters", get(parameters::<S>))
        .with_state(AppState { estimator })
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve<S: SeriesSource + 'static>(
    estimator: SeasonalEstimator<S>,
    addr: SocketAddr,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(estimator))).await
}
