mod completeness;
mod config;
mod error;
mod estimator;
mod power;
pub mod season;
pub mod server;
mod types;

pub use completeness::{
    analyze_completeness, CompletenessReport, CompletenessSummary, ParameterCompleteness,
    ValueRange,
};
pub use config::{ConfigError, EstimatorConfig, ProviderConfig, Thresholds, DEFAULT_POWER_URL};
pub use error::SeasonalError;
pub use estimator::SeasonalEstimator;

pub use power::client::PowerClient;
pub use power::error::FetchError;
pub use power::response::{decode_series, FILL_VALUE};
pub use power::series::{DailySeries, SeriesSet};
pub use power::source::{SeriesRequest, SeriesSource};

pub use types::location::Location;
pub use types::parameter::{Comparison, Condition, Parameter, ParameterCatalog, ThresholdRule};
pub use types::prediction::{Confidence, Feeling, Metadata, PredictedValues, PredictionResult};
pub use types::target_date::TargetDate;
pub use types::year_range::YearRange;
