use crate::config::ConfigError;
use crate::power::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeasonalError {
    #[error("Invalid date format: '{0}'. Use YYYY/MM/DD, MM/DD, or YYYYMMDD")]
    InvalidDateFormat(String),

    #[error("No valid parameters specified")]
    NoValidParameters,

    #[error("Weather data unavailable: {0}")]
    DataUnavailable(#[from] FetchError),

    #[error("No seasonal data found within {tolerance_days} days of {month:02}/{day:02}")]
    NoSeasonalData {
        month: u32,
        day: u32,
        tolerance_days: u32,
    },

    #[error("Location out of range: longitude {longitude}, latitude {latitude}")]
    InvalidLocation { longitude: f64, latitude: f64 },

    #[error("Invalid year range: start year {start} is after end year {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to set up the weather data client")]
    ClientSetup(#[source] FetchError),
}
