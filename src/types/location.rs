//! Geographic point the estimate is computed for.

use crate::error::SeasonalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe, longitude first as the provider expects it.
///
/// # Examples
///
/// ```
/// use seasonal_weather::Location;
///
/// let austin = Location::new(-97.1384, 30.2672).unwrap();
/// assert_eq!(austin.longitude, -97.1384);
/// assert!(Location::new(200.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    /// Creates a location, rejecting coordinates outside [-180, 180] x [-90, 90].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, SeasonalError> {
        let location = Self {
            longitude,
            latitude,
        };
        location.validate()?;
        Ok(location)
    }

    /// Checks the coordinate bounds. NaN fails.
    pub fn validate(&self) -> Result<(), SeasonalError> {
        if (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude) {
            Ok(())
        } else {
            Err(SeasonalError::InvalidLocation {
                longitude: self.longitude,
                latitude: self.latitude,
            })
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.longitude, self.latitude)
    }
}
