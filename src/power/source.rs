use crate::power::error::FetchError;
use crate::power::series::SeriesSet;
use crate::types::location::Location;
use crate::types::parameter::Parameter;
use crate::types::year_range::YearRange;
use std::future::Future;

/// One fetch: every requested parameter over the whole year range at a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub parameters: Vec<Parameter>,
    pub location: Location,
    pub years: YearRange,
}

impl SeriesRequest {
    /// Comma-separated parameter codes in request order.
    pub fn parameter_codes(&self) -> String {
        self.parameters
            .iter()
            .map(Parameter::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Anything that can deliver daily series for a [`SeriesRequest`].
///
/// [`crate::PowerClient`] talks to NASA POWER; tests substitute in-memory series.
pub trait SeriesSource: Send + Sync {
    fn fetch_series(
        &self,
        request: &SeriesRequest,
    ) -> impl Future<Output = Result<SeriesSet, FetchError>> + Send;
}
