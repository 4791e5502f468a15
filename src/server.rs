//! HTTP surface over [`crate::SeasonalEstimator`].

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
