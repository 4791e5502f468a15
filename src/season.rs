//! Seasonal filtering and aggregation of daily series.

pub mod samples;
pub mod statistics;
pub mod window;
