//! NASA POWER daily point data.

pub mod client;
pub mod error;
pub mod response;
pub mod series;
pub mod source;
