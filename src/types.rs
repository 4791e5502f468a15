pub mod location;
pub mod parameter;
pub mod prediction;
pub mod target_date;
pub mod year_range;
