pub mod exclusions;
pub mod records;
pub mod thresholds;
