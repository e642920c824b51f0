mod summary;
pub mod views;

pub use summary::{aggregate, ComplianceReport};
pub use views::{BucketStatus, ComplianceBucket, LevelBreakdownRow, LevelCounts};
