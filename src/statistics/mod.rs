//! Spending statistics: totals for the current period compared with the
//! previous month, broken down by category and over time.

mod aggregate;
mod endpoint;

pub use aggregate::{CategoryBreakdown, StatisticsResult, TimeRange, TimelinePoint, aggregate};
pub use endpoint::get_statistics_endpoint;
