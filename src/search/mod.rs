//! Searching, filtering and sorting purchases for display.
//!
//! The engine is a pure function over a snapshot of purchases, see [filter_and_sort].

mod collation;
mod engine;
mod query;

pub use collation::collate;
pub use engine::{DateRange, FilterSet, SortDirection, SortDirective, SortKey, filter_and_sort};
pub use query::PurchaseQuery;
