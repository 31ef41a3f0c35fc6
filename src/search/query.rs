//! Query string parameters for searching purchases.

use serde::Deserialize;
use time::Date;

use crate::search::{DateRange, FilterSet, SortDirection, SortDirective, SortKey};

/// The search, filters and sort order requested in a query string.
///
/// Categories are given as repeated `category` parameters, e.g.
/// `?category=Salud&category=Hogar`.
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseQuery {
    /// Free text to look for in purchase names and categories.
    #[serde(default)]
    pub search: String,
    /// The categories to include.
    #[serde(default, rename = "category")]
    pub categories: Vec<String>,
    /// The earliest date to include.
    pub start_date: Option<Date>,
    /// The latest date to include.
    pub end_date: Option<Date>,
    /// The smallest amount to include.
    pub min_amount: Option<f64>,
    /// The largest amount to include.
    pub max_amount: Option<f64>,
    /// The field to sort by, purchases are left in stored order if not set.
    pub sort: Option<SortKey>,
    /// The direction to sort in, ignored without `sort`.
    #[serde(default)]
    pub direction: SortDirection,
}

impl PurchaseQuery {
    /// The filter set described by the query.
    pub fn filter_set(&self) -> FilterSet {
        FilterSet {
            categories: self.categories.iter().cloned().collect(),
            date_range: DateRange {
                start: self.start_date,
                end: self.end_date,
            },
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }

    /// The sort directive described by the query, if any.
    pub fn sort_directive(&self) -> Option<SortDirective> {
        self.sort.map(|key| SortDirective::new(key, self.direction))
    }
}
