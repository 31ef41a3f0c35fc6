//! Narrows a list of purchases down to the ones a user asked for and puts them
//! in the order they asked for.

use std::{cmp::Ordering, collections::HashSet};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{purchase::Purchase, search::collation::collate};

/// An inclusive date range, open-ended on either side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// The earliest date to include, `None` for no lower bound.
    pub start: Option<Date>,
    /// The latest date to include, `None` for no upper bound.
    pub end: Option<Date>,
}

impl DateRange {
    /// Whether `date` lies within the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// The restrictions a purchase must satisfy to be shown.
///
/// The default filter set lets every purchase through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// The categories to include. Empty means every category.
    pub categories: HashSet<String>,
    /// The dates to include.
    pub date_range: DateRange,
    /// The smallest amount to include (inclusive).
    pub min_amount: Option<f64>,
    /// The largest amount to include (inclusive).
    pub max_amount: Option<f64>,
}

impl FilterSet {
    fn allows_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.contains(category)
    }

    fn allows_amount(&self, amount: f64) -> bool {
        self.min_amount.is_none_or(|min| amount >= min)
            && self.max_amount.is_none_or(|max| amount <= max)
    }
}

/// The purchase field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by purchase name.
    Name,
    /// Sort by amount spent.
    Amount,
    /// Sort by category label.
    Category,
    /// Sort by purchase date.
    Date,
}

/// The direction to sort in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Sort in order of increasing value.
    #[default]
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// How to order the purchases that pass the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// The field to compare.
    pub key: SortKey,
    /// Whether smaller or larger values come first.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Sort by `key` in `direction`.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, a: &Purchase, b: &Purchase) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => collate(a.name.as_ref(), b.name.as_ref()),
            SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
            SortKey::Category => collate(&a.category, &b.category),
            SortKey::Date => a.date.cmp(&b.date),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Select the purchases matching `search_term` and `filters`, then order them by `sort`.
///
/// The steps are applied in this order:
/// 1. a case-insensitive search for `search_term` in the name or category,
///    where an empty search term matches everything,
/// 2. the category restriction,
/// 3. the inclusive date range,
/// 4. the inclusive amount range,
/// 5. a stable sort, if `sort` is given.
///
/// Without a sort directive the purchases keep the order they were given in.
pub fn filter_and_sort(
    purchases: &[Purchase],
    search_term: &str,
    filters: &FilterSet,
    sort: Option<SortDirective>,
) -> Vec<Purchase> {
    let needle = search_term.to_lowercase();

    let mut result: Vec<Purchase> = purchases
        .iter()
        .filter(|purchase| matches_search(purchase, &needle))
        .filter(|purchase| filters.allows_category(&purchase.category))
        .filter(|purchase| filters.date_range.contains(purchase.date))
        .filter(|purchase| filters.allows_amount(purchase.amount))
        .cloned()
        .collect();

    if let Some(directive) = sort {
        // `sort_by` is stable, equal keys keep their relative order in both directions.
        result.sort_by(|a, b| directive.compare(a, b));
    }

    result
}

/// `needle` must already be lowercase.
fn matches_search(purchase: &Purchase, needle: &str) -> bool {
    purchase.name.as_ref().to_lowercase().contains(needle)
        || purchase.category.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use time::{Date, macros::date};

    use crate::{
        purchase::{Purchase, PurchaseId, PurchaseName},
        search::{DateRange, FilterSet, SortDirection, SortDirective, SortKey, filter_and_sort},
    };

    fn purchase(id: &str, name: &str, amount: f64, category: &str, date: Date) -> Purchase {
        Purchase {
            id: PurchaseId::new_unchecked(id),
            name: PurchaseName::new_unchecked(name),
            amount,
            category: category.to_owned(),
            date,
        }
    }

    fn milk_and_bus() -> Vec<Purchase> {
        vec![
            purchase("1", "Milk", 3.5, "Alimentos", date!(2025 - 10 - 05)),
            purchase("2", "Bus", 2.0, "Transporte", date!(2025 - 10 - 05)),
        ]
    }

    fn ids(purchases: &[Purchase]) -> Vec<&str> {
        purchases.iter().map(|purchase| purchase.id.as_ref()).collect()
    }

    fn categories(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let got = filter_and_sort(
            &[],
            "milk",
            &FilterSet::default(),
            Some(SortDirective::new(SortKey::Name, SortDirection::Ascending)),
        );

        assert!(got.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let got = filter_and_sort(&milk_and_bus(), "milk", &FilterSet::default(), None);

        assert_eq!(ids(&got), ["1"]);
    }

    #[test]
    fn search_matches_category() {
        let got = filter_and_sort(&milk_and_bus(), "TRANS", &FilterSet::default(), None);

        assert_eq!(ids(&got), ["2"]);
    }

    #[test]
    fn search_matches_substring() {
        let got = filter_and_sort(&milk_and_bus(), "il", &FilterSet::default(), None);

        assert_eq!(ids(&got), ["1"]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let got = filter_and_sort(&milk_and_bus(), "pizza", &FilterSet::default(), None);

        assert!(got.is_empty());
    }

    #[test]
    fn category_filter_keeps_members() {
        let purchases = vec![
            purchase("1", "Milk", 3.5, "Alimentos", date!(2025 - 10 - 05)),
            purchase("2", "Bus", 2.0, "Transporte", date!(2025 - 10 - 05)),
            purchase("3", "Aspirin", 4.0, "Salud", date!(2025 - 10 - 05)),
        ];
        let filters = FilterSet {
            categories: categories(&["Alimentos", "Salud"]),
            ..Default::default()
        };

        let got = filter_and_sort(&purchases, "", &filters, None);

        assert_eq!(ids(&got), ["1", "3"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let purchases = vec![
            purchase("1", "A", 1.0, "Otros", date!(2025 - 09 - 30)),
            purchase("2", "B", 1.0, "Otros", date!(2025 - 10 - 01)),
            purchase("3", "C", 1.0, "Otros", date!(2025 - 10 - 15)),
            purchase("4", "D", 1.0, "Otros", date!(2025 - 10 - 31)),
            purchase("5", "E", 1.0, "Otros", date!(2025 - 11 - 01)),
        ];
        let filters = FilterSet {
            date_range: DateRange {
                start: Some(date!(2025 - 10 - 01)),
                end: Some(date!(2025 - 10 - 31)),
            },
            ..Default::default()
        };

        let got = filter_and_sort(&purchases, "", &filters, None);

        assert_eq!(ids(&got), ["2", "3", "4"]);
    }

    #[test]
    fn date_range_can_be_open_ended() {
        let purchases = vec![
            purchase("1", "A", 1.0, "Otros", date!(2025 - 09 - 30)),
            purchase("2", "B", 1.0, "Otros", date!(2025 - 10 - 01)),
        ];
        let only_start = FilterSet {
            date_range: DateRange {
                start: Some(date!(2025 - 10 - 01)),
                end: None,
            },
            ..Default::default()
        };
        let only_end = FilterSet {
            date_range: DateRange {
                start: None,
                end: Some(date!(2025 - 09 - 30)),
            },
            ..Default::default()
        };

        assert_eq!(ids(&filter_and_sort(&purchases, "", &only_start, None)), ["2"]);
        assert_eq!(ids(&filter_and_sort(&purchases, "", &only_end, None)), ["1"]);
    }

    #[test]
    fn min_amount_keeps_milk_only() {
        let filters = FilterSet {
            min_amount: Some(3.0),
            ..Default::default()
        };

        let got = filter_and_sort(&milk_and_bus(), "", &filters, None);

        assert_eq!(ids(&got), ["1"]);
    }

    #[test]
    fn amount_range_is_inclusive() {
        let purchases = vec![
            purchase("1", "A", 1.0, "Otros", date!(2025 - 10 - 05)),
            purchase("2", "B", 2.0, "Otros", date!(2025 - 10 - 05)),
            purchase("3", "C", 3.0, "Otros", date!(2025 - 10 - 05)),
        ];
        let filters = FilterSet {
            min_amount: Some(2.0),
            max_amount: Some(3.0),
            ..Default::default()
        };

        let got = filter_and_sort(&purchases, "", &filters, None);

        assert_eq!(ids(&got), ["2", "3"]);
    }

    #[test]
    fn inverted_amount_range_matches_nothing() {
        let filters = FilterSet {
            min_amount: Some(5.0),
            max_amount: Some(1.0),
            ..Default::default()
        };

        assert!(filter_and_sort(&milk_and_bus(), "", &filters, None).is_empty());
    }

    #[test]
    fn search_filters_and_sort_combine() {
        let purchases = vec![
            purchase("1", "Pan integral", 2.5, "Alimentos", date!(2025 - 10 - 03)),
            purchase("2", "Pan blanco", 1.2, "Alimentos", date!(2025 - 10 - 04)),
            purchase("3", "Pantalla", 150.0, "Hogar", date!(2025 - 10 - 04)),
            purchase("4", "Panadería", 4.0, "Alimentos", date!(2025 - 09 - 28)),
            purchase("5", "Leche", 1.0, "Alimentos", date!(2025 - 10 - 04)),
        ];
        let filters = FilterSet {
            categories: categories(&["Alimentos"]),
            date_range: DateRange {
                start: Some(date!(2025 - 10 - 01)),
                end: None,
            },
            ..Default::default()
        };

        let got = filter_and_sort(
            &purchases,
            "pan",
            &filters,
            Some(SortDirective::new(SortKey::Amount, SortDirection::Ascending)),
        );

        assert_eq!(ids(&got), ["2", "1"]);
    }

    #[test]
    fn sort_by_name_uses_collation() {
        let purchases = vec![
            purchase("1", "zanahoria", 1.0, "Alimentos", date!(2025 - 10 - 05)),
            purchase("2", "Árbol", 1.0, "Hogar", date!(2025 - 10 - 05)),
            purchase("3", "banana", 1.0, "Alimentos", date!(2025 - 10 - 05)),
            purchase("4", "Azúcar", 1.0, "Alimentos", date!(2025 - 10 - 05)),
        ];

        let got = filter_and_sort(
            &purchases,
            "",
            &FilterSet::default(),
            Some(SortDirective::new(SortKey::Name, SortDirection::Ascending)),
        );

        assert_eq!(ids(&got), ["2", "4", "3", "1"]);
    }

    #[test]
    fn sort_by_date_descending() {
        let purchases = vec![
            purchase("1", "A", 1.0, "Otros", date!(2025 - 10 - 02)),
            purchase("2", "B", 1.0, "Otros", date!(2024 - 12 - 31)),
            purchase("3", "C", 1.0, "Otros", date!(2025 - 10 - 10)),
        ];

        let got = filter_and_sort(
            &purchases,
            "",
            &FilterSet::default(),
            Some(SortDirective::new(SortKey::Date, SortDirection::Descending)),
        );

        assert_eq!(ids(&got), ["3", "1", "2"]);
    }

    #[test]
    fn sort_by_category_is_stable_in_both_directions() {
        let purchases = vec![
            purchase("1", "A", 1.0, "Salud", date!(2025 - 10 - 05)),
            purchase("2", "B", 2.0, "Alimentos", date!(2025 - 10 - 05)),
            purchase("3", "C", 3.0, "Salud", date!(2025 - 10 - 05)),
            purchase("4", "D", 4.0, "Alimentos", date!(2025 - 10 - 05)),
        ];

        let ascending = filter_and_sort(
            &purchases,
            "",
            &FilterSet::default(),
            Some(SortDirective::new(SortKey::Category, SortDirection::Ascending)),
        );
        let descending = filter_and_sort(
            &purchases,
            "",
            &FilterSet::default(),
            Some(SortDirective::new(SortKey::Category, SortDirection::Descending)),
        );

        assert_eq!(ids(&ascending), ["2", "4", "1", "3"]);
        assert_eq!(ids(&descending), ["1", "3", "2", "4"]);
    }
}
