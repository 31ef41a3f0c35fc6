//! Summarises purchases over a time range: totals, a comparison with the
//! previous calendar month, a per-category breakdown and a time series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

use crate::{category::Categories, purchase::Purchase};

/// The period that counts as "current".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// The 24 hours leading up to now.
    Daily,
    /// The 7 days leading up to now.
    Weekly,
    /// The calendar month containing now.
    #[default]
    Monthly,
}

/// Current and previous month totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// The category label.
    pub name: String,
    /// The amount spent in the current period.
    pub current: f64,
    /// The amount spent in the previous month.
    pub prior: f64,
}

/// The summed amount of one time series bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// An ISO date (`2025-10-05`), or a time of day (`14:30`) for [TimeRange::Daily].
    pub key: String,
    /// The amount spent in the bucket.
    pub amount: f64,
}

/// Statistics over the current period, compared with the previous calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsResult {
    /// The amount spent in the current period.
    pub current_total: f64,
    /// The number of purchases in the current period.
    pub current_count: usize,
    /// The amount spent in the previous month.
    pub prior_total: f64,
    /// The number of purchases in the previous month.
    pub prior_count: usize,
    /// `current_total - prior_total`.
    pub difference: f64,
    /// The difference as a percentage of `prior_total`, zero if there was no prior spending.
    pub percent_change: f64,
    /// Categories with spending in either period, in configured order.
    pub by_category: Vec<CategoryBreakdown>,
    /// Current period totals per bucket, in ascending key order.
    pub timeline: Vec<TimelinePoint>,
}

/// Summarise `purchases` for `time_range` as seen at the instant `now`.
///
/// The prior period is always the calendar month before the one containing
/// `now`, whatever the time range. A purchase happens at the start of its date
/// in `now`'s UTC offset, which is what the daily and weekly windows measure.
pub fn aggregate(
    purchases: &[Purchase],
    time_range: TimeRange,
    now: OffsetDateTime,
    categories: &Categories,
) -> StatisticsResult {
    let current: Vec<&Purchase> = purchases
        .iter()
        .filter(|purchase| is_in_current_period(purchase.date, time_range, now))
        .collect();

    let (prior_year, prior_month) = previous_month(now.date());
    let prior: Vec<&Purchase> = purchases
        .iter()
        .filter(|purchase| {
            purchase.date.year() == prior_year && purchase.date.month() == prior_month
        })
        .collect();

    let current_total = sum(&current);
    let prior_total = sum(&prior);
    let difference = current_total - prior_total;
    let percent_change = if prior_total > 0.0 {
        difference / prior_total * 100.0
    } else {
        0.0
    };

    StatisticsResult {
        current_total,
        current_count: current.len(),
        prior_total,
        prior_count: prior.len(),
        difference,
        percent_change,
        by_category: breakdown_by_category(&current, &prior, categories),
        timeline: build_timeline(&current, time_range, now.offset()),
    }
}

fn is_in_current_period(date: Date, time_range: TimeRange, now: OffsetDateTime) -> bool {
    match time_range {
        TimeRange::Daily => is_within_trailing_window(date, now, Duration::hours(24)),
        TimeRange::Weekly => is_within_trailing_window(date, now, Duration::days(7)),
        TimeRange::Monthly => date.year() == now.year() && date.month() == now.month(),
    }
}

fn is_within_trailing_window(date: Date, now: OffsetDateTime, window: Duration) -> bool {
    let elapsed = now - start_of_day(date, now.offset());

    !elapsed.is_negative() && elapsed <= window
}

fn start_of_day(date: Date, offset: UtcOffset) -> OffsetDateTime {
    date.midnight().assume_offset(offset)
}

fn previous_month(date: Date) -> (i32, Month) {
    match date.month() {
        Month::January => (date.year() - 1, Month::December),
        month => (date.year(), month.previous()),
    }
}

fn sum(purchases: &[&Purchase]) -> f64 {
    purchases.iter().map(|purchase| purchase.amount).sum()
}

fn sum_category(purchases: &[&Purchase], category: &str) -> f64 {
    purchases
        .iter()
        .filter(|purchase| purchase.category == category)
        .map(|purchase| purchase.amount)
        .sum()
}

fn breakdown_by_category(
    current: &[&Purchase],
    prior: &[&Purchase],
    categories: &Categories,
) -> Vec<CategoryBreakdown> {
    categories
        .iter()
        .map(|category| CategoryBreakdown {
            name: category.to_owned(),
            current: sum_category(current, category),
            prior: sum_category(prior, category),
        })
        .filter(|breakdown| breakdown.current > 0.0 || breakdown.prior > 0.0)
        .collect()
}

/// Daily buckets use zero-padded 24-hour `HH:MM` labels so that their
/// lexicographic order matches the order within the day.
fn bucket_key(date: Date, time_range: TimeRange, offset: UtcOffset) -> String {
    match time_range {
        TimeRange::Daily => {
            let time = start_of_day(date, offset).time();
            format!("{:02}:{:02}", time.hour(), time.minute())
        }
        TimeRange::Weekly | TimeRange::Monthly => date.to_string(),
    }
}

fn build_timeline(
    current: &[&Purchase],
    time_range: TimeRange,
    offset: UtcOffset,
) -> Vec<TimelinePoint> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();

    for purchase in current {
        *buckets
            .entry(bucket_key(purchase.date, time_range, offset))
            .or_insert(0.0) += purchase.amount;
    }

    buckets
        .into_iter()
        .map(|(key, amount)| TimelinePoint { key, amount })
        .collect()
}
