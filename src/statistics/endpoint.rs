//! The endpoint that serves spending statistics as JSON.

use axum::{
    Json,
    extract::{FromRef, State},
};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::Categories,
    purchase::{PurchaseStore, SQLitePurchaseStore},
    statistics::{StatisticsResult, TimeRange, aggregate},
    timezone::get_local_now,
};

/// The state needed for computing statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// Where purchases are loaded from.
    pub store: SQLitePurchaseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The categories to break spending down by.
    pub categories: Categories,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.purchase_store.clone(),
            local_timezone: state.local_timezone.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// The query string for the statistics endpoint, e.g. `?range=weekly`.
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default)]
    range: TimeRange,
}

/// Summarise every stored purchase for the requested time range, as of the
/// current time in the server's timezone.
pub async fn get_statistics_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsResult>, Error> {
    let now = get_local_now(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let purchases = state.store.get_all()?;
    tracing::debug!(
        "Computing {:?} statistics over {} purchases at {now}",
        query.range,
        purchases.len()
    );

    Ok(Json(aggregate(&purchases, query.range, now, &state.categories)))
}
