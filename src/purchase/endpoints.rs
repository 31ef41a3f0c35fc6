//! JSON endpoints for listing, creating, fetching, replacing and deleting purchases.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::Categories,
    purchase::{Purchase, PurchaseForm, PurchaseId, PurchaseStore, SQLitePurchaseStore},
    search::{PurchaseQuery, filter_and_sort},
};

/// The state needed for managing purchases.
#[derive(Debug, Clone)]
pub struct PurchaseState {
    /// Where purchases are stored.
    pub store: SQLitePurchaseStore,
    /// The categories new and edited purchases are checked against.
    pub categories: Categories,
}

impl FromRef<AppState> for PurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.purchase_store.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// The purchases matching a search, along with how many purchases are stored
/// in total so that clients can tell "no purchases" apart from "no matches".
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseList {
    /// The matching purchases in display order.
    pub purchases: Vec<Purchase>,
    /// The number of stored purchases, matching or not.
    pub total: usize,
}

/// List the purchases that match the search, filters and sort order in the query string.
pub async fn list_purchases_endpoint(
    State(state): State<PurchaseState>,
    Query(query): Query<PurchaseQuery>,
) -> Result<Json<PurchaseList>, Error> {
    let purchases = state.store.get_all()?;
    let total = purchases.len();

    let purchases = filter_and_sort(
        &purchases,
        &query.search,
        &query.filter_set(),
        query.sort_directive(),
    );

    Ok(Json(PurchaseList { purchases, total }))
}

/// Create a purchase from the JSON body, responding with the stored purchase.
pub async fn create_purchase_endpoint(
    State(state): State<PurchaseState>,
    Json(form): Json<PurchaseForm>,
) -> Result<Response, Error> {
    let new_purchase = form.validate(&state.categories)?;
    let purchase = state.store.create(new_purchase)?;

    Ok((StatusCode::CREATED, Json(purchase)).into_response())
}

/// Get a single purchase.
pub async fn get_purchase_endpoint(
    State(state): State<PurchaseState>,
    Path(purchase_id): Path<PurchaseId>,
) -> Result<Json<Purchase>, Error> {
    state.store.get(&purchase_id).map(Json)
}

/// Replace every field of a purchase with the JSON body.
pub async fn update_purchase_endpoint(
    State(state): State<PurchaseState>,
    Path(purchase_id): Path<PurchaseId>,
    Json(form): Json<PurchaseForm>,
) -> Result<Json<Purchase>, Error> {
    let new_purchase = form.validate(&state.categories)?;

    state.store.update(&purchase_id, new_purchase).map(Json)
}

/// Delete a purchase.
pub async fn delete_purchase_endpoint(
    State(state): State<PurchaseState>,
    Path(purchase_id): Path<PurchaseId>,
) -> Result<StatusCode, Error> {
    state.store.delete(&purchase_id)?;

    Ok(StatusCode::NO_CONTENT)
}
