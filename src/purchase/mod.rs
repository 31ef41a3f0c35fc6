//! Purchases: the domain types, how they are stored and the endpoints for
//! managing them.

mod domain;
mod endpoints;
mod store;

pub use domain::{NewPurchase, Purchase, PurchaseForm, PurchaseId, PurchaseName};
pub use endpoints::{
    PurchaseList, create_purchase_endpoint, delete_purchase_endpoint, get_purchase_endpoint,
    list_purchases_endpoint, update_purchase_endpoint,
};
pub use store::{PurchaseStore, SQLitePurchaseStore, create_purchase_table};
