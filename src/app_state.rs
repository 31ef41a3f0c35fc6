//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, category::Categories, db::initialize, purchase::SQLitePurchaseStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The categories purchases may be filed under.
    pub categories: Categories,

    /// The store for purchases, backed by the shared database connection.
    pub purchase_store: SQLitePurchaseStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        categories: Categories,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            categories,
            purchase_store: SQLitePurchaseStore::new(connection),
        })
    }
}

impl FromRef<AppState> for Categories {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}
