//! The purchase repository: a trait describing how purchases are stored and a
//! SQLite backed implementation of it.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    purchase::{NewPurchase, Purchase, PurchaseId, PurchaseName},
};

/// Handles the creation, retrieval, replacement and removal of purchases.
pub trait PurchaseStore {
    /// Retrieve every purchase, most recently created first.
    fn get_all(&self) -> Result<Vec<Purchase>, Error>;

    /// Retrieve a single purchase by its `id`.
    ///
    /// # Errors
    /// Implementers should return [Error::NotFound] if `id` does not refer to a stored purchase.
    fn get(&self, id: &PurchaseId) -> Result<Purchase, Error>;

    /// Store a new purchase under a freshly generated ID.
    fn create(&self, new_purchase: NewPurchase) -> Result<Purchase, Error>;

    /// Replace every field of the purchase `id` with `new_purchase`.
    ///
    /// # Errors
    /// Implementers should return [Error::UpdateMissingPurchase] if `id` does not refer to a stored purchase.
    fn update(&self, id: &PurchaseId, new_purchase: NewPurchase) -> Result<Purchase, Error>;

    /// Remove the purchase `id`.
    ///
    /// # Errors
    /// Implementers should return [Error::DeleteMissingPurchase] if `id` does not refer to a stored purchase.
    fn delete(&self, id: &PurchaseId) -> Result<(), Error>;

    /// The number of stored purchases.
    fn count(&self) -> Result<u32, Error>;
}

/// Stores purchases in a SQLite database.
///
/// The `purchase` table must exist, see [create_purchase_table].
#[derive(Debug, Clone)]
pub struct SQLitePurchaseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLitePurchaseStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl PurchaseStore for SQLitePurchaseStore {
    fn get_all(&self) -> Result<Vec<Purchase>, Error> {
        let connection = self.lock()?;

        // `rowid` follows insertion order and is left alone by updates.
        connection
            .prepare(
                "SELECT id, name, amount, category, date FROM purchase ORDER BY rowid DESC;",
            )?
            .query_map([], map_purchase_row)?
            .map(|maybe_purchase| maybe_purchase.map_err(|error| error.into()))
            .collect()
    }

    fn get(&self, id: &PurchaseId) -> Result<Purchase, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, name, amount, category, date FROM purchase WHERE id = :id;")?
            .query_row(&[(":id", id.as_ref())], map_purchase_row)
            .map_err(|error| error.into())
    }

    /// Create a new purchase in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn create(&self, new_purchase: NewPurchase) -> Result<Purchase, Error> {
        let connection = self.lock()?;
        let id = PurchaseId::generate();

        let purchase = connection
            .prepare(
                "INSERT INTO purchase (id, name, amount, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, name, amount, category, date",
            )?
            .query_row(
                (
                    id.as_ref(),
                    new_purchase.name.as_ref(),
                    new_purchase.amount,
                    &new_purchase.category,
                    new_purchase.date,
                ),
                map_purchase_row,
            )?;

        tracing::info!("Created purchase {}", purchase.id);

        Ok(purchase)
    }

    fn update(&self, id: &PurchaseId, new_purchase: NewPurchase) -> Result<Purchase, Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE purchase SET name = ?1, amount = ?2, category = ?3, date = ?4 WHERE id = ?5",
            (
                new_purchase.name.as_ref(),
                new_purchase.amount,
                &new_purchase.category,
                new_purchase.date,
                id.as_ref(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingPurchase);
        }

        tracing::info!("Updated purchase {id}");

        Ok(Purchase::from_new(id.clone(), new_purchase))
    }

    fn delete(&self, id: &PurchaseId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected =
            connection.execute("DELETE FROM purchase WHERE id = ?1", [id.as_ref()])?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingPurchase);
        }

        tracing::info!("Deleted purchase {id}");

        Ok(())
    }

    fn count(&self) -> Result<u32, Error> {
        let connection = self.lock()?;

        connection
            .query_row("SELECT COUNT(id) FROM purchase;", [], |row| row.get(0))
            .map_err(|error| error.into())
    }
}

/// Create the purchase table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_purchase_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS purchase (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_purchase_date ON purchase(date);",
    )?;

    Ok(())
}

/// Map a database row to a [Purchase].
fn map_purchase_row(row: &Row) -> Result<Purchase, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Purchase {
        id: PurchaseId::new_unchecked(&raw_id),
        name: PurchaseName::new_unchecked(&raw_name),
        amount,
        category,
        date,
    })
}
