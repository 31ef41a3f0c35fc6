//! Database schema setup.

use rusqlite::Connection;

use crate::{Error, purchase::create_purchase_table};

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_purchase_table(connection)?;

    Ok(())
}
