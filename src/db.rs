//! Sets up the application database.

use rusqlite::Connection;

use crate::{Error, transaction::create_transaction_table};

/// Create the application tables if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}
