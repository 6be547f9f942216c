//! Database set up.

use rusqlite::Connection;

use crate::{auth::create_user_table, tag::create_tag_table};

/// Create the all of the database tables for the application.
///
/// Safe to call on a database that is already initialized.
///
/// # Errors
/// This function may return a [rusqlite::Error] if something went wrong creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_user_table(&transaction)?;
    create_tag_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
