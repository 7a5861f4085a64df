/*! Sets up the application's database schema. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, account::create_account_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the application's tables if they do not exist.
///
/// All tables are created in a single exclusive SQL transaction so a
/// half-built schema is never left behind. Safe to call on an already
/// initialized database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Must be set outside the transaction, and on every connection that
    // writes: constraint violations surface as the extended result codes the
    // error mapping relies on.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_account_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_schema_on_empty_database() {
        let conn =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        initialize(&conn).expect("Could not initialize database");

        let table_count: u32 = conn
            .query_row(
                "SELECT COUNT(name) FROM sqlite_master \
                 WHERE type = 'table' AND name IN ('user', 'account', 'transaction')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 3);
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("First initialize failed");
        initialize(&conn).expect("Second initialize failed");
    }
}
