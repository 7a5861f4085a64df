//! Defines the core data model and database queries for ledger transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Amount, Error,
    database_id::{AccountId, TransactionId},
};

/// Whether a transaction moves money out of or into its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Funds leaving the account. Debits reduce the balance.
    Debit,
    /// Funds arriving in the account. Credits increase the balance.
    Credit,
}

impl TransactionKind {
    fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "debit",
            TransactionKind::Credit => "credit",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>, rusqlite::Error> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "debit" => Ok(TransactionKind::Debit),
            "credit" => Ok(TransactionKind::Credit),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind {other:?}").into(),
            )),
        }
    }
}

/// A single entry in an account's ledger.
///
/// Entries are never mutated. The `amount` is a non-negative magnitude; its
/// effect on the balance is given by `kind`, see
/// [Transaction::signed_amount].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account this entry belongs to.
    pub account_id: AccountId,
    /// The magnitude of the movement.
    pub amount: Amount,
    /// The calendar date the transaction was recorded. Day granularity.
    pub date: Date,
    /// The counterpart name, e.g. "Transfer" or a billed entity.
    pub payee: String,
    /// Whether the entry debits or credits the account.
    pub kind: TransactionKind,
}

impl Transaction {
    /// The amount signed by the transaction kind: negative for debits,
    /// positive for credits.
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            TransactionKind::Debit => -self.amount,
            TransactionKind::Credit => self.amount,
        }
    }
}

/// The details needed to append a new transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The account the entry belongs to.
    pub account_id: AccountId,
    /// The magnitude of the movement.
    pub amount: Amount,
    /// The calendar date of the entry.
    pub date: Date,
    /// The counterpart name.
    pub payee: String,
    /// Whether the entry debits or credits the account.
    pub kind: TransactionKind,
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                payee TEXT NOT NULL,
                kind TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the per-account history queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_account ON \"transaction\"(account_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
///
/// Columns are read by name so a schema drift fails the read instead of
/// silently shifting fields.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get("id")?,
        account_id: row.get("account_id")?,
        amount: row.get("amount")?,
        date: row.get("date")?,
        payee: row.get("payee")?,
        kind: row.get("kind")?,
    })
}

/// Append a new transaction row to the database.
///
/// Works on a plain connection or inside an open SQL transaction; the
/// money-movement operations use the latter to make multi-row writes
/// all-or-nothing.
///
/// # Errors
/// This function will return a:
/// - [Error::AccountNotFound] if the new transaction references an account
///   that does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (account_id, amount, date, payee, kind)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, account_id, amount, date, payee, kind",
        )?
        .query_one(
            (
                new_transaction.account_id,
                new_transaction.amount,
                new_transaction.date,
                &new_transaction.payee,
                new_transaction.kind,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::AccountNotFound(new_transaction.account_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve all transactions belonging to `account_id`.
///
/// Entries are ordered by date and then ID so the display order is stable;
/// the derived balance does not depend on this order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_account(
    account_id: AccountId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, account_id, amount, date, payee, kind FROM \"transaction\" \
             WHERE account_id = :account_id \
             ORDER BY date ASC, id ASC",
        )?
        .query_map(&[(":account_id", &account_id)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}
