//! Bankbook records and reports the financial activity of user-owned bank
//! accounts: balances, transaction histories, inter-account transfers, and
//! bill payments.
//!
//! The ledger is append-only. An account's balance is never stored; it is
//! derived from the account's opening balance plus its immutable sequence of
//! transactions, so an overdrawn (negative) balance is an ordinary value and
//! no write can ever be lost to a concurrent one.

#![warn(missing_docs)]

mod account;
mod amount;
mod config;
mod database_id;
mod db;
mod ledger;
mod pay_bill;
mod transaction;
mod transfer;
mod user;

pub use account::{
    Account, AccountKind, create_account, create_account_table, get_account, get_accounts_by_user,
    map_account_row,
};
pub use amount::Amount;
pub use config::Config;
pub use database_id::{AccountId, DatabaseId, TransactionId};
pub use db::initialize;
pub use ledger::{Statement, account_statement, current_balance, transaction_history};
pub use pay_bill::pay_bill;
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, count_transactions, create_transaction,
    create_transaction_table, get_transactions_by_account, map_transaction_row,
};
pub use transfer::{TRANSFER_PAYEE, Transfer, transfer_funds};
pub use user::{
    NewUser, User, UserId, count_users, create_user, create_user_table, get_user_by_email,
    get_user_by_id,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A money-movement operation was given a zero or negative amount.
    ///
    /// Amounts are magnitudes; the direction of a movement is expressed by
    /// the transaction kind, never by the amount's sign.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    /// A transfer named the same account as both source and destination.
    #[error("cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    /// An operation referenced an account that is not in the database.
    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    /// An operation referenced a user that is not in the database.
    #[error("user {0} does not exist")]
    UserNotFound(UserId),

    /// The specified email address already belongs to a user.
    #[error("a user with the email \"{0}\" already exists in the database")]
    DuplicateEmail(String),

    /// The requested resource could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
