//! Transaction management for the ledger.
//!
//! This module contains everything related to ledger entries:
//! - The `Transaction` model and `NewTransaction` for appending entries
//! - Database functions for storing and querying an account's entries
//!
//! Transactions are append-only. Nothing in this crate ever updates or
//! deletes a transaction row; a correction is a new transaction.

mod core;

pub use core::{
    NewTransaction, Transaction, TransactionKind, count_transactions, create_transaction,
    create_transaction_table, get_transactions_by_account, map_transaction_row,
};
