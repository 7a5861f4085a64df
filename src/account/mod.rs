//! Account management for the ledger.
//!
//! This module contains the `Account` model, its table definition, and the
//! key-based repository reads that feed the ledger engine.

mod core;

pub use core::{
    Account, AccountKind, create_account, create_account_table, get_account,
    get_accounts_by_user, map_account_row,
};
