//! The inter-account transfer operation.
//!
//! A transfer is a double-entry pair: one debit on the source account and
//! one credit on the destination, written in a single SQL transaction so a
//! reader can never observe one leg without the other.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Amount, Error,
    account::get_account,
    database_id::AccountId,
    transaction::{NewTransaction, Transaction, TransactionKind, create_transaction},
};

/// The payee recorded on both legs of a transfer.
pub const TRANSFER_PAYEE: &str = "Transfer";

/// The double-entry pair produced by one [transfer_funds] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// The leg that reduces the source account's balance.
    pub debit: Transaction,
    /// The leg that increases the destination account's balance.
    pub credit: Transaction,
}

/// Move `amount` from one account to another, dated `date`.
///
/// Writes both legs atomically: either the debit on `from_account` and the
/// credit on `to_account` are both durable, or neither is. There is no
/// balance precondition; the source account may be driven negative
/// (overdraft) by design. Calling this twice with identical arguments
/// records two independent transfers.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if `amount` is zero or negative,
/// - [Error::SameAccount] if `from_account` and `to_account` are equal,
/// - [Error::AccountNotFound] if either account does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
///
/// On any error nothing is written.
pub fn transfer_funds(
    from_account: AccountId,
    to_account: AccountId,
    amount: Amount,
    date: Date,
    connection: &Connection,
) -> Result<Transfer, Error> {
    if !amount.is_positive() {
        return Err(Error::NonPositiveAmount(amount));
    }

    if from_account == to_account {
        return Err(Error::SameAccount(from_account));
    }

    // Both existence checks and both legs run against one SQL transaction.
    // An early return drops it uncommitted, which rolls back.
    let sql_transaction = connection.unchecked_transaction()?;

    if get_account(from_account, &sql_transaction)?.is_none() {
        return Err(Error::AccountNotFound(from_account));
    }

    if get_account(to_account, &sql_transaction)?.is_none() {
        return Err(Error::AccountNotFound(to_account));
    }

    let transfer = record_double_entry(from_account, to_account, amount, date, &sql_transaction)?;

    sql_transaction.commit()?;

    tracing::debug!("transferred {amount} from account {from_account} to account {to_account}");

    Ok(transfer)
}

fn record_double_entry(
    from_account: AccountId,
    to_account: AccountId,
    amount: Amount,
    date: Date,
    connection: &Connection,
) -> Result<Transfer, Error> {
    let debit = create_transaction(
        NewTransaction {
            account_id: from_account,
            amount,
            date,
            payee: TRANSFER_PAYEE.to_owned(),
            kind: TransactionKind::Debit,
        },
        connection,
    )?;

    let credit = create_transaction(
        NewTransaction {
            account_id: to_account,
            amount,
            date,
            payee: TRANSFER_PAYEE.to_owned(),
            kind: TransactionKind::Credit,
        },
        connection,
    )?;

    Ok(Transfer { debit, credit })
}
