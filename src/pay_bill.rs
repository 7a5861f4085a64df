//! The bill payment operation.

use rusqlite::Connection;
use time::Date;

use crate::{
    Amount, Error,
    account::get_account,
    database_id::AccountId,
    transaction::{NewTransaction, Transaction, TransactionKind, create_transaction},
};

/// Pay `amount` from an account to a billed `payee`, dated `date`.
///
/// Records a single debit on `account_id` with the given payee. A single-row
/// insert is atomic on its own: the row is durable or absent, never partial.
/// There is no balance precondition; the account may be driven negative
/// (overdraft) by design.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if `amount` is zero or negative,
/// - [Error::AccountNotFound] if the account does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
///
/// On any error nothing is written.
pub fn pay_bill(
    account_id: AccountId,
    payee: &str,
    amount: Amount,
    date: Date,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !amount.is_positive() {
        return Err(Error::NonPositiveAmount(amount));
    }

    if get_account(account_id, connection)?.is_none() {
        return Err(Error::AccountNotFound(account_id));
    }

    let payment = create_transaction(
        NewTransaction {
            account_id,
            amount,
            date,
            payee: payee.to_owned(),
            kind: TransactionKind::Debit,
        },
        connection,
    )?;

    tracing::debug!("paid {amount} from account {account_id} to {payee:?}");

    Ok(payment)
}
