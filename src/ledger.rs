//! Derives account balances and histories from the append-only transaction
//! ledger.
//!
//! A balance is never stored. It is always the account's opening balance
//! plus the sum of its signed transaction amounts, so concurrent appends can
//! never lose an update: every row that was durably written is counted the
//! next time the balance is derived.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Error,
    account::{Account, get_account},
    database_id::AccountId,
    transaction::{Transaction, get_transactions_by_account},
};

/// Compute the current balance of `account` from its transactions.
///
/// Entries belonging to other accounts are ignored. The result does not
/// depend on the order of `transactions`, and a negative result (an
/// overdrawn account) is an ordinary value, not an error.
pub fn current_balance(account: &Account, transactions: &[Transaction]) -> Amount {
    let movement: Amount = transactions
        .iter()
        .filter(|transaction| transaction.account_id == account.id)
        .map(Transaction::signed_amount)
        .sum();

    account.opening_balance + movement
}

/// Retrieve the full transaction history of `account_id`, ordered by date
/// and then ID.
///
/// Re-querying yields the same entries, plus any that were appended in the
/// meantime.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn transaction_history(
    account_id: AccountId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    get_transactions_by_account(account_id, connection)
}

/// An account's current state for display: the account record, its ordered
/// transaction history, and the balance derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The account the statement is for.
    pub account: Account,
    /// The account's transactions, ordered by date and then ID.
    pub transactions: Vec<Transaction>,
    /// The derived current balance.
    pub balance: Amount,
}

/// Load everything a caller needs to display an account: the record, its
/// ordered history, and the derived balance.
///
/// Returns `None` if `account_id` does not refer to an account.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn account_statement(
    account_id: AccountId,
    connection: &Connection,
) -> Result<Option<Statement>, Error> {
    let Some(account) = get_account(account_id, connection)? else {
        return Ok(None);
    };

    let transactions = transaction_history(account.id, connection)?;
    let balance = current_balance(&account, &transactions);

    Ok(Some(Statement {
        account,
        transactions,
        balance,
    }))
}


#[cfg(test)]
mod statement_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Amount,
        account::{AccountKind, create_account},
        database_id::AccountId,
        db::initialize,
        transaction::{NewTransaction, TransactionKind, create_transaction},
        user::{NewUser, create_user},
    };

    use super::account_statement;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert_test_account(conn: &Connection, opening_balance: Amount) -> AccountId {
        let user = create_user(
            NewUser {
                email: "jane@example.com".to_owned(),
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                password: "hunter2".to_owned(),
                phone: "555-0100".to_owned(),
            },
            conn,
        )
        .unwrap();

        create_account(user.id, opening_balance, AccountKind::Checking, conn)
            .unwrap()
            .id
    }

    #[test]
    fn statement_combines_account_history_and_balance() {
        let conn = get_test_connection();
        let account_id = insert_test_account(&conn, Amount::new(100_00, 2));
        create_transaction(
            NewTransaction {
                account_id,
                amount: Amount::new(30_00, 2),
                date: date!(2025 - 10 - 05),
                payee: "Acme Electric".to_owned(),
                kind: TransactionKind::Debit,
            },
            &conn,
        )
        .unwrap();

        let statement = account_statement(account_id, &conn)
            .unwrap()
            .expect("Want a statement for an existing account");

        assert_eq!(statement.account.id, account_id);
        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.balance, Amount::new(70_00, 2));
    }

    #[test]
    fn statement_for_unknown_account_is_none() {
        let conn = get_test_connection();

        let statement = account_statement(999, &conn).unwrap();

        assert_eq!(statement, None);
    }

    #[test]
    fn transfer_then_bill_payment_end_to_end() {
        let conn = get_test_connection();
        let user = create_user(
            NewUser {
                email: "john@example.com".to_owned(),
                first_name: "John".to_owned(),
                last_name: "Doe".to_owned(),
                password: "hunter2".to_owned(),
                phone: "555-0101".to_owned(),
            },
            &conn,
        )
        .unwrap();
        let checking = create_account(user.id, Amount::new(100_00, 2), AccountKind::Checking, &conn)
            .unwrap()
            .id;
        let savings = create_account(user.id, Amount::new(50_00, 2), AccountKind::Savings, &conn)
            .unwrap()
            .id;
        let today = date!(2025 - 10 - 05);

        crate::transfer::transfer_funds(checking, savings, Amount::new(30_00, 2), today, &conn)
            .unwrap();

        assert_eq!(
            account_statement(checking, &conn).unwrap().unwrap().balance,
            Amount::new(70_00, 2)
        );
        assert_eq!(
            account_statement(savings, &conn).unwrap().unwrap().balance,
            Amount::new(80_00, 2)
        );

        crate::pay_bill::pay_bill(checking, "Acme Electric", Amount::new(15_00, 2), today, &conn)
            .unwrap();

        let statement = account_statement(checking, &conn).unwrap().unwrap();

        assert_eq!(statement.balance, Amount::new(55_00, 2));
        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.transactions[1].payee, "Acme Electric");
    }
}
