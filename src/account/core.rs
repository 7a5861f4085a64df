//! Defines the core data model and database queries for bank accounts.

use rusqlite::{
    Connection, OptionalExtension, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{Amount, Error, database_id::AccountId, user::UserId};

/// The kind of a bank account.
///
/// The ledger treats the kind as opaque data; it never affects how balances
/// are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// An everyday checking account.
    Checking,
    /// A savings account.
    Savings,
}

impl AccountKind {
    fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl ToSql for AccountKind {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>, rusqlite::Error> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AccountKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(FromSqlError::Other(
                format!("unknown account kind {other:?}").into(),
            )),
        }
    }
}

/// A bank account owned by a user.
///
/// The stored `opening_balance` never changes after the account is created;
/// every later movement of money is represented by a transaction row. The
/// current balance is always derived, see
/// [current_balance](crate::ledger::current_balance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The ID for the account. Assigned by the store, never reassigned.
    pub id: AccountId,
    /// The user that owns the account.
    pub user_id: UserId,
    /// The balance the account was opened with.
    pub opening_balance: Amount,
    /// The kind of account, e.g. checking or savings.
    pub kind: AccountKind,
}

/// Create the account table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                opening_balance TEXT NOT NULL,
                kind TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Account].
///
/// Columns are read by name so a schema drift fails the read instead of
/// silently shifting fields.
pub fn map_account_row(row: &Row) -> Result<Account, rusqlite::Error> {
    let raw_user_id = row.get("user_id")?;

    Ok(Account {
        id: row.get("id")?,
        user_id: UserId::new(raw_user_id),
        opening_balance: row.get("opening_balance")?,
        kind: row.get("kind")?,
    })
}

/// Create and insert a new account for `user_id` into the database.
///
/// # Errors
/// This function will return a:
/// - [Error::UserNotFound] if `user_id` does not refer to a real user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_account(
    user_id: UserId,
    opening_balance: Amount,
    kind: AccountKind,
    connection: &Connection,
) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "INSERT INTO account (user_id, opening_balance, kind)
             VALUES (?1, ?2, ?3)
             RETURNING id, user_id, opening_balance, kind",
        )?
        .query_one((user_id.as_i64(), opening_balance, kind), map_account_row)
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::UserNotFound(user_id),
            error => error.into(),
        })?;

    Ok(account)
}

/// Retrieve an account from the database by its `id`.
///
/// Returns `None` if no such account exists.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Option<Account>, Error> {
    connection
        .prepare("SELECT id, user_id, opening_balance, kind FROM account WHERE id = :id")?
        .query_one(&[(":id", &id)], map_account_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all accounts owned by `user_id`.
///
/// An empty vector is returned if the user owns no accounts or does not
/// exist.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_accounts_by_user(
    user_id: UserId,
    connection: &Connection,
) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, user_id, opening_balance, kind FROM account WHERE user_id = :user_id")?
        .query_map(&[(":user_id", &user_id.as_i64())], map_account_row)?
        .map(|maybe_account| maybe_account.map_err(Error::SqlError))
        .collect()
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        Amount, Error,
        db::initialize,
        user::{NewUser, UserId, create_user},
    };

    use super::{Account, AccountKind, create_account, get_account, get_accounts_by_user};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert_test_user(conn: &Connection) -> UserId {
        create_user(
            NewUser {
                email: "jane@example.com".to_owned(),
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                password: "hunter2".to_owned(),
                phone: "555-0100".to_owned(),
            },
            conn,
        )
        .expect("Could not create test user")
        .id
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);

        let account =
            create_account(user_id, Amount::new(100_00, 2), AccountKind::Checking, &conn).unwrap();

        assert!(account.id > 0);
        assert_eq!(account.user_id, user_id);
        assert_eq!(account.opening_balance, Amount::new(100_00, 2));
        assert_eq!(account.kind, AccountKind::Checking);
    }

    #[test]
    fn create_fails_on_unknown_user() {
        let conn = get_test_connection();
        let unknown_user = UserId::new(42);

        let result = create_account(
            unknown_user,
            Amount::new(100_00, 2),
            AccountKind::Checking,
            &conn,
        );

        assert_eq!(result, Err(Error::UserNotFound(unknown_user)));
    }

    #[test]
    fn get_account_round_trips() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);
        let account =
            create_account(user_id, Amount::new(50_00, 2), AccountKind::Savings, &conn).unwrap();

        let got = get_account(account.id, &conn).unwrap();

        assert_eq!(got, Some(account));
    }

    #[test]
    fn get_account_returns_none_for_unknown_id() {
        let conn = get_test_connection();

        let got = get_account(999, &conn).unwrap();

        assert_eq!(got, None);
    }

    #[test]
    fn get_accounts_by_user_returns_only_that_users_accounts() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);
        let other_user = create_user(
            NewUser {
                email: "john@example.com".to_owned(),
                first_name: "John".to_owned(),
                last_name: "Doe".to_owned(),
                password: "hunter2".to_owned(),
                phone: "555-0101".to_owned(),
            },
            &conn,
        )
        .unwrap()
        .id;

        let checking =
            create_account(user_id, Amount::new(100_00, 2), AccountKind::Checking, &conn).unwrap();
        let savings =
            create_account(user_id, Amount::new(50_00, 2), AccountKind::Savings, &conn).unwrap();
        create_account(
            other_user,
            Amount::new(25_00, 2),
            AccountKind::Checking,
            &conn,
        )
        .unwrap();

        let got: Vec<Account> = get_accounts_by_user(user_id, &conn).unwrap();

        assert_eq!(got, vec![checking, savings]);
    }

    #[test]
    fn get_accounts_by_user_returns_empty_vec_for_unknown_user() {
        let conn = get_test_connection();

        let got = get_accounts_by_user(UserId::new(42), &conn).unwrap();

        assert!(got.is_empty(), "want no accounts, got {got:?}");
    }
}
