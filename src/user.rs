//! Code for creating the user table and fetching users from the database.
//!
//! Users are the external collaborator that owns accounts. The ledger itself
//! only ever consumes a [UserId]; the profile fields exist for the
//! authentication and display layers that sit outside this crate.

use std::fmt::Display;

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The user's email address. Unique across users.
    pub email: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's stored password. Opaque to this crate; hashing is the
    /// authentication layer's concern.
    pub password: String,
    /// The user's phone number.
    pub phone: String,
}

/// The details needed to insert a new user row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's email address.
    pub email: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's stored password.
    pub password: String,
    /// The user's phone number.
    pub phone: String,
}

/// Create the user table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                firstname TEXT NOT NULL,
                lastname TEXT NOT NULL,
                password TEXT NOT NULL,
                phone TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get("id")?;

    Ok(User {
        id: UserId::new(raw_id),
        email: row.get("email")?,
        first_name: row.get("firstname")?,
        last_name: row.get("lastname")?,
        password: row.get("password")?,
        phone: row.get("phone")?,
    })
}

/// Create and insert a new user into the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateEmail] if a user with the same email already exists,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    connection
        .execute(
            "INSERT INTO user (email, firstname, lastname, password, phone)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &new_user.email,
                &new_user.first_name,
                &new_user.last_name,
                &new_user.password,
                &new_user.phone,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateEmail(new_user.email.clone()),
            error => error.into(),
        })?;

    let id = UserId::new(connection.last_insert_rowid());

    Ok(User {
        id,
        email: new_user.email,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        password: new_user.password,
        phone: new_user.phone,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// Returns `None` if no such user exists.
///
/// # Errors
/// This function will return an [Error::SqlError] if there was an error
/// trying to access the store.
pub fn get_user_by_id(user_id: UserId, connection: &Connection) -> Result<Option<User>, Error> {
    connection
        .prepare("SELECT id, email, firstname, lastname, password, phone FROM user WHERE id = :id")?
        .query_one(&[(":id", &user_id.as_i64())], map_user_row)
        .optional()
        .map_err(|error| error.into())
}

/// Get the user from the database with an email equal to `email`.
///
/// This is the lookup the authentication collaborator uses to find the user
/// record for a log-in attempt. Returns `None` if no such user exists.
///
/// # Errors
/// This function will return an [Error::SqlError] if there was an error
/// trying to access the store.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<Option<User>, Error> {
    connection
        .prepare(
            "SELECT id, email, firstname, lastname, password, phone FROM user WHERE email = :email",
        )?
        .query_one(&[(":email", &email)], map_user_row)
        .optional()
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|count| count as usize)
        .map_err(|error| error.into())
}
