//! Connection and clock configuration for the ledger database.
//!
//! The configuration is an explicit value owned by the host and passed to
//! whichever code needs it. There is no process-wide connection state, so
//! multiple independently configured instances (e.g. one per test) can
//! coexist.

use std::path::PathBuf;

use rusqlite::Connection;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::Error;

/// Where the ledger database lives and which timezone dates are stamped in.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the SQLite database.
    pub db_path: PathBuf,
    /// The UTC offset applied when computing "today" for new transactions.
    pub utc_offset: UtcOffset,
}

impl Config {
    /// Create a configuration for the database at `db_path`, stamping dates
    /// in UTC.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            utc_offset: UtcOffset::UTC,
        }
    }

    /// Set the UTC offset used to compute transaction dates.
    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Open a connection to the configured database.
    ///
    /// Each operation should use its own connection for the duration of the
    /// call; dropping the connection releases it on every exit path.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened.
    pub fn connect(&self) -> Result<Connection, Error> {
        let connection = Connection::open(&self.db_path)?;
        connection.pragma_update(None, "foreign_keys", "ON")?;

        Ok(connection)
    }

    /// The current date in the configured timezone.
    pub fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.utc_offset).date()
    }
}

#[cfg(test)]
mod config_tests {
    use time::UtcOffset;

    use super::Config;

    #[test]
    fn defaults_to_utc() {
        let config = Config::new("bank.db");

        assert_eq!(config.utc_offset, UtcOffset::UTC);
    }

    #[test]
    fn with_utc_offset_overrides_default() {
        let offset = UtcOffset::from_hms(12, 0, 0).unwrap();

        let config = Config::new("bank.db").with_utc_offset(offset);

        assert_eq!(config.utc_offset, offset);
    }
}
