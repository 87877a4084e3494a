// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Failures of the lot store.
///
/// Missing or malformed optional columns are not errors; they load as
/// defaults. These variants cover what cannot be defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// `SQLite` rejected a statement.
    Database(String),
    /// The database file or in-memory URL could not be opened.
    Connection(String),
    /// The database path is not valid UTF-8.
    InvalidDatabasePath,
    /// An embedded migration failed to run.
    Migration(String),
    /// A connection `PRAGMA` could not be applied.
    Pragma {
        /// The pragma statement that failed.
        pragma: &'static str,
        /// The driver message.
        message: String,
    },
    /// `PRAGMA foreign_keys` reports enforcement is off, so bookings could
    /// point at slots that do not exist.
    ForeignKeysDisabled,
    /// A stored key could not be read back, such as a slot id outside the
    /// lot layout or an unknown role.
    UnreadableRecord(String),
    /// A timestamp or audit payload could not be encoded or decoded.
    Encoding(String),
    /// No slot, booking, request, issue, notification, profile or audit
    /// event matched.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::Connection(msg) => write!(f, "Could not open lot database: {msg}"),
            Self::InvalidDatabasePath => write!(f, "Database path is not valid UTF-8"),
            Self::Migration(msg) => write!(f, "Migration failed: {msg}"),
            Self::Pragma { pragma, message } => write!(f, "PRAGMA {pragma} failed: {message}"),
            Self::ForeignKeysDisabled => write!(f, "Foreign key enforcement is not enabled"),
            Self::UnreadableRecord(msg) => write!(f, "Unreadable stored record: {msg}"),
            Self::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("no matching row")),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
