//! Store error types

use std::time::Duration;
use thiserror::Error;

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for deadlock_detected
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE for lock_not_available (`lock_timeout` expired)
const LOCK_NOT_AVAILABLE: &str = "55P03";
/// SQLSTATE for query_canceled (`statement_timeout` expired)
const QUERY_CANCELED: &str = "57014";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Transaction timed out after {0:?}")]
    Timeout(Duration),

    /// The unit of work failed and the rollback failed too. The transaction
    /// boundary itself is unreliable; both errors are kept.
    #[error("tx err: {error}, rb err: {rollback}")]
    Rollback {
        #[source]
        error: Box<StoreError>,
        rollback: sqlx::Error,
    },
}

impl StoreError {
    /// The referenced row does not exist: either a lookup found nothing or an
    /// insert pointed a foreign key at a missing account/user.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::RowNotFound) => true,
            StoreError::Database(e) => has_sqlstate(e, FOREIGN_KEY_VIOLATION),
            StoreError::Rollback { error, .. } => error.is_not_found(),
            StoreError::Timeout(_) => false,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(e) => has_sqlstate(e, UNIQUE_VIOLATION),
            StoreError::Rollback { error, .. } => error.is_unique_violation(),
            StoreError::Timeout(_) => false,
        }
    }

    pub fn is_deadlock(&self) -> bool {
        match self {
            StoreError::Database(e) => has_sqlstate(e, DEADLOCK_DETECTED),
            StoreError::Rollback { error, .. } => error.is_deadlock(),
            StoreError::Timeout(_) => false,
        }
    }
}

impl StoreError {
    /// Postgres cancelled a statement because `lock_timeout` or
    /// `statement_timeout` expired
    pub fn is_server_timeout(&self) -> bool {
        match self {
            StoreError::Database(e) => {
                has_sqlstate(e, LOCK_NOT_AVAILABLE) || has_sqlstate(e, QUERY_CANCELED)
            }
            StoreError::Rollback { error, .. } => error.is_server_timeout(),
            StoreError::Timeout(_) => false,
        }
    }
}

fn has_sqlstate(e: &sqlx::Error, code: &str) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(code))
}
