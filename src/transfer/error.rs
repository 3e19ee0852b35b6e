//! Transfer Error Types
//!
//! What a caller of the transfer engine is allowed to see. Store internals are
//! logged at the boundary and collapsed into these two outcomes.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    #[error("Transfer could not be completed: account not found")]
    NotFound,

    #[error("Transfer could not be completed")]
    Internal,
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::NotFound => "ACCOUNT_NOT_FOUND",
            TransferError::Internal => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::NotFound => 404,
            TransferError::Internal => 500,
        }
    }
}

impl From<&StoreError> for TransferError {
    fn from(e: &StoreError) -> Self {
        if e.is_not_found() {
            TransferError::NotFound
        } else {
            TransferError::Internal
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        TransferError::from(&e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_codes() {
        assert_eq!(TransferError::NotFound.code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(TransferError::Internal.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(TransferError::NotFound.http_status(), 404);
        assert_eq!(TransferError::Internal.http_status(), 500);
    }

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(
            TransferError::from(StoreError::Database(sqlx::Error::RowNotFound)),
            TransferError::NotFound
        );
        assert_eq!(
            TransferError::from(StoreError::Database(sqlx::Error::PoolTimedOut)),
            TransferError::Internal
        );
        assert_eq!(
            TransferError::from(StoreError::Timeout(Duration::from_secs(1))),
            TransferError::Internal
        );
    }

    #[test]
    fn test_display_does_not_leak_internals() {
        let err = TransferError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.to_string(), "Transfer could not be completed");
    }
}
