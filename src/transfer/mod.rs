//! Money transfers between two accounts
//!
//! [`execute_transfer`] is the entry point for request handlers. It assumes the
//! request was already validated (positive amount, existing and distinct
//! accounts, caller owns the source) and reports failures through the opaque
//! [`TransferError`].

pub mod engine;
pub mod error;

pub use engine::{BalanceAdjustment, TransferTxParams, TransferTxResult, lock_order};
pub use error::TransferError;

use crate::store::Store;

/// Run one transfer through the store.
///
/// No retry: a failed transfer returns immediately and left nothing behind.
/// Resubmitting the same params records a second, independent transfer.
pub async fn execute_transfer(
    store: &dyn Store,
    params: TransferTxParams,
) -> Result<TransferTxResult, TransferError> {
    store.transfer_tx(params).await.map_err(|e| {
        let err = TransferError::from(&e);
        match err {
            TransferError::NotFound => tracing::warn!(
                from_account_id = params.from_account_id,
                to_account_id = params.to_account_id,
                error = %e,
                "Transfer references a missing account"
            ),
            TransferError::Internal => tracing::error!(
                from_account_id = params.from_account_id,
                to_account_id = params.to_account_id,
                amount = params.amount,
                error = %e,
                "Transfer failed"
            ),
        }
        err
    })
}
