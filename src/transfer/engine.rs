//! Transfer engine
//!
//! One transfer is three related mutations executed as one unit of work:
//!
//! ```text
//! INSERT transfers ─▶ INSERT entries (-amount, +amount) ─▶ UPDATE accounts (lower id first)
//! ```
//!
//! # Lock ordering
//!
//! The balance updates take row locks. Two transfers A→B and B→A that each
//! locked "source first" would wait on each other forever. Both balances are
//! therefore always adjusted in ascending account-id order, whatever the
//! direction of the request, so every transaction in the system acquires
//! account locks in one global order and no wait cycle can form.

use serde::{Deserialize, Serialize};

use crate::store::queries::{AccountQueries, EntryQueries, TransferQueries};
use crate::store::{Account, Entry, SqlStore, StoreError, Transfer};

/// Input of one transfer. Validated upstream: `amount > 0`, both accounts
/// exist and differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Everything a transfer created or touched, as committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

/// A signed change to apply to one account's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceAdjustment {
    pub account_id: i64,
    pub delta: i64,
}

/// The two balance adjustments of a transfer, in lock acquisition order
/// (ascending account id).
pub fn lock_order(params: &TransferTxParams) -> [BalanceAdjustment; 2] {
    let debit = BalanceAdjustment {
        account_id: params.from_account_id,
        delta: -params.amount,
    };
    let credit = BalanceAdjustment {
        account_id: params.to_account_id,
        delta: params.amount,
    };

    if params.from_account_id < params.to_account_id {
        [debit, credit]
    } else {
        [credit, debit]
    }
}

impl SqlStore {
    /// Create the transfer record and both entries, and move the money,
    /// atomically. Not idempotent: every call records a new transfer.
    ///
    /// Store errors propagate unchanged; no retry happens here.
    pub async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError> {
        tracing::debug!(
            from_account_id = params.from_account_id,
            to_account_id = params.to_account_id,
            amount = params.amount,
            "Starting transfer"
        );

        let result = self
            .exec_tx(move |conn| {
                Box::pin(async move {
                    let transfer = TransferQueries::create(
                        &mut *conn,
                        params.from_account_id,
                        params.to_account_id,
                        params.amount,
                    )
                    .await?;

                    let from_entry =
                        EntryQueries::create(&mut *conn, params.from_account_id, -params.amount).await?;
                    let to_entry =
                        EntryQueries::create(&mut *conn, params.to_account_id, params.amount).await?;

                    let [first, second] = lock_order(&params);
                    let first_account =
                        AccountQueries::add_balance(&mut *conn, first.account_id, first.delta).await?;
                    let second_account =
                        AccountQueries::add_balance(&mut *conn, second.account_id, second.delta).await?;

                    let (from_account, to_account) = if first.account_id == params.from_account_id {
                        (first_account, second_account)
                    } else {
                        (second_account, first_account)
                    };

                    Ok::<_, StoreError>(TransferTxResult {
                        transfer,
                        from_account,
                        to_account,
                        from_entry,
                        to_entry,
                    })
                })
            })
            .await?;

        tracing::info!(
            transfer_id = result.transfer.id,
            from_account_id = params.from_account_id,
            to_account_id = params.to_account_id,
            amount = params.amount,
            "Transfer committed"
        );
        Ok(result)
    }
}
