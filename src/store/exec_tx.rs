//! Transaction executor
//!
//! The only path by which a multi-statement mutation reaches the database.
//! Nothing else in the crate calls `commit` or `rollback`.

use futures::future::BoxFuture;
use sqlx::PgConnection;

use super::{SqlStore, StoreError};

impl SqlStore {
    /// Run `unit_of_work` inside a fresh transaction.
    ///
    /// The closure receives the transaction's connection; every query it issues
    /// through that connection is part of the same atomic unit.
    ///
    /// - `Ok` from the unit of work: commit, then return its value.
    /// - `Err`: roll back and return the error. If the rollback fails as well,
    ///   return [`StoreError::Rollback`] carrying both.
    /// - Configured timeout expires: treated as `Err(StoreError::Timeout)`.
    ///   The same bound is installed server-side as `lock_timeout` and
    ///   `statement_timeout`, so a statement stuck on a row lock is cancelled
    ///   by Postgres at the deadline instead of holding up the rollback.
    ///
    /// Dropping the returned future before completion drops the transaction
    /// uncommitted, which sqlx rolls back when the connection is returned.
    pub async fn exec_tx<T, F>(&self, unit_of_work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, StoreError>> + Send,
    {
        let mut tx = self.db.pool().begin().await?;

        let outcome = match self.tx_timeout {
            Some(limit) => {
                // Integer values are milliseconds; 0 would disable the limit
                let ms = limit.as_millis().max(1);
                sqlx::query(&format!("SET LOCAL lock_timeout = {}", ms))
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(&format!("SET LOCAL statement_timeout = {}", ms))
                    .execute(&mut *tx)
                    .await?;

                tokio::time::timeout(limit, unit_of_work(&mut *tx))
                    .await
                    .unwrap_or_else(|_| Err(StoreError::Timeout(limit)))
                    .map_err(|e| {
                        if e.is_server_timeout() {
                            StoreError::Timeout(limit)
                        } else {
                            e
                        }
                    })
            }
            None => unit_of_work(&mut *tx).await,
        };

        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%error, %rollback, "Rollback failed after unit of work error");
                    return Err(StoreError::Rollback {
                        error: Box::new(error),
                        rollback,
                    });
                }
                tracing::debug!(%error, "Transaction rolled back");
                Err(error)
            }
        }
    }
}
