use sqlx::PgExecutor;

use crate::store::models::{Account, CreateAccountParams, ListAccountsParams};

const ACCOUNT_COLUMNS: &str = "id, owner, balance, currency, created_at";

/// Account queries. Balances change only through [`AccountQueries::add_balance`].
pub struct AccountQueries;

impl AccountQueries {
    pub async fn create<'e, E>(executor: E, params: &CreateAccountParams) -> Result<Account, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "INSERT INTO accounts (owner, balance, currency) VALUES ($1, $2, $3) RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(&params.owner)
        .bind(params.balance)
        .bind(&params.currency)
        .fetch_one(executor)
        .await
    }

    /// Get account by ID. Missing rows surface as `sqlx::Error::RowNotFound`.
    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Account, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "SELECT {} FROM accounts WHERE id = $1 LIMIT 1",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_one(executor)
        .await
    }

    pub async fn list<'e, E>(executor: E, params: &ListAccountsParams) -> Result<Vec<Account>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "SELECT {} FROM accounts WHERE owner = $1 ORDER BY id LIMIT $2 OFFSET $3",
            ACCOUNT_COLUMNS
        ))
        .bind(&params.owner)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await
    }

    /// Atomically add `delta` to the balance and return the updated row.
    ///
    /// A single `UPDATE ... SET balance = balance + $1` statement: the row lock
    /// is taken and released by the store, no read-then-write window exists.
    /// Must run inside a transaction when paired with other mutations.
    pub async fn add_balance<'e, E>(executor: E, id: i64, delta: i64) -> Result<Account, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "UPDATE accounts SET balance = balance + $1 WHERE id = $2 RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(delta)
        .bind(id)
        .fetch_one(executor)
        .await
    }
}
