use sqlx::PgExecutor;

use crate::store::models::{Entry, ListEntriesParams};

/// Entry queries. Entries are append-only: there is no update or delete.
pub struct EntryQueries;

impl EntryQueries {
    pub async fn create<'e, E>(executor: E, account_id: i64, amount: i64) -> Result<Entry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"INSERT INTO entries (account_id, amount) VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Entry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT id, account_id, amount, created_at FROM entries WHERE id = $1 LIMIT 1")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn list<'e, E>(executor: E, params: &ListEntriesParams) -> Result<Vec<Entry>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at FROM entries
               WHERE account_id = $1 ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(params.account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await
    }

    /// Sum of every entry recorded against the account (0 when there are none)
    pub async fn total_for_account<'e, E>(executor: E, account_id: i64) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM entries WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_one(executor)
        .await
    }
}
