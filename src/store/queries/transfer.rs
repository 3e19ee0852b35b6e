use sqlx::PgExecutor;

use crate::store::models::{ListTransfersParams, Transfer};

pub struct TransferQueries;

impl TransferQueries {
    pub async fn create<'e, E>(
        executor: E,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Transfer, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1 LIMIT 1"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Transfers between the pair in either direction, oldest first
    pub async fn list<'e, E>(executor: E, params: &ListTransfersParams) -> Result<Vec<Transfer>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers
               WHERE (from_account_id = $1 AND to_account_id = $2)
                  OR (from_account_id = $2 AND to_account_id = $1)
               ORDER BY id
               LIMIT $3 OFFSET $4"#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await
    }
}
