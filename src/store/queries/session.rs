use sqlx::PgExecutor;
use uuid::Uuid;

use crate::store::models::{CreateSessionParams, Session};

const SESSION_COLUMNS: &str =
    "id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at";

pub struct SessionQueries;

impl SessionQueries {
    pub async fn create<'e, E>(executor: E, params: &CreateSessionParams) -> Result<Session, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            r#"INSERT INTO sessions
                 (id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {}"#,
            SESSION_COLUMNS
        ))
        .bind(params.id)
        .bind(&params.username)
        .bind(&params.refresh_token)
        .bind(&params.user_agent)
        .bind(&params.client_ip)
        .bind(params.is_blocked)
        .bind(params.expires_at)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E>(executor: E, id: Uuid) -> Result<Session, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "SELECT {} FROM sessions WHERE id = $1 LIMIT 1",
            SESSION_COLUMNS
        ))
        .bind(id)
        .fetch_one(executor)
        .await
    }
}
