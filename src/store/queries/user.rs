use sqlx::PgExecutor;

use crate::store::models::{CreateUserParams, UpdateUserParams, User};

const USER_COLUMNS: &str = "username, hashed_password, full_name, email, password_changed_at, created_at";

/// User repository for CRUD operations
pub struct UserQueries;

impl UserQueries {
    pub async fn create<'e, E>(executor: E, params: &CreateUserParams) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            r#"INSERT INTO users (username, hashed_password, full_name, email)
               VALUES ($1, $2, $3, $4) RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&params.username)
        .bind(&params.hashed_password)
        .bind(&params.full_name)
        .bind(&params.email)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E>(executor: E, username: &str) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE username = $1 LIMIT 1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_one(executor)
        .await
    }

    /// Partial update: only the `Some` fields are written
    pub async fn update<'e, E>(executor: E, params: &UpdateUserParams) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(&format!(
            r#"UPDATE users SET
                 hashed_password = COALESCE($1, hashed_password),
                 password_changed_at = COALESCE($2, password_changed_at),
                 full_name = COALESCE($3, full_name),
                 email = COALESCE($4, email)
               WHERE username = $5
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(params.hashed_password.as_deref())
        .bind(params.password_changed_at)
        .bind(params.full_name.as_deref())
        .bind(params.email.as_deref())
        .bind(&params.username)
        .fetch_one(executor)
        .await
    }
}
