use sqlx::PgPool;

/// Advisory lock key serializing concurrent schema initialization
const SCHEMA_LOCK_KEY: i64 = 0x6c65_6467_6572;

/// Apply the ledger schema. Every statement is idempotent, and the whole set
/// runs in one transaction under an advisory lock so parallel callers
/// (e.g. concurrently running test binaries) cannot race on catalog rows.
pub async fn apply(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing ledger schema...");

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for (name, ddl) in STATEMENTS {
        sqlx::query(ddl).execute(&mut *tx).await.inspect_err(|e| {
            tracing::error!(statement = name, error = %e, "Failed to apply schema statement");
        })?;
    }

    tx.commit().await?;
    tracing::info!("Ledger schema ready");
    Ok(())
}

const STATEMENTS: &[(&str, &str)] = &[
    ("users", CREATE_USERS_TABLE),
    ("accounts", CREATE_ACCOUNTS_TABLE),
    ("accounts_owner_idx", CREATE_ACCOUNTS_OWNER_INDEX),
    ("entries", CREATE_ENTRIES_TABLE),
    ("entries_account_idx", CREATE_ENTRIES_ACCOUNT_INDEX),
    ("transfers", CREATE_TRANSFERS_TABLE),
    ("transfers_from_idx", CREATE_TRANSFERS_FROM_INDEX),
    ("transfers_to_idx", CREATE_TRANSFERS_TO_INDEX),
    ("transfers_pair_idx", CREATE_TRANSFERS_PAIR_INDEX),
    ("sessions", CREATE_SESSIONS_TABLE),
];

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username            VARCHAR PRIMARY KEY,
    hashed_password     VARCHAR NOT NULL,
    full_name           VARCHAR NOT NULL,
    email               VARCHAR UNIQUE NOT NULL,
    password_changed_at TIMESTAMPTZ NOT NULL DEFAULT '0001-01-01 00:00:00Z',
    created_at          TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

pub const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id         BIGSERIAL PRIMARY KEY,
    owner      VARCHAR NOT NULL REFERENCES users (username),
    balance    BIGINT NOT NULL,
    currency   VARCHAR NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT owner_currency_key UNIQUE (owner, currency)
)
"#;

const CREATE_ACCOUNTS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS accounts_owner_idx ON accounts (owner)";

pub const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id         BIGSERIAL PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts (id),
    amount     BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_ENTRIES_ACCOUNT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS entries_account_id_idx ON entries (account_id)";

pub const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers (
    id              BIGSERIAL PRIMARY KEY,
    from_account_id BIGINT NOT NULL REFERENCES accounts (id),
    to_account_id   BIGINT NOT NULL REFERENCES accounts (id),
    amount          BIGINT NOT NULL CHECK (amount > 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_TRANSFERS_FROM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS transfers_from_account_id_idx ON transfers (from_account_id)";

const CREATE_TRANSFERS_TO_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS transfers_to_account_id_idx ON transfers (to_account_id)";

const CREATE_TRANSFERS_PAIR_INDEX: &str = "CREATE INDEX IF NOT EXISTS transfers_pair_idx ON transfers (from_account_id, to_account_id)";

pub const CREATE_SESSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    id            UUID PRIMARY KEY,
    username      VARCHAR NOT NULL REFERENCES users (username),
    refresh_token VARCHAR NOT NULL,
    user_agent    VARCHAR NOT NULL,
    client_ip     VARCHAR NOT NULL,
    is_blocked    BOOLEAN NOT NULL DEFAULT false,
    expires_at    TIMESTAMPTZ NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_are_idempotent() {
        for (name, ddl) in STATEMENTS {
            assert!(ddl.contains("IF NOT EXISTS"), "{} must be idempotent", name);
        }
    }

    #[test]
    fn test_referenced_tables_created_first() {
        let pos = |n: &str| STATEMENTS.iter().position(|(name, _)| *name == n).unwrap();
        assert!(pos("users") < pos("accounts"));
        assert!(pos("accounts") < pos("entries"));
        assert!(pos("accounts") < pos("transfers"));
        assert!(pos("users") < pos("sessions"));
    }
}
