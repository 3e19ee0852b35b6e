//! Bank Ledger service entry point
//!
//! ```text
//! bank_ledger [--env dev] [--init-schema] [--transfer <from> <to> <amount>]
//! ```
//!
//! Connects to PostgreSQL, optionally creates the schema, and optionally runs a
//! single transfer, printing the result as JSON.

use anyhow::{Context, bail};

use bank_ledger::config::AppConfig;
use bank_ledger::logging::init_logging;
use bank_ledger::{Database, SqlStore, TransferTxParams, execute_transfer};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn use_init_schema() -> bool {
    std::env::args().any(|a| a == "--init-schema")
}

/// Parse `--transfer <from> <to> <amount>` if present
fn get_transfer_args() -> anyhow::Result<Option<TransferTxParams>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(pos) = args.iter().position(|a| a == "--transfer") else {
        return Ok(None);
    };
    if pos + 3 >= args.len() {
        bail!("--transfer expects <from_account_id> <to_account_id> <amount>");
    }

    let from_account_id: i64 = args[pos + 1].parse().context("invalid from_account_id")?;
    let to_account_id: i64 = args[pos + 2].parse().context("invalid to_account_id")?;
    let amount: i64 = args[pos + 3].parse().context("invalid amount")?;

    // Request validation belongs to the caller of the engine, which is us here
    if amount <= 0 {
        bail!("amount must be positive");
    }
    if from_account_id == to_account_id {
        bail!("source and destination accounts must differ");
    }

    Ok(Some(TransferTxParams {
        from_account_id,
        to_account_id,
        amount,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = init_logging(&app_config);

    tracing::info!(
        "Starting Bank Ledger in {} mode (build {})",
        env,
        env!("GIT_HASH")
    );

    let transfer = get_transfer_args()?;

    let db = Database::connect_with(&app_config.postgres_url, &app_config.store)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db.health_check().await.context("PostgreSQL health check failed")?;

    if use_init_schema() {
        db.init_schema().await.context("Failed to initialize schema")?;
    }

    let store = SqlStore::new(db).with_tx_timeout(app_config.store.tx_timeout());

    if let Some(params) = transfer {
        match execute_transfer(&store, params).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => bail!("{} ({})", e, e.code()),
        }
    }

    Ok(())
}
