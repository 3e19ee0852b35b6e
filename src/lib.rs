//! Bank Ledger - double-entry money transfers over PostgreSQL
//!
//! Moves funds between two accounts atomically, records a paired ledger entry
//! per side, and stays deadlock-free under any number of concurrent transfers.
//!
//! # Modules
//!
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - connection pool and schema
//! - [`store`] - query layer, `Store` trait, transaction executor
//! - [`transfer`] - transfer engine and its lock-ordering rule

pub mod config;
pub mod db;
pub mod logging;
pub mod store;
pub mod transfer;

// Convenient re-exports at crate root
pub use db::Database;
pub use store::{Account, Entry, SqlStore, Store, StoreError, Transfer};
pub use transfer::{TransferError, TransferTxParams, TransferTxResult, execute_transfer};
