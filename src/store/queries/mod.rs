//! Parameterized CRUD over the ledger tables
//!
//! Every function is generic over [`sqlx::PgExecutor`], so the same query runs
//! against the pool or against a connection borrowed from an open transaction.

pub mod account;
pub mod entry;
pub mod session;
pub mod transfer;
pub mod user;

pub use account::AccountQueries;
pub use entry::EntryQueries;
pub use session::SessionQueries;
pub use transfer::TransferQueries;
pub use user::UserQueries;
