//! Ledger store
//!
//! [`SqlStore`] composes the [`Database`] pool with the stateless query
//! repositories in [`queries`] and adds the transactional operations on top.
//! Callers program against the [`Store`] capability trait; tests bind it to a
//! real PostgreSQL database because the properties worth checking (locking,
//! atomicity) only exist there.

pub mod error;
pub mod exec_tx;
pub mod models;
pub mod queries;

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::db::Database;
use crate::transfer::{TransferTxParams, TransferTxResult};

pub use error::StoreError;
pub use models::{
    Account, CreateAccountParams, CreateSessionParams, CreateUserParams, Entry, ListAccountsParams,
    ListEntriesParams, ListTransfersParams, Session, Transfer, UpdateUserParams, User,
};
use queries::{AccountQueries, EntryQueries, SessionQueries, TransferQueries, UserQueries};

/// Everything the rest of the system may do with the ledger.
///
/// There is intentionally no way to set a balance or delete an account here:
/// balances move only through [`Store::transfer_tx`].
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError>;
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;
    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError>;

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError>;
    async fn list_entries(&self, params: ListEntriesParams) -> Result<Vec<Entry>, StoreError>;
    /// Sum of all entries recorded against the account
    async fn entry_total(&self, account_id: i64) -> Result<i64, StoreError>;

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError>;
    async fn list_transfers(&self, params: ListTransfersParams) -> Result<Vec<Transfer>, StoreError>;

    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError>;
    async fn get_user(&self, username: &str) -> Result<User, StoreError>;
    async fn update_user(&self, params: UpdateUserParams) -> Result<User, StoreError>;

    async fn create_session(&self, params: CreateSessionParams) -> Result<Session, StoreError>;
    async fn get_session(&self, id: Uuid) -> Result<Session, StoreError>;

    /// Move `amount` between two accounts in one transaction
    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError>;
}

/// PostgreSQL-backed [`Store`]
#[derive(Clone)]
pub struct SqlStore {
    db: Database,
    tx_timeout: Option<Duration>,
}

impl SqlStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            tx_timeout: None,
        }
    }

    /// Bound every unit of work run through [`SqlStore::exec_tx`]
    pub fn with_tx_timeout(mut self, tx_timeout: Option<Duration>) -> Self {
        self.tx_timeout = tx_timeout;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Store for SqlStore {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        Ok(AccountQueries::create(self.db.pool(), &params).await?)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        Ok(AccountQueries::get(self.db.pool(), id).await?)
    }

    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        Ok(AccountQueries::list(self.db.pool(), &params).await?)
    }

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError> {
        Ok(EntryQueries::get(self.db.pool(), id).await?)
    }

    async fn list_entries(&self, params: ListEntriesParams) -> Result<Vec<Entry>, StoreError> {
        Ok(EntryQueries::list(self.db.pool(), &params).await?)
    }

    async fn entry_total(&self, account_id: i64) -> Result<i64, StoreError> {
        Ok(EntryQueries::total_for_account(self.db.pool(), account_id).await?)
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        Ok(TransferQueries::get(self.db.pool(), id).await?)
    }

    async fn list_transfers(&self, params: ListTransfersParams) -> Result<Vec<Transfer>, StoreError> {
        Ok(TransferQueries::list(self.db.pool(), &params).await?)
    }

    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        Ok(UserQueries::create(self.db.pool(), &params).await?)
    }

    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        Ok(UserQueries::get(self.db.pool(), username).await?)
    }

    async fn update_user(&self, params: UpdateUserParams) -> Result<User, StoreError> {
        Ok(UserQueries::update(self.db.pool(), &params).await?)
    }

    async fn create_session(&self, params: CreateSessionParams) -> Result<Session, StoreError> {
        Ok(SessionQueries::create(self.db.pool(), &params).await?)
    }

    async fn get_session(&self, id: Uuid) -> Result<Session, StoreError> {
        Ok(SessionQueries::get(self.db.pool(), id).await?)
    }

    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError> {
        SqlStore::transfer_tx(self, params).await
    }
}
