//! Account store capability.

use thiserror::Error;

use crate::auth::models::Account;

/// Errors surfaced by an account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already registered in this store.
    #[error("account with this email already exists")]
    DuplicateEmail,
    /// The store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Fields of an account before a store has assigned it an identity.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// A backing store for registered accounts.
///
/// Two implementations exist: the SQLite-backed persistent store and the
/// process-lifetime in-memory store used as a fallback. The chain in
/// [`crate::auth::chain`] tries them in order.
pub trait AccountStore: Send + Sync {
    /// Look up an account by email (exact, case-sensitive match).
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account, assigning its id and creation timestamp.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Cheap liveness probe.
    fn ping(&self) -> Result<(), StoreError>;
}
