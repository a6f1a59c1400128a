//! In-memory fallback account store.
//!
//! Process-lifetime only: contents vanish on restart. Consulted when the
//! persistent store is unreachable, so registrations keep working in demo
//! environments without a database.

use chrono::Utc;
use parking_lot::Mutex;

use crate::auth::models::Account;
use crate::auth::store::{AccountStore, NewAccount, StoreError};

/// Mock account store backed by a mutex-guarded Vec.
///
/// The existence check and the insert happen under a single lock
/// acquisition, so concurrent registrations for the same email cannot
/// both succeed.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts currently held.
    pub fn len(&self) -> usize {
        self.accounts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for MemoryAccountStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock();

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let account = Account {
            // Timestamp-derived id, the mock store has no sequence.
            id: now.timestamp_millis(),
            fullname: account.fullname,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            created_at: now.to_rfc3339(),
        };

        accounts.push(account.clone());
        Ok(account)
    }

    fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
