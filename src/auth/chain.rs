//! Ordered store chain: persistent primary, in-memory fallback.
//!
//! Calls go to the primary first and move to the fallback only when the
//! primary reports [`StoreError::Unavailable`]. The serving store is
//! reported back so responses can carry the mock-mode tag, and fallback
//! hits are counted for the health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::auth::memory_store::MemoryAccountStore;
use crate::auth::models::Account;
use crate::auth::store::{AccountStore, NewAccount, StoreError};

/// Which store ended up serving a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Served {
    /// The persistent store answered.
    Persistent,
    /// The primary was unavailable; the in-memory mock answered.
    Fallback,
}

pub struct StoreChain {
    primary: Arc<dyn AccountStore>,
    fallback: Arc<MemoryAccountStore>,
    fallback_hits: AtomicU64,
}

/// Snapshot returned by the `/health` endpoint.
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub status: &'static str,
    pub primary_available: bool,
    pub fallback_hits: u64,
    pub fallback_accounts: usize,
}

impl StoreChain {
    pub fn new(primary: Arc<dyn AccountStore>, fallback: Arc<MemoryAccountStore>) -> Self {
        Self {
            primary,
            fallback,
            fallback_hits: AtomicU64::new(0),
        }
    }

    /// Register a new account in exactly one of the two stores.
    ///
    /// The primary path is existence check + insert; the insert relies on
    /// the store's UNIQUE email constraint, so a concurrent duplicate
    /// surfaces as [`StoreError::DuplicateEmail`] rather than a second row.
    /// If the primary is unavailable at either step, the whole operation is
    /// retried against the mock store, whose check-then-insert runs under
    /// one lock.
    pub fn register(&self, account: NewAccount) -> Result<(Account, Served), StoreError> {
        match self.register_primary(&account) {
            Ok(created) => Ok((created, Served::Persistent)),
            Err(StoreError::Unavailable(reason)) => {
                self.note_fallback("signup", &reason);
                let created = self.fallback.insert(account)?;
                Ok((created, Served::Fallback))
            }
            Err(e) => Err(e),
        }
    }

    fn register_primary(&self, account: &NewAccount) -> Result<Account, StoreError> {
        if self.primary.find_by_email(&account.email)?.is_some() {
            return Err(StoreError::DuplicateEmail);
        }
        self.primary.insert(account.clone())
    }

    /// Look up an account by email: primary first, mock on primary failure.
    /// The two stores are never merged.
    pub fn lookup(&self, email: &str) -> Result<Option<Account>, StoreError> {
        match self.primary.find_by_email(email) {
            Ok(found) => Ok(found),
            Err(StoreError::Unavailable(reason)) => {
                self.note_fallback("signin", &reason);
                self.fallback.find_by_email(email)
            }
            Err(e) => Err(e),
        }
    }

    /// Probe the primary and report how often the fallback has been used.
    pub fn health(&self) -> StoreHealth {
        let primary_available = self.primary.ping().is_ok();
        StoreHealth {
            status: if primary_available { "ok" } else { "degraded" },
            primary_available,
            fallback_hits: self.fallback_hits.load(Ordering::Relaxed),
            fallback_accounts: self.fallback.len(),
        }
    }

    fn note_fallback(&self, op: &str, reason: &str) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
        warn!(
            "⚠️  Persistent store failed during {}, using mock store: {}",
            op, reason
        );
    }
}
