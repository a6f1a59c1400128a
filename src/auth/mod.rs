//! Account registration and sign-in.
//!
//! The dashboard talks to two endpoints: `POST /signup` and `POST /signin`.
//! Accounts live in a SQLite store; an in-memory mock store takes over
//! transparently when the database is unreachable.

pub mod api;
pub mod chain;
pub mod memory_store;
pub mod models;
pub mod password;
pub mod sqlite_store;
pub mod store;

pub use api::AuthState;
pub use chain::{Served, StoreChain};
pub use memory_store::MemoryAccountStore;
pub use password::PasswordHasher;
pub use sqlite_store::SqliteAccountStore;
pub use store::{AccountStore, NewAccount, StoreError};
