//! SQLite-backed account store.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;

use crate::auth::models::Account;
use crate::auth::store::{AccountStore, NewAccount, StoreError};

/// Persistent account storage with a SQLite backend.
///
/// A connection is opened per call. The schema is created at construction;
/// a database that cannot be opened still constructs, each call then fails
/// with [`StoreError::Unavailable`] and the caller's fallback takes over.
pub struct SqliteAccountStore {
    db_path: String,
}

impl SqliteAccountStore {
    pub fn new(db_path: &str) -> Self {
        let store = Self {
            db_path: db_path.to_string(),
        };
        match store.init_schema() {
            Ok(()) => info!("📦 Account table ready at {}", store.db_path),
            Err(e) => tracing::warn!("⚠️  Could not initialize account table: {}", e),
        }
        store
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS companies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fullname TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(store_error)?;

        Ok(())
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.db_path).map_err(store_error)
    }
}

impl AccountStore for SqliteAccountStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.open()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, fullname, email, password, role, created_at
                 FROM companies WHERE email = ?1",
            )
            .map_err(store_error)?;

        let row = stmt.query_row(params![email], |row| {
            Ok(Account {
                id: row.get(0)?,
                fullname: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                role: row.get(4)?,
                created_at: row.get(5)?,
            })
        });

        match row {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(store_error(e)),
        }
    }

    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let created_at = Utc::now().to_rfc3339();
        let conn = self.open()?;

        // The UNIQUE constraint on email makes this atomic with respect to
        // concurrent registrations; a violation maps to DuplicateEmail.
        conn.execute(
            "INSERT INTO companies (fullname, email, password, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.fullname,
                account.email,
                account.password_hash,
                account.role,
                created_at,
            ],
        )
        .map_err(store_error)?;

        Ok(Account {
            id: conn.last_insert_rowid(),
            fullname: account.fullname,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            created_at,
        })
    }

    fn ping(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(store_error)
    }
}

fn store_error(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateEmail
        }
        _ => StoreError::Unavailable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_store() -> (SqliteAccountStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = SqliteAccountStore::new(temp_file.path().to_str().unwrap());
        (store, temp_file)
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            fullname: "Acme Co".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: "industry".to_string(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let (store, _temp) = create_test_store();

        let created = store.insert(new_account("a@x.com")).unwrap();
        assert!(created.id > 0);
        assert!(!created.created_at.is_empty());

        let found = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.fullname, "Acme Co");
        assert_eq!(found.role, "industry");
    }

    #[test]
    fn test_find_unknown_email_is_none() {
        let (store, _temp) = create_test_store();
        assert!(store.find_by_email("nobody@x.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_hits_unique_constraint() {
        let (store, _temp) = create_test_store();

        store.insert(new_account("a@x.com")).unwrap();
        let second = store.insert(new_account("a@x.com"));
        assert!(matches!(second, Err(StoreError::DuplicateEmail)));

        // Exactly one row survived.
        assert!(store.find_by_email("a@x.com").unwrap().is_some());
    }

    #[test]
    fn test_ids_are_assigned_by_the_store() {
        let (store, _temp) = create_test_store();

        let first = store.insert(new_account("a@x.com")).unwrap();
        let second = store.insert(new_account("b@x.com")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_unreachable_database_reports_unavailable() {
        // A directory path is not a valid database file.
        let dir = TempDir::new().unwrap();
        let store = SqliteAccountStore::new(dir.path().to_str().unwrap());

        assert!(matches!(store.ping(), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.find_by_email("a@x.com"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.insert(new_account("a@x.com")),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_email_lookup_is_case_sensitive() {
        let (store, _temp) = create_test_store();

        store.insert(new_account("a@x.com")).unwrap();
        assert!(store.find_by_email("A@X.COM").unwrap().is_none());
    }
}
