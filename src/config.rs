//! Process configuration.
//!
//! All settings are read once from the environment at startup; there is no
//! runtime reconfiguration. A `.env` file is honored via `dotenv` before
//! this module is consulted.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_FILENAME: &str = "mrv_accounts.db";

/// Server configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Path of the SQLite database backing the account store.
    pub db_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = parse_port(env::var("PORT").ok());
        let db_path = resolve_data_path(env::var("MRV_DB_PATH").ok(), DEFAULT_DB_FILENAME);

        Self {
            listen_addr: format!("0.0.0.0:{port}"),
            db_path,
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn default_data_path(filename: &str) -> String {
    // Anchor defaults to the crate directory, not the caller's cwd.
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    base.join(filename).to_string_lossy().to_string()
}

fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return default_data_path(default_filename);
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    // Relative paths are resolved against the crate directory as well.
    base.join(p).to_string_lossy().to_string()
}
