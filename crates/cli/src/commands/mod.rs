//! Command implementations.
//!
//! Each command reads the seeded catalog or the file-backed ledger, does one
//! thing, and prints JSON to stdout.

pub mod menus;
pub mod orders;

use std::path::PathBuf;

use thiserror::Error;

use mr_daebak_core::PhoneError;
use mr_daebak_storefront::config::ConfigError;
use mr_daebak_storefront::db::{FileStore, RepositoryError, StoreError};
use mr_daebak_storefront::pricing::OverLimit;
use mr_daebak_storefront::services::OrderError;

/// Environment variable naming the ledger directory.
pub const DATA_DIR_VAR: &str = "DAEBAK_DATA_DIR";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Ledger error: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Unknown menu: {0}")]
    UnknownMenu(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Count out of range: {0}")]
    OutOfRange(#[from] OverLimit),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the ledger named by `DAEBAK_DATA_DIR`.
///
/// The CLI never falls back to a memory store: there is nothing to inspect
/// in one.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if the variable is unset or blank.
pub fn open_store() -> Result<FileStore, CliError> {
    open_store_with(|key| std::env::var(key).ok())
}

fn open_store_with(lookup: impl Fn(&str) -> Option<String>) -> Result<FileStore, CliError> {
    let dir = lookup(DATA_DIR_VAR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(DATA_DIR_VAR.to_owned()))?;
    tracing::debug!(dir = %dir.display(), "Opening ledger");
    Ok(FileStore::open(dir)?)
}

/// Print a value as pretty JSON.
///
/// # Errors
///
/// Returns `CliError::Json` if the value cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_dir() {
        let err = open_store_with(|_| None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingEnvVar(ref v)) if v == DATA_DIR_VAR
        ));

        let err = open_store_with(|_| Some("  ".to_owned())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_opens_data_dir() {
        let dir = std::env::temp_dir().join(format!("daebak-cli-{}", std::process::id()));
        let store = open_store_with(|_| Some(dir.display().to_string())).unwrap();
        assert_eq!(store.dir(), dir.as_path());
        std::fs::remove_dir_all(&dir).ok();
    }
}
