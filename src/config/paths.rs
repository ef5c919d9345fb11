//! Path management for WalletBook
//!
//! Resolution order for the base directory:
//!
//! 1. `WALLETBOOK_DATA_DIR` environment variable (or the `--data-dir` flag)
//! 2. The platform data directory (e.g. `~/.local/share/walletbook` on
//!    Linux, `%APPDATA%\walletbook` on Windows) via the `directories` crate

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::WalletbookError;

/// Manages all paths used by WalletBook
#[derive(Debug, Clone)]
pub struct WalletbookPaths {
    base_dir: PathBuf,
}

impl WalletbookPaths {
    /// Resolve paths from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, WalletbookError> {
        let base_dir = if let Ok(custom) = std::env::var("WALLETBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The base directory holding all WalletBook files
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the persisted user snapshot
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("data").join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), WalletbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WalletbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.base_dir.join("data"))
            .map_err(|e| WalletbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, WalletbookError> {
    ProjectDirs::from("", "", "walletbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| WalletbookError::Config("Could not determine a home directory".into()))
}
