//! Session persistence.
//!
//! The library crates never store tokens; the CLI keeps the latest
//! [`TokenData`] as JSON inside the config directory.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use iol_auth::TokenData;

/// Session file name within the config directory.
pub const SESSION_FILE: &str = "session.json";

/// File-backed store for the current session's token data.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store under the given config directory.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILE),
        }
    }

    /// Get the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a session has been saved.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the saved token data, if any.
    pub fn load(&self) -> Result<Option<TokenData>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let token = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        Ok(Some(token))
    }

    /// Replace the saved token data.
    pub fn save(&self, token: &TokenData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Delete the saved session. Returns whether one existed.
    pub fn delete(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to delete session file {}", self.path.display()))?;
        Ok(true)
    }
}
