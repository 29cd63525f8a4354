//! Centralized configuration management for billed

use std::path::PathBuf;
use anyhow::{Result, Context};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Directory where uploaded receipts are stored
    pub attachments_dir: PathBuf,
    /// JSON file holding the signed-in user
    pub session_path: PathBuf,
    /// Receipt constraints for the new-bill form
    pub attachments: AttachmentPolicy,
    /// VAT percentage used when the form leaves it blank
    pub default_pct: u32,
}

/// Which receipt files the new-bill form accepts
#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    /// Lowercase extensions without the dot
    pub accepted_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

impl AttachmentPolicy {
    pub fn from_list(list: &str) -> Self {
        let accepted_extensions = list
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { accepted_extensions }
    }

    /// Whether a file with this name and MIME type may be uploaded.
    ///
    /// The extension must be accepted; a non-empty MIME type must be
    /// `image/<ext>` for one of the accepted extensions.
    pub fn accepts(&self, file_name: &str, mime_type: &str) -> bool {
        let extension = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => return false,
        };
        if !self.accepted_extensions.contains(&extension) {
            return false;
        }

        let mime_type = mime_type.trim().to_lowercase();
        mime_type.is_empty()
            || self
                .accepted_extensions
                .iter()
                .any(|ext| mime_type == format!("image/{}", ext))
    }

    pub fn describe(&self) -> String {
        self.accepted_extensions.join(", ")
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let database_path = std::env::var("BILLED_DB_PATH")
            .unwrap_or_else(|_| "./billed.db".to_string())
            .into();

        let attachments_dir = std::env::var("BILLED_ATTACHMENTS_DIR")
            .unwrap_or_else(|_| "./attachments".to_string())
            .into();

        let session_path = std::env::var("BILLED_SESSION_PATH")
            .unwrap_or_else(|_| "./session.json".to_string())
            .into();

        let attachments = std::env::var("BILLED_ACCEPTED_EXTENSIONS")
            .map(|list| AttachmentPolicy::from_list(&list))
            .unwrap_or_default();

        let default_pct = parse_env_var("BILLED_DEFAULT_PCT")?.unwrap_or(20);

        Ok(Config {
            database_path,
            attachments_dir,
            session_path,
            attachments,
            default_pct,
        })
    }

    /// Get database path as string
    pub fn database_path_str(&self) -> &str {
        self.database_path.to_str().unwrap_or("./billed.db")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Database parent directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        if self.attachments.accepted_extensions.is_empty() {
            anyhow::bail!("No accepted attachment extensions configured");
        }

        if self.default_pct > 100 {
            anyhow::bail!("Default VAT percentage must be at most 100, got {}", self.default_pct);
        }

        std::fs::create_dir_all(&self.attachments_dir)
            .with_context(|| format!("Cannot create attachments directory: {}", self.attachments_dir.display()))?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
