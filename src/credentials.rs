use crate::error::{DatasetError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CREDENTIALS_FILE: &str = "kaggle.json";

/// Username and API key used for basic auth against the Kaggle API.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Kaggle account name.
    pub username: String,
    /// API token from the account settings page.
    pub key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials explicitly.
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Looks up `KAGGLE_USERNAME`/`KAGGLE_KEY` first, then `kaggle.json` in
    /// `$KAGGLE_CONFIG_DIR` or `~/.kaggle`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), dirs::home_dir())
    }

    fn resolve<F>(var: F, home: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let (Some(username), Some(key)) = (var("KAGGLE_USERNAME"), var("KAGGLE_KEY")) {
            tracing::debug!("using credentials from environment");
            return Ok(Self::new(username, key));
        }
        let config_dir = match var("KAGGLE_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => home
                .ok_or_else(|| {
                    DatasetError::Authentication("cannot locate home directory".to_string())
                })?
                .join(".kaggle"),
        };
        Self::from_file(&config_dir.join(CREDENTIALS_FILE))
    }

    /// Read a `kaggle.json` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading credentials file");
        let data = std::fs::read_to_string(path).map_err(|err| {
            DatasetError::Authentication(format!("could not read {}: {err}", path.display()))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            DatasetError::Authentication(format!("invalid {}: {err}", path.display()))
        })
    }
}
