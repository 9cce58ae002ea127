//! Client configuration persisted under `~/.eventable/`.
//!
//! Two files: `config.json` holds the server address and the stored
//! session; `ui.json` holds the two dashboard tab indices: plain
//! integers, no schema versioning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use eventable_core::{GroupId, Role, UserId};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found. Run 'eventable login' first.")]
    NotFound,
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Not logged in. Run 'eventable login' first.")]
    NoSession,
}

/// A logged-in session as stored on disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user_id: UserId,
    pub role: Role,
    #[serde(default)]
    pub admin_of: Vec<GroupId>,
}

/// Main client configuration stored in ~/.eventable/config.json
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientConfig {
    pub server: String,
    #[serde(default)]
    pub session: Option<StoredSession>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: "http://127.0.0.1:5000".to_string(),
            session: None,
        }
    }
}

impl ClientConfig {
    /// Load config from the default path (~/.eventable/config.json)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                ConfigError::Read(e)
            }
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to a custom path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// Get the default config path (~/.eventable/config.json)
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// The stored session, or `NoSession` when logged out.
    pub fn session(&self) -> Result<&StoredSession, ConfigError> {
        self.session.as_ref().ok_or(ConfigError::NoSession)
    }
}

/// Durable UI preferences: the last-active dashboard tab per view.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPrefs {
    #[serde(default)]
    pub admin_dashboard_tab: u32,
    #[serde(default)]
    pub user_dashboard_tab: u32,
}

impl UiPrefs {
    /// Load prefs from the default path; a missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load prefs from a custom path; a missing file means defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read(e)),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// Get the default prefs path (~/.eventable/ui.json)
    pub fn default_path() -> PathBuf {
        config_dir().join("ui.json")
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".eventable")
}
