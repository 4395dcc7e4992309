use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "todolist";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_STORAGE_KEY: &str = "todos";
pub const ENV_REMOTE_URL: &str = "TODOLIST_URL";
pub const ENV_DATA_DIR: &str = "TODOLIST_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory holding the slot files. `None` means `~/.todolist`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Slot the whole collection is written to.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the API; the collection lives at `<base_url>/todos`.
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BackendConfig {
    Local(LocalConfig),
    Remote(RemoteConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Local(LocalConfig::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub backend: BackendConfig,
}

impl Config {
    /// Loads the user's config file and applies environment overrides.
    /// Falls back to defaults when the file is missing or broken.
    pub fn load() -> Self {
        let config = match config_path().and_then(|path| Self::try_load(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// `TODOLIST_URL` switches to the remote backend; `TODOLIST_DATA_DIR`
    /// moves the local slot directory. `lookup` is `std::env::var` in
    /// production.
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = self;
        if let Some(url) = lookup(ENV_REMOTE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_remote(url);
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config = config.with_data_dir(PathBuf::from(dir));
        }
        config
    }

    pub fn with_remote(self, base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig::Remote(RemoteConfig {
                base_url: base_url.into(),
            }),
        }
    }

    /// Points the local backend at `dir`. Has no effect on a remote config.
    pub fn with_data_dir(self, dir: PathBuf) -> Self {
        match self.backend {
            BackendConfig::Local(local) => Self {
                backend: BackendConfig::Local(LocalConfig {
                    data_dir: Some(dir),
                    ..local
                }),
            },
            remote => Self { backend: remote },
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = self.to_pretty_json()?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
