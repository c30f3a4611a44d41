//! Application configuration.
//!
//! Values are layered: built-in defaults, then the optional TOML file under
//! the user's config directory, then `GAME_FINDER_*` environment variables.
//! `RAPIDAPI_KEY` always wins for the API key.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Directory under `~/.config` holding the config file.
pub const CONFIG_DIR: &str = "game-finder";
/// File name of the config file.
pub const CONFIG_FILE: &str = "config.toml";
/// Environment variable carrying the API credential.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

const DEFAULT_BASE_URL: &str = "https://mmo-games.p.rapidapi.com";
const DEFAULT_HOST: &str = "mmo-games.p.rapidapi.com";
const DEFAULT_USER_AGENT: &str = concat!("game-finder/", env!("CARGO_PKG_VERSION"));

const DEFAULT_CONFIG: &str = r#"# Game Finder configuration.

# Base URL of the game metadata API.
api_base_url = "https://mmo-games.p.rapidapi.com"

# Value sent in the x-rapidapi-host header.
api_host = "mmo-games.p.rapidapi.com"

# API key sent in the x-rapidapi-key header.
# Prefer the RAPIDAPI_KEY environment variable over storing it here.
# api_key = ""
"#;

/// Runtime configuration for the API client and frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL the `/game` endpoint is resolved against.
    pub api_base_url: String,
    /// Value for the `x-rapidapi-host` header.
    pub api_host: String,
    /// Value for the `x-rapidapi-key` header.
    #[serde(default)]
    pub api_key: String,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_host: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration using `path` as the file layer. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("api_host", defaults.api_host)?
            .set_default("api_key", defaults.api_key)?
            .set_default("user_agent", defaults.user_agent)?
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("GAME_FINDER"))
            .set_override_option("api_key", env::var(API_KEY_ENV).ok())?
            .build()
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        let mut loaded: Self = config
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        loaded.api_base_url = loaded.api_base_url.trim_end_matches('/').to_string();
        if loaded.api_key.trim().is_empty() {
            warn!("no API key configured; set {API_KEY_ENV} or api_key in the config file");
        }
        Ok(loaded)
    }
}

/// Default config file path (`~/.config/game-finder/config.toml`).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(default_config_path())
}

/// Write the commented default config to `path` unless it already exists.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Environment overrides are process-global, so keep every case that reads
    // or writes variables inside this one test.
    #[test]
    fn layers_file_and_environment() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);

        env::remove_var(API_KEY_ENV);
        env::remove_var("GAME_FINDER_API_HOST");

        let missing = AppConfig::load_from(&path)?;
        assert_eq!(missing, AppConfig::default());

        ensure_config_at(&path)?;
        assert!(path.exists());
        let written = AppConfig::load_from(&path)?;
        assert_eq!(written.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(written.api_host, DEFAULT_HOST);
        assert!(written.api_key.is_empty());

        fs::write(
            &path,
            "api_base_url = \"http://127.0.0.1:9000/\"\napi_key = \"from-file\"\n",
        )?;
        let from_file = AppConfig::load_from(&path)?;
        assert_eq!(from_file.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(from_file.api_key, "from-file");

        env::set_var("GAME_FINDER_API_HOST", "games.internal");
        env::set_var(API_KEY_ENV, "from-env");
        let from_env = AppConfig::load_from(&path)?;
        env::remove_var(API_KEY_ENV);
        env::remove_var("GAME_FINDER_API_HOST");

        assert_eq!(from_env.api_host, "games.internal");
        assert_eq!(from_env.api_key, "from-env");
        assert_eq!(from_env.api_base_url, "http://127.0.0.1:9000");
        Ok(())
    }

    #[test]
    fn existing_config_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "api_host = \"custom\"\n")?;
        ensure_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "api_host = \"custom\"\n");
        Ok(())
    }
}
