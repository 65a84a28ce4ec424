//! Configuration management for FlixGlow
//!
//! Handles config file loading/saving and API key lookup.
//! Config is stored at ~/.config/flixglow/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::tmdb::{TmdbClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable checked before the config file
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Override for the TMDB API root (mirrors, local fakes)
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/flixglow/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flixglow").join("config.toml"))
    }

    /// Load config from the default location, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path. Unlike [`load`](Self::load), a
    /// missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn tmdb_api_key(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, env_key: Option<String>) -> Result<String> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb_api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No TMDB API key configured. Set {} or add tmdb_api_key to {}",
                    API_KEY_ENV,
                    Self::path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "the config file".to_string())
                )
            })
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build a catalog client from this configuration
    pub fn tmdb_client(&self) -> Result<TmdbClient> {
        let api_key = self.tmdb_api_key()?;
        Ok(TmdbClient::with_timeout(
            api_key,
            self.base_url(),
            self.request_timeout(),
        ))
    }
}
