//! Application settings
//!
//! Loaded from (in order of priority):
//! 1. `~/.config/sentinel/sentinel.json`, when present
//! 2. Built-in defaults
//!
//! The `SENTINEL_ANALYZE_URL` environment variable overrides the analysis
//! endpoint from either source.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::analysis::HttpAnalysisClient;
use crate::models::Credential;
use crate::session::StaticCredentialRepository;

/// Settings filename in the Sentinel config directory
const SETTINGS_FILE: &str = "sentinel.json";

/// Environment variable overriding `analyze_url`
pub const ANALYZE_URL_ENV: &str = "SENTINEL_ANALYZE_URL";

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Full URL of the classification endpoint
    pub analyze_url: String,
    /// Accounts allowed to log in
    pub users: Vec<Credential>,
    /// JSON dataset to use instead of the built-in sample data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
    /// Session store location; defaults to the config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analyze_url: HttpAnalysisClient::DEFAULT_ENDPOINT.to_string(),
            users: vec![
                Credential::new("user@example.com", "password123"),
                Credential::new("test@test.com", "test123"),
            ],
            dataset_path: None,
            session_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the config directory (or defaults), then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let settings = if config::config_exists(SETTINGS_FILE) {
            config::load_json(SETTINGS_FILE)?
        } else {
            Self::default()
        };
        settings
            .with_analyze_url_override(std::env::var(ANALYZE_URL_ENV).ok())
            .validated()
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings: Self = config::load_json_file(path)?;
        settings.validated()
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("Failed to parse settings JSON")?;
        settings.validated()
    }

    /// Get the default settings file path (~/.config/sentinel/sentinel.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }

    /// Replace `analyze_url` with the value of `SENTINEL_ANALYZE_URL`, if set
    /// and non-empty
    fn with_analyze_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|url| !url.is_empty()) {
            self.analyze_url = url;
        }
        self
    }

    fn validated(self) -> Result<Self> {
        Url::parse(&self.analyze_url)
            .with_context(|| format!("Invalid analyze_url: {}", self.analyze_url))?;
        Ok(self)
    }

    /// Credential repository built from `users`
    pub fn credential_repository(&self) -> StaticCredentialRepository {
        StaticCredentialRepository::new(self.users.clone())
    }
}
