// User configuration: API token, workspace root and API base URL.
//
// Values come from `<config dir>/exsubmit/user.json` and can be overridden by
// environment variables, which is handy for CI and for tests:
// - `EXSUBMIT_TOKEN`
// - `EXSUBMIT_WORKSPACE`
// - `EXSUBMIT_API_URL`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Where the file was (or would have been) read from; used in messages.
    #[serde(skip)]
    pub source: PathBuf,
}

/// Token and workspace, both present.
#[derive(Debug, Clone, Copy)]
pub struct Configured<'a> {
    pub token: &'a str,
    pub workspace: &'a Path,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            token: None,
            workspace: None,
            api_base_url: default_api_url(),
            source: config_path(),
        }
    }
}

/// `~/.config/exsubmit/user.json` on Linux; the platform equivalent elsewhere.
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("exsubmit").join("user.json")
}

impl Config {
    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config {
                source: path.to_path_buf(),
                ..Config::default()
            });
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Parsing config {}", path.display()))?;
        config.source = path.to_path_buf();
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var("EXSUBMIT_TOKEN").filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        if let Some(workspace) = var("EXSUBMIT_WORKSPACE").filter(|v| !v.is_empty()) {
            self.workspace = Some(PathBuf::from(workspace));
        }
        if let Some(url) = var("EXSUBMIT_API_URL").filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
    }

    /// Replace the workspace root for this run only.
    pub fn with_workspace_override(mut self, workspace: Option<PathBuf>) -> Self {
        if workspace.is_some() {
            self.workspace = workspace;
        }
        self
    }

    /// Checked before any path is looked at.
    pub fn ensure_configured(&self) -> Result<Configured<'_>, SubmitError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SubmitError::MissingToken {
                config: self.source.clone(),
            })?;
        let workspace = self
            .workspace
            .as_deref()
            .filter(|w| !w.as_os_str().is_empty())
            .ok_or_else(|| SubmitError::MissingWorkspace {
                config: self.source.clone(),
            })?;
        Ok(Configured { token, workspace })
    }
}
