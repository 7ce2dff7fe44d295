//! Layered configuration: built-in defaults, then the TOML file, then
//! `SCHOLIA_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use scholia_client::ApiConfig;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/scholia/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite file holding every local store.
  pub data_path:    PathBuf,
  pub api_url:      String,
  pub api_key:      Option<String>,
  pub timeout_secs: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      data_path:    PathBuf::from("~/.local/share/scholia/scholia.db"),
      api_url:      "http://localhost:8000".to_owned(),
      api_key:      None,
      timeout_secs: 60,
    }
  }
}

impl Settings {
  /// Read `path` (optional) and the environment. A missing file is fine; a
  /// malformed one is an error.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let path = expand_tilde(path);
    let mut settings: Self = config::Config::builder()
      .add_source(config::File::from(path.as_path()).required(false))
      .add_source(config::Environment::with_prefix("SCHOLIA"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.data_path = expand_tilde(&settings.data_path);
    Ok(settings)
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.api_url.clone(),
      api_key:  self.api_key.clone().filter(|k| !k.is_empty()),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
