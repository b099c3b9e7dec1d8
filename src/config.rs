//! Optional TOML config: the API key and default style choices.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::style::{ImageSize, StyleSelection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "COLLAGE_CONFIG";

/// Environment variable holding the `OpenAI` API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Style and size used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// `OpenAI` API key.
    pub openai: Option<String>,
}

/// Default style choices from the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default style selection; missing fields use the first listed option.
    #[serde(flatten)]
    pub style: StyleSelection,
    /// Default output size.
    pub size: ImageSize,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|e| format!("Invalid config {}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Cannot read config {}: {e}", path.display())),
        }
    }

    /// The `OpenAI` key: `OPENAI_API_KEY` if set and non-empty, else `[keys] openai`.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        self.key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn key_with_env(&self, env_key: Option<String>) -> Option<String> {
        env_key.filter(|k| !k.is_empty()).or_else(|| self.keys.openai.clone())
    }
}

/// Where to look for the config file: `--config`, then `COLLAGE_CONFIG`,
/// then `~/.config/collage/config.toml` (`./collage.toml` without a home).
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/collage/config.toml"))
        })
        .unwrap_or_else(|| PathBuf::from("collage.toml"))
}
