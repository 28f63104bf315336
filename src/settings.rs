//! Run settings: defaults, then an optional `almanac.toml`, then environment
//! variables. CLI flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "almanac.toml";
const DEFAULT_MAX_CONCURRENCY: usize = 4;

fn default_config_dir() -> PathBuf {
    PathBuf::from("configs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API key shared by the HTTP backends (AI_API_KEY)
    pub ai_api_key: Option<String>,

    /// Model name passed to the backend (AI_MODEL)
    pub ai_model: Option<String>,

    /// Skip every backend call (DISABLE_AI)
    #[serde(default)]
    pub disable_ai: bool,

    /// Directory holding one JSON document per group
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Target year, the current year when unset
    pub year: Option<i32>,

    /// Canned replies for the `fixture` backend
    pub fixtures_dir: Option<PathBuf>,

    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
}

impl Settings {
    /// Load settings. An explicitly given file must exist; the default
    /// `almanac.toml` is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, None)
    }

    /// Like [`Settings::load`], reading environment variables from `env`
    /// instead of the process environment when given.
    pub fn load_from(file: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let (path, required) = match file {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        };

        let settings: Settings = Config::builder()
            .add_source(File::from(path.clone()).required(required))
            .add_source(Environment::default().source(env))
            .build()
            .with_context(|| format!("Failed to load settings from {}", path.display()))?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(settings)
    }

    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let settings = Settings::load_from(None, env(&[])).unwrap();

        assert_eq!(settings.config_dir, PathBuf::from("configs"));
        assert_eq!(settings.output_dir, PathBuf::from("docs"));
        assert_eq!(settings.max_concurrency, 4);
        assert!(!settings.disable_ai);
        assert!(settings.ai_api_key.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.toml");
        std::fs::write(
            &file,
            "ai_model = \"from-file\"\noutput_dir = \"public\"\nmax_concurrency = 2\n",
        )
        .unwrap();

        let settings = Settings::load_from(
            Some(&file),
            env(&[("AI_MODEL", "from-env"), ("DISABLE_AI", "true"), ("YEAR", "2027")]),
        )
        .unwrap();

        assert_eq!(settings.ai_model.as_deref(), Some("from-env"));
        assert_eq!(settings.output_dir, PathBuf::from("public"));
        assert_eq!(settings.max_concurrency, 2);
        assert!(settings.disable_ai);
        assert_eq!(settings.year(), 2027);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nope.toml");

        assert!(Settings::load_from(Some(&file), env(&[])).is_err());
    }
}
