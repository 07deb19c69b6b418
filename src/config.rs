// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `SOCIOGRAPH_*` environment variables.

use anyhow::{Context, Result};
use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "SOCIOGRAPH";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Largest graph on which exhaustive path enumeration is attempted
    pub max_exhaustive_vertices: usize,
    /// Colored headings in text output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_exhaustive_vertices: 12,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration, reading `file` if given or the per-user config file otherwise.
    ///
    /// An explicitly named file must exist; the per-user one is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_sources(Some((path, true)), ENV_PREFIX),
            None => {
                let default = default_path();
                Self::from_sources(default.as_deref().map(|path| (path, false)), ENV_PREFIX)
            }
        }
    }

    fn from_sources(file: Option<(&Path, bool)>, env_prefix: &str) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some((path, required)) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }
        builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()
            .and_then(::config::Config::try_deserialize)
            .with_context(|| match file {
                Some((path, _)) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Per-user configuration file location
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "sociograph")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::from_sources(None, "SOCIOGRAPH_TEST_EMPTY").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config("log_level = \"debug\"\nmax_exhaustive_vertices = 20\n");
        let config = Config::from_sources(Some((file.path(), true)), "SOCIOGRAPH_TEST_FILE").unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_exhaustive_vertices, 20);
        assert!(config.color);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("color = true\n");
        std::env::set_var("SOCIOGRAPH_TEST_ENV_COLOR", "false");
        let config = Config::from_sources(Some((file.path(), true)), "SOCIOGRAPH_TEST_ENV").unwrap();

        assert!(!config.color);
    }

    #[test]
    fn test_missing_optional_file() {
        let missing = Path::new("/nonexistent/sociograph/config.toml");
        assert!(Config::from_sources(Some((missing, false)), "SOCIOGRAPH_TEST_OPT").is_ok());
        assert!(Config::from_sources(Some((missing, true)), "SOCIOGRAPH_TEST_OPT").is_err());
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("max_exhaustive_vertices = \"lots\"\n");
        assert!(Config::from_sources(Some((file.path(), true)), "SOCIOGRAPH_TEST_BAD").is_err());
    }

    #[test]
    fn test_toml_rendering() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("log_level = \"info\""));
        assert!(rendered.contains("max_exhaustive_vertices = 12"));
    }
}
