//! Configuration management for the CLI
//!
//! Settings are layered: the optional config file first, then
//! `KUBEWASTE_*` environment variables. Command-line flags override both.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "KUBEWASTE";

/// CLI configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default kubeconfig context
    pub context: Option<String>,
    /// Default namespace (all namespaces when unset)
    pub namespace: Option<String>,
    /// Default output format
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_sources(None),
        }
    }

    /// Load configuration from a specific file and the environment.
    ///
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_sources(Some(path))
    }

    fn load_sources(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Json)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("kubewaste").join("config.json"))
    }
}
