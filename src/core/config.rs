// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Configuration Module
//!
//! Settings for a Siteflow run, layered from lowest to highest precedence:
//!
//! 1. built-in defaults,
//! 2. a TOML file (`siteflow.toml`),
//! 3. directory overrides, which is how the CLI applies its flags.
//!
//! ## Example
//!
//! ```rust,no_run
//! use siteflow::core::config::ConfigBuilder;
//! use std::path::{Path, PathBuf};
//!
//! let config = ConfigBuilder::new()
//!     .with_file(Path::new("siteflow.toml"))
//!     .with_output_dir("dist")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_dir, PathBuf::from("dist"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SiteflowError};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "siteflow.toml";

/// Settings for validation and feed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    /// Directory holding the JSON content files.
    pub data_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    /// Directory the generated feeds are written to.
    pub output_dir: PathBuf,

    #[serde(default = "default_people")]
    /// Person-profile files, relative to `data_dir`.
    pub people: Vec<String>,

    #[serde(default = "default_static_paths")]
    /// Top-level pages listed first in the sitemap.
    pub static_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            people: default_people(),
            static_paths: default_static_paths(),
        }
    }
}

impl Config {
    /// Checks the invariants `build` relies on.
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}

/// Builds a [`Config`] from an optional file and directory overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Creates a builder that yields the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a TOML file. A missing file is an error.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the content directory, whatever the file says.
    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Overrides the output directory, whatever the file says.
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Applies every layer and validates the result.
    pub fn build(self) -> Result<Config> {
        let mut config = if let Some(path) = &self.config_file {
            load_from_file(path)?
        } else {
            Config::default()
        };

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }

        validate_config(&config)?;
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

fn load_from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        SiteflowError::config_error(
            format!("Failed to read config file: {}", e),
            Some(path.to_path_buf()),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        SiteflowError::config_error(
            format!("Failed to parse config file: {}", e),
            Some(path.to_path_buf()),
        )
    })
}

fn validate_config(config: &Config) -> Result<()> {
    if config.people.is_empty() {
        return Err(SiteflowError::config_error(
            "At least one person profile must be listed",
            None,
        ));
    }

    if let Some(path) =
        config.static_paths.iter().find(|path| !path.starts_with('/'))
    {
        return Err(SiteflowError::config_error(
            format!("Static path must start with \"/\": {}", path),
            None,
        ));
    }

    Ok(())
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_people() -> Vec<String> {
    vec!["people/abu_noman_md_sakib.json".to_string()]
}

fn default_static_paths() -> Vec<String> {
    [
        "/",
        "/news",
        "/events",
        "/members",
        "/officers",
        "/alumni",
        "/join",
        "/about",
        "/search",
        "/abu-noman-md-sakib",
    ]
    .iter()
    .map(|path| path.to_string())
    .collect()
}
