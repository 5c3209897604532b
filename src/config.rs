//! Run configuration, loaded from TOML with an embedded default.

use crate::error::ConfigError;
use crate::model::DEFAULT_VERSIONS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Schema versions to export, in processing order.
    pub versions: Vec<String>,
    pub output: OutputConfig,
    pub declarations: DeclarationsConfig,
    pub property_sets: PropertySetsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeclarationsConfig {
    /// Directory holding `declarations-<version>.json` dumps.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PropertySetsConfig {
    /// Directory holding authoritative `property-sets-<version>.json` files.
    pub local_dir: Option<PathBuf>,
    /// Remote catalog URL per version.
    pub remote: BTreeMap<String, String>,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
versions = ["IFC2X3", "IFC4", "IFC4X3_ADD2"]

[output]
dir = "lib/generated/ifc-schema"

[declarations]
dir = "schema/declarations"

[property_sets]
request_delay_ms = 1000
timeout_secs = 30

# [property_sets.remote]
# IFC4 = "https://example.org/catalogs/ifc4/property-sets.json"
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            versions: DEFAULT_VERSIONS.iter().map(ToString::to_string).collect(),
            output: OutputConfig::default(),
            declarations: DeclarationsConfig::default(),
            property_sets: PropertySetsConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("lib/generated/ifc-schema"),
        }
    }
}

impl Default for DeclarationsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("schema/declarations"),
        }
    }
}

impl Default for PropertySetsConfig {
    fn default() -> Self {
        Self {
            local_dir: None,
            remote: BTreeMap::new(),
            request_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

impl PropertySetsConfig {
    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        if config.versions.is_empty() {
            return Err(ConfigError::NoVersions);
        }
        Ok(config)
    }
}

/// Loads configuration from `path`, or the embedded default when none is given.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            Config::from_toml(&contents)
        }
        None => {
            info!("Using default embedded configuration");
            Config::from_toml(DEFAULT_CONFIG)
        }
    }
}
