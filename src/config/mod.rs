//! Runtime configuration (noun module)
//!
//! Configuration is loaded once (see [`crate::parser::parse_config_file`])
//! and passed explicitly to whatever needs it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Named feature flags that are switched on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeSet<String>);

impl FeatureFlags {
    /// Parse a comma-separated list such as `"a, b,c"`; blank entries are skipped
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|flag| !flag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where scaffold templates live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Directory holding one subdirectory of templates per kind
    #[serde(default = "TemplateConfig::default_root")]
    pub root: PathBuf,
}

impl TemplateConfig {
    fn default_root() -> PathBuf {
        PathBuf::from("templates")
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { root: Self::default_root() }
    }
}

/// Where the directory-backed object store keeps its buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_root")]
    pub root: PathBuf,
}

impl StorageConfig {
    fn default_root() -> PathBuf {
        PathBuf::from("data")
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { root: Self::default_root() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub feature_flags: FeatureFlags,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Replace the feature flags, e.g. with ones read from the environment
    #[must_use]
    pub fn with_feature_flags(mut self, feature_flags: FeatureFlags) -> Self {
        self.feature_flags = feature_flags;
        self
    }
}
