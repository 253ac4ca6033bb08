//! Parsers (verb module)
//!
//! Transforms YAML and JSON documents into catalog, config and query types.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::ParseError;
use crate::query::{StructuredQuery, STRUCTURED_QUERY_VERSION};

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a catalog from a YAML file
pub fn parse_catalog_file<P: AsRef<Path>>(path: P) -> Result<Catalog, ParseError> {
    parse_catalog_str(&read_file(path.as_ref())?)
}

/// Parse a catalog from a YAML string
pub fn parse_catalog_str(yaml: &str) -> Result<Catalog, ParseError> {
    parse_yaml(yaml)
}

/// Parse runtime configuration from a YAML file
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<Config, ParseError> {
    parse_config_str(&read_file(path.as_ref())?)
}

/// Parse runtime configuration from a YAML string
pub fn parse_config_str(yaml: &str) -> Result<Config, ParseError> {
    parse_yaml(yaml)
}

/// Parse a structured query from a JSON file
pub fn parse_structured_query_file<P: AsRef<Path>>(path: P) -> Result<StructuredQuery, ParseError> {
    parse_structured_query_str(&read_file(path.as_ref())?)
}

/// Parse a structured query from JSON, rejecting versions newer than this release
pub fn parse_structured_query_str(json: &str) -> Result<StructuredQuery, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(ParseError::MissingVersion)?;
    if version > u64::from(STRUCTURED_QUERY_VERSION) {
        return Err(ParseError::UnsupportedVersion {
            found: version,
            supported: STRUCTURED_QUERY_VERSION,
        });
    }
    Ok(serde_json::from_value(value)?)
}
