//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use avandar::{parser, Catalog, EntityFieldConfig, QueryColumn, StructuredQuery};
use serde_json::{Map, Value};

/// Path of a file under tests/test_data
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from("tests/test_data").join(name)
}

/// Load a catalog fixture from the tests/test_data directory
pub fn load_catalog(name: &str) -> Catalog {
    parser::parse_catalog_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load catalog {}: {}", name, e))
}

/// Load a structured query fixture from the tests/test_data directory
pub fn load_query(name: &str) -> StructuredQuery {
    parser::parse_structured_query_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load query {}: {}", name, e))
}

/// Load a JSON array of row objects
pub fn load_rows(name: &str) -> Vec<Map<String, Value>> {
    let raw = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read rows {}: {}", name, e));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Invalid rows {}: {}", name, e))
}

/// Query column for a dataset column of the fixture catalog
pub fn dataset_query_column(catalog: &Catalog, dataset_id: &str, column_id: &str) -> QueryColumn {
    let column = catalog
        .require_column(dataset_id, column_id)
        .unwrap_or_else(|e| panic!("{}", e))
        .clone();
    QueryColumn::from_dataset_column(column)
}

/// Query column for an entity field of the fixture catalog
pub fn entity_query_column(catalog: &Catalog, entity_config_id: &str, field_id: &str) -> QueryColumn {
    let field: EntityFieldConfig = catalog
        .require_entity_config(entity_config_id)
        .unwrap_or_else(|e| panic!("{}", e))
        .get_field(field_id)
        .unwrap_or_else(|| panic!("Field {} not found", field_id))
        .clone();
    QueryColumn::from_entity_field(field)
}

/// Join SQL lines with newlines, for readable expected output
pub fn sql_lines(lines: &[&str]) -> String {
    lines.join("\n")
}
