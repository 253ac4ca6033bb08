//! Entity configs (noun module)
//!
//! An entity config describes a derived "profile" type: a set of typed
//! fields, each filled by a value extractor that reads one or more
//! datasets. Configs are stored rows; this module only models them and
//! evaluates extractors over rows already in memory.

mod config;
mod extract;

pub use config::{EntityConfig, EntityFieldConfig, ExtractorAggregation, ValueExtractor, ValuePickerRule};
pub use extract::extract_field_value;
