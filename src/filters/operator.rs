//! Filter operators and their value arity

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Comparison operators understood by the filter engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Strict equality against a single value
    Eq,
    /// Membership in a set of values
    In,
}

/// Shape of the value an operator compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A single scalar (or object) value
    Single,
    /// An array of candidate values
    Array,
}

impl FilterOperator {
    /// Every operator, in declaration order
    pub const ALL: [FilterOperator; 2] = [FilterOperator::Eq, FilterOperator::In];

    pub fn arity(self) -> Arity {
        match self {
            FilterOperator::Eq => Arity::Single,
            FilterOperator::In => Arity::Array,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::In => "in",
        }
    }

    /// Whether `value` has the shape this operator expects.
    pub fn accepts(self, value: &Value) -> bool {
        match self.arity() {
            Arity::Single => !value.is_array(),
            Arity::Array => value.is_array(),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an operator string
#[derive(Debug, Clone, Error)]
#[error("Unknown filter operator '{input}'. Valid options: eq, in")]
pub struct ParseOperatorError {
    pub input: String,
}

impl FromStr for FilterOperator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eq" | "=" => Ok(FilterOperator::Eq),
            "in" => Ok(FilterOperator::In),
            _ => Err(ParseOperatorError { input: s.to_string() }),
        }
    }
}
