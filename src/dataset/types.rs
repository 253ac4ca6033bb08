//! Column data types as the analytical engine names them

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// Variable-length string
    #[default]
    Varchar,
    /// 64-bit signed integer
    Bigint,
    /// 64-bit floating point
    Double,
    /// Boolean
    Boolean,
    /// Calendar date
    Date,
    /// Date and time
    Timestamp,
    /// Time of day
    Time,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Varchar => "varchar",
            DataType::Bigint => "bigint",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Time => "time",
        };
        f.write_str(name)
    }
}

/// Error when parsing a data type string
#[derive(Debug, Clone, Error)]
#[error("Invalid data type '{input}'")]
pub struct ParseDataTypeError {
    pub input: String,
}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "varchar" | "string" | "text" => Ok(DataType::Varchar),
            "bigint" | "integer" | "int" | "long" | "hugeint" => Ok(DataType::Bigint),
            "double" | "float" | "decimal" | "number" => Ok(DataType::Double),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "timestamp" | "datetime" | "timestamp with time zone" => Ok(DataType::Timestamp),
            "time" => Ok(DataType::Time),
            _ => Err(ParseDataTypeError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DataType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
