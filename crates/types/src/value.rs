//! Dynamically typed configuration values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolved configuration value, as returned by key lookups.
///
/// Serialized untagged: text as a JSON string, integers as numbers and
/// `NotANumber` as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Integer value (ports)
    Integer(u16),
    /// Plain string value
    Text(String),
    /// A numeric variable was set but could not be parsed
    NotANumber,
}

impl ConfigValue {
    /// Borrow the value as a string, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one
    pub fn as_integer(&self) -> Option<u16> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_not_a_number(&self) -> bool {
        matches!(self, ConfigValue::NotANumber)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Text(s) => f.write_str(s),
            ConfigValue::NotANumber => f.write_str("NaN"),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<u16> for ConfigValue {
    fn from(value: u16) -> Self {
        ConfigValue::Integer(value)
    }
}
