// src/types/simple.rs
//! The compact projection output for property values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A projected property value: scalar, timestamp, or a one-level list.
///
/// This is the closed target type of property simplification. Rollup
/// arrays flatten into a single `List`; date-like values project to their
/// start only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimpleValue {
    Null,
    Bool(bool),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
    List(Vec<SimpleValue>),
}

impl SimpleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SimpleValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Wraps an optional string, mapping absence to `Null`.
    pub fn from_opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) => Self::Text(s.to_string()),
            None => Self::Null,
        }
    }

    /// Wraps an optional number, mapping absence to `Null`.
    pub fn from_opt_number(value: Option<f64>) -> Self {
        match value {
            Some(n) => Self::Number(n),
            None => Self::Null,
        }
    }
}

impl From<&str> for SimpleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SimpleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for SimpleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for SimpleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
