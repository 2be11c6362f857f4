// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Logical column types
//!
//! This module defines the logical column types a caller may declare when
//! creating a data store, together with the identifier rules column names
//! must satisfy.
//!
//! The type set is deliberately closed: callers describe columns with one
//! of four logical types, and each dialect maps them to a native SQL type
//! (see [`crate::dialect::Dialect`]). Unknown type names are rejected at
//! the string boundary with [`SchemaError::UnsupportedType`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Logical column types supported by data stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text
    Text,
    /// Double-precision number
    Number,
    /// Boolean flag
    Boolean,
    /// Date/time value
    Date,
}

impl ColumnType {
    /// The lowercase wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "boolean" => Ok(ColumnType::Boolean),
            "date" => Ok(ColumnType::Date),
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }
}

/// A single column declaration in a data store schema
///
/// The declaration order of a schema is significant and is preserved all
/// the way through creation and listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name (must be a valid SQL identifier, unique within a store)
    pub name: String,
    /// Logical column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnSchema {
    /// Create a new column declaration
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Check whether a string is a valid SQL identifier
///
/// Valid identifiers start with an ASCII letter or underscore and continue
/// with ASCII letters, digits, or underscores. This is the portable subset
/// accepted unquoted by every supported dialect.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
