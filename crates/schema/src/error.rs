// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for schema validation and DDL generation
//!
//! All errors in this crate are raised synchronously, before any statement
//! is executed against a database.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while validating a column schema or generating DDL
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum SchemaError {
    /// A data store must declare at least one column beyond the implicit
    /// primary key
    #[error("Column schema must contain at least one column")]
    EmptyColumns,

    /// Column names must be unique within a store (case-insensitive)
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column names must be valid SQL identifiers
    #[error("Invalid column name: {0}")]
    InvalidColumnName(String),

    /// The logical column type is not one of the supported types
    #[error("Unsupported column type: {0}")]
    UnsupportedType(String),

    /// Data store ids must be identifier-safe before they can be mapped to
    /// a physical table name
    #[error("Invalid data store id: {0}")]
    InvalidStoreId(String),
}
