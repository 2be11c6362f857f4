// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dyntable - Schema Layer
//!
//! This crate is the pure, side-effect-free foundation of Dyntable. It
//! knows nothing about connections or transactions; it only translates
//! logical column schemas into dialect-specific SQL fragments.
//!
//! ## Components
//!
//! - [`ColumnType`] / [`ColumnSchema`]: the logical column model callers
//!   use to describe a data store
//! - [`Dialect`]: per-engine type mappings, identifier quoting, and
//!   placeholder syntax
//! - [`to_table_name`]: the codec mapping a data store id to its physical
//!   table name
//! - [`create_table_statement`]: `CREATE TABLE` generation with up-front
//!   validation
//!
//! ## Design
//!
//! DDL generation is kept strictly separate from execution: everything in
//! this crate is a total function over its inputs, raising [`SchemaError`]
//! before any side effect could happen. The catalog layer owns execution.
//!
//! ## Example
//!
//! ```rust
//! use dyntable_schema::{
//!     create_table_statement, to_table_name, ColumnSchema, ColumnType, Dialect,
//! };
//!
//! let columns = vec![ColumnSchema::new("age", ColumnType::Number)];
//! let table = to_table_name("8f14e45fceea167a5a36dedd4bea2543").unwrap();
//! let ddl = create_table_statement(&table, &columns, Dialect::Sqlite).unwrap();
//! assert!(ddl.starts_with("CREATE TABLE data_store_user_"));
//! ```

pub mod column;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod table_name;

// Re-exports
pub use column::{is_valid_identifier, ColumnSchema, ColumnType};
pub use ddl::{create_table_statement, validate_columns};
pub use dialect::Dialect;
pub use error::{SchemaError, SchemaResult};
pub use table_name::{to_table_name, USER_TABLE_PREFIX};
