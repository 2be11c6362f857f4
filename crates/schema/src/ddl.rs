// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # DDL generation
//!
//! Pure translation of a validated column schema into a dialect-specific
//! `CREATE TABLE` statement. This module never executes anything; the
//! catalog repository owns execution and transaction scoping, which keeps
//! generation independently testable.
//!
//! Every generated table has the same logical shape regardless of dialect:
//! an implicit `id` primary key, the caller's columns in declaration
//! order, and `created_at`/`updated_at` audit columns.
//!
//! Validation covers empty schemas, duplicate names, and invalid
//! identifiers. A user column named `id`, `created_at`, or `updated_at`
//! passes validation (it is a valid, unique identifier) but collides with
//! the implicit columns when the statement executes, at which point the
//! repository's transaction rolls the creation back.

use std::collections::HashSet;

use crate::column::{is_valid_identifier, ColumnSchema};
use crate::dialect::Dialect;
use crate::error::{SchemaError, SchemaResult};

/// Validate a column schema without generating DDL
///
/// Checks, in order: non-empty schema, identifier validity, uniqueness
/// (case-insensitive). The first violation wins.
pub fn validate_columns(columns: &[ColumnSchema]) -> SchemaResult<()> {
    if columns.is_empty() {
        return Err(SchemaError::EmptyColumns);
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !is_valid_identifier(&column.name) {
            return Err(SchemaError::InvalidColumnName(column.name.clone()));
        }
        if !seen.insert(column.name.to_ascii_lowercase()) {
            return Err(SchemaError::DuplicateColumn(column.name.clone()));
        }
    }
    Ok(())
}

/// Generate a `CREATE TABLE` statement for a physical data store table
///
/// `table_name` is interpolated verbatim in identifier position and must
/// come from [`crate::table_name::to_table_name`].
pub fn create_table_statement(
    table_name: &str,
    columns: &[ColumnSchema],
    dialect: Dialect,
) -> SchemaResult<String> {
    validate_columns(columns)?;

    let mut definitions = Vec::with_capacity(columns.len() + 3);
    definitions.push(format!(
        "{} {} PRIMARY KEY",
        dialect.quote_identifier("id"),
        dialect.id_column_sql()
    ));
    for column in columns {
        definitions.push(format!(
            "{} {}",
            dialect.quote_identifier(&column.name),
            dialect.column_type_sql(column.column_type)
        ));
    }
    for audit in ["created_at", "updated_at"] {
        definitions.push(format!(
            "{} {}",
            dialect.quote_identifier(audit),
            dialect.timestamp_column_sql()
        ));
    }

    Ok(format!(
        "CREATE TABLE {table_name} ({})",
        definitions.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn columns(specs: &[(&str, ColumnType)]) -> Vec<ColumnSchema> {
        specs
            .iter()
            .map(|(name, ty)| ColumnSchema::new(*name, *ty))
            .collect()
    }

    #[test]
    fn test_sqlite_statement() {
        let sql = create_table_statement(
            "data_store_user_abc",
            &columns(&[("age", ColumnType::Number), ("note", ColumnType::Text)]),
            Dialect::Sqlite,
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE data_store_user_abc (\"id\" TEXT PRIMARY KEY, \
             \"age\" REAL, \"note\" TEXT, \"created_at\" DATETIME, \
             \"updated_at\" DATETIME)"
        );
    }

    #[test]
    fn test_postgres_statement() {
        let sql = create_table_statement(
            "data_store_user_abc",
            &columns(&[("active", ColumnType::Boolean), ("due", ColumnType::Date)]),
            Dialect::Postgres,
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE data_store_user_abc (\"id\" VARCHAR(36) PRIMARY KEY, \
             \"active\" BOOLEAN, \"due\" TIMESTAMP, \"created_at\" TIMESTAMP, \
             \"updated_at\" TIMESTAMP)"
        );
    }

    #[test]
    fn test_mysql_statement_uses_backticks() {
        let sql = create_table_statement(
            "data_store_user_abc",
            &columns(&[("age", ColumnType::Number)]),
            Dialect::Mysql,
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE data_store_user_abc (`id` VARCHAR(36) PRIMARY KEY, \
             `age` DOUBLE, `created_at` DATETIME, `updated_at` DATETIME)"
        );
    }

    #[test]
    fn test_column_order_is_preserved() {
        let sql = create_table_statement(
            "t",
            &columns(&[
                ("z", ColumnType::Text),
                ("a", ColumnType::Text),
                ("m", ColumnType::Text),
            ]),
            Dialect::Sqlite,
        )
        .unwrap();
        let z = sql.find("\"z\"").unwrap();
        let a = sql.find("\"a\"").unwrap();
        let m = sql.find("\"m\"").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn test_rejects_empty_schema() {
        let err = create_table_statement("t", &[], Dialect::Sqlite).unwrap_err();
        assert_eq!(err, SchemaError::EmptyColumns);
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = create_table_statement(
            "t",
            &columns(&[("age", ColumnType::Number), ("age", ColumnType::Text)]),
            Dialect::Sqlite,
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("age".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_columns_case_insensitive() {
        let err = validate_columns(&columns(&[
            ("Age", ColumnType::Number),
            ("age", ColumnType::Text),
        ]))
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("age".to_string()));
    }

    #[test]
    fn test_rejects_invalid_identifier() {
        let err = create_table_statement(
            "t",
            &columns(&[("bad name", ColumnType::Text)]),
            Dialect::Sqlite,
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::InvalidColumnName("bad name".to_string()));
    }

    #[test]
    fn test_reserved_names_pass_validation() {
        // Collides with the implicit primary key at execution time, not here.
        assert!(validate_columns(&columns(&[("id", ColumnType::Text)])).is_ok());
    }
}
