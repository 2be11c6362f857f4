// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Shared fixtures for integration tests

use sqlx::any::AnyPoolOptions;

use dyntable_catalog::DataStoreRepository;
use dyntable_schema::{ColumnSchema, ColumnType, Dialect};

/// A migrated repository over a private in-memory SQLite database
///
/// Pinned to one pooled connection: each SQLite in-memory connection is
/// its own database, so the pool must never hand out a second one.
pub async fn memory_repository() -> DataStoreRepository {
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    let repository = DataStoreRepository::with_pool(pool, Dialect::Sqlite);
    repository.migrate().await.expect("catalog migration");
    repository
}

/// A small representative column schema
pub fn sample_columns() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("age", ColumnType::Number),
        ColumnSchema::new("note", ColumnType::Text),
    ]
}
