// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dyntable - Catalog Layer
//!
//! This crate owns the data store catalog: the metadata table tracking
//! every user-defined data store, and the transactional lifecycle of the
//! physical tables behind them.
//!
//! ## Architecture
//!
//! The catalog layer is responsible for:
//! - Creating and dropping physical tables atomically alongside their
//!   metadata rows
//! - Building parametrized, injection-safe listing queries with filter,
//!   sort, and pagination composition
//! - Hydrating reduced column and project projections onto listed records
//!
//! Schema validation and DDL text generation live in `dyntable-schema`;
//! this crate only executes what that crate produces.
//!
//! ## Backends
//!
//! Connections go through sqlx's Any driver. SQLite is enabled by default;
//! the `postgresql` and `mysql` features enable the client-server drivers
//! (`all-dialects` enables everything).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dyntable_catalog::{DataStoreRepository, ListQuery};
//! use dyntable_schema::{ColumnSchema, ColumnType};
//!
//! let repository = DataStoreRepository::connect("sqlite::memory:").await?;
//! let record = repository
//!     .create_user_table("project-1", "people", &[
//!         ColumnSchema::new("age", ColumnType::Number),
//!     ])
//!     .await?;
//!
//! let result = repository.list_and_count(&ListQuery::default()).await?;
//! assert_eq!(result.count, 1);
//!
//! repository.delete_user_table(&record.id).await?;
//! ```

pub mod entity;
pub mod error;
pub mod query;
pub mod repository;

// Re-exports
pub use entity::{DataStoreColumn, DataStoreRecord, ProjectSummary};
pub use error::{CatalogError, CatalogResult};
pub use query::{ListFilter, ListQuery, ListResult};
pub use repository::DataStoreRepository;
