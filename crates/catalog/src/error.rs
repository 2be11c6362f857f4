// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog operations
//!
//! The main failure classes reaching callers: [`CatalogError::Schema`] for
//! invalid column schemas, raised before any persistence attempt;
//! [`CatalogError::Transaction`] for anything that failed inside the atomic
//! create/drop sequence, after which the whole transaction has been rolled
//! back; and [`CatalogError::PartialDelete`] when a best-effort bulk delete
//! aborts with some stores already removed.
//!
//! "Delete of a nonexistent id" is deliberately not an error: the delete
//! operations return `Ok(false)` so callers can distinguish "already
//! absent" from a malformed request without exception-style control flow.

use thiserror::Error;

use dyntable_schema::SchemaError;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The column schema was rejected before any side effect
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A statement inside the transactional sequence failed; the
    /// transaction has been rolled back
    #[error("Transaction failed: {0}")]
    Transaction(#[from] sqlx::Error),

    /// A bulk delete aborted partway; `deleted` names the stores that
    /// were already removed before the failing one
    #[error("Bulk delete aborted after removing {} store(s): {source}", deleted.len())]
    PartialDelete {
        deleted: Vec<String>,
        #[source]
        source: Box<CatalogError>,
    },

    /// Invalid repository configuration (bad connection URL, unknown
    /// dialect)
    #[error("Invalid catalog configuration: {0}")]
    Configuration(String),
}
