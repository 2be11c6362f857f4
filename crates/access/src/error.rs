// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for access-scoped listing
//!
//! Authorization narrowing is never an error: requesting a project the
//! caller cannot see yields an empty result, so project existence is not
//! leaked. Only membership-capability failures and delegated catalog
//! failures surface here.

use thiserror::Error;

use dyntable_catalog::CatalogError;

/// Result type alias for access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors that can occur while resolving caller access
#[derive(Debug, Error)]
pub enum AccessError {
    /// The membership capability failed to resolve visible projects
    #[error("Membership resolution failed: {0}")]
    Membership(String),

    /// The delegated catalog operation failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
