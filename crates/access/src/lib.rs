// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dyntable - Access Layer
//!
//! This crate scopes catalog listings to what a caller is allowed to see.
//! It consumes two capabilities: the catalog repository (for the actual
//! query) and a [`ProjectMembership`] implementation (for visibility),
//! and guarantees that no caller can observe a data store from a project
//! they are not a member of.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dyntable_access::ScopedDataStoreService;
//! use dyntable_catalog::{DataStoreRepository, ListQuery};
//!
//! let repository = Arc::new(DataStoreRepository::connect("sqlite:data.db").await?);
//! let service = ScopedDataStoreService::new(repository, membership);
//!
//! // Only stores in projects visible to "user-1" come back, regardless
//! // of the requested filter.
//! let result = service.list_for_caller("user-1", &ListQuery::default()).await?;
//! ```

pub mod error;
pub mod membership;
pub mod service;

// Re-exports
pub use error::{AccessError, AccessResult};
pub use membership::ProjectMembership;
pub use service::ScopedDataStoreService;
