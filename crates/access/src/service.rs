// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Access-scoped listing service
//!
//! Wraps the catalog repository's listing path with project-membership
//! authorization. The rewrite rule is pure narrowing:
//!
//! - a caller-supplied project filter is intersected with the caller's
//!   visible projects — requested ids outside visibility are dropped,
//!   never expanded
//! - without a project filter, the effective filter is exactly the
//!   visible set
//!
//! Narrowing is silent by design: filtering out an invisible project
//! yields an empty result, not an error, so callers cannot probe for the
//! existence of projects they are not members of.

use std::sync::Arc;

use tracing::debug;

use dyntable_catalog::{DataStoreRepository, ListQuery, ListResult};

use crate::error::AccessResult;
use crate::membership::ProjectMembership;

/// Listing service scoped to a caller's project visibility
pub struct ScopedDataStoreService {
    repository: Arc<DataStoreRepository>,
    membership: Arc<dyn ProjectMembership>,
}

impl ScopedDataStoreService {
    /// Create a new scoped listing service
    pub fn new(
        repository: Arc<DataStoreRepository>,
        membership: Arc<dyn ProjectMembership>,
    ) -> Self {
        Self {
            repository,
            membership,
        }
    }

    /// List data stores visible to the caller
    ///
    /// Guarantee: the result never contains a store from a project the
    /// caller is not a member of, regardless of the requested filter.
    pub async fn list_for_caller(
        &self,
        user_id: &str,
        query: &ListQuery,
    ) -> AccessResult<ListResult> {
        let visible = self.membership.visible_project_ids(user_id).await?;

        let effective: Vec<String> = match &query.filter.project_ids {
            Some(requested) => visible
                .into_iter()
                .filter(|project_id| requested.contains(project_id))
                .collect(),
            None => visible,
        };
        debug!(
            user_id,
            effective_projects = effective.len(),
            "listing data stores for caller"
        );

        let mut scoped = query.clone();
        scoped.filter.project_ids = Some(effective);
        Ok(self.repository.list_and_count(&scoped).await?)
    }
}
