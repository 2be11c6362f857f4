// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Project membership capability
//!
//! Membership resolution itself lives outside this workspace (the project
//! service owns it); this trait is only the consumed capability. Any
//! implementation that can answer "which projects can this user see" can
//! back the scoped listing service.

use crate::error::AccessResult;

/// Capability resolving the projects visible to a caller
///
/// # Examples
///
/// ```rust,ignore
/// use dyntable_access::{AccessResult, ProjectMembership};
///
/// struct SingleProject;
///
/// #[async_trait::async_trait]
/// impl ProjectMembership for SingleProject {
///     async fn visible_project_ids(&self, _user_id: &str) -> AccessResult<Vec<String>> {
///         Ok(vec!["p1".to_string()])
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait ProjectMembership: Send + Sync {
    /// The set of project ids the given user may see
    async fn visible_project_ids(&self, user_id: &str) -> AccessResult<Vec<String>>;
}
