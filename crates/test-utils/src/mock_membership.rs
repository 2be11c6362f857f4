// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock membership capability for testing
//!
//! Provides an in-memory project-visibility map with builder pattern for
//! easy test setup

use std::collections::HashMap;

use dyntable_access::{AccessError, AccessResult, ProjectMembership};

/// In-memory membership resolver for testing
#[derive(Debug, Clone, Default)]
pub struct MockMembership {
    visibility: HashMap<String, Vec<String>>,
    failing: bool,
}

impl MockMembership {
    /// Create a new empty membership map (nobody sees anything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a user visibility of a set of projects
    pub fn with_user(mut self, user_id: impl Into<String>, project_ids: &[&str]) -> Self {
        self.visibility.insert(
            user_id.into(),
            project_ids.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    /// Make every resolution fail, for exercising capability errors
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait::async_trait]
impl ProjectMembership for MockMembership {
    async fn visible_project_ids(&self, user_id: &str) -> AccessResult<Vec<String>> {
        if self.failing {
            return Err(AccessError::Membership(
                "mock membership configured to fail".to_string(),
            ));
        }
        Ok(self.visibility.get(user_id).cloned().unwrap_or_default())
    }
}
