// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dyntable - Test Utilities
//!
//! Shared helpers for the workspace's integration tests: an in-memory
//! SQLite repository fixture and a mock membership capability.

pub mod fixtures;
pub mod mock_membership;

// Re-exports
pub use fixtures::{memory_repository, sample_columns};
pub use mock_membership::MockMembership;
