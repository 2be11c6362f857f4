// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the access-scoped listing service

use std::sync::Arc;

use anyhow::Result;

use dyntable_access::{AccessError, ScopedDataStoreService};
use dyntable_catalog::ListQuery;
use dyntable_schema::{ColumnSchema, ColumnType};
use dyntable_test_utils::{memory_repository, sample_columns, MockMembership};

#[tokio::test]
async fn test_caller_sees_only_visible_projects() -> Result<()> {
    let repository = Arc::new(memory_repository().await);
    let s1 = repository
        .create_user_table("p1", "mine", &sample_columns())
        .await?;
    repository
        .create_user_table("p2", "theirs", &sample_columns())
        .await?;

    let membership = Arc::new(MockMembership::new().with_user("alice", &["p1"]));
    let service = ScopedDataStoreService::new(repository, membership);

    let result = service.list_for_caller("alice", &ListQuery::default()).await?;
    assert_eq!(result.count, 1);
    assert_eq!(result.items[0].id, s1.id);
    Ok(())
}

#[tokio::test]
async fn test_requested_filter_is_intersected_never_expanded() -> Result<()> {
    let repository = Arc::new(memory_repository().await);
    let s1 = repository
        .create_user_table("p1", "visible", &sample_columns())
        .await?;
    repository
        .create_user_table("p2", "hidden", &sample_columns())
        .await?;

    let membership = Arc::new(MockMembership::new().with_user("alice", &["p1"]));
    let service = ScopedDataStoreService::new(repository, membership);

    // Alice asks for p1 and p2 but can only see p1.
    let query = ListQuery::default().with_project_ids(vec!["p1".to_string(), "p2".to_string()]);
    let result = service.list_for_caller("alice", &query).await?;
    assert_eq!(result.count, 1);
    assert_eq!(result.items[0].id, s1.id);
    Ok(())
}

#[tokio::test]
async fn test_invisible_project_request_is_silently_empty() -> Result<()> {
    let repository = Arc::new(memory_repository().await);
    repository
        .create_user_table("p2", "secret", &sample_columns())
        .await?;

    let membership = Arc::new(MockMembership::new().with_user("alice", &["p1"]));
    let service = ScopedDataStoreService::new(repository, membership);

    // Requesting an invisible project yields empty, not an error, so the
    // project's existence is not leaked.
    let query = ListQuery::default().with_project_ids(vec!["p2".to_string()]);
    let result = service.list_for_caller("alice", &query).await?;
    assert_eq!(result.count, 0);
    assert!(result.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_caller_with_no_projects_sees_nothing() -> Result<()> {
    let repository = Arc::new(memory_repository().await);
    repository
        .create_user_table("p1", "data", &sample_columns())
        .await?;

    let membership = Arc::new(MockMembership::new());
    let service = ScopedDataStoreService::new(repository, membership);

    let result = service.list_for_caller("nobody", &ListQuery::default()).await?;
    assert_eq!(result.count, 0);
    Ok(())
}

#[tokio::test]
async fn test_other_filters_pass_through() -> Result<()> {
    let repository = Arc::new(memory_repository().await);
    repository
        .create_user_table("p1", "alpha", &sample_columns())
        .await?;
    repository
        .create_user_table("p1", "beta", &sample_columns())
        .await?;

    let membership = Arc::new(MockMembership::new().with_user("alice", &["p1"]));
    let service = ScopedDataStoreService::new(repository, membership);

    let result = service
        .list_for_caller("alice", &ListQuery::default().with_name("alp"))
        .await?;
    assert_eq!(result.count, 1);
    assert_eq!(result.items[0].name, "alpha");
    Ok(())
}

#[tokio::test]
async fn test_membership_failure_surfaces() {
    let repository = Arc::new(memory_repository().await);
    let membership = Arc::new(MockMembership::new().failing());
    let service = ScopedDataStoreService::new(repository, membership);

    let result = service.list_for_caller("alice", &ListQuery::default()).await;
    assert!(matches!(result, Err(AccessError::Membership(_))));
}

/// End-to-end: create stores in two projects, list scoped, delete by
/// project, then list as an admin who sees everything.
#[tokio::test]
async fn test_scoped_lifecycle_end_to_end() -> Result<()> {
    let repository = Arc::new(memory_repository().await);

    let s1 = repository
        .create_user_table(
            "P1",
            "S1",
            &[ColumnSchema::new("age", ColumnType::Number)],
        )
        .await?;
    let s2 = repository
        .create_user_table(
            "P2",
            "S2",
            &[ColumnSchema::new("age", ColumnType::Number)],
        )
        .await?;

    let membership = Arc::new(
        MockMembership::new()
            .with_user("member", &["P1"])
            .with_user("admin", &["P1", "P2"]),
    );
    let service = ScopedDataStoreService::new(Arc::clone(&repository), membership);

    // A member of P1 sees only S1, with no filter requested.
    let member_view = service.list_for_caller("member", &ListQuery::default()).await?;
    assert_eq!(member_view.count, 1);
    assert_eq!(member_view.items[0].id, s1.id);

    // Tear down P1.
    assert!(repository.delete_by_project("P1").await?);

    // The admin, visible to all projects, now sees only S2.
    let admin_view = service.list_for_caller("admin", &ListQuery::default()).await?;
    assert_eq!(admin_view.count, 1);
    assert_eq!(admin_view.items[0].id, s2.id);
    Ok(())
}
