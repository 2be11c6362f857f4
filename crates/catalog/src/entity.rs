// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog entities
//!
//! The record types the catalog persists and surfaces to callers. A
//! [`DataStoreRecord`] is the metadata row for one data store; its columns
//! and owning project are carried as reduced projections, never as full
//! related rows.
//!
//! Timestamps are `DateTime<Utc>` in the public model and Unix
//! milliseconds in storage, so rows round-trip identically through every
//! supported backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dyntable_schema::ColumnType;

/// Reduced projection of one column of a data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStoreColumn {
    /// Column entity id
    pub id: String,
    /// Column name
    pub name: String,
    /// Logical column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Reduced projection of the project owning a data store
///
/// The project table itself is owned by the external project service; the
/// catalog only ever reads these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project id
    pub id: String,
    /// Project display name
    pub name: String,
    /// Project kind (personal, team, ...)
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    /// Project icon
    pub icon: Option<String>,
}

/// One data store: a user-defined, project-scoped logical table
///
/// The `id` is generated at creation and immutable; `project_id` is fixed
/// at creation; `columns` preserve declaration order and never change once
/// the physical table exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStoreRecord {
    /// Generated, immutable id
    pub id: String,
    /// Display name (mutable, not unique)
    pub name: String,
    /// Owning project id
    pub project_id: String,
    /// Ordered column schema, fixed at creation
    pub columns: Vec<DataStoreColumn>,
    /// Reduced projection of the owning project, hydrated by listing
    pub project: Option<ProjectSummary>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Convert stored Unix milliseconds back to a timestamp
///
/// Out-of-range values collapse to the Unix epoch rather than failing the
/// whole listing.
pub(crate) fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let restored = datetime_from_millis(now.timestamp_millis());
        assert_eq!(restored.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_timestamp_out_of_range() {
        assert_eq!(datetime_from_millis(i64::MAX).timestamp_millis(), 0);
    }

    #[test]
    fn test_record_serde_uses_wire_names() {
        let record = DataStoreRecord {
            id: "a1".to_string(),
            name: "people".to_string(),
            project_id: "p1".to_string(),
            columns: vec![DataStoreColumn {
                id: "c1".to_string(),
                name: "age".to_string(),
                column_type: ColumnType::Number,
            }],
            project: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["columns"][0]["type"], "number");
    }
}
