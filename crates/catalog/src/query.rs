// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Listing query builder
//!
//! Builds the parametrized SELECT statements behind `list` and
//! `list_and_count`. Only SQL text is produced here; values always travel
//! as bind parameters, with placeholder syntax chosen per dialect.
//!
//! ## Composition rules
//!
//! - **Filtering**: `ids` and `project_ids` become `IN` clauses. An
//!   explicitly empty set binds a single empty-string sentinel, which can
//!   never match a generated id, so "no projects visible" yields no rows
//!   instead of all rows. A non-empty `name` becomes a case-insensitive
//!   substring match with `LIKE` wildcards escaped. Filters AND-combine.
//! - **Sorting**: default is `updated_at DESC`. Sort expressions take the
//!   form `"<field>:<direction>"`; direction is ascending unless the
//!   second part matches `desc` case-insensitively. `name` sorts on
//!   `LOWER(name)`. Unrecognized fields are silently ignored — the query
//!   simply carries no ORDER BY. This permissive behavior is intentional
//!   and relied upon by callers.
//! - **Pagination**: `skip` is an offset; `take: None` means "all rows"
//!   while `take: Some(0)` is a literal zero limit. The two must never be
//!   conflated.
//! - The count query shares every filter clause and ignores sort and
//!   pagination.

use serde::{Deserialize, Serialize};

use dyntable_schema::Dialect;

use crate::entity::DataStoreRecord;

/// Filter portion of a listing query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Restrict to these store ids; `Some(vec![])` matches nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// Restrict to these project ids; `Some(vec![])` matches nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<String>>,
    /// Case-insensitive substring match on the store name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A listing query: filter, sort, and pagination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Filter clauses, AND-combined
    #[serde(default)]
    pub filter: ListFilter,
    /// Sort expression, `"<field>:<direction>"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Row offset
    #[serde(default)]
    pub skip: u64,
    /// Row limit; `None` means no limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,
}

impl ListQuery {
    /// Builder method: filter by store ids
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.filter.ids = Some(ids);
        self
    }

    /// Builder method: filter by project ids
    pub fn with_project_ids(mut self, project_ids: Vec<String>) -> Self {
        self.filter.project_ids = Some(project_ids);
        self
    }

    /// Builder method: filter by name substring
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.filter.name = Some(name.into());
        self
    }

    /// Builder method: set the sort expression
    pub fn with_sort(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Builder method: set the row offset
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Builder method: set the row limit
    pub fn with_take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }
}

/// Items plus the filter-wide total, as returned by `list_and_count`
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    /// The page of records
    pub items: Vec<DataStoreRecord>,
    /// Total matching records, ignoring pagination
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Build the id-page query: filters, sort, and pagination over the
/// catalog table. Returns the SQL and its bind parameters.
pub(crate) fn build_page_query(query: &ListQuery, dialect: Dialect) -> (String, Vec<String>) {
    let mut params = Vec::new();
    let where_clause = build_where(&query.filter, dialect, &mut params);
    let order = order_clause(query.sort_by.as_deref());
    let page = page_clause(query.skip, query.take, dialect);
    (
        format!("SELECT id FROM data_store{where_clause}{order}{page}"),
        params,
    )
}

/// Build the count query: same filters, no sort, no pagination.
pub(crate) fn build_count_query(filter: &ListFilter, dialect: Dialect) -> (String, Vec<String>) {
    let mut params = Vec::new();
    let where_clause = build_where(filter, dialect, &mut params);
    (
        format!("SELECT COUNT(*) FROM data_store{where_clause}"),
        params,
    )
}

fn build_where(filter: &ListFilter, dialect: Dialect, params: &mut Vec<String>) -> String {
    let mut clauses = Vec::new();

    for (column, values) in [("id", &filter.ids), ("project_id", &filter.project_ids)] {
        let Some(values) = values else { continue };

        // An empty set binds one sentinel that no generated id can equal,
        // so the clause matches nothing instead of being dropped.
        let sentinel = [String::new()];
        let bound: &[String] = if values.is_empty() { &sentinel } else { values };

        let mut placeholders = Vec::with_capacity(bound.len());
        for value in bound {
            params.push(value.clone());
            placeholders.push(dialect.placeholder(params.len()));
        }
        clauses.push(format!("{column} IN ({})", placeholders.join(", ")));
    }

    if let Some(name) = filter.name.as_deref() {
        if !name.is_empty() {
            params.push(format!("%{}%", escape_like(name)));
            clauses.push(format!(
                "LOWER(name) LIKE LOWER({}){}",
                dialect.placeholder(params.len()),
                dialect.like_escape_clause()
            ));
        }
    }

    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

fn order_clause(sort_by: Option<&str>) -> String {
    let Some(sort_by) = sort_by else {
        return " ORDER BY updated_at DESC".to_string();
    };

    let (field, direction) = parse_sort(sort_by);
    match sort_expression(field) {
        Some(expr) => format!(" ORDER BY {expr} {}", direction.as_sql()),
        // Unrecognized sort fields are ignored, not rejected.
        None => String::new(),
    }
}

fn parse_sort(sort_by: &str) -> (&str, SortDirection) {
    let (field, direction) = match sort_by.split_once(':') {
        Some((field, direction)) => (field, direction),
        None => (sort_by, ""),
    };
    if direction.eq_ignore_ascii_case("desc") {
        (field, SortDirection::Desc)
    } else {
        (field, SortDirection::Asc)
    }
}

fn sort_expression(field: &str) -> Option<&'static str> {
    match field {
        "name" => Some("LOWER(name)"),
        "createdAt" | "created_at" => Some("created_at"),
        "updatedAt" | "updated_at" => Some("updated_at"),
        _ => None,
    }
}

fn page_clause(skip: u64, take: Option<u64>, dialect: Dialect) -> String {
    match (skip, take) {
        (0, None) => String::new(),
        (skip, Some(take)) => format!(" LIMIT {take} OFFSET {skip}"),
        // OFFSET without LIMIT needs dialect-specific spelling.
        (skip, None) => match dialect {
            Dialect::Postgres => format!(" OFFSET {skip}"),
            Dialect::Sqlite => format!(" LIMIT -1 OFFSET {skip}"),
            Dialect::Mysql => format!(" LIMIT 18446744073709551615 OFFSET {skip}"),
        },
    }
}

/// Escape `LIKE` wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
