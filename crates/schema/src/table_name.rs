// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table-name codec
//!
//! Deterministic mapping from a data store id to the name of its physical
//! backing table. The mapping is a plain prefix, which keeps it injective:
//! two distinct ids can never collide.
//!
//! The produced name is safe to interpolate into DDL/DML in identifier
//! position only, because ids are restricted to `[A-Za-z0-9_]`. It is not
//! escaped again at use sites, so callers must only pass ids obtained from
//! a trusted source such as their own catalog.

use crate::error::{SchemaError, SchemaResult};

/// Prefix shared by every physical data store table
pub const USER_TABLE_PREFIX: &str = "data_store_user_";

/// Map a data store id to its physical table name
///
/// Fails with [`SchemaError::InvalidStoreId`] if the id contains anything
/// outside `[A-Za-z0-9_]`, so the result can never smuggle SQL syntax into
/// an identifier position.
pub fn to_table_name(id: &str) -> SchemaResult<String> {
    if id.is_empty()
        || !id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(SchemaError::InvalidStoreId(id.to_string()));
    }
    Ok(format!("{USER_TABLE_PREFIX}{id}"))
}
