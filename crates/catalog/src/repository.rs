// Copyright (c) 2025 Dyntable
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog repository
//!
//! Owns the `data_store` metadata table and orchestrates the transactional
//! lifecycle of the physical user tables behind it. The core invariant is:
//! a metadata row exists if and only if its physical table exists. Both
//! sides of the pair are created and destroyed inside one transaction, so
//! no half-created or half-dropped store is ever visible to a concurrent
//! reader under read-committed isolation.
//!
//! ## Transaction boundaries
//!
//! - `create_user_table`: metadata insert, column inserts, and the
//!   physical `CREATE TABLE` share one transaction. DDL failure rolls the
//!   metadata back; no orphan row survives.
//! - `delete_user_table`: metadata delete and `DROP TABLE` share one
//!   transaction.
//! - `delete_by_project` / `delete_all`: best-effort sequential loops.
//!   Each individual store's metadata+table pair stays atomic, but a
//!   mid-loop failure leaves earlier deletions committed and is reported
//!   as [`CatalogError::PartialDelete`], which names the removed subset.
//!
//! On dialects where DDL is non-transactional (MySQL issues an implicit
//! commit *before* executing DDL, which would commit the pending metadata
//! inserts), creation runs the `CREATE TABLE` first, outside the
//! transaction. A metadata failure then strands at most an uncataloged
//! physical table, which the repository drops again on the way out; it
//! never strands metadata without a table. See
//! [`Dialect::transactional_ddl`].

use std::collections::{HashMap, HashSet};

use sqlx::any::AnyPoolOptions;
use sqlx::{Any, AnyPool, Row, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use dyntable_schema::{create_table_statement, to_table_name, ColumnSchema, ColumnType, Dialect};

use crate::entity::{datetime_from_millis, DataStoreColumn, DataStoreRecord, ProjectSummary};
use crate::error::{CatalogError, CatalogResult};
use crate::query::{build_count_query, build_page_query, ListQuery, ListResult};

/// Default connection pool size
const DEFAULT_POOL_SIZE: u32 = 10;

/// Catalog table for data store metadata
const CREATE_DATA_STORE: &str = "CREATE TABLE IF NOT EXISTS data_store (\
     id VARCHAR(36) PRIMARY KEY, \
     name VARCHAR(255) NOT NULL, \
     project_id VARCHAR(36) NOT NULL, \
     created_at BIGINT NOT NULL, \
     updated_at BIGINT NOT NULL)";

/// Catalog table for per-store column schemas (ordinal preserves
/// declaration order)
const CREATE_DATA_STORE_COLUMN: &str = "CREATE TABLE IF NOT EXISTS data_store_column (\
     id VARCHAR(36) PRIMARY KEY, \
     data_store_id VARCHAR(36) NOT NULL, \
     name VARCHAR(255) NOT NULL, \
     type VARCHAR(16) NOT NULL, \
     ordinal INTEGER NOT NULL)";

/// Project summary table. Logically owned by the external project
/// service; created here only when absent so the crate works standalone
/// and under test.
const CREATE_PROJECT: &str = "CREATE TABLE IF NOT EXISTS project (\
     id VARCHAR(36) PRIMARY KEY, \
     name VARCHAR(255) NOT NULL, \
     type VARCHAR(32), \
     icon VARCHAR(255))";

const CREATE_COLUMN_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_data_store_column_store ON data_store_column (data_store_id)";

/// Repository over the data store catalog
///
/// Constructed with [`DataStoreRepository::connect`] for a fresh pool or
/// [`DataStoreRepository::with_pool`] for an injected one. All operations
/// take `&self`; concurrency control is delegated entirely to the
/// database's transaction manager.
pub struct DataStoreRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl DataStoreRepository {
    /// Connect to a database URL, derive its dialect, and run migrations
    ///
    /// Supported schemes: `sqlite:`, `postgres:`/`postgresql:`,
    /// `mysql:`/`mariadb:`.
    pub async fn connect(url: &str) -> CatalogResult<Self> {
        let dialect = Dialect::from_database_url(url).ok_or_else(|| {
            CatalogError::Configuration(format!("unrecognized database URL scheme: {url}"))
        })?;

        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(DEFAULT_POOL_SIZE)
            .connect(url)
            .await?;

        let repository = Self { pool, dialect };
        repository.migrate().await?;
        Ok(repository)
    }

    /// Wrap an existing pool without running migrations
    pub fn with_pool(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// The active dialect
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Create the catalog tables if they do not exist yet (idempotent)
    pub async fn migrate(&self) -> CatalogResult<()> {
        sqlx::query(CREATE_DATA_STORE).execute(&self.pool).await?;
        sqlx::query(CREATE_DATA_STORE_COLUMN)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_PROJECT).execute(&self.pool).await?;

        match self.dialect {
            // MySQL has no CREATE INDEX IF NOT EXISTS; a duplicate-name
            // failure on re-migration is expected and harmless.
            Dialect::Mysql => {
                let statement =
                    "CREATE INDEX idx_data_store_column_store ON data_store_column (data_store_id)";
                if let Err(error) = sqlx::query(statement).execute(&self.pool).await {
                    debug!(%error, "skipping column index creation");
                }
            }
            _ => {
                sqlx::query(CREATE_COLUMN_INDEX).execute(&self.pool).await?;
            }
        }

        info!(dialect = %self.dialect, "catalog migrations complete");
        Ok(())
    }

    /// Create a data store: metadata row, column rows, and physical table
    ///
    /// Validation and DDL generation happen before any statement runs,
    /// so a bad schema fails with [`CatalogError::Schema`] without any
    /// side effect. Where DDL participates in transactions the whole
    /// creation shares one; where it does not (MySQL) the table is
    /// created first and dropped again if the metadata transaction fails,
    /// so no metadata row ever survives without its table.
    pub async fn create_user_table(
        &self,
        project_id: &str,
        name: &str,
        columns: &[ColumnSchema],
    ) -> CatalogResult<DataStoreRecord> {
        let id = Uuid::new_v4().simple().to_string();
        let table_name = to_table_name(&id)?;
        let ddl = create_table_statement(&table_name, columns, self.dialect)?;

        let now = chrono::Utc::now();
        let now_millis = now.timestamp_millis();

        let stored_columns = if self.dialect.transactional_ddl() {
            let mut tx = self.pool.begin().await?;
            let stored = self
                .insert_store_in_tx(&mut tx, &id, name, project_id, columns, now_millis)
                .await?;
            // The DDL rolls back together with the metadata on failure.
            sqlx::query(&ddl).execute(&mut *tx).await?;
            tx.commit().await?;
            stored
        } else {
            // MySQL commits implicitly *before* executing DDL, so a
            // CREATE TABLE inside the transaction would commit the
            // metadata inserts even when the statement itself fails.
            // Creating the table first keeps the metadata transactional;
            // a failure past this point strands at most an uncataloged
            // physical table, dropped again below.
            sqlx::query(&ddl).execute(&self.pool).await?;
            let mut tx = self.pool.begin().await?;
            let outcome = match self
                .insert_store_in_tx(&mut tx, &id, name, project_id, columns, now_millis)
                .await
            {
                Ok(stored) => tx
                    .commit()
                    .await
                    .map(|()| stored)
                    .map_err(CatalogError::from),
                Err(error) => {
                    tx.rollback().await.ok();
                    Err(error)
                }
            };
            match outcome {
                Ok(stored) => stored,
                Err(error) => {
                    self.drop_table_best_effort(&table_name).await;
                    return Err(error);
                }
            }
        };

        debug!(store_id = %id, project_id, name, "created data store");

        Ok(DataStoreRecord {
            id,
            name: name.to_string(),
            project_id: project_id.to_string(),
            columns: stored_columns,
            project: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn insert_store_in_tx(
        &self,
        tx: &mut Transaction<'static, Any>,
        id: &str,
        name: &str,
        project_id: &str,
        columns: &[ColumnSchema],
        now_millis: i64,
    ) -> CatalogResult<Vec<DataStoreColumn>> {
        let insert_store = format!(
            "INSERT INTO data_store (id, name, project_id, created_at, updated_at) \
             VALUES ({}, {}, {}, {}, {})",
            self.dialect.placeholder(1),
            self.dialect.placeholder(2),
            self.dialect.placeholder(3),
            self.dialect.placeholder(4),
            self.dialect.placeholder(5),
        );
        sqlx::query(&insert_store)
            .bind(id)
            .bind(name)
            .bind(project_id)
            .bind(now_millis)
            .bind(now_millis)
            .execute(&mut **tx)
            .await?;

        let insert_column = format!(
            "INSERT INTO data_store_column (id, data_store_id, name, type, ordinal) \
             VALUES ({}, {}, {}, {}, {})",
            self.dialect.placeholder(1),
            self.dialect.placeholder(2),
            self.dialect.placeholder(3),
            self.dialect.placeholder(4),
            self.dialect.placeholder(5),
        );
        let mut stored_columns = Vec::with_capacity(columns.len());
        for (ordinal, column) in columns.iter().enumerate() {
            let column_id = Uuid::new_v4().simple().to_string();
            sqlx::query(&insert_column)
                .bind(&column_id)
                .bind(id)
                .bind(&column.name)
                .bind(column.column_type.as_str())
                .bind(ordinal as i64)
                .execute(&mut **tx)
                .await?;
            stored_columns.push(DataStoreColumn {
                id: column_id,
                name: column.name.clone(),
                column_type: column.column_type,
            });
        }

        Ok(stored_columns)
    }

    async fn drop_table_best_effort(&self, table_name: &str) {
        if let Err(error) = sqlx::query(&format!("DROP TABLE {table_name}"))
            .execute(&self.pool)
            .await
        {
            debug!(%error, table_name, "could not drop table after aborted creation");
        }
    }

    /// Delete a data store and drop its physical table in one transaction
    ///
    /// Returns `Ok(false)` when no store with this id exists; callers
    /// distinguish "already absent" from a malformed request (which is an
    /// error) via the boolean.
    pub async fn delete_user_table(&self, id: &str) -> CatalogResult<bool> {
        let table_name = to_table_name(id)?;

        let mut tx = self.pool.begin().await?;
        let deleted = self.delete_store_in_tx(&mut tx, id, &table_name).await?;
        tx.commit().await?;

        if deleted {
            debug!(store_id = %id, "deleted data store");
        }
        Ok(deleted)
    }

    async fn delete_store_in_tx(
        &self,
        tx: &mut Transaction<'static, Any>,
        id: &str,
        table_name: &str,
    ) -> CatalogResult<bool> {
        let delete_store = format!(
            "DELETE FROM data_store WHERE id = {}",
            self.dialect.placeholder(1)
        );
        let result = sqlx::query(&delete_store)
            .bind(id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let delete_columns = format!(
            "DELETE FROM data_store_column WHERE data_store_id = {}",
            self.dialect.placeholder(1)
        );
        sqlx::query(&delete_columns)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        // table_name came through to_table_name, so identifier-position
        // interpolation is safe here.
        sqlx::query(&format!("DROP TABLE {table_name}"))
            .execute(&mut **tx)
            .await?;
        Ok(true)
    }

    /// Delete every data store belonging to a project
    ///
    /// Best-effort sequential semantics: each store's own metadata+table
    /// pair is atomic, but a mid-loop failure leaves earlier deletions
    /// committed and surfaces as [`CatalogError::PartialDelete`] naming
    /// the removed subset. Returns whether anything was removed; zero
    /// matches is `Ok(false)`, not an error.
    pub async fn delete_by_project(&self, project_id: &str) -> CatalogResult<bool> {
        let select = format!(
            "SELECT id FROM data_store WHERE project_id = {} ORDER BY id",
            self.dialect.placeholder(1)
        );
        let ids: Vec<String> = sqlx::query_scalar(&select)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        let deleted = self.delete_each(&ids).await?;
        if !deleted.is_empty() {
            debug!(
                project_id,
                count = deleted.len(),
                "deleted project data stores"
            );
        }
        Ok(!deleted.is_empty())
    }

    /// Delete every data store in the catalog
    ///
    /// Administrative teardown only: irreversible, unscoped by any
    /// authorization — callers must gate access before invoking. Same
    /// best-effort loop semantics as [`Self::delete_by_project`].
    pub async fn delete_all(&self) -> CatalogResult<bool> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM data_store ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        if !ids.is_empty() {
            warn!(count = ids.len(), "deleting every data store");
        }

        let deleted = self.delete_each(&ids).await?;
        Ok(!deleted.is_empty())
    }

    /// Drop stores one by one, reporting the removed subset when a
    /// mid-loop failure aborts the sweep
    async fn delete_each(&self, ids: &[String]) -> CatalogResult<Vec<String>> {
        let mut deleted = Vec::new();
        for id in ids {
            match self.delete_user_table(id).await {
                Ok(true) => deleted.push(id.clone()),
                Ok(false) => {}
                Err(error) => {
                    return Err(CatalogError::PartialDelete {
                        deleted,
                        source: Box::new(error),
                    });
                }
            }
        }
        Ok(deleted)
    }

    /// List matching records with the filter-wide total
    ///
    /// The count honors every filter but ignores sort and pagination.
    pub async fn list_and_count(&self, query: &ListQuery) -> CatalogResult<ListResult> {
        let items = self.fetch_page(query).await?;

        let (sql, params) = build_count_query(&query.filter, self.dialect);
        let mut count_query = sqlx::query_scalar(&sql);
        for param in &params {
            count_query = count_query.bind(param);
        }
        let count: i64 = count_query.fetch_one(&self.pool).await?;

        Ok(ListResult {
            items,
            count: count.max(0) as u64,
        })
    }

    /// List matching records without counting
    pub async fn list(&self, query: &ListQuery) -> CatalogResult<Vec<DataStoreRecord>> {
        self.fetch_page(query).await
    }

    async fn fetch_page(&self, query: &ListQuery) -> CatalogResult<Vec<DataStoreRecord>> {
        let (sql, params) = build_page_query(query, self.dialect);
        let mut page_query = sqlx::query_scalar(&sql);
        for param in &params {
            page_query = page_query.bind(param);
        }
        let ids: Vec<String> = page_query.fetch_all(&self.pool).await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.hydrate(&ids).await
    }

    /// Fetch full records for a page of ids, preserving page order
    ///
    /// Three queries replace the ORM-style joined hydration: the store
    /// rows, their columns (by ordinal), and the reduced project
    /// projection.
    async fn hydrate(&self, ids: &[String]) -> CatalogResult<Vec<DataStoreRecord>> {
        let in_list = self.in_placeholders(ids.len());

        let select_stores = format!(
            "SELECT id, name, project_id, created_at, updated_at \
             FROM data_store WHERE id IN ({in_list})"
        );
        let mut store_query = sqlx::query(&select_stores);
        for id in ids {
            store_query = store_query.bind(id);
        }
        let mut records: HashMap<String, DataStoreRecord> = HashMap::with_capacity(ids.len());
        for row in store_query.fetch_all(&self.pool).await? {
            let id: String = row.try_get("id")?;
            records.insert(
                id.clone(),
                DataStoreRecord {
                    id,
                    name: row.try_get("name")?,
                    project_id: row.try_get("project_id")?,
                    columns: Vec::new(),
                    project: None,
                    created_at: datetime_from_millis(row.try_get("created_at")?),
                    updated_at: datetime_from_millis(row.try_get("updated_at")?),
                },
            );
        }

        let select_columns = format!(
            "SELECT data_store_id, id, name, type FROM data_store_column \
             WHERE data_store_id IN ({in_list}) ORDER BY data_store_id, ordinal"
        );
        let mut column_query = sqlx::query(&select_columns);
        for id in ids {
            column_query = column_query.bind(id);
        }
        for row in column_query.fetch_all(&self.pool).await? {
            let store_id: String = row.try_get("data_store_id")?;
            let column_type: ColumnType = row.try_get::<String, _>("type")?.parse()?;
            if let Some(record) = records.get_mut(&store_id) {
                record.columns.push(DataStoreColumn {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    column_type,
                });
            }
        }

        let project_ids: Vec<String> = records
            .values()
            .map(|record| record.project_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let select_projects = format!(
            "SELECT id, name, type, icon FROM project WHERE id IN ({})",
            self.in_placeholders(project_ids.len())
        );
        let mut project_query = sqlx::query(&select_projects);
        for project_id in &project_ids {
            project_query = project_query.bind(project_id);
        }
        let mut projects: HashMap<String, ProjectSummary> = HashMap::new();
        for row in project_query.fetch_all(&self.pool).await? {
            let id: String = row.try_get("id")?;
            projects.insert(
                id.clone(),
                ProjectSummary {
                    id,
                    name: row.try_get("name")?,
                    project_type: row.try_get("type")?,
                    icon: row.try_get("icon")?,
                },
            );
        }
        for record in records.values_mut() {
            record.project = projects.get(&record.project_id).cloned();
        }

        Ok(ids
            .iter()
            .filter_map(|id| records.remove(id))
            .collect())
    }

    fn in_placeholders(&self, count: usize) -> String {
        (1..=count)
            .map(|n| self.dialect.placeholder(n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
