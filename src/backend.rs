// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistence seam.

use async_trait::async_trait;

use crate::{
    entity::Entity,
    query::{Count, Delete, Select, Update}
};

/// Statement execution seam for one entity type.
///
/// Repositories build statements and hand them here; everything below
/// this trait — connection handling, row-to-entity mapping, transaction
/// scope — belongs to the implementation. Each call is one unit of work
/// against one connection; this layer adds no pooling or caching of its
/// own.
///
/// A `sqlx::PgPool` implementation is available behind the `postgres`
/// feature.
#[async_trait]
pub trait Backend<E: Entity>: Send + Sync {
    /// Error type for statement execution.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a SELECT and map the rows to entities.
    async fn fetch(&self, query: &Select) -> Result<Vec<E>, Self::Error>;

    /// Execute a COUNT(*) and return the row count.
    async fn count(&self, query: &Count) -> Result<i64, Self::Error>;

    /// Execute an UPDATE and return the number of affected rows.
    async fn execute_update(&self, statement: &Update) -> Result<u64, Self::Error>;

    /// Execute a DELETE and return the number of affected rows.
    async fn execute_delete(&self, statement: &Delete) -> Result<u64, Self::Error>;
}
