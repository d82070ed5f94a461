// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL backend via `sqlx::PgPool`.
//!
//! Statements render to `$n`-placeholder SQL and parameters bind in
//! placeholder order. Entities must implement `sqlx::FromRow` for the
//! row-to-entity mapping; the mapping itself stays the application's
//! concern.
//!
//! Each call executes one statement on one pooled connection and
//! auto-commits; callers needing a wider transaction scope manage it
//! around the repository.

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgRow};

use crate::{
    backend::Backend,
    entity::Entity,
    query::{Count, Delete, Select, Update, Value}
};

/// Bind rendered parameters onto an sqlx query in placeholder order.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for value in $params {
            q = match value {
                Value::Bool(v) => q.bind(v),
                Value::Int(v) => q.bind(v),
                Value::Float(v) => q.bind(v),
                Value::Text(v) => q.bind(v.as_str()),
                Value::Uuid(v) => q.bind(v),
                Value::Timestamp(v) => q.bind(v),
                Value::Null => q.bind(None::<String>)
            };
        }
        q
    }};
}

#[async_trait]
impl<E> Backend<E> for PgPool
where
    E: Entity + Unpin + for<'r> sqlx::FromRow<'r, PgRow>
{
    type Error = sqlx::Error;

    async fn fetch(&self, query: &Select) -> Result<Vec<E>, sqlx::Error> {
        let (sql, params) = query.to_sql();
        bind_params!(sqlx::query_as::<_, E>(&sql), params)
            .fetch_all(self)
            .await
    }

    async fn count(&self, query: &Count) -> Result<i64, sqlx::Error> {
        let (sql, params) = query.to_sql();
        bind_params!(sqlx::query_scalar::<_, i64>(&sql), params)
            .fetch_one(self)
            .await
    }

    async fn execute_update(&self, statement: &Update) -> Result<u64, sqlx::Error> {
        let (sql, params) = statement.to_sql();
        let result = bind_params!(sqlx::query(&sql), params).execute(self).await?;
        Ok(result.rows_affected())
    }

    async fn execute_delete(&self, statement: &Delete) -> Result<u64, sqlx::Error> {
        let (sql, params) = statement.to_sql();
        let result = bind_params!(sqlx::query(&sql), params).execute(self).await?;
        Ok(result.rows_affected())
    }
}
