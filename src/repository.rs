// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository contract and its two implementations.
//!
//! # Overview
//!
//! - [`EntityRepository`] — Generic CRUD contract. Every provided finder
//!   routes through the two query-construction seams
//!   ([`EntityRepository::get_query`] and
//!   [`EntityRepository::get_count_query`]), so an implementation that
//!   overrides only those seams covers all derived read operations.
//! - [`SimpleRepository`] — Default implementation: physical deletes,
//!   pass-through seams.
//! - [`SoftDeleteRepository`] — Marks rows via the `removed_at` column
//!   instead of deleting and conjoins `removed_at IS NULL` onto every
//!   read and count.
//!
//! Each operation executes exactly one statement; failures propagate
//! unchanged, without retries.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    Pagination,
    backend::Backend,
    entity::Entity,
    error::RepositoryError,
    query::{Assignment, Count, Delete, Predicate, Select, Sort, Update, Value}
};

/// Conventional soft-delete column name.
///
/// Every soft-delete-managed entity maps this nullable timestamp column;
/// a non-null value means the row is logically deleted.
pub const SOFT_DELETE_COLUMN: &str = "removed_at";

/// Identifier equality predicate for one entity.
///
/// Single-column identifiers render as one equality; composite
/// identifiers as a conjunction of equalities over all identifier
/// columns. Fails before any statement is built when the identifier
/// value count disagrees with the declared identifier columns.
fn id_predicate<E: Entity, BE>(id: &E::Id) -> Result<Predicate, RepositoryError<BE>> {
    let values = E::id_values(id);
    if values.is_empty() || values.len() != E::ID_COLUMNS.len() {
        return Err(RepositoryError::IdMetadata {
            table:    E::TABLE,
            expected: E::ID_COLUMNS.len(),
            actual:   values.len()
        });
    }

    let mut parts: Vec<Predicate> = E::ID_COLUMNS
        .iter()
        .zip(values)
        .map(|(&column, value)| Predicate::Eq {
            column,
            value
        })
        .collect();

    Ok(if parts.len() == 1 {
        parts.remove(0)
    } else {
        Predicate::And(parts)
    })
}

/// Membership predicate over the identifiers of the given entities.
///
/// Single-column identifiers render as one `IN` list; composite
/// identifiers as a disjunction of per-entity conjunctions. Either way
/// the result drives a single batched statement.
fn ids_predicate<E: Entity, BE>(entities: &[E]) -> Result<Predicate, RepositoryError<BE>> {
    if E::ID_COLUMNS.len() == 1 {
        let mut values = Vec::with_capacity(entities.len());
        for entity in entities {
            let mut id_values = E::id_values(&entity.id());
            if id_values.len() != 1 {
                return Err(RepositoryError::IdMetadata {
                    table:    E::TABLE,
                    expected: 1,
                    actual:   id_values.len()
                });
            }
            values.push(id_values.remove(0));
        }
        return Ok(Predicate::in_values(E::ID_COLUMNS[0], values));
    }

    let parts = entities
        .iter()
        .map(|entity| id_predicate::<E, BE>(&entity.id()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Predicate::Or(parts))
}

/// Generic CRUD contract for one entity type + identifier type pair.
///
/// Required methods are the per-implementation seams: the deletion
/// family, the point lookup, and the two query-construction seams.
/// Provided finders are built exclusively on those seams, so they
/// inherit whatever implicit filtering an implementation applies there.
#[async_trait]
pub trait EntityRepository<E, B>: Send + Sync
where
    E: Entity,
    B: Backend<E>
{
    /// The backend statements execute against.
    fn backend(&self) -> &B;

    /// Build the SELECT for a read operation.
    ///
    /// Seam shared by every provided finder; implementations conjoin
    /// implicit filters here.
    fn get_query(
        &self,
        filter: Option<Predicate>,
        sort: Option<Sort>,
        pagination: Option<Pagination>
    ) -> Select;

    /// Build the COUNT for a counting operation.
    ///
    /// Seam shared by every provided count; implementations conjoin
    /// implicit filters here.
    fn get_count_query(&self, filter: Option<Predicate>) -> Count;

    /// Look up one entity by identifier.
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError<B::Error>>;

    /// Delete one entity, addressed by its identifier.
    async fn delete(&self, entity: &E) -> Result<(), RepositoryError<B::Error>>;

    /// Delete the given entities with a single batched statement.
    ///
    /// An empty slice is a no-op: no statement is executed.
    async fn delete_in_batch(&self, entities: &[E]) -> Result<(), RepositoryError<B::Error>>;

    /// Delete every row of the entity's table with a single statement.
    async fn delete_all_in_batch(&self) -> Result<(), RepositoryError<B::Error>>;

    /// Find all entities.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError<B::Error>> {
        let query = self.get_query(None, None, None);
        self.backend().fetch(&query).await.map_err(RepositoryError::Backend)
    }

    /// Find entities matching a caller-supplied predicate.
    async fn find_where(&self, filter: Predicate) -> Result<Vec<E>, RepositoryError<B::Error>> {
        let query = self.get_query(Some(filter), None, None);
        self.backend().fetch(&query).await.map_err(RepositoryError::Backend)
    }

    /// Find one page of entities.
    async fn find_page(
        &self,
        pagination: Pagination,
        sort: Option<Sort>
    ) -> Result<Vec<E>, RepositoryError<B::Error>> {
        let query = self.get_query(None, sort, Some(pagination));
        self.backend().fetch(&query).await.map_err(RepositoryError::Backend)
    }

    /// Count all entities.
    async fn count(&self) -> Result<i64, RepositoryError<B::Error>> {
        let query = self.get_count_query(None);
        self.backend().count(&query).await.map_err(RepositoryError::Backend)
    }

    /// Count entities matching a caller-supplied predicate.
    async fn count_where(&self, filter: Predicate) -> Result<i64, RepositoryError<B::Error>> {
        let query = self.get_count_query(Some(filter));
        self.backend().count(&query).await.map_err(RepositoryError::Backend)
    }
}

/// Default CRUD implementation: physical deletes, unfiltered reads.
#[derive(Debug)]
pub struct SimpleRepository<E, B> {
    backend: B,
    _entity: PhantomData<E>
}

impl<E, B> SimpleRepository<E, B> {
    /// Create a repository over the given backend.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            _entity: PhantomData
        }
    }
}

#[async_trait]
impl<E, B> EntityRepository<E, B> for SimpleRepository<E, B>
where
    E: Entity,
    B: Backend<E>
{
    fn backend(&self) -> &B {
        &self.backend
    }

    fn get_query(
        &self,
        filter: Option<Predicate>,
        sort: Option<Sort>,
        pagination: Option<Pagination>
    ) -> Select {
        Select {
            table: E::TABLE,
            columns: E::COLUMNS,
            filter,
            sort,
            pagination
        }
    }

    fn get_count_query(&self, filter: Option<Predicate>) -> Count {
        Count {
            table: E::TABLE,
            filter
        }
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError<B::Error>> {
        let filter = id_predicate::<E, B::Error>(id)?;
        let query = self.get_query(Some(filter), None, Some(Pagination::new(1, 0)));
        let rows = self.backend.fetch(&query).await.map_err(RepositoryError::Backend)?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, entity: &E) -> Result<(), RepositoryError<B::Error>> {
        let filter = id_predicate::<E, B::Error>(&entity.id())?;
        let statement = Delete {
            table:  E::TABLE,
            filter: Some(filter)
        };
        tracing::debug!(table = E::TABLE, "deleting entity");
        self.backend
            .execute_delete(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }

    async fn delete_in_batch(&self, entities: &[E]) -> Result<(), RepositoryError<B::Error>> {
        if entities.is_empty() {
            return Ok(());
        }
        let filter = ids_predicate::<E, B::Error>(entities)?;
        let statement = Delete {
            table:  E::TABLE,
            filter: Some(filter)
        };
        tracing::debug!(table = E::TABLE, count = entities.len(), "deleting entity batch");
        self.backend
            .execute_delete(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }

    async fn delete_all_in_batch(&self) -> Result<(), RepositoryError<B::Error>> {
        let statement = Delete {
            table:  E::TABLE,
            filter: None
        };
        tracing::debug!(table = E::TABLE, "deleting all entities");
        self.backend
            .execute_delete(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }
}

/// Soft-delete decorator over the generic CRUD contract.
///
/// Deletions become `UPDATE ... SET removed_at = now` statements; the
/// point lookup and both query-construction seams conjoin
/// `removed_at IS NULL`, so every provided finder and count sees only
/// active rows. The `*_with_deleted` methods bypass the seams for
/// callers that need the physically retained rows.
#[derive(Debug)]
pub struct SoftDeleteRepository<E, B> {
    backend: B,
    _entity: PhantomData<E>
}

impl<E, B> SoftDeleteRepository<E, B> {
    /// Create a repository over the given backend.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            _entity: PhantomData
        }
    }
}

impl<E, B> SoftDeleteRepository<E, B>
where
    E: Entity,
    B: Backend<E>
{
    /// `removed_at IS NULL` — the implicit filter on every read.
    fn active_filter() -> Predicate {
        Predicate::is_null(SOFT_DELETE_COLUMN)
    }

    /// Conjoin the implicit filter onto a caller predicate, or use it
    /// alone when none was supplied.
    fn with_active_filter(filter: Option<Predicate>) -> Predicate {
        match filter {
            Some(caller) => caller.and(Self::active_filter()),
            None => Self::active_filter()
        }
    }

    /// `UPDATE ... SET removed_at = now` with the given filter.
    fn removal_statement(filter: Option<Predicate>) -> Update {
        Update {
            table:       E::TABLE,
            assignments: vec![Assignment {
                column: SOFT_DELETE_COLUMN,
                value:  Value::Timestamp(Utc::now())
            }],
            filter
        }
    }

    /// Look up one entity by identifier, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(
        &self,
        id: &E::Id
    ) -> Result<Option<E>, RepositoryError<B::Error>> {
        let filter = id_predicate::<E, B::Error>(id)?;
        let query = Select {
            table:      E::TABLE,
            columns:    E::COLUMNS,
            filter:     Some(filter),
            sort:       None,
            pagination: Some(Pagination::new(1, 0))
        };
        let rows = self.backend.fetch(&query).await.map_err(RepositoryError::Backend)?;
        Ok(rows.into_iter().next())
    }

    /// Find all entities, including soft-deleted rows.
    pub async fn find_all_with_deleted(&self) -> Result<Vec<E>, RepositoryError<B::Error>> {
        let query = Select {
            table:      E::TABLE,
            columns:    E::COLUMNS,
            filter:     None,
            sort:       None,
            pagination: None
        };
        self.backend.fetch(&query).await.map_err(RepositoryError::Backend)
    }

    /// Count all entities, including soft-deleted rows.
    pub async fn count_with_deleted(&self) -> Result<i64, RepositoryError<B::Error>> {
        let query = Count {
            table:  E::TABLE,
            filter: None
        };
        self.backend.count(&query).await.map_err(RepositoryError::Backend)
    }
}

#[async_trait]
impl<E, B> EntityRepository<E, B> for SoftDeleteRepository<E, B>
where
    E: Entity,
    B: Backend<E>
{
    fn backend(&self) -> &B {
        &self.backend
    }

    fn get_query(
        &self,
        filter: Option<Predicate>,
        sort: Option<Sort>,
        pagination: Option<Pagination>
    ) -> Select {
        Select {
            table: E::TABLE,
            columns: E::COLUMNS,
            filter: Some(Self::with_active_filter(filter)),
            sort,
            pagination
        }
    }

    fn get_count_query(&self, filter: Option<Predicate>) -> Count {
        Count {
            table:  E::TABLE,
            filter: Some(Self::with_active_filter(filter))
        }
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError<B::Error>> {
        let filter = id_predicate::<E, B::Error>(id)?;
        let query = self.get_query(Some(filter), None, Some(Pagination::new(1, 0)));
        let rows = self.backend.fetch(&query).await.map_err(RepositoryError::Backend)?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, entity: &E) -> Result<(), RepositoryError<B::Error>> {
        let filter = id_predicate::<E, B::Error>(&entity.id())?;
        let statement = Self::removal_statement(Some(filter));
        tracing::debug!(table = E::TABLE, "soft deleting entity");
        self.backend
            .execute_update(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }

    async fn delete_in_batch(&self, entities: &[E]) -> Result<(), RepositoryError<B::Error>> {
        if entities.is_empty() {
            return Ok(());
        }
        let filter = ids_predicate::<E, B::Error>(entities)?;
        let statement = Self::removal_statement(Some(filter));
        tracing::debug!(table = E::TABLE, count = entities.len(), "soft deleting entity batch");
        self.backend
            .execute_update(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }

    async fn delete_all_in_batch(&self) -> Result<(), RepositoryError<B::Error>> {
        let statement = Self::removal_statement(None);
        tracing::debug!(table = E::TABLE, "soft deleting all entities");
        self.backend
            .execute_update(&statement)
            .await
            .map_err(RepositoryError::Backend)?;
        Ok(())
    }
}
