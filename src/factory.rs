// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository factory selector.
//!
//! The factory holds a registry of [`SoftDelete`] markers keyed by the
//! `TypeId` of a repository-interface token type. Producing a repository
//! is a pure classification over that registry: a marked interface gets
//! a [`SoftDeleteRepository`], an unmarked one the default
//! [`SimpleRepository`]. The decision is made once, at construction
//! time, and the produced [`AnyRepository`] exposes the uniform CRUD
//! contract so callers never learn which variant is in play.
//!
//! # Example
//!
//! ```rust,ignore
//! use soft_delete_repo::prelude::*;
//!
//! struct UserRepository;
//! struct AuditRepository;
//!
//! let mut factory = RepositoryFactory::new();
//! factory.mark::<UserRepository>(SoftDelete::new());
//!
//! let users = factory.repository::<UserRepository, User, _>(pool.clone());
//! let audits = factory.repository::<AuditRepository, Audit, _>(pool);
//! assert!(users.is_soft_delete());
//! assert!(!audits.is_soft_delete());
//! ```

use std::{
    any::TypeId,
    collections::HashMap
};

use async_trait::async_trait;

use crate::{
    Pagination,
    backend::Backend,
    entity::Entity,
    error::RepositoryError,
    marker::SoftDelete,
    query::{Count, Predicate, Select, Sort},
    repository::{EntityRepository, SimpleRepository, SoftDeleteRepository}
};

/// Registry of marked repository interfaces and the selection logic.
///
/// Read-only after declaration; consulted once per repository interface
/// at construction time.
#[derive(Debug, Default)]
pub struct RepositoryFactory {
    markers: HashMap<TypeId, SoftDelete>
}

impl RepositoryFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            markers: HashMap::new()
        }
    }

    /// Attach a marker to the repository interface `R`.
    ///
    /// Marking the same interface again replaces the previous marker.
    pub fn mark<R: ?Sized + 'static>(&mut self, marker: SoftDelete) -> &mut Self {
        self.markers.insert(TypeId::of::<R>(), marker);
        self
    }

    /// Check if the repository interface `R` is marked.
    pub fn is_marked<R: ?Sized + 'static>(&self) -> bool {
        self.markers.contains_key(&TypeId::of::<R>())
    }

    /// Read the marker attached to the repository interface `R`, if any.
    pub fn marker<R: ?Sized + 'static>(&self) -> Option<&SoftDelete> {
        self.markers.get(&TypeId::of::<R>())
    }

    /// Produce the repository backing the interface `R`.
    ///
    /// Marked interfaces receive the soft-delete implementation;
    /// everything else the default one.
    pub fn repository<R, E, B>(&self, backend: B) -> AnyRepository<E, B>
    where
        R: ?Sized + 'static,
        E: Entity,
        B: Backend<E>
    {
        if self.is_marked::<R>() {
            tracing::debug!(table = E::TABLE, "selected soft-delete repository");
            AnyRepository::SoftDelete(SoftDeleteRepository::new(backend))
        } else {
            AnyRepository::Simple(SimpleRepository::new(backend))
        }
    }
}

/// A produced repository, either variant behind the uniform contract.
#[derive(Debug)]
pub enum AnyRepository<E, B> {
    /// Default CRUD implementation.
    Simple(SimpleRepository<E, B>),

    /// Soft-delete implementation.
    SoftDelete(SoftDeleteRepository<E, B>)
}

impl<E, B> AnyRepository<E, B> {
    /// Check which variant was selected.
    pub const fn is_soft_delete(&self) -> bool {
        matches!(self, Self::SoftDelete(_))
    }
}

#[async_trait]
impl<E, B> EntityRepository<E, B> for AnyRepository<E, B>
where
    E: Entity,
    B: Backend<E>
{
    fn backend(&self) -> &B {
        match self {
            Self::Simple(repo) => repo.backend(),
            Self::SoftDelete(repo) => repo.backend()
        }
    }

    fn get_query(
        &self,
        filter: Option<Predicate>,
        sort: Option<Sort>,
        pagination: Option<Pagination>
    ) -> Select {
        match self {
            Self::Simple(repo) => repo.get_query(filter, sort, pagination),
            Self::SoftDelete(repo) => repo.get_query(filter, sort, pagination)
        }
    }

    fn get_count_query(&self, filter: Option<Predicate>) -> Count {
        match self {
            Self::Simple(repo) => repo.get_count_query(filter),
            Self::SoftDelete(repo) => repo.get_count_query(filter)
        }
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError<B::Error>> {
        match self {
            Self::Simple(repo) => repo.find_by_id(id).await,
            Self::SoftDelete(repo) => repo.find_by_id(id).await
        }
    }

    async fn delete(&self, entity: &E) -> Result<(), RepositoryError<B::Error>> {
        match self {
            Self::Simple(repo) => repo.delete(entity).await,
            Self::SoftDelete(repo) => repo.delete(entity).await
        }
    }

    async fn delete_in_batch(&self, entities: &[E]) -> Result<(), RepositoryError<B::Error>> {
        match self {
            Self::Simple(repo) => repo.delete_in_batch(entities).await,
            Self::SoftDelete(repo) => repo.delete_in_batch(entities).await
        }
    }

    async fn delete_all_in_batch(&self) -> Result<(), RepositoryError<B::Error>> {
        match self {
            Self::Simple(repo) => repo.delete_all_in_batch().await,
            Self::SoftDelete(repo) => repo.delete_all_in_batch().await
        }
    }
}
