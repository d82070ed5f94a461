// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use soft_delete_repo::prelude::*;
//! ```

pub use crate::{
    Pagination, SortDirection, async_trait,
    backend::Backend,
    entity::Entity,
    error::RepositoryError,
    factory::{AnyRepository, RepositoryFactory},
    marker::SoftDelete,
    query::{Predicate, Sort, Value},
    repository::{
        EntityRepository, SOFT_DELETE_COLUMN, SimpleRepository, SoftDeleteRepository
    }
};
