// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Soft-delete repository layer.
//!
//! This crate rewrites repository deletions into timestamp-marking updates
//! and rewrites read/count queries to exclude marked rows by default. Rows
//! are never physically deleted through the soft-delete path; a nullable
//! `removed_at` column records the logical deletion instead.
//!
//! # Overview
//!
//! - [`SoftDelete`](marker::SoftDelete) — Marker opting a repository
//!   interface into soft-delete behavior
//! - [`SoftDeleteRepository`](repository::SoftDeleteRepository) — CRUD
//!   decorator that marks instead of deleting and filters reads
//! - [`SimpleRepository`](repository::SimpleRepository) — Default CRUD
//!   implementation with physical deletes
//! - [`RepositoryFactory`](factory::RepositoryFactory) — Selects the
//!   implementation per repository interface based on marker presence
//! - [`Backend`](backend::Backend) — Persistence seam the repositories
//!   execute against
//! - [`prelude`] — Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use soft_delete_repo::prelude::*;
//!
//! struct UserRepository;
//!
//! let mut factory = RepositoryFactory::new();
//! factory.mark::<UserRepository>(SoftDelete::new());
//!
//! let repo = factory.repository::<UserRepository, User, _>(pool);
//! repo.delete(&user).await?; // UPDATE users SET removed_at = now
//! repo.find_by_id(&user.id).await?; // None: marked rows are invisible
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod entity;
pub mod error;
pub mod factory;
pub mod marker;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod prelude;
pub mod query;
pub mod repository;

/// Re-export async_trait for backend implementations.
pub use async_trait::async_trait;

/// Pagination parameters for list operations.
///
/// Used by paged finders to control result pagination.
///
/// # Example
///
/// ```rust
/// use soft_delete_repo::Pagination;
///
/// let page = Pagination::new(10, 0); // First 10 items
/// let next = Pagination::new(10, 10); // Next 10 items
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results to return.
    pub limit: i64,

    /// Number of results to skip.
    pub offset: i64
}

impl Pagination {
    /// Create new pagination parameters.
    ///
    /// # Arguments
    ///
    /// * `limit` — Maximum results to return
    /// * `offset` — Number of results to skip
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset
        }
    }

    /// Create pagination for a specific page.
    ///
    /// # Arguments
    ///
    /// * `page` — Page number (0-indexed)
    /// * `per_page` — Items per page
    ///
    /// # Example
    ///
    /// ```rust
    /// use soft_delete_repo::Pagination;
    ///
    /// let page_0 = Pagination::page(0, 25); // offset=0, limit=25
    /// let page_2 = Pagination::page(2, 25); // offset=50, limit=25
    /// ```
    pub const fn page(page: i64, per_page: i64) -> Self {
        Self {
            limit:  per_page,
            offset: page * per_page
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit:  100,
            offset: 0
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }
}
