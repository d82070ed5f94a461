// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Soft-delete marker.

/// Declarative tag opting a repository interface into soft-delete
/// behavior.
///
/// Purely declarative: it carries an optional label and has no runtime
/// behavior of its own. The
/// [`RepositoryFactory`](crate::factory::RepositoryFactory) consults it
/// once per repository interface, at construction time.
///
/// # Example
///
/// ```rust
/// use soft_delete_repo::marker::SoftDelete;
///
/// let marker = SoftDelete::new();
/// assert_eq!(marker.label(), "");
///
/// let labeled = SoftDelete::labeled("audit retention");
/// assert_eq!(labeled.label(), "audit retention");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoftDelete {
    label: &'static str
}

impl SoftDelete {
    /// Create an unlabeled marker.
    pub const fn new() -> Self {
        Self {
            label: ""
        }
    }

    /// Create a marker with a descriptive label.
    pub const fn labeled(label: &'static str) -> Self {
        Self {
            label
        }
    }

    /// The descriptive label, empty by default.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Check if a label was supplied.
    pub const fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}
