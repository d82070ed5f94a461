// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error type for repository operations.

use std::fmt;

/// Error type for repository operations.
///
/// Backend failures are wrapped, never translated or suppressed; the
/// original error stays reachable through [`std::error::Error::source`]
/// and [`RepositoryError::into_backend`]. Identifier metadata mismatches
/// are detected before any statement is built.
#[derive(Debug)]
pub enum RepositoryError<B> {
    /// Identifier metadata is inconsistent: the number of identifier
    /// values disagrees with the declared identifier columns.
    IdMetadata {
        /// Table the identifier belongs to.
        table: &'static str,
        /// Declared identifier column count.
        expected: usize,
        /// Identifier value count actually produced.
        actual: usize
    },

    /// Backend operation failed.
    Backend(B)
}

impl<B> RepositoryError<B> {
    /// Check if this is an identifier metadata error.
    pub const fn is_metadata(&self) -> bool {
        matches!(self, Self::IdMetadata { .. })
    }

    /// Check if this is a backend error.
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Get the wrapped backend error, if any.
    pub fn into_backend(self) -> Option<B> {
        match self {
            Self::Backend(e) => Some(e),
            Self::IdMetadata {
                ..
            } => None
        }
    }
}

impl<B: fmt::Display> fmt::Display for RepositoryError<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdMetadata {
                table,
                expected,
                actual
            } => write!(
                f,
                "identifier metadata mismatch for table {table}: {expected} id columns, {actual} id values"
            ),
            Self::Backend(e) => write!(f, "{e}")
        }
    }
}

impl<B: std::error::Error + 'static> std::error::Error for RepositoryError<B> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(e) => Some(e),
            Self::IdMetadata {
                ..
            } => None
        }
    }
}
