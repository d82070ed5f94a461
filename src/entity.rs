// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata trait.

use crate::query::Value;

/// Table and identifier metadata for a persisted record type.
///
/// Repositories address rows exclusively through this metadata: the table
/// name, the column list, and the identifier columns with their values.
/// Composite identifiers declare one column per component and return the
/// component values in the same order from [`Entity::id_values`].
///
/// Entities managed by the soft-delete repository must additionally map a
/// nullable timestamp column named `removed_at`; the column name is fixed
/// by convention and not configurable per entity.
///
/// # Example
///
/// ```rust
/// use soft_delete_repo::{entity::Entity, query::Value};
///
/// #[derive(Clone)]
/// struct User {
///     id:         i64,
///     name:       String,
///     removed_at: Option<chrono::DateTime<chrono::Utc>>
/// }
///
/// impl Entity for User {
///     type Id = i64;
///
///     const TABLE: &'static str = "users";
///     const COLUMNS: &'static [&'static str] = &["id", "name", "removed_at"];
///     const ID_COLUMNS: &'static [&'static str] = &["id"];
///
///     fn id(&self) -> i64 {
///         self.id
///     }
///
///     fn id_values(id: &i64) -> Vec<Value> {
///         vec![Value::Int(*id)]
///     }
/// }
/// ```
pub trait Entity: Send + Sync + Sized + 'static {
    /// Identifier type, single or composite.
    type Id: Clone + PartialEq + Send + Sync;

    /// Table name.
    const TABLE: &'static str;

    /// Column names, in declaration order.
    const COLUMNS: &'static [&'static str];

    /// Identifier column names. One entry per composite-key component.
    const ID_COLUMNS: &'static [&'static str];

    /// Identifier of this instance.
    fn id(&self) -> Self::Id;

    /// Bindable values of an identifier, one per entry in
    /// [`Entity::ID_COLUMNS`], in the same order.
    fn id_values(id: &Self::Id) -> Vec<Value>;
}
