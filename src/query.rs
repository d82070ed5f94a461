// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statement and predicate model.
//!
//! Repositories build owned statement values instead of SQL strings. A
//! statement renders to PostgreSQL-style SQL with `$n` placeholders via
//! `to_sql`, returning the parameter values in placeholder order, so a
//! backend can bind them without re-parsing the statement.
//!
//! # Predicate Composition
//!
//! [`Predicate`] is a combinator: any two predicates compose with
//! [`Predicate::and`], and the absence of a caller predicate is the
//! identity. This is what lets the soft-delete filter be conjoined onto
//! whatever filter a caller supplied (or stand alone when none was).
//!
//! # Rendered SQL
//!
//! ```sql
//! SELECT id, name, removed_at FROM users
//! WHERE (name = $1) AND (removed_at IS NULL)
//! ORDER BY id ASC
//! LIMIT 100 OFFSET 0
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Pagination, SortDirection};

/// A bindable scalar value.
///
/// Carried by predicates and update assignments; backends bind these as
/// statement parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer.
    Int(i64),

    /// 64-bit float.
    Float(f64),

    /// Text value.
    Text(String),

    /// UUID value.
    Uuid(Uuid),

    /// UTC timestamp.
    Timestamp(DateTime<Utc>),

    /// SQL NULL.
    Null
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// A composable filter condition.
///
/// Composite predicates render each operand parenthesized, so nesting
/// never changes precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column equals a bound value.
    Eq {
        /// Column name.
        column: &'static str,
        /// Value to compare against.
        value:  Value
    },

    /// Column is NULL.
    IsNull {
        /// Column name.
        column: &'static str
    },

    /// Column is NOT NULL.
    IsNotNull {
        /// Column name.
        column: &'static str
    },

    /// Column is a member of a bound value list.
    ///
    /// An empty list renders as `FALSE`: membership in the empty set
    /// matches no row.
    In {
        /// Column name.
        column: &'static str,
        /// Values to match against.
        values: Vec<Value>
    },

    /// Conjunction of predicates. Empty renders as `TRUE`.
    And(Vec<Predicate>),

    /// Disjunction of predicates. Empty renders as `FALSE`.
    Or(Vec<Predicate>)
}

impl Predicate {
    /// Column-equals-value predicate.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            column,
            value: value.into()
        }
    }

    /// Column-is-NULL predicate.
    pub const fn is_null(column: &'static str) -> Self {
        Self::IsNull {
            column
        }
    }

    /// Column-is-NOT-NULL predicate.
    pub const fn is_not_null(column: &'static str) -> Self {
        Self::IsNotNull {
            column
        }
    }

    /// Column-in-list predicate.
    pub const fn in_values(column: &'static str, values: Vec<Value>) -> Self {
        Self::In {
            column,
            values
        }
    }

    /// Conjoin another predicate onto this one.
    ///
    /// An existing conjunction is extended in place rather than nested.
    ///
    /// # Example
    ///
    /// ```rust
    /// use soft_delete_repo::query::Predicate;
    ///
    /// let filter = Predicate::eq("name", "alice").and(Predicate::is_null("removed_at"));
    /// let (sql, _) = filter.to_sql();
    /// assert_eq!(sql, "(name = $1) AND (removed_at IS NULL)");
    /// ```
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other])
        }
    }

    /// Disjoin another predicate onto this one.
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Or(mut parts) => {
                parts.push(other);
                Self::Or(parts)
            }
            first => Self::Or(vec![first, other])
        }
    }

    /// Render to SQL with `$n` placeholders.
    ///
    /// Returns the SQL fragment and the parameter values in placeholder
    /// order.
    pub fn to_sql(&self) -> (String, Vec<&Value>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.render(&mut sql, &mut params);
        (sql, params)
    }

    pub(crate) fn render<'a>(&'a self, sql: &mut String, params: &mut Vec<&'a Value>) {
        match self {
            Self::Eq {
                column,
                value
            } => {
                params.push(value);
                sql.push_str(&format!("{column} = ${}", params.len()));
            }
            Self::IsNull {
                column
            } => sql.push_str(&format!("{column} IS NULL")),
            Self::IsNotNull {
                column
            } => sql.push_str(&format!("{column} IS NOT NULL")),
            Self::In {
                column,
                values
            } => {
                if values.is_empty() {
                    sql.push_str("FALSE");
                    return;
                }
                sql.push_str(&format!("{column} IN ("));
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    params.push(value);
                    sql.push_str(&format!("${}", params.len()));
                }
                sql.push(')');
            }
            Self::And(parts) => Self::render_joined(parts, " AND ", "TRUE", sql, params),
            Self::Or(parts) => Self::render_joined(parts, " OR ", "FALSE", sql, params)
        }
    }

    fn render_joined<'a>(
        parts: &'a [Predicate],
        separator: &str,
        empty: &str,
        sql: &mut String,
        params: &mut Vec<&'a Value>
    ) {
        if parts.is_empty() {
            sql.push_str(empty);
            return;
        }
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                sql.push_str(separator);
            }
            sql.push('(');
            part.render(sql, params);
            sql.push(')');
        }
    }
}

/// Sort order for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Column to order by.
    pub column: &'static str,

    /// Order direction.
    pub direction: SortDirection
}

impl Sort {
    /// Create a sort order.
    pub const fn new(column: &'static str, direction: SortDirection) -> Self {
        Self {
            column,
            direction
        }
    }

    /// Ascending sort on a column.
    pub const fn asc(column: &'static str) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    /// Descending sort on a column.
    pub const fn desc(column: &'static str) -> Self {
        Self::new(column, SortDirection::Desc)
    }
}

/// A SELECT statement over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Table name.
    pub table: &'static str,

    /// Columns to select, in declaration order.
    pub columns: &'static [&'static str],

    /// Optional WHERE predicate.
    pub filter: Option<Predicate>,

    /// Optional ORDER BY clause.
    pub sort: Option<Sort>,

    /// Optional LIMIT/OFFSET clause.
    pub pagination: Option<Pagination>
}

impl Select {
    /// Render to SQL with `$n` placeholders.
    pub fn to_sql(&self) -> (String, Vec<&Value>) {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.table);
        let mut params = Vec::new();

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.render(&mut sql, &mut params);
        }
        if let Some(sort) = &self.sort {
            sql.push_str(&format!(" ORDER BY {} {}", sort.column, sort.direction.as_sql()));
        }
        if let Some(page) = &self.pagination {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit, page.offset));
        }

        (sql, params)
    }
}

/// A COUNT(*) statement over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    /// Table name.
    pub table: &'static str,

    /// Optional WHERE predicate.
    pub filter: Option<Predicate>
}

impl Count {
    /// Render to SQL with `$n` placeholders.
    pub fn to_sql(&self) -> (String, Vec<&Value>) {
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let mut params = Vec::new();

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.render(&mut sql, &mut params);
        }

        (sql, params)
    }
}

/// A single SET column = value assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column to assign.
    pub column: &'static str,

    /// Value to assign.
    pub value: Value
}

/// An UPDATE statement over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Table name.
    pub table: &'static str,

    /// SET assignments, in order.
    pub assignments: Vec<Assignment>,

    /// Optional WHERE predicate. `None` updates every row.
    pub filter: Option<Predicate>
}

impl Update {
    /// Render to SQL with `$n` placeholders.
    ///
    /// Assignment parameters come first; filter parameters continue the
    /// placeholder numbering.
    pub fn to_sql(&self) -> (String, Vec<&Value>) {
        let mut sql = format!("UPDATE {} SET ", self.table);
        let mut params = Vec::new();

        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            params.push(&assignment.value);
            sql.push_str(&format!("{} = ${}", assignment.column, params.len()));
        }
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.render(&mut sql, &mut params);
        }

        (sql, params)
    }
}

/// A DELETE statement over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Table name.
    pub table: &'static str,

    /// Optional WHERE predicate. `None` deletes every row.
    pub filter: Option<Predicate>
}

impl Delete {
    /// Render to SQL with `$n` placeholders.
    pub fn to_sql(&self) -> (String, Vec<&Value>) {
        let mut sql = format!("DELETE FROM {}", self.table);
        let mut params = Vec::new();

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.render(&mut sql, &mut params);
        }

        (sql, params)
    }
}
