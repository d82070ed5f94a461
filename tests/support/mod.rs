// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory backend and entity fixtures for integration tests.
//!
//! The backend interprets the statement model against a `Mutex`-guarded
//! row vector and counts every executed statement, so tests can assert
//! both visible results and how many statements an operation issued.

#![allow(dead_code)]

use std::{
    fmt,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering}
    }
};

use chrono::{DateTime, Utc};
use soft_delete_repo::{
    async_trait,
    backend::Backend,
    entity::Entity,
    query::{Count, Delete, Predicate, Select, Update, Value}
};

/// Column access for the in-memory interpreter.
pub trait Row: Entity + Clone {
    /// Read a column as a bindable value; `Null` for absent optionals.
    fn get(&self, column: &str) -> Value;

    /// Write a column. Only columns the tests update need support.
    fn set(&mut self, column: &str, value: &Value);
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id:         i64,
    pub name:       String,
    pub removed_at: Option<DateTime<Utc>>
}

impl User {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            removed_at: None
        }
    }
}

impl Entity for User {
    type Id = i64;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "name", "removed_at"];
    const ID_COLUMNS: &'static [&'static str] = &["id"];

    fn id(&self) -> i64 {
        self.id
    }

    fn id_values(id: &i64) -> Vec<Value> {
        vec![Value::Int(*id)]
    }
}

impl Row for User {
    fn get(&self, column: &str) -> Value {
        match column {
            "id" => Value::Int(self.id),
            "name" => Value::Text(self.name.clone()),
            "removed_at" => self.removed_at.map_or(Value::Null, Value::Timestamp),
            other => panic!("users has no column {other}")
        }
    }

    fn set(&mut self, column: &str, value: &Value) {
        match (column, value) {
            ("removed_at", Value::Timestamp(at)) => self.removed_at = Some(*at),
            ("removed_at", Value::Null) => self.removed_at = None,
            ("name", Value::Text(name)) => self.name = name.clone(),
            (other, value) => panic!("unsupported assignment {other} = {value:?}")
        }
    }
}

/// Composite-identifier fixture: one row per (student_id, course_id).
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id:  i64,
    pub removed_at: Option<DateTime<Utc>>
}

impl Enrollment {
    pub fn new(student_id: i64, course_id: i64) -> Self {
        Self {
            student_id,
            course_id,
            removed_at: None
        }
    }
}

impl Entity for Enrollment {
    type Id = (i64, i64);

    const TABLE: &'static str = "enrollments";
    const COLUMNS: &'static [&'static str] = &["student_id", "course_id", "removed_at"];
    const ID_COLUMNS: &'static [&'static str] = &["student_id", "course_id"];

    fn id(&self) -> (i64, i64) {
        (self.student_id, self.course_id)
    }

    fn id_values(id: &(i64, i64)) -> Vec<Value> {
        vec![Value::Int(id.0), Value::Int(id.1)]
    }
}

impl Row for Enrollment {
    fn get(&self, column: &str) -> Value {
        match column {
            "student_id" => Value::Int(self.student_id),
            "course_id" => Value::Int(self.course_id),
            "removed_at" => self.removed_at.map_or(Value::Null, Value::Timestamp),
            other => panic!("enrollments has no column {other}")
        }
    }

    fn set(&mut self, column: &str, value: &Value) {
        match (column, value) {
            ("removed_at", Value::Timestamp(at)) => self.removed_at = Some(*at),
            ("removed_at", Value::Null) => self.removed_at = None,
            (other, value) => panic!("unsupported assignment {other} = {value:?}")
        }
    }
}

#[derive(Debug)]
pub struct MemoryError;

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("in-memory backend error")
    }
}

impl std::error::Error for MemoryError {}

/// Statement-interpreting in-memory table.
#[derive(Debug, Default)]
pub struct MemoryBackend<E> {
    rows:       Mutex<Vec<E>>,
    statements: AtomicUsize
}

impl<E: Row> MemoryBackend<E> {
    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows:       Mutex::new(rows),
            statements: AtomicUsize::new(0)
        }
    }

    /// Every row as currently stored, bypassing any query machinery.
    pub fn snapshot(&self) -> Vec<E> {
        self.rows.lock().unwrap().clone()
    }

    /// Number of statements executed so far.
    pub fn statements(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    fn record_statement(&self) {
        self.statements.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches_row<E: Row>(row: &E, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Eq {
            column,
            value
        } => row.get(column) == *value,
        Predicate::IsNull {
            column
        } => row.get(column) == Value::Null,
        Predicate::IsNotNull {
            column
        } => row.get(column) != Value::Null,
        Predicate::In {
            column,
            values
        } => values.contains(&row.get(column)),
        Predicate::And(parts) => parts.iter().all(|part| matches_row(row, part)),
        Predicate::Or(parts) => parts.iter().any(|part| matches_row(row, part))
    }
}

fn matches_filter<E: Row>(row: &E, filter: &Option<Predicate>) -> bool {
    filter.as_ref().is_none_or(|predicate| matches_row(row, predicate))
}

#[async_trait]
impl<E: Row> Backend<E> for MemoryBackend<E> {
    type Error = MemoryError;

    async fn fetch(&self, query: &Select) -> Result<Vec<E>, MemoryError> {
        self.record_statement();
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<E> = rows
            .iter()
            .filter(|row| matches_filter(*row, &query.filter))
            .cloned()
            .collect();
        if let Some(page) = query.pagination {
            let offset = usize::try_from(page.offset).unwrap_or(0);
            let limit = usize::try_from(page.limit).unwrap_or(0);
            out = out.into_iter().skip(offset).take(limit).collect();
        }
        Ok(out)
    }

    async fn count(&self, query: &Count) -> Result<i64, MemoryError> {
        self.record_statement();
        let rows = self.rows.lock().unwrap();
        let total = rows.iter().filter(|row| matches_filter(*row, &query.filter)).count();
        Ok(total as i64)
    }

    async fn execute_update(&self, statement: &Update) -> Result<u64, MemoryError> {
        self.record_statement();
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows.iter_mut() {
            if matches_filter(row, &statement.filter) {
                for assignment in &statement.assignments {
                    row.set(assignment.column, &assignment.value);
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn execute_delete(&self, statement: &Delete) -> Result<u64, MemoryError> {
        self.record_statement();
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| !matches_filter(row, &statement.filter));
        Ok((before - rows.len()) as u64)
    }
}
