//! Storage functionality for querynova
//!
//! This module defines the database-facing collaborators of the pipeline and
//! their SQLite implementation.

pub mod database;
pub mod schema;

// Re-export main types
pub use database::Database;

use crate::error::Result;
use crate::schema::Schema;
use rusqlite::types::ValueRef;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Source of the database schema
pub trait SchemaProvider {
    fn fetch_schema(&self) -> Result<Schema>;
}

/// Runs generated SQL against the database
pub trait SqlExecutor {
    fn execute(&self, sql: &str) -> Result<QueryRows>;
}

/// A fixed schema serves as its own provider
impl SchemaProvider for Schema {
    fn fetch_schema(&self) -> Result<Schema> {
        Ok(self.clone())
    }
}

/// One result cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for CellValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(f) => CellValue::Real(f),
            ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => CellValue::Blob(bytes.to_vec()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Real(r) => write!(f, "{}", r),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

/// Rows returned by an executed statement
#[derive(Debug, Clone, Serialize)]
pub struct QueryRows {
    /// Column names in result order
    pub columns: Vec<String>,

    /// One vector of cells per row
    pub rows: Vec<Vec<CellValue>>,

    /// Wall-clock execution time
    #[serde(skip)]
    pub elapsed: Duration,
}

impl QueryRows {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        assert_eq!(CellValue::Real(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Blob(vec![0; 3]).to_string(), "<blob 3 bytes>");
    }

    #[test]
    fn test_rows_json() {
        let rows = QueryRows {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![vec![CellValue::Integer(1), CellValue::Null]],
            elapsed: Duration::from_millis(3),
        };
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"{"columns":["id","name"],"rows":[[1,null]]}"#);
    }

    #[test]
    fn test_static_schema_provider() {
        let mut schema = Schema::new();
        schema.insert_table("users", ["id"]);
        assert_eq!(schema.fetch_schema().unwrap(), schema);
    }
}
