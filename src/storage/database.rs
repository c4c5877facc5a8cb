//! SQLite database operations for querynova
//!
//! The target database is introspected for its schema and used to run the
//! generated SQL. Nothing here creates or migrates tables.

use super::schema::SELECT_TABLE_COLUMNS;
use super::{CellValue, QueryRows, SchemaProvider, SqlExecutor};
use crate::error::{QueryNovaError, Result};
use crate::schema::Schema;
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Database connection and operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QueryNovaError::Storage(format!(
                "Database file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)
            .map_err(|e| QueryNovaError::Storage(format!("Failed to open database: {}", e)))?;

        log::info!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QueryNovaError::Storage(format!("Failed to create in-memory database: {}", e))
        })?;
        Ok(Self { conn })
    }

    /// Run several `;`-separated statements, e.g. to seed a database
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Read tables and columns from the catalog
    pub fn introspect_schema(&self) -> Result<Schema> {
        let mut stmt = self.conn.prepare(SELECT_TABLE_COLUMNS)?;
        let mut rows = stmt.query([])?;

        let mut schema = Schema::new();
        while let Some(row) = rows.next()? {
            let table: String = row.get(0)?;
            let column: String = row.get(1)?;
            schema.push_column(&table, column);
        }

        log::debug!("Introspected {} tables", schema.len());
        Ok(schema)
    }

    /// Run a statement and collect every row it returns
    pub fn query(&self, sql: &str) -> Result<QueryRows> {
        let start_time = Instant::now();

        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let column_count = columns.len();

        let mut result_rows = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                cells.push(CellValue::from(row.get_ref(idx)?));
            }
            result_rows.push(cells);
        }

        let elapsed = start_time.elapsed();
        log::info!(
            "Query returned {} rows in {:.3}s",
            result_rows.len(),
            elapsed.as_secs_f64()
        );

        Ok(QueryRows {
            columns,
            rows: result_rows,
            elapsed,
        })
    }
}

impl SchemaProvider for Database {
    fn fetch_schema(&self) -> Result<Schema> {
        self.introspect_schema()
    }
}

impl SqlExecutor for Database {
    fn execute(&self, sql: &str) -> Result<QueryRows> {
        self.query(sql)
    }
}
