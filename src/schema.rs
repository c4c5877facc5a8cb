//! Database schema model
//!
//! A [`Schema`] maps table names to their column names. Both tables and columns
//! keep insertion order, so everything derived from a schema (chunks, prompts,
//! listings) is deterministic for a given introspection result.

use serde::{Deserialize, Serialize};

/// One table and its ordered column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

/// Ordered mapping of table name to column names. Table names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    tables: Vec<TableSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table. An existing table of the same name keeps its position
    /// and has its columns replaced.
    pub fn insert_table<S, I, C>(&mut self, name: S, columns: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        match self.tables.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.columns = columns,
            None => self.tables.push(TableSchema { name, columns }),
        }
    }

    /// Append one column to a table, creating the table on first sight.
    /// Introspection queries yield (table, column) rows; this groups them.
    pub fn push_column(&mut self, table: &str, column: impl Into<String>) {
        let column = column.into();
        match self.tables.iter_mut().rev().find(|t| t.name == table) {
            Some(existing) => existing.columns.push(column),
            None => self.tables.push(TableSchema {
                name: table.to_string(),
                columns: vec![column],
            }),
        }
    }

    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Case-insensitive table lookup, for user-typed names
    pub fn find_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<S, C> FromIterator<(S, Vec<C>)> for Schema
where
    S: Into<String>,
    C: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, Vec<C>)>>(iter: T) -> Self {
        let mut schema = Schema::new();
        for (name, columns) in iter {
            schema.insert_table(name, columns);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let schema: Schema = [
            ("users", vec!["id", "name"]),
            ("orders", vec!["id", "user_id"]),
            ("audit", vec!["at"]),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = schema.table_names().collect();
        assert_eq!(names, vec!["users", "orders", "audit"]);
        assert_eq!(schema.table("users").unwrap().columns, vec!["id", "name"]);
    }

    #[test]
    fn test_reinsert_replaces_columns_in_place() {
        let mut schema = Schema::new();
        schema.insert_table("a", ["x"]);
        schema.insert_table("b", ["y"]);
        schema.insert_table("a", ["z", "w"]);

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.tables()[0].name, "a");
        assert_eq!(schema.tables()[0].columns, vec!["z", "w"]);
    }

    #[test]
    fn test_push_column_groups_rows() {
        let mut schema = Schema::new();
        for (table, column) in [
            ("users", "id"),
            ("users", "name"),
            ("orders", "id"),
            ("orders", "total"),
        ] {
            schema.push_column(table, column);
        }

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.table("orders").unwrap().columns, vec!["id", "total"]);
    }

    #[test]
    fn test_find_table_ignores_case() {
        let mut schema = Schema::new();
        schema.insert_table("Customers", ["id"]);
        assert!(schema.find_table("customers").is_some());
        assert!(schema.table("customers").is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut schema = Schema::new();
        schema.insert_table("users", ["id"]);
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"[{"name":"users","columns":["id"]}]"#);
    }
}
