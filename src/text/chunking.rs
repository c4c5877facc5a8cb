//! Schema chunking
//!
//! Renders each table of a [`Schema`] as a short text block. Chunks are the
//! unit of relevance filtering and are what ends up in the model prompt.

use crate::schema::{Schema, TableSchema};
use serde::{Deserialize, Serialize};

/// One table rendered as prompt text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaChunk {
    /// Table the chunk was rendered from
    pub table: String,

    /// `Table: <name>\nColumns: <c1>, <c2>, ...`
    pub text: String,
}

impl SchemaChunk {
    /// Render a single table
    pub fn from_table(table: &TableSchema) -> Self {
        Self {
            table: table.name.clone(),
            text: format!("Table: {}\nColumns: {}", table.name, table.columns.join(", ")),
        }
    }
}

/// Render one chunk per table, in schema order.
///
/// Columns keep their original order and are neither sorted nor
/// deduplicated. An empty schema yields no chunks.
pub fn chunk_schema(schema: &Schema) -> Vec<SchemaChunk> {
    schema.tables().iter().map(SchemaChunk::from_table).collect()
}

/// Texts of all chunks, in order
pub fn chunk_texts(chunks: &[SchemaChunk]) -> Vec<String> {
    chunks.iter().map(|c| c.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_schema() -> Schema {
        [
            ("users", vec!["id", "name", "email"]),
            ("orders", vec!["id", "user_id", "total"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_chunk_format() {
        let chunks = chunk_schema(&shop_schema());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].table, "users");
        assert_eq!(chunks[0].text, "Table: users\nColumns: id, name, email");
        assert_eq!(chunks[1].text, "Table: orders\nColumns: id, user_id, total");
    }

    #[test]
    fn test_one_chunk_per_table_with_all_names() {
        let schema = shop_schema();
        let chunks = chunk_schema(&schema);

        assert_eq!(chunks.len(), schema.len());
        for (chunk, table) in chunks.iter().zip(schema.tables()) {
            assert!(schema.contains_table(&chunk.table));
            assert!(chunk.text.contains(&table.name));
            for column in &table.columns {
                assert!(chunk.text.contains(column.as_str()));
            }
        }
    }

    #[test]
    fn test_empty_schema_yields_no_chunks() {
        assert!(chunk_schema(&Schema::new()).is_empty());
    }

    #[test]
    fn test_duplicate_columns_are_kept() {
        let mut schema = Schema::new();
        schema.insert_table("t", ["a", "a", "b"]);
        assert_eq!(chunk_schema(&schema)[0].text, "Table: t\nColumns: a, a, b");
    }

    #[test]
    fn test_chunking_is_idempotent() {
        let schema = shop_schema();
        assert_eq!(chunk_schema(&schema), chunk_schema(&schema));
    }
}
