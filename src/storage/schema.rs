//! Introspection queries

/// (table, column) rows for every user table and view, in creation order and
/// column order. `sqlite_`-prefixed internal tables are skipped.
pub const SELECT_TABLE_COLUMNS: &str = r#"
SELECT m.name AS table_name, p.name AS column_name
FROM sqlite_master AS m
JOIN pragma_table_info(m.name) AS p
WHERE m.type IN ('table', 'view')
  AND m.name NOT LIKE 'sqlite_%'
ORDER BY m.rowid, p.cid
"#;
