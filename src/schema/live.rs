// src/schema/live.rs

use rusqlite::Connection;
use tracing::debug;

use super::{Column, FieldType, Schema};
use crate::error::Result;

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl Schema {
    /// Read the schema of `table` as it exists in the database right now.
    /// A table that does not exist yields an empty schema.
    pub fn load(conn: &Connection, table: &str) -> Result<Self> {
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        debug!(%sql, "reading live schema");
        let mut stmt = conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let decl: String = row.get(2)?;
                Ok(Column {
                    name,
                    ty: FieldType::from_declared(&decl),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Schema { columns })
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this descriptor.
    pub fn create_table_sql(&self, table: &str) -> String {
        let cols: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.ty))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(table),
            cols.join(", ")
        )
    }
}
