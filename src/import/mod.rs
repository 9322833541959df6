// src/import/mod.rs

use csv::{ReaderBuilder, StringRecord};
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info, instrument};

use crate::error::{Result, RosterError};
use crate::fetch::RosterSource;
use crate::schema::{quote_ident, Schema};

/// Rows written by one import.
pub type RowCount = usize;

/// Full-refresh loader: every run recreates the table if needed, clears it, and
/// reloads it from the export header + records.
pub struct Importer<'a> {
    conn: &'a mut Connection,
    table: String,
}

impl<'a> Importer<'a> {
    pub fn new(conn: &'a mut Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    /// Fetch from `source`, then replace the table contents. A failed fetch
    /// leaves storage untouched.
    #[instrument(level = "info", skip_all, fields(table = %self.table))]
    pub fn run(&mut self, source: &dyn RosterSource) -> Result<RowCount> {
        info!(source = %source.describe(), "downloading roster export");
        let text = source.fetch_text()?;
        self.import_and_replace(&text)
    }

    /// Parse `source_text`, derive the schema from its header and replace every
    /// row of the table. Records whose field count differs from the header's are
    /// dropped.
    ///
    /// Create, delete and inserts share one SQLite transaction, so a failure
    /// part way through keeps the previous contents.
    pub fn import_and_replace(&mut self, source_text: &str) -> Result<RowCount> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(source_text.as_bytes());

        let mut records = rdr.records();
        let header = match records.next() {
            Some(rec) => rec.map_err(|e| RosterError::MalformedExport(e.to_string()))?,
            None => {
                return Err(RosterError::MalformedExport(
                    "export has no header line".into(),
                ))
            }
        };
        let schema = Schema::from_header(header.iter());
        let width = schema.len();

        let tx = self.conn.transaction()?;
        tx.execute_batch(&schema.create_table_sql(&self.table))?;

        info!("clearing existing data from the {} table", self.table);
        tx.execute(&format!("DELETE FROM {}", quote_ident(&self.table)), [])?;

        let placeholders = vec!["?"; width].join(", ");
        let insert_sql = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(&self.table),
            placeholders
        );
        debug!(sql = %insert_sql, "prepared insert");

        let mut inserted: RowCount = 0;
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for (line, rec) in records.enumerate() {
                let rec: StringRecord =
                    rec.map_err(|e| RosterError::MalformedExport(e.to_string()))?;
                if rec.len() != width {
                    debug!(
                        record = line + 2,
                        fields = rec.len(),
                        expected = width,
                        "skipping record with mismatched field count"
                    );
                    continue;
                }
                stmt.execute(params_from_iter(rec.iter()))?;
                inserted += 1;
            }
        }
        tx.commit()?;

        info!(rows = inserted, "data import complete");
        Ok(inserted)
    }
}
