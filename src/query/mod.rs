// src/query/mod.rs

use std::fmt;

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, RosterError};
use crate::schema::{quote_ident, Schema};
use crate::store::Value;

/// Column used for the exact-match lookup.
///
/// Kept to a closed set because it is interpolated as an identifier without
/// going through the live-schema check applied to order-by and projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Name,
    Class,
}

impl FilterColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterColumn::Name => "name",
            FilterColumn::Class => "class",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub filter_column: FilterColumn,
    pub filter_value: String,
    /// Passed straight to SQLite; a negative value means no cap.
    pub limit: i64,
    pub order_by: String,
    pub selected_columns: Vec<String>,
}

/// One projected row. `values[i]` belongs to `columns[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRecord {
    pub values: Vec<Value>,
}

/// Ordered result rows plus the column names they were projected to.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub columns: Vec<String>,
    pub rows: Vec<RosterRecord>,
}

impl QueryOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct QueryEngine<'a> {
    conn: &'a Connection,
    table: String,
}

impl<'a> QueryEngine<'a> {
    pub fn new(conn: &'a Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    /// Live schema of the roster table.
    pub fn schema(&self) -> Result<Schema> {
        Schema::load(self.conn, &self.table)
    }

    /// Validate `req` against the live schema and run the lookup. Rows come back
    /// in descending `order_by` order, at most `limit` of them, projected to
    /// `selected_columns` in the requested order.
    pub fn query(&self, req: &QueryRequest) -> Result<QueryOutcome> {
        let schema = self.schema()?;
        if schema.is_empty() {
            warn!(table = %self.table, "table has no columns; has an import been run?");
        }
        validate(&schema, req)?;

        info!(
            "querying by {}: {}, ordering by {}, limit {}",
            req.filter_column, req.filter_value, req.order_by, req.limit
        );
        let sql = select_sql(&self.table, req);
        debug!(%sql, "select");

        let width = req.selected_columns.len();
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![req.filter_value, req.limit], |row| {
                let values = (0..width)
                    .map(|i| row.get_ref(i).map(Value::from_sql))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(RosterRecord { values })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QueryOutcome {
            columns: req.selected_columns.clone(),
            rows,
        })
    }
}

/// Order-by first, then each projected column; stops at the first unknown name.
fn validate(schema: &Schema, req: &QueryRequest) -> Result<()> {
    if !schema.contains(&req.order_by) {
        return Err(RosterError::validation(&req.order_by, schema.names()));
    }
    if let Some(bad) = req.selected_columns.iter().find(|c| !schema.contains(c)) {
        return Err(RosterError::validation(bad, schema.names()));
    }
    Ok(())
}

/// Identifiers must already be validated; values are bound as `?1` and `?2`.
fn select_sql(table: &str, req: &QueryRequest) -> String {
    let projection: Vec<String> = req.selected_columns.iter().map(|c| quote_ident(c)).collect();
    format!(
        "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {} DESC LIMIT ?2",
        projection.join(", "),
        quote_ident(table),
        quote_ident(req.filter_column.as_str()),
        quote_ident(&req.order_by),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::Importer;
    use crate::store::open_mem_db;

    const EXPORT: &str = "name\tclass\thp_max_total\nBob\tPaladin\t100\nAnn\tCleric\t200\nFoo\tBar\n";

    fn loaded(text: &str) -> Connection {
        let mut conn = open_mem_db().unwrap();
        Importer::new(&mut conn, "characters")
            .import_and_replace(text)
            .unwrap();
        conn
    }

    fn req(col: FilterColumn, value: &str, limit: i64, order_by: &str, cols: &[&str]) -> QueryRequest {
        QueryRequest {
            filter_column: col,
            filter_value: value.to_string(),
            limit,
            order_by: order_by.to_string(),
            selected_columns: cols.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn class_lookup_projects_requested_columns() {
        let conn = loaded(EXPORT);
        let out = QueryEngine::new(&conn, "characters")
            .query(&req(
                FilterColumn::Class,
                "Paladin",
                10,
                "hp_max_total",
                &["name", "hp_max_total"],
            ))
            .unwrap();
        assert_eq!(out.columns, vec!["name", "hp_max_total"]);
        assert_eq!(
            out.rows,
            vec![RosterRecord {
                values: vec![Value::Text("Bob".into()), Value::Integer(100)]
            }]
        );
        assert_eq!(out.rows[0].values[1].to_string(), "100");
    }

    #[test]
    fn unknown_order_by_lists_sorted_columns() {
        let conn = loaded(EXPORT);
        let err = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Name, "Bob", 10, "nonexistent_col", &["name"]))
            .unwrap_err();
        match err {
            RosterError::Validation {
                column,
                valid_columns,
            } => {
                assert_eq!(column, "nonexistent_col");
                assert_eq!(valid_columns, vec!["class", "hp_max_total", "name"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn first_unknown_projected_column_is_reported() {
        let conn = loaded(EXPORT);
        let err = QueryEngine::new(&conn, "characters")
            .query(&req(
                FilterColumn::Name,
                "Bob",
                10,
                "hp_max_total",
                &["name", "bogus", "also_bogus"],
            ))
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation { ref column, .. } if column == "bogus"));
    }

    #[test]
    fn order_by_is_checked_before_projection() {
        let conn = loaded(EXPORT);
        let err = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Name, "Bob", 10, "nope", &["bogus"]))
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation { ref column, .. } if column == "nope"));
    }

    #[test]
    fn sorts_descending_and_applies_limit() {
        let text = "name\tclass\thp_max_total\tac_total\n\
                    A\tPaladin\t300\t1\n\
                    B\tPaladin\t900\t2\n\
                    C\tPaladin\t50\t3\n\
                    D\tCleric\t5000\t4\n\
                    E\tPaladin\t1200\t5\n";
        let conn = loaded(text);
        let out = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Class, "Paladin", 3, "hp_max_total", &["name"]))
            .unwrap();
        let names: Vec<String> = out.rows.iter().map(|r| r.values[0].to_string()).collect();
        assert_eq!(names, vec!["E", "B", "A"]);

        let out = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Class, "Paladin", 10, "ac_total", &["ac_total", "name"]))
            .unwrap();
        let first = &out.rows[0].values;
        assert_eq!(first, &vec![Value::Integer(5), Value::Text("E".into())]);
        assert_eq!(out.rows.len(), 4);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let conn = loaded(EXPORT);
        let out = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Name, "Nobody", 10, "hp_max_total", &["name"]))
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn filter_value_is_bound_not_interpolated() {
        let conn = loaded(EXPORT);
        let out = QueryEngine::new(&conn, "characters")
            .query(&req(
                FilterColumn::Name,
                "x' OR '1'='1",
                10,
                "hp_max_total",
                &["name"],
            ))
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn query_before_import_fails_validation() {
        let conn = open_mem_db().unwrap();
        let err = QueryEngine::new(&conn, "characters")
            .query(&req(FilterColumn::Name, "Bob", 10, "hp_max_total", &["name"]))
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation { ref valid_columns, .. } if valid_columns.is_empty()));
    }

    #[test]
    fn select_text_quotes_every_identifier() {
        let sql = select_sql(
            "characters",
            &req(FilterColumn::Class, "Paladin", 10, "hp_max_total", &["name", "hp_max_total"]),
        );
        assert_eq!(
            sql,
            "SELECT \"name\", \"hp_max_total\" FROM \"characters\" WHERE \"class\" = ?1 ORDER BY \"hp_max_total\" DESC LIMIT ?2"
        );
    }
}
