// src/schema/types.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared SQLite type of a roster column.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Text,
    Integer,
}

impl FieldType {
    pub fn as_sql(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Integer => "INTEGER",
        }
    }

    /// Map a declared type from `PRAGMA table_info` back; anything that is not
    /// TEXT is treated as INTEGER, matching the import policy.
    pub fn from_declared(decl: &str) -> Self {
        if decl.eq_ignore_ascii_case("TEXT") {
            FieldType::Text
        } else {
            FieldType::Integer
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single column of the roster table.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct Column {
    pub name: String,
    pub ty: FieldType,
}

/// Ordered (name, type) list that governs both table creation and query validation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Column names sorted ascending, the shape reported by validation errors.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names = self.names();
        names.sort();
        names
    }
}
