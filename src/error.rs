// src/error.rs

use thiserror::Error;

/// Every way an import or a query can fail.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Transport failure or a non-2xx response from the export endpoint.
    #[error("fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Create, delete, insert or select failed inside SQLite.
    #[error("storage: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An order-by or projected column is not part of the live schema.
    #[error("'{column}' is not a valid column name")]
    Validation {
        column: String,
        /// Sorted ascending.
        valid_columns: Vec<String>,
    },

    /// Conflicting or missing command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// Writing a report to the terminal failed.
    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),

    /// The export body has no header line, or its framing could not be read.
    #[error("malformed roster export: {0}")]
    MalformedExport(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    pub(crate) fn validation(column: &str, mut valid_columns: Vec<String>) -> Self {
        valid_columns.sort();
        RosterError::Validation {
            column: column.to_string(),
            valid_columns,
        }
    }
}
