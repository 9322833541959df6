pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod import;
pub mod query;
pub mod render;
pub mod schema;
pub mod store;

pub use error::{Result, RosterError};
pub use import::{Importer, RowCount};
pub use query::{FilterColumn, QueryEngine, QueryOutcome, QueryRequest, RosterRecord};
pub use schema::{Column, FieldType, Schema};
