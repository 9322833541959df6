// src/config.rs

use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::error::{Result, RosterError};

/// Tab-separated character export published by the TAKP magelo site.
pub const DEFAULT_SOURCE_URL: &str = "https://www.takproject.net/magelo/export/TAKP_character.txt";
pub const DEFAULT_DB_PATH: &str = "takp_characters.db";
pub const TABLE_NAME: &str = "characters";

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_ORDER_BY: &str = "hp_max_total";

/// Projection used when `--columns` is absent.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "name",
    "last_name",
    "guild_name",
    "hp_max_total",
    "mana_max_total",
    "ac_total",
    "hp_regen_item",
    "mana_regen_item",
];

pub fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Resolved runtime settings shared by import and query.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: Url,
    pub db_path: PathBuf,
    pub table: String,
    /// `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(source_url: &str, db_path: impl Into<PathBuf>, timeout_secs: Option<u64>) -> Result<Self> {
        let source_url = Url::parse(source_url)
            .map_err(|e| RosterError::Usage(format!("invalid --url {:?}: {}", source_url, e)))?;
        Ok(Self {
            source_url,
            db_path: db_path.into(),
            table: TABLE_NAME.to_string(),
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should parse"),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table: TABLE_NAME.to_string(),
            timeout: None,
        }
    }
}
