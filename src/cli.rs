//! Command-line surface for the roster tool.
//!
//! With no arguments at all the tool imports. `--refresh-data` imports even if
//! query flags are present, conflicting ones included. Otherwise exactly one of
//! `--name`/`--class` is required; an empty value counts as absent.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config};
use crate::error::{Result, RosterError};
use crate::query::{FilterColumn, QueryRequest};
use crate::render::OutputFormat;

const AFTER_HELP: &str = "\
Examples:
  takp-roster                                       # Download and import data (default)
  takp-roster --refresh-data                        # Same as default: download and import data
  takp-roster --class paladin                       # Query top 10 Paladins by default columns
  takp-roster --name Sirblade --columns name,class,guild_name";

#[derive(Parser, Debug, Clone)]
#[command(name = "takp-roster")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TAKP character importer and query tool")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Query top characters by class name (e.g., Paladin)
    #[arg(long = "class", value_name = "CLASS")]
    pub class: Option<String>,

    /// Query a specific character by exact name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of results to return
    #[arg(long, default_value_t = config::DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Column name to sort results by (descending)
    #[arg(long, default_value = config::DEFAULT_ORDER_BY)]
    pub order_by: String,

    /// Comma-separated list of columns to include in output.
    /// Default: name, last_name, guild_name, hp_max_total, mana_max_total,
    /// ac_total, hp_regen_item, mana_regen_item
    #[arg(long)]
    pub columns: Option<String>,

    /// Download and import the latest character data (default action if no flags are used)
    #[arg(long)]
    pub refresh_data: bool,

    /// Print the columns of the imported table and exit
    #[arg(long)]
    pub list_columns: bool,

    /// How query results are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Grid)]
    pub format: OutputFormat,

    /// Roster export URL
    #[arg(long, env = "TAKP_ROSTER_URL", default_value = config::DEFAULT_SOURCE_URL)]
    pub url: String,

    /// SQLite database file
    #[arg(long, env = "TAKP_ROSTER_DB", default_value = config::DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Give up on the download after this many seconds (default: wait forever)
    #[arg(long, env = "TAKP_ROSTER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Import,
    ListColumns,
    Query(QueryRequest),
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        Config::new(&self.url, &self.db, self.timeout_secs)
    }

    /// Decide the action. `bare` is true when the process got no arguments.
    pub fn action(&self, bare: bool) -> Result<Action> {
        if bare || self.refresh_data {
            return Ok(Action::Import);
        }
        if self.list_columns {
            return Ok(Action::ListColumns);
        }

        let name = self.name.as_deref().filter(|v| !v.is_empty());
        let class = self.class.as_deref().filter(|v| !v.is_empty());
        let (filter_column, filter_value) = match (name, class) {
            (Some(_), Some(_)) => {
                return Err(RosterError::Usage(
                    "--name and --class cannot be used together. Please choose one.".into(),
                ))
            }
            (Some(name), None) => (FilterColumn::Name, name.to_string()),
            (None, Some(class)) => (FilterColumn::Class, capitalize(class)),
            (None, None) => {
                return Err(RosterError::Usage(
                    "No valid query specified. Use --class or --name.".into(),
                ))
            }
        };

        Ok(Action::Query(QueryRequest {
            filter_column,
            filter_value,
            limit: self.limit,
            order_by: self.order_by.clone(),
            selected_columns: self.selected_columns(),
        }))
    }

    /// Parsed `--columns`, or the default projection.
    pub fn selected_columns(&self) -> Vec<String> {
        let picked: Vec<String> = self
            .columns
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if picked.is_empty() {
            config::default_columns()
        } else {
            picked
        }
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
