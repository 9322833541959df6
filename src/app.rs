// src/app.rs

use std::io::Write;

use tracing::info;

use crate::cli::{Action, Cli};
use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::fetch::RosterSource;
use crate::render;
use crate::{store, Importer, QueryEngine};

/// Process exit status for a run that reported a usage or validation problem.
pub const EXIT_REPORTED: i32 = 1;

/// Run one invocation, writing user-facing text to `out`. Usage and
/// validation problems are written to `out` and turned into
/// `EXIT_REPORTED`; every other failure is returned.
pub fn execute(cli: &Cli, bare: bool, source: &dyn RosterSource, out: &mut dyn Write) -> Result<i32> {
    let cfg = cli.config()?;
    let action = match cli.action(bare) {
        Ok(a) => a,
        Err(RosterError::Usage(msg)) => {
            writeln!(out, "ERROR: {}", msg)?;
            return Ok(EXIT_REPORTED);
        }
        Err(e) => return Err(e),
    };

    match action {
        Action::Import => import(&cfg, source, out),
        Action::ListColumns => {
            let conn = store::open_disk_db(&cfg.db_path)?;
            let schema = QueryEngine::new(&conn, cfg.table.as_str()).schema()?;
            writeln!(out, "{}", render::render_schema(&schema))?;
            Ok(0)
        }
        Action::Query(req) => {
            let conn = store::open_disk_db(&cfg.db_path)?;
            match QueryEngine::new(&conn, cfg.table.as_str()).query(&req) {
                Ok(outcome) => {
                    writeln!(out, "{}", render::render_outcome(&outcome, cli.format))?;
                    Ok(0)
                }
                Err(RosterError::Validation {
                    column,
                    valid_columns,
                }) => {
                    write_invalid_column(out, &column, &valid_columns)?;
                    Ok(EXIT_REPORTED)
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Download first; the database file is only opened once the export is in hand.
fn import(cfg: &Config, source: &dyn RosterSource, out: &mut dyn Write) -> Result<i32> {
    writeln!(out, "Downloading and importing character data...")?;
    info!(source = %source.describe(), "downloading roster export");
    let text = source.fetch_text()?;

    let mut conn = store::open_disk_db(&cfg.db_path)?;
    let rows = Importer::new(&mut conn, cfg.table.as_str()).import_and_replace(&text)?;
    writeln!(out, "Data import complete.")?;
    info!(rows, db = %cfg.db_path.display(), "import finished");
    Ok(0)
}

fn write_invalid_column(out: &mut dyn Write, column: &str, valid_columns: &[String]) -> Result<()> {
    writeln!(out, "\nERROR: '{}' is not a valid column name.", column)?;
    writeln!(out, "Available columns:\n")?;
    writeln!(out, "{}", render::render_valid_columns(valid_columns))?;
    Ok(())
}
