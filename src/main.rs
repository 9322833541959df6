use anyhow::Result;
use clap::Parser;
use takp_roster::{app, cli::Cli, fetch::HttpSource};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let bare = std::env::args_os().len() <= 1;
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let fallback = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config + source ─────────────────────────────────
    let cfg = cli.config()?;
    let source = HttpSource::new(cfg.source_url.clone(), cfg.timeout)?;

    // ─── 3) run import / listing / query ────────────────────────────
    let stdout = std::io::stdout();
    let code = app::execute(&cli, bare, &source, &mut stdout.lock())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
