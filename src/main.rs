use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use coach_trainer::commands::Cli;
use coach_trainer::config::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.is_interactive())?;

    // Initialize tokio runtime
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute().await })
}

/// Log to stderr, or to the log file while the dashboard owns the terminal
fn init_logging(verbose: bool, interactive: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if interactive {
        let path = Config::log_file()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }

    Ok(())
}
