//! Sitemap Extractor CLI
//!
//! Prints every page URL advertised by a site's sitemaps, sorted, one per line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use sitemap_extractor::{error::AppError, error::Result, models::Config, pipeline};

/// sitemap - Recursive Sitemap URL Extractor
#[derive(Parser, Debug)]
#[command(
    name = "sitemap",
    version,
    about = "Extract all page URLs from a sitemap or sitemap index"
)]
struct Cli {
    /// Root sitemap URL (sitemap index or URL set, optionally gzipped)
    url: Option<String>,

    /// Output file path. If not specified, URLs are printed to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the configuration file if one was given, defaults otherwise.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.exists() {
        return Err(AppError::config(format!(
            "Config file not found at {}",
            path.display()
        )));
    }

    let config = Config::load_validated(path)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(url) = cli.url else {
        println!("{}", Cli::command().render_usage());
        return Ok(ExitCode::FAILURE);
    };

    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let count = pipeline::run_extractor(&config, &url, cli.output.as_deref()).await?;

    log::debug!("Wrote {} URLs", count);

    Ok(ExitCode::SUCCESS)
}
