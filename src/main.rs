//! sylscraper CLI
//!
//! Canvas syllabus scraper and course report generator. Takes an API access
//! token and an output directory, downloads each course's syllabus
//! documents, and writes a consolidated `output.json` report.

use std::path::{Path, PathBuf};

use clap::Parser;
use sylscraper::{
    models::Config,
    pipeline,
    services::CanvasClient,
    storage::DownloadStore,
    utils::{fs, http},
};

/// sylscraper - Canvas syllabus scraper
#[derive(Parser, Debug)]
#[command(
    name = "sylscraper",
    version,
    about = "Canvas syllabus scraper and course report generator"
)]
struct Cli {
    /// Canvas API access token
    token: String,

    /// Directory for downloaded documents and the final report
    output_dir: PathBuf,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the API base URL from the configuration
    #[arg(long)]
    base_url: Option<String>,

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

/// Main entry point for the CLI application.
///
/// Always exits 0: every failure halts only its own phase, and the worst
/// outcome is an incomplete report.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("sylscraper starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {e}");
    } else {
        run(&cli.token, &cli.output_dir, &config).await;
    }

    log::info!("Done!");
    wait_for_exit(&config);
}

/// Run the scrape-then-report pipeline.
async fn run(token: &str, output_dir: &Path, config: &Config) {
    if token.trim().is_empty() {
        log::error!("You must pass a Canvas API access token as the first argument.");
        return;
    }

    if let Err(e) = fs::ensure_dir(output_dir) {
        log::error!(
            "Could not create output directory {}: {e}",
            output_dir.display()
        );
        return;
    }

    let client = match http::create_client(&config.api) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return;
        }
    };

    let canvas = match CanvasClient::new(client, &config.api, token) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Invalid API base URL: {e}");
            return;
        }
    };

    let store = DownloadStore::new(output_dir);

    let collected = pipeline::run_collection(&canvas, config, &store).await;
    log::info!("Done scraping.");

    if let Err(e) = pipeline::run_report(&canvas, config, &collected, &store).await {
        log::error!("Failed to write report: {e}");
    }
}

/// Block until the operator presses Enter, unless configured off.
fn wait_for_exit(config: &Config) {
    if !config.output.wait_on_exit {
        return;
    }

    log::info!("Press Enter to exit.");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}
