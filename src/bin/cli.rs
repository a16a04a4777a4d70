//! ketep-watch CLI
//!
//! Single-pass execution entry point: one fetch-filter-notify cycle,
//! then exit. Recurring schedules (cron, CI) invoke this binary.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use ketep_watch::{
    models::Config,
    pipeline,
    services::{BoardFetcher, SlackNotifier},
    storage::StateStore,
    utils::http,
};

/// ketep-watch - KETEP announcement board watcher
#[derive(Parser, Debug)]
#[command(
    name = "ketep-watch",
    version,
    about = "Posts new same-day KETEP notices to a Slack webhook"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Override the notification state file path
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Fetch and filter but skip delivery and the state commit
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

/// Main entry point.
///
/// Always exits normally: every failure mode inside the pass is logged
/// and absorbed, and the next scheduled invocation is the retry.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("ketep-watch starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.state_file {
        config.state.path = path.display().to_string();
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return;
    }

    let webhook_url = match std::env::var(&config.notify.webhook_env) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            log::warn!(
                "{} is not set; notifications will be skipped",
                config.notify.webhook_env
            );
            None
        }
    };

    let client = match http::create_client(&config.http) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let notifier = SlackNotifier::new(&config.notify, webhook_url, &config.board.url);
    let store = StateStore::new(&config.state.path);
    let config = Arc::new(config);
    let fetcher = BoardFetcher::new(Arc::clone(&config), client);

    let today = Local::now().date_naive();
    pipeline::run_once(&fetcher, &notifier, &store, today, cli.dry_run).await;

    log::info!("Done!");
}
