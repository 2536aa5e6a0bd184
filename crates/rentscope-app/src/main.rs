use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use rentscope_client::ApiClient;
use rentscope_types::AppEvent;
use tokio::io::BufReader;
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod status;
pub mod ui;

use self::controller::AppController;
use self::state::AppState;

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod command_tests;
#[cfg(test)]
#[path = "tests/event_loop_tests.rs"]
mod event_loop_tests;

/// Terminal front end for the rental price predictor and listing search
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON profile; env defaults are used when it does not exist
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Write the effective config to `--config` and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(cli));

    // Stdin is read on a blocking thread that only wakes on the next line
    runtime.shutdown_timeout(Duration::from_millis(250));
    result
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = profile::load_config(&cli.config)?;

    if cli.write_config {
        return profile::write_config(&cli.config, &config);
    }

    tracing::info!(
        predict = %config.network.predict_url(),
        crawl = %config.network.crawl_url,
        "Starting"
    );

    let client = ApiClient::reqwest();
    if config.check_health_on_start {
        check_health(&client, &config.network.health_url()).await;
    }

    let view = ui::stdout_view(&config.ui);
    let state = Arc::new(AppState::new(config, client, view));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(BufReader::new(tokio::io::stdin()));
    eprintln!("{}", io::HELP);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.events().send(AppEvent::Shutdown).await?;
        }
        Some(result) = tasks.join_next() => log_task(result),
    }

    // Stop reading input; the event loop settles pending requests on its own
    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task(result);
    }

    Ok(())
}

async fn check_health(client: &ApiClient, url: &str) {
    match client.health(url).await {
        Ok(true) => tracing::info!(url, "Predict service is up"),
        Ok(false) => tracing::warn!(url, "Predict service answered but is not healthy"),
        Err(e) => tracing::warn!(url, "Predict service unreachable: {e}"),
    }
}

fn log_task(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("task exited"),
        Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
