use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::args::{Cli, Command};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http;
use crate::logger;
use crate::metrics::RunSummary;
use crate::runner::{RunController, RunParameters};
use crate::server;

/// Binary entry point: parses the CLI, sets up logging, and dispatches to
/// the serve or load-test mode on a fresh multi-thread runtime.
///
/// # Errors
///
/// Returns an error for invalid arguments, a failed server start, or a run
/// that could not be launched.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logger::init_logging(cli.verbose, cli.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match &cli.command {
            Some(Command::Serve(serve_args)) => server::serve(serve_args).await,
            None => run_load_test(&cli).await,
        }
    })
}

async fn run_load_test(cli: &Cli) -> AppResult<()> {
    let url = cli
        .url
        .as_deref()
        .ok_or(AppError::Validation(ValidationError::MissingUrl))?;
    let params = RunParameters::new(
        url,
        cli.payload_size.get(),
        cli.requests.get(),
        cli.workers.get(),
    )
    .map_err(AppError::validation)?;
    let client = http::build_client().map_err(AppError::http)?;

    let total_requests = params.total_requests();
    let controller = Arc::new(RunController::new());
    controller
        .start(client, params)
        .map_err(AppError::validation)?;

    // First ctrl-c winds the run down gracefully; the pool still joins and
    // the summary is still printed.
    {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                controller.request_stop();
            }
        });
    }

    {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if controller.state().is_terminal() {
                    break;
                }
                info!("Progress: {}/{}", controller.completed(), total_requests);
            }
        });
    }

    let summary = controller.wait().await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("=== Test Results ===");
    println!("Successful Requests: {}", summary.successful_requests);
    println!("Failed Requests: {}", summary.failed_requests);
    println!("Total Data Transferred: {:.2} MB", summary.total_mb);
    println!("Total Time: {:.2} seconds", summary.elapsed_secs);
    println!("Average Speed: {:.2} MB/s", summary.avg_mb_per_sec);
    println!(
        "Latency (ms) avg/min/max: {:.2} / {:.2} / {:.2}",
        summary.avg_latency_ms, summary.min_latency_ms, summary.max_latency_ms
    );
    println!(
        "Throughput (KB/s) avg/min/max: {:.2} / {:.2} / {:.2}",
        summary.avg_throughput_kbs, summary.min_throughput_kbs, summary.max_throughput_kbs
    );
}
