//! rollcall CLI binary.

use clap::Parser;
use rollcall::{ObservabilityConfig, Settings, init_observability};
use rollcall_core::Aggregator;
use rollcall_sheets::SheetsDispatcher;
use rollcall_social::{RollcallBot, ShutdownHandle};
use tracing::{error, info, warn};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::CheckConfig => check_config(&settings),
        Commands::Run => run(settings).await,
    }
}

fn check_config(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", settings.redacted()?);
    for warning in settings.warnings() {
        println!("warning: {warning}");
    }
    settings.validate()?;
    println!("configuration ok");
    Ok(())
}

async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    settings.validate()?;
    for warning in settings.warnings() {
        warn!("{warning}");
    }

    let aggregate_settings = settings.aggregate_settings()?;
    let dispatcher = SheetsDispatcher::new(settings.spreadsheet_api_url().as_str())
        .with_response_logging(*settings.debug_spreadsheet());
    if dispatcher.is_enabled() {
        info!("Spreadsheet export enabled (Server Members intent must be enabled in the Developer Portal)");
    } else {
        info!("Spreadsheet export disabled");
    }

    let aggregator = Aggregator::new(aggregate_settings, dispatcher);
    let mut bot = RollcallBot::new(
        settings.discord_token(),
        aggregator,
        settings.announcements(),
        settings.roster_export(),
    )
    .await?;

    tokio::spawn(shutdown_on_signal(bot.shutdown_handle()));

    bot.start().await?;
    info!("Bot stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: ShutdownHandle) {
    let signal = wait_for_signal().await;
    info!(signal, "Signal received, shutting down");
    handle.shutdown().await;
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            error!(error = %e, "Could not listen for SIGTERM");
            return ctrl_c().await;
        }
    };
    tokio::select! {
        name = ctrl_c() => name,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Could not listen for SIGINT");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
