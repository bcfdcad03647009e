//! Céu Azul CLI
//!
//! Device-side client: keeps a user id, polls the backend for alerts and
//! searches city forecasts.

#![allow(clippy::print_stdout)]

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{CitySearchService, SyncService};
use clap::Parser;
use infrastructure::{
    AppConfig, DatabaseConfig, HttpWeatherBackend, SqliteDeviceState, TracingNotifier,
    create_pool, init_logging,
};
use presentation_cli::cli::log_filter_from_verbosity;
use presentation_cli::render::{
    NO_OFFLINE_DATA, OFFLINE_BANNER, render_forecast, render_notification, render_outcome,
};
use presentation_cli::{Cli, Commands, spawn_background_sync, spawn_foreground_sync};
use tracing::info;

/// How often delivered notifications are printed while syncing
const NOTIFICATION_POLL: Duration = Duration::from_secs(1);

fn print_notifications(notifier: &TracingNotifier) {
    for notification in notifier.drain() {
        println!("\n{}\n", render_notification(&notification));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config.client.backend_url = url;
    }
    if let Some(path) = cli.device_db {
        config.client.device_db_path = path;
    }

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging).context("failed to initialize logging")?;

    let pool = create_pool(&DatabaseConfig::at_path(&config.client.device_db_path))
        .context("failed to open device storage")?;
    let device = Arc::new(SqliteDeviceState::new(Arc::new(pool)));
    let backend = Arc::new(
        HttpWeatherBackend::new(&config.client.backend_url, config.client.request_timeout())
            .context("invalid backend URL")?,
    );
    let notifier = Arc::new(TracingNotifier::new());

    let sync = Arc::new(SyncService::new(
        backend.clone(),
        device.clone(),
        notifier.clone(),
        config.client.sync_config(),
    ));
    let search = CitySearchService::new(backend, device);

    let user_id = sync
        .ensure_user_id()
        .await
        .context("failed to read the device user id")?;
    info!(user_id = %user_id, backend = %config.client.backend_url, "Client ready");

    match cli.command {
        Commands::Sync => {
            println!("🔄 Sincronizando com {}", config.client.backend_url);
            println!("   Pressione Ctrl+C para sair.");

            let foreground =
                spawn_foreground_sync(sync.clone(), config.client.foreground_interval());
            let background =
                spawn_background_sync(sync.clone(), config.client.background_interval());

            let mut poll = tokio::time::interval(NOTIFICATION_POLL);
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = poll.tick() => print_notifications(&notifier),
                }
            }

            foreground.abort();
            background.abort();
            print_notifications(&notifier);
            info!("Sync stopped");
        },

        Commands::SyncOnce => {
            let outcome = sync.send_request().await;
            print_notifications(&notifier);
            println!("{}", render_outcome(&outcome));
        },

        Commands::Search { city, day, entries } => match search.search(&city).await {
            Ok(snapshot) => {
                println!("✅ Cidade encontrada: {}", snapshot.city.name);
                println!();
                print!("{}", render_forecast(&snapshot, day, entries));
            },
            Err(e) => {
                println!("❌ {e}");
                return Ok(ExitCode::FAILURE);
            },
        },

        Commands::Offline { day, entries } => {
            match search
                .load_offline()
                .await
                .context("failed to read device storage")?
            {
                Some(snapshot) => {
                    println!("{OFFLINE_BANNER}");
                    println!();
                    print!("{}", render_forecast(&snapshot, day, entries));
                },
                None => {
                    println!("{NO_OFFLINE_DATA}");
                    return Ok(ExitCode::FAILURE);
                },
            }
        },

        Commands::Whoami => {
            println!("{user_id}");
        },
    }

    Ok(ExitCode::SUCCESS)
}
