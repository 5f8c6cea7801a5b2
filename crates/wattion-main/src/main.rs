// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of WattION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! WattION - Smart plug energy monitor
//!
//! Polls the plug cloud gateway for instantaneous power, integrates the
//! readings into daily peak/off-peak kWh totals and keeps them persisted
//! across restarts. `wattion on` / `wattion off` switch the plug relay
//! and exit without touching the energy state.

mod config;
mod display;
mod sampler;

use anyhow::{Result, bail};
use chrono::Local;
use display::ConsoleDisplay;
use sampler::Sampler;
use std::time::Duration;
use tracing::info;
use wattion_cloud::{PlugClient, RelayAction};
use wattion_core::{Accumulator, SnapshotStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut control_action = None;
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                println!("WattION - Smart Plug Energy Monitor");
                println!("Version: {VERSION}");
                println!();
                println!("Usage: wattion [COMMAND]");
                println!();
                println!("Commands:");
                println!("  on      Switch the plug on and exit");
                println!("  off     Switch the plug off and exit");
                println!();
                println!("With no command the monitor loop runs until interrupted.");
                println!();
                println!("Options:");
                println!("  -h, --help    Print this help message");
                println!("  -v, --version Print version");
                return Ok(());
            }
            "--version" | "-v" => {
                println!("{VERSION}");
                return Ok(());
            }
            "on" => control_action = Some(RelayAction::On),
            "off" => control_action = Some(RelayAction::Off),
            other => {
                bail!("Unknown command '{other}', see `wattion --help`");
            }
        }
    }

    // Initialize tracing with env filter support
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wattion=debug".parse()?),
        )
        .init();

    let config = config::load_config()?;
    let client = PlugClient::new(
        &config.api_base_url,
        &config.device_id,
        &config.api_token,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    if let Some(action) = control_action {
        return run_control(&client, action).await;
    }

    run_monitor(&config, client).await
}

/// Send one relay command and report the outcome synchronously.
async fn run_control(client: &PlugClient, action: RelayAction) -> Result<()> {
    match client.set_relay(action).await {
        Ok(true) => {
            println!("Plug switched {action}");
            Ok(())
        }
        Ok(false) => bail!("Gateway declined to switch the plug {action}"),
        Err(e) => Err(e.into()),
    }
}

async fn run_monitor(config: &config::MonitorConfig, client: PlugClient) -> Result<()> {
    info!("Starting WattION v{VERSION}");
    info!("   Gateway: {}", config.api_base_url);
    info!("   Device: {}", config.device_id);
    info!(
        "   Peak window: {:02}:00-{:02}:00",
        config.tariff.peak_start_hour, config.tariff.peak_end_hour
    );
    info!("   Poll interval: {}s", config.poll_interval_secs);
    info!("   Snapshot: {}", config.state_path.display());

    let today = Local::now().date_naive();
    let store = SnapshotStore::new(&config.state_path);
    let accumulator = Accumulator::new(store.load(today), config.tariff);
    let mut sampler = Sampler::new(client, accumulator, store, ConsoleDisplay);

    // First tick fires immediately: one poll at startup, then the fixed
    // cadence.
    let mut poll_interval =
        tokio::time::interval(Duration::from_secs(config.poll_interval_secs));

    let sig = tokio::signal::ctrl_c();
    tokio::pin!(sig);
    loop {
        tokio::select! {
            biased;
            _ = &mut sig => {
                info!("Shutdown signal received");
                sampler.save_snapshot()?;
                info!("Shutting down");
                break;
            }
            _ = poll_interval.tick() => {
                sampler.poll_once().await;
            }
        }
    }

    Ok(())
}
