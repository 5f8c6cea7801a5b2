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

//! Configuration module for the monitor binary

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wattion_core::TariffWindow;
use wattion_core::snapshot::DEFAULT_SNAPSHOT_PATH;

const CONFIG_PATH: &str = "./data/wattion_config.json";

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_60() -> u64 {
    60
}

fn default_10() -> u64 {
    10
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Plug cloud gateway endpoint
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Device identifier at the gateway
    #[serde(default)]
    pub device_id: String,

    /// Static device credential, sent as a bearer token
    #[serde(default)]
    pub api_token: String,

    /// Polling period (seconds)
    #[serde(default = "default_60")]
    pub poll_interval_secs: u64,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_10")]
    pub request_timeout_secs: u64,

    /// Daily peak tariff window
    #[serde(default)]
    pub tariff: TariffWindow,

    /// Where the daily state snapshot lives
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            device_id: String::new(),
            api_token: String::new(),
            poll_interval_secs: 60,
            request_timeout_secs: 10,
            tariff: TariffWindow::default(),
            state_path: default_state_path(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tariff.peak_start_hour <= 23,
            "tariff.peak_start_hour must be 0-23, got {}",
            self.tariff.peak_start_hour
        );
        ensure!(
            self.tariff.peak_end_hour <= 24,
            "tariff.peak_end_hour must be 1-24, got {}",
            self.tariff.peak_end_hour
        );
        ensure!(
            self.tariff.peak_start_hour < self.tariff.peak_end_hour,
            "tariff peak window is empty: [{}, {})",
            self.tariff.peak_start_hour,
            self.tariff.peak_end_hour
        );
        ensure!(
            self.poll_interval_secs > 0,
            "poll_interval_secs must be positive"
        );
        Ok(())
    }
}

/// Load the monitor configuration.
///
/// Path comes from `WATTION_CONFIG` or the default location; a missing
/// file is created with defaults so the operator has a template to fill
/// in.
pub fn load_config() -> Result<MonitorConfig> {
    let path = std::env::var("WATTION_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
    load_from(Path::new(&path))
}

fn load_from(path: &Path) -> Result<MonitorConfig> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?
    } else {
        // Create with defaults
        let config = MonitorConfig::default();
        save_config(&config, path)?;
        config
    };

    config.validate()?;
    Ok(config)
}

fn save_config(config: &MonitorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(config)?;

    // Atomic write
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;

    Ok(())
}
