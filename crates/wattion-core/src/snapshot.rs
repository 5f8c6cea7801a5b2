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

//! Snapshot persistence for the accumulator state.
//!
//! A single JSON file holding the serialized [`DayState`], read once at
//! startup and rewritten after every recorded sample. Loading never fails:
//! a missing, unreadable, malformed or stale (wrong-day) snapshot falls
//! back to a fresh zeroed state.

use crate::error::Result;
use crate::state::DayState;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default path for the daily state snapshot.
/// Relative path so it works in both dev and container deployments.
pub const DEFAULT_SNAPSHOT_PATH: &str = "./data/wattion_state.json";

/// Snapshot persistence manager.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshot_path: PathBuf,
}

impl SnapshotStore {
    /// Create a new store with the given path.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Create a store using the default production path.
    pub fn default_production() -> Self {
        Self::new(DEFAULT_SNAPSHOT_PATH)
    }

    /// Get the path being used for persistence.
    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Load the snapshot for `today`.
    ///
    /// A snapshot from a different day is discarded so stale totals are
    /// never carried into a new day on restart. Any read or parse failure
    /// is logged and treated as an absent snapshot.
    pub fn load(&self, today: NaiveDate) -> DayState {
        if !self.snapshot_path.exists() {
            info!(
                "No snapshot at {}, starting fresh for {}",
                self.snapshot_path.display(),
                today
            );
            return DayState::fresh(today);
        }

        let contents = match fs::read_to_string(&self.snapshot_path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "Failed to read snapshot from {}: {e}; starting fresh",
                    self.snapshot_path.display()
                );
                return DayState::fresh(today);
            }
        };

        let state: DayState = match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "Failed to parse snapshot from {}: {e}; starting fresh",
                    self.snapshot_path.display()
                );
                return DayState::fresh(today);
            }
        };

        if state.day != today {
            info!(
                "Snapshot is for {}, today is {}: discarding stale totals",
                state.day, today
            );
            return DayState::fresh(today);
        }

        info!(
            "Restored snapshot for {}: {:.3} kWh peak, {:.3} kWh off-peak",
            state.day, state.peak_kwh, state.off_peak_kwh
        );
        state
    }

    /// Save the snapshot to disk.
    ///
    /// Uses atomic write (temp file + rename) to prevent corruption.
    pub fn save(&self, state: &DayState) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(state)?;

        let temp_path = self.snapshot_path.with_extension("tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.snapshot_path)?;

        Ok(())
    }
}
