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

//! The polling side of the monitor.
//!
//! Owns the cloud client, the accumulator and its snapshot store, and the
//! display sink. Each cycle fetches one power reading and feeds it to the
//! accumulator; persistence and rendering happen synchronously in the same
//! cycle, so state, snapshot and display agree at the end of every poll.

use crate::display::DisplaySink;
use chrono::{Local, NaiveDateTime};
use tracing::warn;
use wattion_cloud::PlugClient;
use wattion_core::{Accumulator, SnapshotStore};

pub struct Sampler<D: DisplaySink> {
    client: PlugClient,
    accumulator: Accumulator,
    store: SnapshotStore,
    display: D,
}

impl<D: DisplaySink> Sampler<D> {
    pub fn new(
        client: PlugClient,
        accumulator: Accumulator,
        store: SnapshotStore,
        display: D,
    ) -> Self {
        Self {
            client,
            accumulator,
            store,
            display,
        }
    }

    /// Run one poll cycle.
    ///
    /// On any fetch error the cycle is skipped: nothing is recorded,
    /// nothing is persisted, and the next scheduled poll proceeds
    /// unaffected.
    pub async fn poll_once(&mut self) {
        match self.client.fetch_power().await {
            Ok(power_w) => self.apply_sample(power_w, Local::now().naive_local()),
            Err(e) => warn!("Poll failed, skipping sample: {e}"),
        }
    }

    /// Record a sample, persist the snapshot, render the totals.
    ///
    /// A snapshot save failure degrades to in-memory operation: it is
    /// logged and the cycle continues.
    fn apply_sample(&mut self, power_w: f64, now: NaiveDateTime) {
        let totals = self.accumulator.record_sample(power_w, now);

        if let Err(e) = self.store.save(self.accumulator.state()) {
            warn!("Failed to save snapshot: {e}; continuing with in-memory state");
        }

        self.display.render(&totals);
    }

    /// Persist the current state, used on shutdown.
    pub fn save_snapshot(&self) -> wattion_core::Result<()> {
        self.store.save(self.accumulator.state())
    }
}

impl<D: DisplaySink> std::fmt::Debug for Sampler<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("store", &self.store)
            .field("state", self.accumulator.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ConsoleDisplay;
    use chrono::NaiveDate;
    use mockito::Server;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;
    use wattion_core::{DayState, DayTotals, TariffWindow};

    #[derive(Default)]
    struct RecordingDisplay {
        rendered: Vec<DayTotals>,
    }

    impl DisplaySink for RecordingDisplay {
        fn render(&mut self, totals: &DayTotals) {
            self.rendered.push(*totals);
        }
    }

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn sampler_in(dir: &TempDir, base_url: &str) -> Sampler<RecordingDisplay> {
        let client =
            PlugClient::new(base_url, "plug-1", "test_token", Duration::from_secs(10)).unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        let accumulator = Accumulator::new(
            DayState::fresh(at(0, 0).date()),
            TariffWindow::default(),
        );
        Sampler::new(client, accumulator, store, RecordingDisplay::default())
    }

    #[test]
    fn test_apply_sample_persists_and_renders() {
        let dir = TempDir::new().unwrap();
        let mut sampler = sampler_in(&dir, "http://localhost:1");

        sampler.apply_sample(1000.0, at(17, 0));
        sampler.apply_sample(500.0, at(17, 30));

        assert_eq!(sampler.display.rendered.len(), 2);
        let last = sampler.display.rendered.last().unwrap();
        assert!((last.peak_kwh - 0.5).abs() < 1e-9);

        // The snapshot on disk matches the in-memory state.
        let loaded = sampler.store.load(at(0, 0).date());
        assert_eq!(&loaded, sampler.accumulator.state());
    }

    #[tokio::test]
    async fn test_poll_once_records_fetched_power() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/devices/plug-1/status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"meters": [{"power": 250.0}]}).to_string())
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let mut sampler = sampler_in(&dir, &server.url());

        sampler.poll_once().await;

        // First sample of the day: bookkeeping only, but still rendered
        // and persisted.
        assert_eq!(sampler.display.rendered.len(), 1);
        assert_eq!(sampler.accumulator.state().last_power_w, 250.0);
        assert!(dir.path().join("state.json").exists());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_poll_once_skips_cycle_on_fetch_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/devices/plug-1/status")
            .with_status(502)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let mut sampler = sampler_in(&dir, &server.url());

        sampler.poll_once().await;

        // No state mutation, no snapshot, no render.
        assert!(sampler.display.rendered.is_empty());
        assert!(sampler.accumulator.state().last_sample_at.is_none());
        assert!(!dir.path().join("state.json").exists());
        mock.assert_async().await;
    }

    #[test]
    fn test_save_snapshot_on_shutdown() {
        let dir = TempDir::new().unwrap();
        let client = PlugClient::new(
            "http://localhost:1",
            "plug-1",
            "t",
            Duration::from_secs(10),
        )
        .unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        let accumulator = Accumulator::new(
            DayState::fresh(at(0, 0).date()),
            TariffWindow::default(),
        );
        let sampler = Sampler::new(client, accumulator, store, ConsoleDisplay);

        sampler.save_snapshot().unwrap();
        assert!(dir.path().join("state.json").exists());
    }
}
