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

//! The energy-integration state machine.
//!
//! Consumes `(power, timestamp)` samples and maintains cumulative daily
//! peak/off-peak kWh totals using zero-order-hold integration: the
//! *previous* power reading is held constant over the elapsed interval,
//! so the new reading never contributes to the interval that just ended.

use crate::state::DayState;
use crate::tariff::{TariffPeriod, TariffWindow};
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info};

/// Derived per-day totals handed to persistence and the display after
/// every recorded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTotals {
    pub total_kwh: f64,
    pub peak_kwh: f64,
    pub off_peak_kwh: f64,
    pub off_peak_ratio_pct: f64,
}

/// Owns the [`DayState`] and applies incoming samples to it.
///
/// Persistence and display are explicit caller-side effects; this type
/// never touches the filesystem or the clock.
#[derive(Debug)]
pub struct Accumulator {
    state: DayState,
    window: TariffWindow,
}

impl Accumulator {
    pub fn new(state: DayState, window: TariffWindow) -> Self {
        Self { state, window }
    }

    pub fn state(&self) -> &DayState {
        &self.state
    }

    pub fn totals(&self) -> DayTotals {
        DayTotals {
            total_kwh: self.state.total_kwh(),
            peak_kwh: self.state.peak_kwh,
            off_peak_kwh: self.state.off_peak_kwh,
            off_peak_ratio_pct: self.state.off_peak_ratio_pct(),
        }
    }

    /// Record one power sample taken at local wall-clock time `now`.
    ///
    /// Readings are recorded as reported; the reading itself is not
    /// validated or clamped. Elapsed time, however, is clamped to zero so
    /// clock skew or duplicate samples can never decrease the totals.
    pub fn record_sample(&mut self, power_w: f64, now: NaiveDateTime) -> DayTotals {
        let today = now.date();

        // Day rollover: zero the totals and forget the last timestamp, but
        // keep the carried-forward power so the new day starts integrating
        // from the next sample.
        if self.state.day != today {
            info!(
                "Day rollover {} -> {}: resetting daily totals",
                self.state.day, today
            );
            self.state.peak_kwh = 0.0;
            self.state.off_peak_kwh = 0.0;
            self.state.last_sample_at = None;
            self.state.day = today;
        }

        if let Some(prev) = self.state.last_sample_at {
            let elapsed_ms = (now - prev).num_milliseconds().max(0);
            let elapsed_h = elapsed_ms as f64 / 3_600_000.0;
            let delta_kwh = self.state.last_power_w * elapsed_h / 1000.0;

            // The whole interval is attributed to its start hour's bucket,
            // even when it spans the tariff boundary.
            let period = self.window.period_of(prev.hour());
            match period {
                TariffPeriod::Peak => self.state.peak_kwh += delta_kwh,
                TariffPeriod::OffPeak => self.state.off_peak_kwh += delta_kwh,
            }

            debug!(
                "Sample {:.1}W at {}: +{:.6} kWh ({:?}, held {:.1}W over {:.4}h)",
                power_w, now, delta_kwh, period, self.state.last_power_w, elapsed_h
            );
        } else {
            debug!("Sample {:.1}W at {}: first of the day, no integration", power_w, now);
        }

        self.state.last_sample_at = Some(now);
        self.state.last_power_w = power_w;

        self.totals()
    }
}
