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

//! Persisted accumulator state for one calendar day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The only persisted entity: daily energy totals plus the bookkeeping
/// needed to integrate the next sample.
///
/// All fields pertain to exactly one local calendar day; `day` is the
/// authoritative partition key. Timestamps are local wall-clock values,
/// captured by the caller (`Local::now().naive_local()`), never by this
/// crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayState {
    /// Local calendar date the totals apply to
    pub day: NaiveDate,

    /// Local instant of the last sample, `None` until the first sample of
    /// the day
    pub last_sample_at: Option<NaiveDateTime>,

    /// Most recent power reading (watts)
    pub last_power_w: f64,

    /// Energy consumed during peak hours today (kWh)
    pub peak_kwh: f64,

    /// Energy consumed during off-peak hours today (kWh)
    pub off_peak_kwh: f64,
}

impl DayState {
    /// Fresh zeroed state for the given day.
    pub fn fresh(day: NaiveDate) -> Self {
        Self {
            day,
            last_sample_at: None,
            last_power_w: 0.0,
            peak_kwh: 0.0,
            off_peak_kwh: 0.0,
        }
    }

    pub fn total_kwh(&self) -> f64 {
        self.peak_kwh + self.off_peak_kwh
    }

    /// Share of today's energy consumed off-peak, in percent.
    ///
    /// Defined as 0 when nothing has been accumulated yet; a policy choice
    /// that keeps the metric renderable before the first full interval.
    pub fn off_peak_ratio_pct(&self) -> f64 {
        let total = self.total_kwh();
        if total == 0.0 {
            0.0
        } else {
            self.off_peak_kwh / total * 100.0
        }
    }
}
