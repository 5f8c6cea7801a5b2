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

//! Rendering of the derived daily totals.

use tracing::info;
use wattion_core::DayTotals;

/// Sink for rendered totals; the seam that keeps the sampler testable.
pub trait DisplaySink {
    fn render(&mut self, totals: &DayTotals);
}

/// Render the four derived values: energy with 3 decimal places, ratio
/// with 1.
pub fn format_totals(totals: &DayTotals) -> String {
    format!(
        "today {:.3} kWh | peak {:.3} kWh | off-peak {:.3} kWh | {:.1}% off-peak",
        totals.total_kwh, totals.peak_kwh, totals.off_peak_kwh, totals.off_peak_ratio_pct
    )
}

/// Production display: one log line per recorded sample.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn render(&mut self, totals: &DayTotals) {
        info!("⚡ {}", format_totals(totals));
    }
}
