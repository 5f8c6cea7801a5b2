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

//! Tariff period classification.
//!
//! A single fixed daily peak window, half-open `[peak_start_hour,
//! peak_end_hour)`. Every other hour is off-peak. An integration interval
//! is attributed wholly to the bucket of its *start* hour; intervals that
//! span the window boundary are not split proportionally.

use serde::{Deserialize, Serialize};

/// The two tariff periods of the daily schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TariffPeriod {
    Peak,
    OffPeak,
}

fn default_peak_start() -> u32 {
    17
}

fn default_peak_end() -> u32 {
    21
}

/// Fixed daily peak window in local clock hours (24h format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffWindow {
    /// First peak hour, inclusive (0-23)
    #[serde(default = "default_peak_start")]
    pub peak_start_hour: u32,

    /// First hour after the peak window, exclusive (1-24)
    #[serde(default = "default_peak_end")]
    pub peak_end_hour: u32,
}

impl Default for TariffWindow {
    fn default() -> Self {
        Self {
            peak_start_hour: default_peak_start(),
            peak_end_hour: default_peak_end(),
        }
    }
}

impl TariffWindow {
    /// Classify a local clock hour.
    pub fn period_of(&self, hour: u32) -> TariffPeriod {
        if hour >= self.peak_start_hour && hour < self.peak_end_hour {
            TariffPeriod::Peak
        } else {
            TariffPeriod::OffPeak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = TariffWindow::default();
        assert_eq!(window.peak_start_hour, 17);
        assert_eq!(window.peak_end_hour, 21);
    }

    #[test]
    fn test_default_window_classification() {
        let window = TariffWindow::default();
        assert_eq!(window.period_of(16), TariffPeriod::OffPeak);
        assert_eq!(window.period_of(17), TariffPeriod::Peak);
        assert_eq!(window.period_of(20), TariffPeriod::Peak);
        // End hour is exclusive
        assert_eq!(window.period_of(21), TariffPeriod::OffPeak);
        assert_eq!(window.period_of(0), TariffPeriod::OffPeak);
        assert_eq!(window.period_of(23), TariffPeriod::OffPeak);
    }

    #[test]
    fn test_custom_window() {
        let window = TariffWindow {
            peak_start_hour: 8,
            peak_end_hour: 12,
        };
        assert_eq!(window.period_of(7), TariffPeriod::OffPeak);
        assert_eq!(window.period_of(8), TariffPeriod::Peak);
        assert_eq!(window.period_of(11), TariffPeriod::Peak);
        assert_eq!(window.period_of(12), TariffPeriod::OffPeak);
    }

    #[test]
    fn test_window_serde_defaults() {
        let window: TariffWindow = serde_json::from_str("{}").unwrap();
        assert_eq!(window, TariffWindow::default());

        let window: TariffWindow =
            serde_json::from_str(r#"{"peak_start_hour": 18}"#).unwrap();
        assert_eq!(window.peak_start_hour, 18);
        assert_eq!(window.peak_end_hour, 21);
    }
}
