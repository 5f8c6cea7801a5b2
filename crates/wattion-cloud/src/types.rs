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

//! Wire types for the plug cloud REST API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device status payload from `GET /api/v1/devices/{id}/status`.
///
/// Every field is optional on the wire; a plug that has not reported yet
/// returns an empty meter list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlugStatus {
    /// Metering channels of the device; single-socket plugs report one.
    #[serde(default)]
    pub meters: Vec<MeterReading>,

    /// Current relay state as reported by the cloud ("on"/"off")
    #[serde(default)]
    pub relay: Option<String>,

    #[serde(default)]
    pub online: Option<bool>,
}

impl PlugStatus {
    /// Instantaneous power of the first meter, in watts.
    ///
    /// Absent data is treated as 0 W.
    pub fn power_w(&self) -> f64 {
        self.meters
            .first()
            .and_then(|m| m.power)
            .unwrap_or(0.0)
    }
}

/// One metering channel's instantaneous readings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MeterReading {
    /// Instantaneous power (W)
    #[serde(default)]
    pub power: Option<f64>,

    /// Line voltage (V)
    #[serde(default)]
    pub voltage: Option<f64>,

    /// Line current (A)
    #[serde(default)]
    pub current: Option<f64>,
}

/// Desired relay state for a control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayAction {
    On,
    Off,
}

impl RelayAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Outcome of a relay command from `POST /api/v1/devices/{id}/relay`.
///
/// Some gateway versions return an empty 200 body; that counts as success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlOutcome {
    #[serde(default = "default_true")]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_power_from_first_meter() {
        let status: PlugStatus = serde_json::from_value(json!({
            "meters": [{"power": 123.4, "voltage": 230.1}, {"power": 999.0}],
            "relay": "on",
            "online": true
        }))
        .unwrap();

        assert_eq!(status.power_w(), 123.4);
        assert_eq!(status.relay.as_deref(), Some("on"));
    }

    #[test]
    fn test_power_defaults_to_zero() {
        let status: PlugStatus = serde_json::from_value(json!({})).unwrap();
        assert_eq!(status.power_w(), 0.0);

        let status: PlugStatus = serde_json::from_value(json!({
            "meters": [{"voltage": 229.8}]
        }))
        .unwrap();
        assert_eq!(status.power_w(), 0.0);
    }

    #[test]
    fn test_relay_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RelayAction::On).unwrap(), "\"on\"");
        assert_eq!(serde_json::to_string(&RelayAction::Off).unwrap(), "\"off\"");
        assert_eq!(RelayAction::Off.to_string(), "off");
    }

    #[test]
    fn test_control_outcome_defaults_to_success() {
        let outcome: ControlOutcome = serde_json::from_value(json!({})).unwrap();
        assert!(outcome.success);

        let outcome: ControlOutcome =
            serde_json::from_value(json!({"success": false})).unwrap();
        assert!(!outcome.success);
    }
}
