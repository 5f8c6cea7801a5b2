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

use crate::errors::{CloudError, CloudResult};
use crate::types::{ControlOutcome, PlugStatus, RelayAction};
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Plug cloud REST API client for a single device.
///
/// Requests carry the static device credential as a bearer token. There is
/// no retry or backoff here: a failed request surfaces as an error and the
/// fixed polling interval is the only recovery mechanism.
#[derive(Debug, Clone)]
pub struct PlugClient {
    base_url: String,
    device_id: String,
    token: String,
    client: Client,
}

impl PlugClient {
    /// Create a new client with an explicit request timeout.
    pub fn new(
        base_url: impl Into<String>,
        device_id: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> CloudResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CloudError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            device_id: device_id.into(),
            token: token.into(),
            client,
        })
    }

    /// Fetch the full device status.
    pub async fn fetch_status(&self) -> CloudResult<PlugStatus> {
        let url = format!(
            "{}/api/v1/devices/{}/status",
            self.base_url, self.device_id
        );
        debug!("🔍 [PLUG QUERY] Getting status for device: {}", self.device_id);
        debug!("   URL: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let status = response.json::<PlugStatus>().await?;
                debug!(
                    "✅ [PLUG RESULT] Device {} reports {:.1}W",
                    self.device_id,
                    status.power_w()
                );
                Ok(status)
            }
            StatusCode::NOT_FOUND => {
                error!("❌ [PLUG ERROR] Device not found: {}", self.device_id);
                Err(CloudError::DeviceNotFound(self.device_id.clone()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(
                    "❌ [PLUG ERROR] Authentication failed for device: {}",
                    self.device_id
                );
                Err(CloudError::AuthenticationFailed)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("❌ [PLUG ERROR] Status {}: {}", status, error_text);
                Err(CloudError::Api {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }

    /// Fetch the instantaneous power reading of the first meter, in watts.
    ///
    /// A device with no meter data reports 0 W.
    pub async fn fetch_power(&self) -> CloudResult<f64> {
        let status = self.fetch_status().await?;
        if status.meters.is_empty() {
            warn!(
                "⚠️ [PLUG QUERY] Device {} reported no meters, assuming 0W",
                self.device_id
            );
        }
        Ok(status.power_w())
    }

    /// Switch the plug relay on or off.
    ///
    /// Returns the boolean-like outcome reported by the gateway. Control
    /// commands never touch accumulated energy state.
    pub async fn set_relay(&self, action: RelayAction) -> CloudResult<bool> {
        let url = format!("{}/api/v1/devices/{}/relay", self.base_url, self.device_id);
        info!("🔌 [PLUG CONTROL] Switching device {} {}", self.device_id, action);
        debug!("   URL: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "state": action.as_str() }))
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                // Some gateway versions return an empty body on success.
                let body = response.text().await.unwrap_or_default();
                let outcome = if body.trim().is_empty() {
                    ControlOutcome { success: true }
                } else {
                    serde_json::from_str::<ControlOutcome>(&body).unwrap_or(ControlOutcome {
                        success: true,
                    })
                };

                if outcome.success {
                    info!("✅ [PLUG CONTROL] Device {} switched {}", self.device_id, action);
                } else {
                    warn!(
                        "⚠️ [PLUG CONTROL] Gateway declined to switch device {} {}",
                        self.device_id, action
                    );
                }
                Ok(outcome.success)
            }
            StatusCode::NOT_FOUND => {
                error!("❌ [PLUG CONTROL] Device not found: {}", self.device_id);
                Err(CloudError::DeviceNotFound(self.device_id.clone()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(
                    "❌ [PLUG CONTROL] Authentication failed for device: {}",
                    self.device_id
                );
                Err(CloudError::AuthenticationFailed)
            }
            _status => {
                let error_msg = response.text().await.unwrap_or_default();
                error!(
                    "❌ [PLUG CONTROL] Failed for device {} (status: {})",
                    self.device_id, status
                );
                Err(CloudError::Api {
                    status: status.as_u16(),
                    message: error_msg,
                })
            }
        }
    }
}
