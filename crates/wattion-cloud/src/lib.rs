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

//! Smart-plug cloud API client for WattION.
//!
//! Thin REST client for the plug vendor's cloud gateway: reads the
//! instantaneous power of a single device and switches its relay on/off.

pub mod client;
pub mod errors;
pub mod types;

pub use client::PlugClient;
pub use errors::{CloudError, CloudResult};
pub use types::{ControlOutcome, MeterReading, PlugStatus, RelayAction};
