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

//! WattION core - daily energy accumulation for a single smart plug
//!
//! This crate holds the energy-integration state machine: it turns a stream
//! of instantaneous power readings into cumulative peak/off-peak kWh totals
//! for the current calendar day, and persists that state between runs.

pub mod accumulator;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod tariff;

pub use accumulator::{Accumulator, DayTotals};
pub use error::{CoreError, Result};
pub use snapshot::SnapshotStore;
pub use state::DayState;
pub use tariff::{TariffPeriod, TariffWindow};
