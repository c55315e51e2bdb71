// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Actuator decision engine
//!
//! Maps one merged [`Reading`](crate::Reading) to on/off commands for the
//! four greenhouse devices. Evaluation is pure: no state is carried from one
//! reading to the next, so a batch can be evaluated in any order (or on any
//! number of threads) with the same result.
//!
//! The decision is produced by an ordered rule table ([`rules::RULES`]).
//! Rules run top to bottom and the last rule that fires for a device wins.

mod conditions;
mod engine;
pub mod rules;
mod thresholds;

pub use conditions::Conditions;
pub use engine::{Evaluation, RuleEngine};
pub use rules::Rule;
pub use thresholds::{Band, Thresholds};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A controllable greenhouse device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Ventilation fan
    Fan,
    /// Irrigation pump
    Pump,
    /// Grow light
    Light,
    /// Roof opening
    Roof,
}

impl Device {
    /// All devices, in evaluation order
    pub const ALL: [Device; 4] = [Device::Fan, Device::Pump, Device::Light, Device::Roof];

    /// Lowercase device name
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Fan => "fan",
            Device::Pump => "pump",
            Device::Light => "light",
            Device::Roof => "roof",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On/off command for every device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlDecision {
    pub fan: bool,
    pub pump: bool,
    pub light: bool,
    pub roof: bool,
}

impl ControlDecision {
    /// Everything off
    pub const OFF: ControlDecision = ControlDecision {
        fan: false,
        pump: false,
        light: false,
        roof: false,
    };

    /// State of one device
    pub fn get(&self, device: Device) -> bool {
        match device {
            Device::Fan => self.fan,
            Device::Pump => self.pump,
            Device::Light => self.light,
            Device::Roof => self.roof,
        }
    }

    /// Set the state of one device
    pub fn set(&mut self, device: Device, on: bool) {
        match device {
            Device::Fan => self.fan = on,
            Device::Pump => self.pump = on,
            Device::Light => self.light = on,
            Device::Roof => self.roof = on,
        }
    }

    /// Devices switched on, in evaluation order
    pub fn active_devices(&self) -> Vec<Device> {
        Device::ALL
            .iter()
            .copied()
            .filter(|d| self.get(*d))
            .collect()
    }
}
