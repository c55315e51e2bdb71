// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! The ordered rule table
//!
//! Each [`Rule`] is a predicate plus the assignments it makes when it fires.
//! The table is evaluated top to bottom against a decision that starts all
//! off; a later rule overwrites what an earlier one assigned. Devices are
//! grouped in the order fan, pump, light, roof, so roof rules see the final
//! fan state.
//!
//! Known quirk: when the outside air is comfortable the last roof rule
//! opens the roof and stops the fan at the same time.

use super::conditions::Conditions;
use super::thresholds::{in_hours, Thresholds};
use super::{ControlDecision, Device};

/// Rule predicate
///
/// Receives the resolved conditions, the thresholds, and the decision as
/// built by the rules before it.
pub type Predicate = fn(&Conditions, &Thresholds, &ControlDecision) -> bool;

/// One step of the rule table
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, `device.reason`
    pub name: &'static str,
    /// Device group the rule belongs to
    pub device: Device,
    /// Assignments applied when the rule fires
    pub assignments: &'static [(Device, bool)],
    /// Firing condition
    pub when: Predicate,
}

impl Rule {
    /// Apply the rule, returning whether it fired
    pub fn apply(
        &self,
        conditions: &Conditions,
        thresholds: &Thresholds,
        decision: &mut ControlDecision,
    ) -> bool {
        if !(self.when)(conditions, thresholds, decision) {
            return false;
        }
        for (device, on) in self.assignments {
            decision.set(*device, *on);
        }
        true
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("device", &self.device)
            .field("assignments", &self.assignments)
            .finish()
    }
}

const FAN_ON: &[(Device, bool)] = &[(Device::Fan, true)];
const FAN_OFF: &[(Device, bool)] = &[(Device::Fan, false)];
const PUMP_ON: &[(Device, bool)] = &[(Device::Pump, true)];
const PUMP_OFF: &[(Device, bool)] = &[(Device::Pump, false)];
const LIGHT_ON: &[(Device, bool)] = &[(Device::Light, true)];
const ROOF_ON: &[(Device, bool)] = &[(Device::Roof, true)];
const ROOF_ON_FAN_OFF: &[(Device, bool)] = &[(Device::Roof, true), (Device::Fan, false)];

/// Margin over the humidity band before the fan runs (%)
const FAN_HUMIDITY_MARGIN: f64 = 5.0;
/// Margin over the band minimum before still air calls for the fan (°C)
const FAN_STILL_AIR_MARGIN: f64 = 1.0;
/// Margin over the soil temperature band before the fan runs (°C)
const FAN_SOIL_MARGIN: f64 = 2.0;
/// Margin under the humidity band before the pump runs (%)
const PUMP_HUMIDITY_MARGIN: f64 = 5.0;
/// Margin over the humidity band before the roof opens to help the fan (%)
const ROOF_HUMIDITY_MARGIN: f64 = 10.0;
/// Margin over the soil temperature band at which the soil overheats (°C)
const SOIL_OVERHEAT_MARGIN: f64 = 3.0;

fn soil_overheating(c: &Conditions, t: &Thresholds) -> bool {
    c.soil_temperature > t.soil_temperature.max + SOIL_OVERHEAT_MARGIN
}

/// The rule table, in evaluation order
pub static RULES: &[Rule] = &[
    // Fan
    Rule {
        name: "fan.air_too_hot",
        device: Device::Fan,
        assignments: FAN_ON,
        when: |c, _, _| c.greenhouse_temperature > c.temperature_band.max,
    },
    Rule {
        name: "fan.air_too_humid",
        device: Device::Fan,
        assignments: FAN_ON,
        when: |c, t, _| c.greenhouse_humidity > t.humidity.max + FAN_HUMIDITY_MARGIN,
    },
    Rule {
        name: "fan.still_air",
        device: Device::Fan,
        assignments: FAN_ON,
        when: |c, t, _| {
            c.is_daytime
                && c.wind_kph < t.still_air_kph
                && c.greenhouse_temperature > c.temperature_band.min + FAN_STILL_AIR_MARGIN
        },
    },
    Rule {
        name: "fan.soil_too_hot",
        device: Device::Fan,
        assignments: FAN_ON,
        when: |c, t, _| c.soil_temperature > t.soil_temperature.max + FAN_SOIL_MARGIN,
    },
    Rule {
        name: "fan.outside_comfortable",
        device: Device::Fan,
        assignments: FAN_OFF,
        when: |c, t, _| c.outside_comfortable(t),
    },
    // Pump
    Rule {
        name: "pump.air_too_dry",
        device: Device::Pump,
        assignments: PUMP_ON,
        when: |c, t, _| c.greenhouse_humidity < t.humidity.min - PUMP_HUMIDITY_MARGIN,
    },
    Rule {
        name: "pump.soil_too_dry",
        device: Device::Pump,
        assignments: PUMP_ON,
        when: |c, t, _| c.soil_humidity < t.soil_humidity.min,
    },
    Rule {
        name: "pump.conductivity_out_of_band",
        device: Device::Pump,
        assignments: PUMP_ON,
        when: |c, t, _| !t.conductivity.contains(c.conductivity),
    },
    Rule {
        name: "pump.ph_out_of_band",
        device: Device::Pump,
        assignments: PUMP_ON,
        when: |c, t, _| !t.ph.contains(c.ph),
    },
    Rule {
        name: "pump.hot_or_rainy_weather",
        device: Device::Pump,
        assignments: PUMP_OFF,
        when: |c, t, _| c.weather_temperature > t.hot_weather || c.rain_expected(t),
    },
    Rule {
        name: "pump.soil_overheating",
        device: Device::Pump,
        assignments: PUMP_OFF,
        when: |c, t, _| soil_overheating(c, t),
    },
    // Light
    Rule {
        name: "light.night_supplement",
        device: Device::Light,
        assignments: LIGHT_ON,
        when: |c, t, _| in_hours(c.hour, t.light_hours) && !c.is_daytime,
    },
    Rule {
        name: "light.low_uv",
        device: Device::Light,
        assignments: LIGHT_ON,
        when: |c, t, _| in_hours(c.hour, t.light_hours) && c.is_daytime && c.uv < t.low_uv,
    },
    // Roof
    Rule {
        name: "roof.heat_stress",
        device: Device::Roof,
        assignments: ROOF_ON,
        when: |c, t, _| {
            c.greenhouse_temperature > t.temp_stress
                || c.greenhouse_temperature > c.temperature_band.max
        },
    },
    Rule {
        name: "roof.humid_with_fan",
        device: Device::Roof,
        assignments: ROOF_ON,
        when: |c, t, d| c.greenhouse_humidity > t.humidity.max + ROOF_HUMIDITY_MARGIN && d.fan,
    },
    Rule {
        name: "roof.peak_uv",
        device: Device::Roof,
        assignments: ROOF_ON,
        when: |c, t, _| c.uv > t.high_uv && in_hours(c.hour, t.peak_sun_hours),
    },
    Rule {
        name: "roof.rain_expected",
        device: Device::Roof,
        assignments: ROOF_ON,
        when: |c, t, _| c.rain_expected(t),
    },
    Rule {
        name: "roof.soil_overheating",
        device: Device::Roof,
        assignments: ROOF_ON,
        when: |c, t, _| soil_overheating(c, t),
    },
    Rule {
        name: "roof.outside_comfortable",
        device: Device::Roof,
        assignments: ROOF_ON_FAN_OFF,
        when: |c, t, _| c.outside_comfortable(t),
    },
];

/// Rules of one device group, in evaluation order
pub fn rules_for(device: Device) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |r| r.device == device)
}

/// Look up a rule by name
pub fn find(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.name == name)
}
