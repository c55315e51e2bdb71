// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Agronomic thresholds used by the rule table.

use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Create a band
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the band (bounds included)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Thresholds for a greenhouse crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Air temperature band while it is day (°C)
    pub temp_day: Band,
    /// Air temperature band at night (°C)
    pub temp_night: Band,
    /// Air temperature at which the plants are heat stressed (°C)
    pub temp_stress: f64,
    /// Air humidity band (%)
    pub humidity: Band,
    /// Soil pH band
    pub ph: Band,
    /// Soil conductivity band (µS/cm)
    pub conductivity: Band,
    /// Soil temperature band (°C)
    pub soil_temperature: Band,
    /// Soil humidity band (%)
    pub soil_humidity: Band,
    /// Below this UV index, daylight is supplemented
    pub low_uv: f64,
    /// Above this UV index, the roof opens around midday
    pub high_uv: f64,
    /// Hours (inclusive) during which the grow light may run
    pub light_hours: (u32, u32),
    /// Hours (inclusive) counted as daytime
    pub daytime_hours: (u32, u32),
    /// Hours (inclusive) of peak sun
    pub peak_sun_hours: (u32, u32),
    /// Wind below this speed counts as still air (km/h)
    pub still_air_kph: f64,
    /// Outside temperature above which irrigation is held (°C)
    pub hot_weather: f64,
    /// Rain probability from which rain is expected (%)
    pub rain_chance: f64,
}

impl Thresholds {
    /// Thresholds for the reference greenhouse
    pub const GREENHOUSE: Thresholds = Thresholds {
        temp_day: Band::new(15.0, 22.0),
        temp_night: Band::new(15.0, 20.0),
        temp_stress: 24.0,
        humidity: Band::new(30.0, 75.0),
        ph: Band::new(6.0, 7.5),
        conductivity: Band::new(1500.0, 2100.0),
        soil_temperature: Band::new(15.0, 22.0),
        soil_humidity: Band::new(50.0, 70.0),
        low_uv: 1.0,
        high_uv: 8.0,
        light_hours: (5, 20),
        daytime_hours: (6, 20),
        peak_sun_hours: (11, 15),
        still_air_kph: 5.0,
        hot_weather: 25.0,
        rain_chance: 60.0,
    };

    /// Air temperature band for the time of day
    pub fn temperature_band(&self, is_daytime: bool) -> Band {
        if is_daytime {
            self.temp_day
        } else {
            self.temp_night
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::GREENHOUSE
    }
}

/// Whether `hour` lies in an inclusive `(start, end)` window
pub(crate) fn in_hours(hour: u32, (start, end): (u32, u32)) -> bool {
    hour >= start && hour <= end
}
