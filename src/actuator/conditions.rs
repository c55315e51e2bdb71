// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Readings with defaults applied, as seen by the rules.

use super::thresholds::{in_hours, Band, Thresholds};
use crate::reading::Reading;
use serde::Serialize;

/// Hour assumed when the reading has no usable timestamp
pub const DEFAULT_HOUR: u32 = 12;
/// Day flag assumed when the weather feed does not report one
pub const DEFAULT_IS_DAY: f64 = 1.0;
pub const DEFAULT_DHT_TEMPERATURE: f64 = 20.0;
pub const DEFAULT_DHT_HUMIDITY: f64 = 60.0;
pub const DEFAULT_SOIL_TEMPERATURE: f64 = 18.0;
pub const DEFAULT_SOIL_HUMIDITY: f64 = 50.0;
pub const DEFAULT_PH: f64 = 6.0;
pub const DEFAULT_CONDUCTIVITY: f64 = 1600.0;

/// Fully resolved inputs for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Daytime by clock or by the weather day flag
    pub is_daytime: bool,
    /// Air temperature band for this time of day
    pub temperature_band: Band,
    pub greenhouse_temperature: f64,
    pub greenhouse_humidity: f64,
    pub soil_temperature: f64,
    pub soil_humidity: f64,
    pub ph: f64,
    pub conductivity: f64,
    /// Falls back to the greenhouse temperature
    pub weather_temperature: f64,
    /// Falls back to the greenhouse humidity
    pub weather_humidity: f64,
    pub uv: f64,
    pub wind_kph: f64,
    pub will_it_rain: f64,
    pub chance_of_rain: f64,
}

impl Conditions {
    /// Resolve a reading against a set of thresholds
    pub fn resolve(reading: &Reading, thresholds: &Thresholds) -> Self {
        let hour = reading.hour_of_day().unwrap_or(DEFAULT_HOUR);
        let is_day = reading.is_day.unwrap_or(DEFAULT_IS_DAY);
        let is_daytime = in_hours(hour, thresholds.daytime_hours) || is_day == 1.0;

        let greenhouse_temperature = reading.dht_temperature.unwrap_or(DEFAULT_DHT_TEMPERATURE);
        let greenhouse_humidity = reading.dht_humidity.unwrap_or(DEFAULT_DHT_HUMIDITY);

        Self {
            hour,
            is_daytime,
            temperature_band: thresholds.temperature_band(is_daytime),
            greenhouse_temperature,
            greenhouse_humidity,
            soil_temperature: reading.soil_temperature.unwrap_or(DEFAULT_SOIL_TEMPERATURE),
            soil_humidity: reading.soil_humidity.unwrap_or(DEFAULT_SOIL_HUMIDITY),
            ph: reading.ph.unwrap_or(DEFAULT_PH),
            conductivity: reading.conductivity.unwrap_or(DEFAULT_CONDUCTIVITY),
            weather_temperature: reading.weather_temp_c.unwrap_or(greenhouse_temperature),
            weather_humidity: reading.weather_humidity.unwrap_or(greenhouse_humidity),
            uv: reading.uv.unwrap_or(0.0),
            wind_kph: reading.wind_kph.unwrap_or(0.0),
            will_it_rain: reading.will_it_rain.unwrap_or(0.0),
            chance_of_rain: reading.chance_of_rain.unwrap_or(0.0),
        }
    }

    /// Rain flagged by the forecast, or likely enough
    pub fn rain_expected(&self, thresholds: &Thresholds) -> bool {
        self.will_it_rain == 1.0 || self.chance_of_rain >= thresholds.rain_chance
    }

    /// Outside temperature and humidity both inside their bands
    pub fn outside_comfortable(&self, thresholds: &Thresholds) -> bool {
        self.temperature_band.contains(self.weather_temperature)
            && thresholds.humidity.contains(self.weather_humidity)
    }
}
