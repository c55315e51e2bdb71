// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Reading records
//!
//! Two shapes of input flow into the core:
//!
//! - [`Reading`]: one merged record (greenhouse sensors, soil probe and
//!   current weather) handed to the rule engine.
//! - [`HistoryRecord`]: one raw historical row for a sensor, with an open set
//!   of fields, handed to the aggregator.
//!
//! Numeric fields are read leniently. Rows coming from the realtime database
//! mix JSON numbers and numeric strings, so both are accepted. Anything that
//! does not parse is treated as absent.

use crate::timestamp::Timestamp;
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A merged sensor + weather record
///
/// Every field is optional. Missing values are substituted by the rule
/// engine, never here.
///
/// Each field is written under its merged key (`hour`, `sensor_*`,
/// `weather_*`) and also read from its short key. A row may carry both;
/// the merged key wins unless its value is unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MergedRow")]
pub struct Reading {
    /// Time of the reading (used for hour-of-day)
    #[serde(rename = "hour", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,

    /// Greenhouse air temperature (°C)
    #[serde(rename = "sensor_dht_temperature", skip_serializing_if = "Option::is_none")]
    pub dht_temperature: Option<f64>,

    /// Greenhouse air humidity (%)
    #[serde(rename = "sensor_dht_humidity", skip_serializing_if = "Option::is_none")]
    pub dht_humidity: Option<f64>,

    /// Soil temperature (°C)
    #[serde(rename = "sensor_temperature", skip_serializing_if = "Option::is_none")]
    pub soil_temperature: Option<f64>,

    /// Soil humidity (%)
    #[serde(rename = "sensor_humidity", skip_serializing_if = "Option::is_none")]
    pub soil_humidity: Option<f64>,

    /// Soil pH
    #[serde(rename = "sensor_ph", skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,

    /// Soil electrical conductivity (µS/cm)
    #[serde(rename = "sensor_conductivity", skip_serializing_if = "Option::is_none")]
    pub conductivity: Option<f64>,

    /// Soil nitrogen (ppm)
    #[serde(rename = "sensor_nitrogen", skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<f64>,

    /// Soil phosphorus (ppm)
    #[serde(rename = "sensor_phosphorus", skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,

    /// Soil potassium (ppm)
    #[serde(rename = "sensor_potassium", skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,

    /// Outside temperature (°C)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_temp_c: Option<f64>,

    /// Outside humidity (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_humidity: Option<f64>,

    /// UV index
    #[serde(rename = "weather_uv", skip_serializing_if = "Option::is_none")]
    pub uv: Option<f64>,

    /// Wind speed (km/h)
    #[serde(rename = "weather_wind_kph", skip_serializing_if = "Option::is_none")]
    pub wind_kph: Option<f64>,

    /// Rain forecast flag (0/1)
    #[serde(rename = "weather_will_it_rain", skip_serializing_if = "Option::is_none")]
    pub will_it_rain: Option<f64>,

    /// Rain probability (0-100)
    #[serde(rename = "weather_chance_of_rain", skip_serializing_if = "Option::is_none")]
    pub chance_of_rain: Option<f64>,

    /// Day flag reported by the weather feed (0/1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_day: Option<f64>,
}

/// Wire shape of a merged row, one field per accepted key
#[derive(Deserialize)]
struct MergedRow {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    hour: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_dht_temperature: Option<f64>,
    #[serde(rename = "dht_temperature", default, deserialize_with = "lenient_f64")]
    short_dht_temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_dht_humidity: Option<f64>,
    #[serde(rename = "dht_humidity", default, deserialize_with = "lenient_f64")]
    short_dht_humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_ph: Option<f64>,
    #[serde(rename = "ph", default, deserialize_with = "lenient_f64")]
    short_ph: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_conductivity: Option<f64>,
    #[serde(rename = "conductivity", default, deserialize_with = "lenient_f64")]
    short_conductivity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_nitrogen: Option<f64>,
    #[serde(rename = "nitrogen", default, deserialize_with = "lenient_f64")]
    short_nitrogen: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_phosphorus: Option<f64>,
    #[serde(rename = "phosphorus", default, deserialize_with = "lenient_f64")]
    short_phosphorus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sensor_potassium: Option<f64>,
    #[serde(rename = "potassium", default, deserialize_with = "lenient_f64")]
    short_potassium: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_uv: Option<f64>,
    #[serde(rename = "uv", default, deserialize_with = "lenient_f64")]
    short_uv: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_wind_kph: Option<f64>,
    #[serde(rename = "wind_kph", default, deserialize_with = "lenient_f64")]
    short_wind_kph: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_will_it_rain: Option<f64>,
    #[serde(rename = "will_it_rain", default, deserialize_with = "lenient_f64")]
    short_will_it_rain: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    weather_chance_of_rain: Option<f64>,
    #[serde(rename = "chance_of_rain", default, deserialize_with = "lenient_f64")]
    short_chance_of_rain: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    is_day: Option<f64>,
}

impl From<MergedRow> for Reading {
    fn from(row: MergedRow) -> Self {
        Self {
            timestamp: usable_timestamp(row.hour, row.timestamp),
            dht_temperature: row.sensor_dht_temperature.or(row.short_dht_temperature),
            dht_humidity: row.sensor_dht_humidity.or(row.short_dht_humidity),
            soil_temperature: row.sensor_temperature.or(row.temperature),
            soil_humidity: row.sensor_humidity.or(row.humidity),
            ph: row.sensor_ph.or(row.short_ph),
            conductivity: row.sensor_conductivity.or(row.short_conductivity),
            nitrogen: row.sensor_nitrogen.or(row.short_nitrogen),
            phosphorus: row.sensor_phosphorus.or(row.short_phosphorus),
            potassium: row.sensor_potassium.or(row.short_potassium),
            weather_temp_c: row.weather_temp_c.or(row.temp_c),
            weather_humidity: row.weather_humidity,
            uv: row.weather_uv.or(row.short_uv),
            wind_kph: row.weather_wind_kph.or(row.short_wind_kph),
            will_it_rain: row.weather_will_it_rain.or(row.short_will_it_rain),
            chance_of_rain: row.weather_chance_of_rain.or(row.short_chance_of_rain),
            is_day: row.is_day,
        }
    }
}

/// Prefer `primary` unless it does not resolve to a time
fn usable_timestamp(primary: Option<Timestamp>, fallback: Option<Timestamp>) -> Option<Timestamp> {
    let usable = |ts: &Timestamp| ts.to_datetime().is_ok();
    match primary {
        Some(ts) if usable(&ts) => Some(ts),
        primary => fallback.filter(usable).or(primary),
    }
}

impl Reading {
    /// Create an empty reading (every field absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading time
    pub fn at(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set greenhouse air temperature and humidity
    pub fn with_greenhouse(mut self, temperature: f64, humidity: f64) -> Self {
        self.dht_temperature = Some(temperature);
        self.dht_humidity = Some(humidity);
        self
    }

    /// Set soil temperature and humidity
    pub fn with_soil(mut self, temperature: f64, humidity: f64) -> Self {
        self.soil_temperature = Some(temperature);
        self.soil_humidity = Some(humidity);
        self
    }

    /// Set soil chemistry
    pub fn with_chemistry(mut self, ph: f64, conductivity: f64) -> Self {
        self.ph = Some(ph);
        self.conductivity = Some(conductivity);
        self
    }

    /// Set soil nutrients (N, P, K in ppm)
    pub fn with_nutrients(mut self, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        self.nitrogen = Some(nitrogen);
        self.phosphorus = Some(phosphorus);
        self.potassium = Some(potassium);
        self
    }

    /// Set outside temperature and humidity
    pub fn with_weather(mut self, temp_c: f64, humidity: f64) -> Self {
        self.weather_temp_c = Some(temp_c);
        self.weather_humidity = Some(humidity);
        self
    }

    /// Set UV index
    pub fn with_uv(mut self, uv: f64) -> Self {
        self.uv = Some(uv);
        self
    }

    /// Set wind speed
    pub fn with_wind(mut self, wind_kph: f64) -> Self {
        self.wind_kph = Some(wind_kph);
        self
    }

    /// Set the rain forecast
    pub fn with_rain(mut self, will_it_rain: bool, chance_of_rain: f64) -> Self {
        self.will_it_rain = Some(if will_it_rain { 1.0 } else { 0.0 });
        self.chance_of_rain = Some(chance_of_rain);
        self
    }

    /// Set the day flag
    pub fn with_is_day(mut self, is_day: bool) -> Self {
        self.is_day = Some(if is_day { 1.0 } else { 0.0 });
        self
    }

    /// Hour of day (UTC), if the timestamp is present and parseable
    pub fn hour_of_day(&self) -> Option<u32> {
        self.timestamp
            .as_ref()
            .and_then(|ts| ts.to_datetime().ok())
            .map(|dt| dt.hour())
    }
}

/// A raw historical row for one sensor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// When the row was recorded
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Timestamp>,

    /// All other fields, as stored
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl HistoryRecord {
    /// Create a record at the given time
    pub fn new(timestamp: impl Into<Timestamp>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            fields: Map::new(),
        }
    }

    /// Add a field value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Numeric value of a field, `None` if missing or unparseable
    pub fn value_of(&self, param: &str) -> Option<f64> {
        self.fields.get(param).and_then(number_from_value)
    }

    /// Resolved timestamp, `None` if missing or unparseable
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_ref().and_then(|ts| ts.to_datetime().ok())
    }
}

/// Interpret a JSON value as a finite number
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// Parse the longest numeric prefix of a string
///
/// `"25"`, `" 25.4 "`, `"25°C"` and `"1e3"` all parse; `"n/a"`, `""`
/// and `"."` do not. Non-finite results are rejected.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().map(Timestamp::Millis),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(Timestamp::Text(s)),
        _ => None,
    })
}
