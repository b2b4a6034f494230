// Pulsehub Simulator - Simulated multi-sensor ingestion
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Producer descriptors.
//!
//! A [`SensorProfile`] is the static configuration of one simulated
//! producer: which sensor it impersonates, how often it ticks, and the
//! bounds its synthesized values stay inside.

use pulsehub::{Quality, SensorType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static configuration of one simulated producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorProfile {
    /// Stable identifier of the simulated sensor.
    pub sensor_id: String,
    /// Sensor type; also fixes the display unit.
    pub sensor_type: SensorType,
    /// Emission interval in milliseconds, fixed per producer.
    pub interval_ms: u64,
    /// Physical location attached to every reading.
    pub location: String,
    /// Device identifier attached to every reading.
    pub device_id: String,
    /// Lower bound of plausible values.
    pub min: f64,
    /// Upper bound of plausible values.
    pub max: f64,
    /// Standard deviation of added noise.
    pub noise_std: f64,
    /// Probability that a tick reports degraded quality.
    pub degraded_probability: f64,
    /// Quality flag used for degraded ticks.
    pub degraded_quality: Quality,
}

impl SensorProfile {
    /// Create a profile with the given identity, cadence and value range.
    pub fn new(
        sensor_id: &str,
        sensor_type: SensorType,
        interval_ms: u64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            sensor_id: sensor_id.to_string(),
            sensor_type,
            interval_ms,
            location: String::new(),
            device_id: sensor_id.to_uppercase(),
            min,
            max,
            noise_std: 0.0,
            degraded_probability: 0.0,
            degraded_quality: Quality::Warning,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Set the device identifier.
    pub fn with_device_id(mut self, device_id: &str) -> Self {
        self.device_id = device_id.to_string();
        self
    }

    /// Add noise to the synthesized values.
    pub fn with_noise(mut self, std: f64) -> Self {
        self.noise_std = std;
        self
    }

    /// Set the degraded-quality probability and flag.
    pub fn with_degraded(mut self, probability: f64, quality: Quality) -> Self {
        self.degraded_probability = probability;
        self.degraded_quality = quality;
        self
    }

    /// Emission interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The default four-producer fleet.
    ///
    /// One producer per sensor type, each at its own cadence, with a small
    /// per-type probability of a degraded sample.
    pub fn defaults() -> Vec<SensorProfile> {
        vec![
            SensorProfile::new("temp-01", SensorType::Temperature, 2000, 20.0, 30.0)
                .with_location("Building A - Floor 2")
                .with_device_id("TEMP-001")
                .with_noise(0.3)
                .with_degraded(0.05, Quality::Warning),
            SensorProfile::new("hum-01", SensorType::Humidity, 2500, 40.0, 60.0)
                .with_location("Building A - Floor 2")
                .with_device_id("HUM-001")
                .with_noise(1.0)
                .with_degraded(0.03, Quality::Warning),
            SensorProfile::new("press-01", SensorType::Pressure, 3000, 1000.0, 1020.0)
                .with_location("Building B - Basement")
                .with_device_id("PRESS-001")
                .with_noise(0.5)
                .with_degraded(0.02, Quality::Critical),
            SensorProfile::new("vib-01", SensorType::Vibration, 1500, 0.0, 100.0)
                .with_location("Factory Floor - Machine 3")
                .with_device_id("VIB-001")
                .with_noise(2.0)
                .with_degraded(0.08, Quality::Warning),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_new() {
        let profile = SensorProfile::new("temp-09", SensorType::Temperature, 2000, 20.0, 30.0);
        assert_eq!(profile.sensor_id, "temp-09");
        assert_eq!(profile.device_id, "TEMP-09");
        assert_eq!(profile.interval(), Duration::from_secs(2));
        assert_eq!(profile.degraded_probability, 0.0);
    }

    #[test]
    fn test_profile_builders() {
        let profile = SensorProfile::new("vib-02", SensorType::Vibration, 1500, 0.0, 100.0)
            .with_location("Factory Floor - Machine 7")
            .with_device_id("VIB-002")
            .with_noise(2.0)
            .with_degraded(0.08, Quality::Critical);

        assert_eq!(profile.location, "Factory Floor - Machine 7");
        assert_eq!(profile.device_id, "VIB-002");
        assert_eq!(profile.noise_std, 2.0);
        assert_eq!(profile.degraded_quality, Quality::Critical);
    }

    #[test]
    fn test_defaults_cover_all_sensor_types() {
        let profiles = SensorProfile::defaults();
        assert_eq!(profiles.len(), 4);

        for ty in SensorType::ALL {
            assert!(profiles.iter().any(|p| p.sensor_type == ty));
        }

        // Cadences differ so producer callbacks interleave
        let intervals: Vec<u64> = profiles.iter().map(|p| p.interval_ms).collect();
        assert_eq!(intervals, vec![2000, 2500, 3000, 1500]);
    }

    #[test]
    fn test_defaults_stay_inside_plausible_ranges() {
        for profile in SensorProfile::defaults() {
            assert!(profile.min < profile.max, "{}", profile.sensor_id);
            assert!(profile.degraded_probability < 0.5, "{}", profile.sensor_id);
        }
    }
}
