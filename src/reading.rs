//! Sensor reading data model
//!
//! A [`Reading`] is an immutable record of one sensor observation. The store
//! assigns the id and timestamp at acceptance time; producers and API
//! clients submit a [`NewReading`] with everything else filled in.

use crate::error::TelemetryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of sensor types handled by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Temperature,
    Humidity,
    Pressure,
    Vibration,
}

impl SensorType {
    /// All sensor types, in display order
    pub const ALL: [SensorType; 4] = [
        SensorType::Temperature,
        SensorType::Humidity,
        SensorType::Pressure,
        SensorType::Vibration,
    ];

    /// Display unit fixed per sensor type
    pub fn unit(&self) -> &'static str {
        match self {
            SensorType::Temperature => "°C",
            SensorType::Humidity => "%",
            SensorType::Pressure => "hPa",
            SensorType::Vibration => "Hz",
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Humidity => "humidity",
            SensorType::Pressure => "pressure",
            SensorType::Vibration => "vibration",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(SensorType::Temperature),
            "humidity" => Ok(SensorType::Humidity),
            "pressure" => Ok(SensorType::Pressure),
            "vibration" => Ok(SensorType::Vibration),
            other => Err(TelemetryError::UnknownSensorType(other.to_string())),
        }
    }
}

/// Quality flag attached to every reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Good,
    Warning,
    Critical,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Warning => "warning",
            Quality::Critical => "critical",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Quality::Good),
            "warning" => Ok(Quality::Warning),
            "critical" => Ok(Quality::Critical),
            other => Err(TelemetryError::UnknownQuality(other.to_string())),
        }
    }
}

/// Optional provenance plus the quality flag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default)]
    pub quality: Quality,
}

impl ReadingMetadata {
    /// Metadata carrying only a quality flag
    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }
}

/// Ingest input: a reading before the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub metadata: ReadingMetadata,
}

/// One stored sensor observation
///
/// Never mutated after creation; only its membership in the store's
/// retention window changes. The timestamp models ingestion time (assigned
/// by the store), not device time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: String,
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: ReadingMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_type_units() {
        assert_eq!(SensorType::Temperature.unit(), "°C");
        assert_eq!(SensorType::Humidity.unit(), "%");
        assert_eq!(SensorType::Pressure.unit(), "hPa");
        assert_eq!(SensorType::Vibration.unit(), "Hz");
    }

    #[test]
    fn test_sensor_type_from_str() {
        assert_eq!(
            "temperature".parse::<SensorType>().unwrap(),
            SensorType::Temperature
        );
        assert_eq!(
            "vibration".parse::<SensorType>().unwrap(),
            SensorType::Vibration
        );

        let err = "light".parse::<SensorType>();
        assert!(matches!(err, Err(TelemetryError::UnknownSensorType(_))));
    }

    #[test]
    fn test_sensor_type_roundtrip_display() {
        for ty in SensorType::ALL {
            assert_eq!(ty.as_str().parse::<SensorType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!("good".parse::<Quality>().unwrap(), Quality::Good);
        assert_eq!("critical".parse::<Quality>().unwrap(), Quality::Critical);
        assert!(matches!(
            "excellent".parse::<Quality>(),
            Err(TelemetryError::UnknownQuality(_))
        ));
    }

    #[test]
    fn test_metadata_default_quality() {
        let meta = ReadingMetadata::default();
        assert_eq!(meta.quality, Quality::Good);
        assert!(meta.location.is_none());
        assert!(meta.device_id.is_none());
    }

    #[test]
    fn test_reading_wire_shape() {
        // Wire contract uses camelCase field names and lowercase enum values
        let reading = Reading {
            id: "r-00000001".to_string(),
            sensor_id: "temp-01".to_string(),
            sensor_type: SensorType::Temperature,
            value: 22.5,
            unit: "°C".to_string(),
            timestamp: Utc::now(),
            metadata: ReadingMetadata::with_quality(Quality::Warning),
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["sensorId"], "temp-01");
        assert_eq!(json["sensorType"], "temperature");
        assert_eq!(json["metadata"]["quality"], "warning");
    }
}
