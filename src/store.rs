//! Bounded in-memory telemetry store
//!
//! [`TelemetryStore`] is the single point of truth for recent sensor data:
//! an ordered sliding window of the most recent [`MAX_READINGS`] readings
//! with FIFO eviction, plus a smaller window of aggregated metrics. Inserts
//! are O(1) amortized; queries scan the bounded window.
//!
//! The store is a plain synchronous value. Construct one explicitly and
//! share it behind whatever synchronization the caller needs; when written
//! from parallel tasks, `add_reading` and its eviction step must run under
//! an exclusive lock so the capacity invariant holds.

use crate::reading::{NewReading, Quality, Reading, SensorType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Retention window: number of readings kept before head eviction
pub const MAX_READINGS: usize = 1000;

/// Retention window for aggregated metrics
pub const MAX_METRICS: usize = 100;

/// Suffix window over which statistics are computed
pub const STATS_WINDOW: usize = 100;

/// Point-in-time health summary over the most recent readings
///
/// Computed over a suffix window of [`STATS_WINDOW`] readings (or fewer if
/// the store holds fewer) so the cost stays bounded and the numbers report
/// current health rather than lifetime totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatistics {
    /// Count of readings currently held in the window
    pub total_readings: usize,

    /// Estimated ingestion latency in milliseconds
    #[serde(rename = "avgLatency")]
    pub avg_latency_ms: f64,

    /// Percentage of the suffix window with `good` quality
    pub data_quality: f64,

    /// Distinct sensor ids in the suffix window
    pub active_sensors: usize,
}

/// Aggregated metrics input, before the store assigns the timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAggregatedMetrics {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub avg_vibration: f64,
    pub total_readings: usize,
    pub data_loss_percentage: f64,
    #[serde(rename = "avgLatency")]
    pub avg_latency_ms: f64,
}

/// One stored aggregation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub timestamp: DateTime<Utc>,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub avg_vibration: f64,
    pub total_readings: usize,
    pub data_loss_percentage: f64,
    #[serde(rename = "avgLatency")]
    pub avg_latency_ms: f64,
}

/// Bounded sliding window of sensor readings
pub struct TelemetryStore {
    /// Readings ordered oldest to newest, len <= max_readings
    readings: VecDeque<Reading>,
    /// Aggregation snapshots ordered oldest to newest, len <= max_metrics
    metrics: VecDeque<AggregatedMetrics>,
    /// Reading capacity before head eviction
    max_readings: usize,
    /// Metrics capacity before head eviction
    max_metrics: usize,
    /// Monotonic id sequence; never reset, not even by `clear`
    next_seq: u64,
}

impl TelemetryStore {
    /// Create an empty store with the default capacities
    pub fn new() -> Self {
        Self::with_capacity(MAX_READINGS, MAX_METRICS)
    }

    /// Create an empty store with custom capacities
    ///
    /// Intended for tests that want a small window; production code uses
    /// [`TelemetryStore::new`].
    pub fn with_capacity(max_readings: usize, max_metrics: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(max_readings.min(MAX_READINGS) + 1),
            metrics: VecDeque::new(),
            max_readings,
            max_metrics,
            next_seq: 0,
        }
    }

    /// Accept one reading into the window
    ///
    /// Assigns a fresh unique id and the current ingestion timestamp,
    /// appends at the tail, and evicts from the head while the window is
    /// over capacity. Returns the stored reading so callers can echo it
    /// back. Always succeeds.
    pub fn add_reading(&mut self, input: NewReading) -> Reading {
        self.next_seq += 1;

        let reading = Reading {
            id: format!("r-{:08}", self.next_seq),
            sensor_id: input.sensor_id,
            sensor_type: input.sensor_type,
            value: input.value,
            unit: input.unit,
            timestamp: Utc::now(),
            metadata: input.metadata,
        };

        self.readings.push_back(reading.clone());
        while self.readings.len() > self.max_readings {
            self.readings.pop_front();
        }

        reading
    }

    /// Most recent readings, newest first
    ///
    /// An optional sensor type restricts the result before the limit is
    /// applied. A limit of zero returns an empty list. Read-only.
    pub fn recent_readings(&self, limit: usize, sensor_type: Option<SensorType>) -> Vec<Reading> {
        if limit == 0 {
            return Vec::new();
        }

        self.readings
            .iter()
            .rev()
            .filter(|r| sensor_type.map_or(true, |t| r.sensor_type == t))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Readings with `start <= timestamp <= end`, in insertion order
    ///
    /// An empty range (`start > end`) or no matches yields an empty list.
    pub fn readings_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Reading> {
        self.readings
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Health statistics over the suffix window
    ///
    /// An empty store yields the all-zero summary.
    pub fn statistics(&self) -> StoreStatistics {
        let window_len = self.readings.len().min(STATS_WINDOW);
        if window_len == 0 {
            return StoreStatistics::default();
        }

        let window_start = self.readings.len() - window_len;
        let window = self.readings.range(window_start..);

        let good = window
            .clone()
            .filter(|r| r.metadata.quality == Quality::Good)
            .count();
        let sensors: HashSet<&str> = window.map(|r| r.sensor_id.as_str()).collect();

        // Latency stand-in: there is no real transport behind the store, so
        // report a deterministic figure scaled by window occupancy.
        let fill = window_len as f64 / STATS_WINDOW as f64;

        StoreStatistics {
            total_readings: self.readings.len(),
            avg_latency_ms: 0.3 + 0.1 * fill,
            data_quality: good as f64 / window_len as f64 * 100.0,
            active_sensors: sensors.len(),
        }
    }

    /// Record one aggregation snapshot, evicting the oldest on overflow
    pub fn add_metrics(&mut self, input: NewAggregatedMetrics) -> AggregatedMetrics {
        let snapshot = AggregatedMetrics {
            timestamp: Utc::now(),
            avg_temperature: input.avg_temperature,
            avg_humidity: input.avg_humidity,
            avg_pressure: input.avg_pressure,
            avg_vibration: input.avg_vibration,
            total_readings: input.total_readings,
            data_loss_percentage: input.data_loss_percentage,
            avg_latency_ms: input.avg_latency_ms,
        };

        self.metrics.push_back(snapshot.clone());
        while self.metrics.len() > self.max_metrics {
            self.metrics.pop_front();
        }

        snapshot
    }

    /// Most recent aggregation snapshots, newest first
    pub fn recent_metrics(&self, limit: usize) -> Vec<AggregatedMetrics> {
        self.metrics.iter().rev().take(limit).cloned().collect()
    }

    /// Number of readings currently held
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check if the window holds no readings
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Drop all readings and metrics
    ///
    /// Test/reset hook; the id sequence keeps counting so ids stay unique
    /// across the process lifetime.
    pub fn clear(&mut self) {
        self.readings.clear();
        self.metrics.clear();
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TelemetryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryStore")
            .field("readings", &self.readings.len())
            .field("metrics", &self.metrics.len())
            .field("max_readings", &self.max_readings)
            .finish()
    }
}
