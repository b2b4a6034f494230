//! # Pulsehub - Bounded In-Memory Telemetry Store
//!
//! The stateful core of a multi-sensor telemetry dashboard: a bounded
//! sliding window of recent sensor readings with point-in-time queries and
//! rolling health statistics.
//!
//! ## Key Features
//!
//! - **Bounded retention**: fixed-capacity window with FIFO eviction,
//!   O(1) amortized insert regardless of ingestion rate
//! - **Ingestion-time stamping**: ids and timestamps assigned at the single
//!   point of truth, not by producers
//! - **Windowed statistics**: health figures over the most recent readings,
//!   never the unbounded history
//! - **Explicit ownership**: no global singletons; construct a store and
//!   pass it to whoever needs it
//!
//! ## Quick Start
//!
//! ```rust
//! use pulsehub::{NewReading, ReadingMetadata, SensorType, TelemetryStore};
//!
//! let mut store = TelemetryStore::new();
//!
//! let reading = store.add_reading(NewReading {
//!     sensor_id: "temp-01".to_string(),
//!     sensor_type: SensorType::Temperature,
//!     value: 22.5,
//!     unit: SensorType::Temperature.unit().to_string(),
//!     metadata: ReadingMetadata::default(),
//! });
//! assert_eq!(reading.sensor_id, "temp-01");
//!
//! let recent = store.recent_readings(50, Some(SensorType::Temperature));
//! assert_eq!(recent.len(), 1);
//!
//! let stats = store.statistics();
//! assert_eq!(stats.active_sensors, 1);
//! ```
//!
//! ## Modules
//!
//! - [`reading`]: Reading data model, sensor types and quality flags
//! - [`store`]: Bounded telemetry store and statistics
//! - [`error`]: Error types

// Modules
pub mod error;
pub mod reading;
pub mod store;

// Re-exports for convenient access
pub use error::{Result, TelemetryError};
pub use reading::{NewReading, Quality, Reading, ReadingMetadata, SensorType};
pub use store::{
    AggregatedMetrics, NewAggregatedMetrics, StoreStatistics, TelemetryStore, MAX_METRICS,
    MAX_READINGS, STATS_WINDOW,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
