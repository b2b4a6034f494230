// Pulsehub Simulator - Simulated multi-sensor ingestion
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Simulated multi-sensor ingestion pipeline
//!
//! This crate stands in for a real external feed: a set of independent
//! periodic producers, each synthesizing plausible readings for one sensor
//! at its own cadence and pushing them into a shared
//! [`TelemetryStore`](pulsehub::TelemetryStore).
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsehub::TelemetryStore;
//! use pulsehub_simulator::{IngestionController, SensorProfile};
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//!
//! # async fn demo() {
//! let store = Arc::new(RwLock::new(TelemetryStore::new()));
//! let mut controller = IngestionController::new(Arc::clone(&store), SensorProfile::defaults());
//!
//! controller.start();
//! assert!(controller.status().is_running);
//!
//! // ... readings accumulate in the store ...
//!
//! controller.stop().await;
//! # }
//! ```

// Modules
pub mod generator;
pub mod ingest;
pub mod profile;

// Re-exports for convenient access
pub use generator::{Sample, SampleGenerator};
pub use ingest::{IngestionController, IngestionStatus, SharedStore};
pub use profile::SensorProfile;
