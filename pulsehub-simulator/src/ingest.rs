// Pulsehub Simulator - Simulated multi-sensor ingestion
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Producer lifecycle orchestration.
//!
//! The [`IngestionController`] owns one periodic tokio task per configured
//! [`SensorProfile`]. Producers tick independently at their own cadence and
//! push synthesized readings into the shared store; the controller only
//! ever runs them all or none.

use crate::generator::SampleGenerator;
use crate::profile::SensorProfile;
use pulsehub::{NewReading, ReadingMetadata, TelemetryStore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

/// Telemetry store shared between producer tasks and API consumers.
///
/// Producers run as true parallel tasks, so inserts and eviction serialize
/// under the write lock; readers take the read lock and see a consistent
/// window.
pub type SharedStore = Arc<RwLock<TelemetryStore>>;

/// Aggregate ingestion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionStatus {
    /// Whether the producer set is running.
    pub is_running: bool,
    /// Number of currently active producer tasks.
    pub active_streams: usize,
}

/// Starts and stops the simulated producer set.
///
/// State machine: Stopped -> Running -> Stopped. Both transitions are
/// idempotent; a second `start` never spawns duplicate producers.
pub struct IngestionController {
    /// Shared store every producer pushes into.
    store: SharedStore,
    /// Static producer configuration.
    profiles: Vec<SensorProfile>,
    /// Base seed for deterministic producers (tests); entropy when absent.
    seed: Option<u64>,
    /// Cancellation handles of active producers, keyed by sensor id.
    tasks: HashMap<String, JoinHandle<()>>,
    /// Running flag checked before spawning.
    running: bool,
}

impl IngestionController {
    /// Create a stopped controller over the given store and profiles.
    pub fn new(store: SharedStore, profiles: Vec<SensorProfile>) -> Self {
        Self {
            store,
            profiles,
            seed: None,
            tasks: HashMap::new(),
            running: false,
        }
    }

    /// Derive every producer's generator from a fixed base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Handle to the shared store.
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// The configured producer set.
    pub fn profiles(&self) -> &[SensorProfile] {
        &self.profiles
    }

    /// Start every producer.
    ///
    /// No-op while already running. Each producer gets its own interval
    /// timer; the first reading lands one full interval after start. Must
    /// be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.running {
            debug!("ingestion already running");
            return;
        }
        self.running = true;

        for (index, profile) in self.profiles.iter().enumerate() {
            let generator = match self.seed {
                Some(base) => SampleGenerator::seeded(profile, base.wrapping_add(index as u64)),
                None => SampleGenerator::new(profile),
            };

            let handle = tokio::spawn(run_producer(
                Arc::clone(&self.store),
                profile.clone(),
                generator,
            ));
            self.tasks.insert(profile.sensor_id.clone(), handle);
        }

        info!(producers = self.tasks.len(), "ingestion started");
    }

    /// Stop every producer.
    ///
    /// No-op while already stopped. Cancels each producer task and waits
    /// for it to terminate, so no reading can reach the store after this
    /// returns.
    pub async fn stop(&mut self) {
        if !self.running {
            debug!("ingestion already stopped");
            return;
        }

        for (sensor_id, handle) in self.tasks.drain() {
            handle.abort();
            // Await the aborted handle: the task is fully torn down before
            // we report it gone.
            let _ = handle.await;
            debug!(%sensor_id, "producer cancelled");
        }
        self.running = false;

        info!("ingestion stopped");
    }

    /// Aggregate status: running flag and active producer count.
    pub fn status(&self) -> IngestionStatus {
        IngestionStatus {
            is_running: self.running,
            active_streams: self.tasks.len(),
        }
    }
}

impl std::fmt::Debug for IngestionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionController")
            .field("profiles", &self.profiles.len())
            .field("running", &self.running)
            .field("active_streams", &self.tasks.len())
            .finish()
    }
}

/// One producer's periodic loop: tick, synthesize, push.
async fn run_producer(store: SharedStore, profile: SensorProfile, mut generator: SampleGenerator) {
    let period = profile.interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);

    loop {
        ticker.tick().await;

        let sample = generator.next_sample();
        let reading = store.write().await.add_reading(NewReading {
            sensor_id: profile.sensor_id.clone(),
            sensor_type: profile.sensor_type,
            value: sample.value,
            unit: profile.sensor_type.unit().to_string(),
            metadata: ReadingMetadata {
                location: Some(profile.location.clone()),
                device_id: Some(profile.device_id.clone()),
                quality: sample.quality,
            },
        });

        debug!(
            id = %reading.id,
            sensor = %profile.sensor_id,
            value = reading.value,
            quality = %reading.metadata.quality,
            "reading ingested"
        );
    }
}
