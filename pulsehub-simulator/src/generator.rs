// Pulsehub Simulator - Simulated multi-sensor ingestion
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Seedable sample synthesis.
//!
//! A [`SampleGenerator`] turns a [`SensorProfile`] into a stream of
//! plausible values plus quality flags. The generator owns its RNG, so a
//! seeded generator replays the exact same sequence; tests substitute a
//! fixed seed for deterministic producers.

use crate::profile::SensorProfile;
use pulsehub::Quality;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

/// One synthesized observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub quality: Quality,
}

/// Synthesizes plausible values for one sensor profile.
pub struct SampleGenerator {
    min: f64,
    max: f64,
    noise: Normal<f64>,
    degraded_probability: f64,
    degraded_quality: Quality,
    rng: StdRng,
}

impl SampleGenerator {
    /// Create a generator seeded from entropy.
    pub fn new(profile: &SensorProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed for reproducible sequences.
    pub fn seeded(profile: &SensorProfile, seed: u64) -> Self {
        Self::with_rng(profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(profile: &SensorProfile, rng: StdRng) -> Self {
        Self {
            min: profile.min,
            max: profile.max,
            noise: Normal::new(0.0, profile.noise_std.max(0.0)).unwrap(),
            degraded_probability: profile.degraded_probability.clamp(0.0, 1.0),
            degraded_quality: profile.degraded_quality,
            rng,
        }
    }

    /// Synthesize the next sample.
    ///
    /// The value is drawn uniformly inside the profile range, jittered by
    /// the configured noise, and clamped back to the range. The quality
    /// flag degrades with the profile's fixed probability.
    pub fn next_sample(&mut self) -> Sample {
        let span = self.max - self.min;
        let base = self.min + self.rng.gen::<f64>() * span;
        let value = (base + self.noise.sample(&mut self.rng)).clamp(self.min, self.max);

        let quality = if self.rng.gen_bool(self.degraded_probability) {
            self.degraded_quality
        } else {
            Quality::Good
        };

        Sample { value, quality }
    }
}

impl std::fmt::Debug for SampleGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleGenerator")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("degraded_probability", &self.degraded_probability)
            .finish()
    }
}
