//! Injectable source of simulated risk readings.
//!
//! The dashboard has no real risk model: every region selection draws a score
//! and a flood-zone radius from a [`RiskSource`]. The default
//! [`SimulatedRiskSource`] wraps `ChaCha8Rng` so a given seed always yields the
//! same session; tests swap in a [`ScriptedRiskSource`] to force exact scores.

use std::collections::VecDeque;
use std::ops::{Range, RangeInclusive};

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_RISK_SEED;
use crate::dashboard_params::DashboardParams;
use crate::risk::RiskScore;

/// A single simulated reading for a selected region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReading {
    pub score: RiskScore,
    pub zone_radius: f32,
}

/// Produces readings for newly selected regions.
pub trait RiskSource: Send + Sync + 'static {
    /// Draw a reading. `scores` and `radii` are the configured ranges; sources
    /// may ignore them (scripted sources do).
    fn next_reading(&mut self, scores: RangeInclusive<u8>, radii: Range<f32>) -> RiskReading;
}

// ---------------------------------------------------------------------------
// Seeded random source
// ---------------------------------------------------------------------------

/// Uniform random readings from a deterministic ChaCha8 stream.
pub struct SimulatedRiskSource {
    rng: ChaCha8Rng,
}

impl Default for SimulatedRiskSource {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_RISK_SEED)
    }
}

impl SimulatedRiskSource {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RiskSource for SimulatedRiskSource {
    fn next_reading(&mut self, scores: RangeInclusive<u8>, radii: Range<f32>) -> RiskReading {
        let score = if scores.is_empty() {
            *scores.start()
        } else {
            self.rng.gen_range(scores)
        };
        let zone_radius = if radii.is_empty() {
            radii.start
        } else {
            self.rng.gen_range(radii)
        };
        RiskReading {
            score: RiskScore::from(score),
            zone_radius,
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// Replays a fixed list of scores, then repeats the last one.
///
/// The zone radius is the midpoint of the configured range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRiskSource {
    scores: VecDeque<u8>,
    last: Option<u8>,
}

impl ScriptedRiskSource {
    pub fn new(scores: impl IntoIterator<Item = u8>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
            last: None,
        }
    }
}

impl RiskSource for ScriptedRiskSource {
    fn next_reading(&mut self, scores: RangeInclusive<u8>, radii: Range<f32>) -> RiskReading {
        let score = self
            .scores
            .pop_front()
            .or(self.last)
            .unwrap_or(*scores.start());
        self.last = Some(score);
        RiskReading {
            score: RiskScore::from(score),
            zone_radius: (radii.start + radii.end) * 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// RiskFeed resource
// ---------------------------------------------------------------------------

/// The active risk source used by the intent system.
#[derive(Resource)]
pub struct RiskFeed(pub Box<dyn RiskSource>);

impl RiskFeed {
    pub fn new(source: impl RiskSource) -> Self {
        Self(Box::new(source))
    }

    /// Seeded random feed honoring `params.rng_seed`.
    pub fn from_params(params: &DashboardParams) -> Self {
        Self::new(SimulatedRiskSource::from_seed_u64(
            params.rng_seed.unwrap_or(DEFAULT_RISK_SEED),
        ))
    }
}

impl RiskSource for RiskFeed {
    fn next_reading(&mut self, scores: RangeInclusive<u8>, radii: Range<f32>) -> RiskReading {
        self.0.next_reading(scores, radii)
    }
}

impl Default for RiskFeed {
    fn default() -> Self {
        Self::new(SimulatedRiskSource::default())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
