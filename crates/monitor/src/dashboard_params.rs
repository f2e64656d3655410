//! Data-driven dashboard tunables.
//!
//! The escalation delay and the ranges used by the simulated risk feed are
//! presentation choices, so they live in a single [`DashboardParams`]
//! resource instead of being scattered through the controller. The binary
//! can override the defaults from a JSON file.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_ESCALATION_DELAY_MS, DEFAULT_SIMULATED_RISK_MAX, DEFAULT_SIMULATED_RISK_MIN,
    DEFAULT_ZONE_RADIUS_MAX, DEFAULT_ZONE_RADIUS_MIN,
};

// ---------------------------------------------------------------------------
// ParamsError
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating [`DashboardParams`].
#[derive(Debug)]
pub enum ParamsError {
    /// The parameter file could not be read.
    Io(std::io::Error),
    /// The file was read but is not valid JSON for `DashboardParams`.
    Parse(serde_json::Error),
    /// The values parsed but violate a range constraint.
    Invalid(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "I/O error: {e}"),
            ParamsError::Parse(e) => write!(f, "Parse error: {e}"),
            ParamsError::Invalid(msg) => write!(f, "Invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            ParamsError::Parse(e) => Some(e),
            ParamsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// DashboardParams
// ---------------------------------------------------------------------------

/// Tunables for the dashboard controller and its simulated risk feed.
///
/// Missing fields in a JSON override fall back to their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardParams {
    /// Delay between a critical reading and its automatic escalation.
    pub escalation_delay_ms: u64,
    /// Inclusive lower bound of simulated risk scores.
    pub simulated_risk_min: u8,
    /// Inclusive upper bound of simulated risk scores.
    pub simulated_risk_max: u8,
    /// Lower bound of flood-zone overlay radii.
    pub zone_radius_min: f32,
    /// Exclusive upper bound of flood-zone overlay radii.
    pub zone_radius_max: f32,
    /// Seed for the simulated risk feed. `None` uses the default seed.
    pub rng_seed: Option<u64>,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            escalation_delay_ms: DEFAULT_ESCALATION_DELAY_MS,
            simulated_risk_min: DEFAULT_SIMULATED_RISK_MIN,
            simulated_risk_max: DEFAULT_SIMULATED_RISK_MAX,
            zone_radius_min: DEFAULT_ZONE_RADIUS_MIN,
            zone_radius_max: DEFAULT_ZONE_RADIUS_MAX,
            rng_seed: None,
        }
    }
}

impl DashboardParams {
    pub fn escalation_delay(&self) -> Duration {
        Duration::from_millis(self.escalation_delay_ms)
    }

    /// Check range constraints.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.simulated_risk_max > 100 {
            return Err(ParamsError::Invalid(format!(
                "simulated_risk_max must be at most 100, got {}",
                self.simulated_risk_max
            )));
        }
        if self.simulated_risk_min > self.simulated_risk_max {
            return Err(ParamsError::Invalid(format!(
                "simulated_risk_min ({}) exceeds simulated_risk_max ({})",
                self.simulated_risk_min, self.simulated_risk_max
            )));
        }
        if !(self.zone_radius_min.is_finite() && self.zone_radius_min > 0.0) {
            return Err(ParamsError::Invalid(format!(
                "zone_radius_min must be positive, got {}",
                self.zone_radius_min
            )));
        }
        if !(self.zone_radius_max.is_finite() && self.zone_radius_max > self.zone_radius_min) {
            return Err(ParamsError::Invalid(format!(
                "zone_radius_max ({}) must exceed zone_radius_min ({})",
                self.zone_radius_max, self.zone_radius_min
            )));
        }
        Ok(())
    }

    /// Parse and validate parameters from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: DashboardParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate parameters from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct DashboardParamsPlugin;

impl Plugin for DashboardParamsPlugin {
    fn build(&self, app: &mut App) {
        // Keep an override inserted by the binary before plugin setup.
        app.init_resource::<DashboardParams>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
