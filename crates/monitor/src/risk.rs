//! Flood-risk scores and their classification bands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CRITICAL_THRESHOLD;

// =============================================================================
// RiskScore
// =============================================================================

/// Flood-risk score, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Build a score, clamping anything outside `[0, 100]`.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> RiskBand {
        RiskBand::of(self)
    }

    /// Whether this score crosses the emergency escalation threshold.
    pub fn is_critical(self) -> bool {
        self.0 >= CRITICAL_THRESHOLD
    }
}

impl From<u8> for RiskScore {
    fn from(value: u8) -> Self {
        Self::clamped(value as i32)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// RiskBand
// =============================================================================

/// Classification band, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    /// `[0, 30)`
    Low,
    /// `[30, 60)`
    Moderate,
    /// `[60, 80)`
    High,
    /// `[80, 100]`
    Critical,
}

impl RiskBand {
    pub fn of(score: RiskScore) -> Self {
        match score.value() {
            0..=29 => RiskBand::Low,
            30..=59 => RiskBand::Moderate,
            60..=79 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Moderate => "MODERATE",
            RiskBand::High => "HIGH",
            RiskBand::Critical => "CRITICAL",
        }
    }

    /// CSS color token the gauge uses for this band.
    pub fn color_token(self) -> &'static str {
        match self {
            RiskBand::Low => "hsl(186, 100%, 50%)",
            RiskBand::Moderate => "hsl(45, 100%, 50%)",
            RiskBand::High => "hsl(25, 100%, 50%)",
            RiskBand::Critical => "hsl(0, 85%, 60%)",
        }
    }

    /// sRGB equivalent of [`Self::color_token`].
    pub fn rgb(self) -> [u8; 3] {
        match self {
            RiskBand::Low => [0, 230, 255],
            RiskBand::Moderate => [255, 191, 0],
            RiskBand::High => [255, 106, 0],
            RiskBand::Critical => [240, 82, 82],
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Result of classifying a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub band: RiskBand,
    pub color_token: &'static str,
}

impl RiskAssessment {
    pub fn label(&self) -> &'static str {
        self.band.label()
    }
}

/// Classify a raw score. Out-of-range input is clamped, never rejected.
pub fn classify(score: i32) -> RiskAssessment {
    let score = RiskScore::clamped(score);
    let band = score.band();
    RiskAssessment {
        score,
        band,
        color_token: band.color_token(),
    }
}

// =============================================================================
// Tests
// =============================================================================
