//! Incident data owned by the dashboard controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{PLACEHOLDER_LOCATION, PLACEHOLDER_RISK};
use crate::projection::GeoPoint;
use crate::risk::RiskScore;

// =============================================================================
// Epoch
// =============================================================================

/// Monotonically increasing incident identifier. Zero means "no incident yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(pub u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// FloodZone
// =============================================================================

/// Overlay recorded for every selected region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodZone {
    pub center: GeoPoint,
    /// Always positive.
    pub radius: f32,
    /// Incident that produced this zone.
    pub epoch: Epoch,
    pub risk: RiskScore,
}

// =============================================================================
// Incident
// =============================================================================

/// One selected-region analysis cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub epoch: Epoch,
    pub location: GeoPoint,
    pub location_label: String,
    pub risk: RiskScore,
}

impl Incident {
    pub fn new(epoch: Epoch, location: GeoPoint, risk: RiskScore) -> Self {
        Self {
            epoch,
            location,
            location_label: location.label(),
            risk,
        }
    }
}

/// Lifecycle of the active incident slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum IncidentState {
    /// No surface open.
    #[default]
    Idle,
    /// Analysis panel open for the incident.
    Analyzing(Incident),
    /// Emergency modal open for the incident.
    Escalating(Incident),
    /// Authorities notified; no surface open.
    Resolved(Incident),
}

impl IncidentState {
    pub fn phase(&self) -> Phase {
        match self {
            IncidentState::Idle => Phase::Idle,
            IncidentState::Analyzing(_) => Phase::Analyzing,
            IncidentState::Escalating(_) => Phase::Escalating,
            IncidentState::Resolved(_) => Phase::Resolved,
        }
    }

    pub fn incident(&self) -> Option<&Incident> {
        match self {
            IncidentState::Idle => None,
            IncidentState::Analyzing(i)
            | IncidentState::Escalating(i)
            | IncidentState::Resolved(i) => Some(i),
        }
    }
}

/// Data-free view of [`IncidentState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Analyzing,
    Escalating,
    Resolved,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Analyzing => "ANALYZING",
            Phase::Escalating => "ESCALATING",
            Phase::Resolved => "RESOLVED",
        }
    }
}

// =============================================================================
// Read-only projections for the display surfaces
// =============================================================================

/// What the analysis panel renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisContext {
    pub risk_score: RiskScore,
    pub location_label: String,
    pub is_panel_open: bool,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            risk_score: RiskScore::from(PLACEHOLDER_RISK),
            location_label: PLACEHOLDER_LOCATION.to_string(),
            is_panel_open: false,
        }
    }
}

/// What the emergency modal renders.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyContext {
    pub is_modal_open: bool,
    pub triggering_risk_score: RiskScore,
    pub triggering_location: String,
    /// Incident the modal was opened for.
    pub epoch: Epoch,
}

impl Default for EmergencyContext {
    fn default() -> Self {
        Self {
            is_modal_open: false,
            triggering_risk_score: RiskScore::from(PLACEHOLDER_RISK),
            triggering_location: PLACEHOLDER_LOCATION.to_string(),
            epoch: Epoch::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_increments() {
        let e = Epoch::default();
        assert_eq!(e.0, 0);
        assert_eq!(e.next().next(), Epoch(2));
        assert!(e < e.next());
        assert_eq!(Epoch(3).to_string(), "#3");
    }

    #[test]
    fn test_incident_label_from_location() {
        let incident = Incident::new(Epoch(1), GeoPoint::new(20.0, -20.0), RiskScore::from(50));
        assert_eq!(incident.location_label, "20.0000°N, -20.0000°E");
    }

    #[test]
    fn test_state_phase_and_incident() {
        let incident = Incident::new(Epoch(4), GeoPoint::new(30.0, 10.0), RiskScore::from(85));
        assert_eq!(IncidentState::Idle.phase(), Phase::Idle);
        assert!(IncidentState::Idle.incident().is_none());
        let escalating = IncidentState::Escalating(incident.clone());
        assert_eq!(escalating.phase(), Phase::Escalating);
        assert_eq!(escalating.incident(), Some(&incident));
        assert_eq!(Phase::Resolved.label(), "RESOLVED");
    }

    #[test]
    fn test_placeholder_contexts() {
        let analysis = AnalysisContext::default();
        assert!(!analysis.is_panel_open);
        assert_eq!(analysis.location_label, "Sector 7-Alpha");
        assert_eq!(analysis.risk_score.value(), 65);
        assert!(!EmergencyContext::default().is_modal_open);
    }
}
