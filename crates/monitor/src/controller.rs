//! The dashboard interaction state machine.
//!
//! [`DashboardController`] owns every piece of mutable dashboard state: the
//! active incident, the flood-zone history, the epoch counter and the
//! escalation schedule. Display surfaces only read its projections
//! ([`DashboardController::analysis`], [`DashboardController::emergency`],
//! [`DashboardController::flood_zones`]) and raise intents back into it.
//!
//! ```text
//!            select_region (any state)
//!                   |
//!                   v
//!   Idle <---- Analyzing ----> Escalating ----> Resolved
//!     ^  dismiss     | broadcast /   |  notify
//!     |  analysis    | timer         |
//!     +--------------+---------------+ dismiss emergency
//! ```
//!
//! A critical reading (score >= 80) schedules a timer-driven escalation
//! tagged with the incident's epoch. When it comes due it is applied only if
//! that incident is still the one being analyzed.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::{BROADCAST_DESCRIPTION, BROADCAST_TITLE, ESCALATION_TITLE, SEARCH_TITLE};
use crate::dashboard_params::DashboardParams;
use crate::escalation::EscalationSchedule;
use crate::incident::{
    AnalysisContext, EmergencyContext, Epoch, FloodZone, Incident, IncidentState, Phase,
};
use crate::notifications::{NotificationPriority, NotificationSink};
use crate::projection::{project_on, SurfaceDims};
use crate::risk_source::RiskSource;

#[derive(Resource, Debug, Clone)]
pub struct DashboardController {
    state: IncidentState,
    /// Most recent incident, kept after its surfaces close.
    latest: Option<Incident>,
    /// Incident whose emergency modal was last opened.
    escalated: Option<Incident>,
    epoch: Epoch,
    zones: Vec<FloodZone>,
    schedule: EscalationSchedule,
    params: DashboardParams,
    stale_escalations: u64,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new(DashboardParams::default())
    }
}

impl DashboardController {
    pub fn new(params: DashboardParams) -> Self {
        Self {
            state: IncidentState::Idle,
            latest: None,
            escalated: None,
            epoch: Epoch::default(),
            zones: Vec::new(),
            schedule: EscalationSchedule::default(),
            params,
            stale_escalations: 0,
        }
    }

    /// Replace the tunables. Already scheduled escalations keep their delay.
    pub fn set_params(&mut self, params: DashboardParams) {
        self.params = params;
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Analyze the region under a click on the map surface.
    ///
    /// Valid from any state; the previous incident, if any, is replaced.
    pub fn select_region(
        &mut self,
        pixel_x: f64,
        pixel_y: f64,
        surface: SurfaceDims,
        source: &mut dyn RiskSource,
    ) -> Incident {
        let location = project_on(pixel_x, pixel_y, surface);
        let reading = source.next_reading(
            self.params.simulated_risk_min..=self.params.simulated_risk_max,
            self.params.zone_radius_min..self.params.zone_radius_max,
        );

        self.epoch = self.epoch.next();
        let incident = Incident::new(self.epoch, location, reading.score);

        self.zones.push(FloodZone {
            center: location,
            radius: reading.zone_radius.max(f32::EPSILON),
            epoch: self.epoch,
            risk: reading.score,
        });

        info!(
            "Incident {} at {}: risk {} ({})",
            incident.epoch,
            incident.location_label,
            incident.risk,
            incident.risk.band(),
        );

        if incident.risk.is_critical() {
            let delay = self.params.escalation_delay();
            self.schedule.schedule(self.epoch, delay);
            info!(
                "Incident {} is critical, escalation in {} ms",
                self.epoch,
                delay.as_millis()
            );
        }

        self.latest = Some(incident.clone());
        self.state = IncidentState::Analyzing(incident.clone());
        incident
    }

    /// Operator escalates the analyzed incident without waiting for the timer.
    pub fn request_broadcast(&mut self) -> bool {
        let incident = match std::mem::take(&mut self.state) {
            IncidentState::Analyzing(incident) => incident,
            other => {
                debug!("Broadcast request ignored in {}", other.phase().label());
                self.state = other;
                return false;
            }
        };
        self.schedule.cancel(incident.epoch);
        info!("Incident {} escalated by operator", incident.epoch);
        self.escalate(incident);
        true
    }

    /// Confirm the broadcast to the authorities and resolve the incident.
    pub fn notify_authorities(&mut self, sink: &mut impl NotificationSink) -> bool {
        let incident = match std::mem::take(&mut self.state) {
            IncidentState::Escalating(incident) => incident,
            other => {
                debug!("Notify request ignored in {}", other.phase().label());
                self.state = other;
                return false;
            }
        };
        info!(
            "Incident {} resolved: authorities notified for {}",
            incident.epoch, incident.location_label
        );
        sink.notify(
            BROADCAST_TITLE,
            BROADCAST_DESCRIPTION,
            NotificationPriority::Positive,
        );
        self.state = IncidentState::Resolved(incident);
        true
    }

    /// Close the analysis panel without resolving.
    pub fn dismiss_analysis(&mut self) -> bool {
        if !matches!(self.state, IncidentState::Analyzing(_)) {
            debug!("Dismiss analysis ignored in {}", self.phase().label());
            return false;
        }
        self.state = IncidentState::Idle;
        true
    }

    /// Close the emergency modal without notifying anyone.
    pub fn dismiss_emergency(&mut self) -> bool {
        if !matches!(self.state, IncidentState::Escalating(_)) {
            debug!("Dismiss emergency ignored in {}", self.phase().label());
            return false;
        }
        if let Some(incident) = self.state.incident() {
            info!("Incident {} emergency dismissed", incident.epoch);
        }
        self.state = IncidentState::Idle;
        true
    }

    /// Acknowledge a location search. Blank queries are ignored.
    pub fn search(&mut self, query: &str, sink: &mut impl NotificationSink) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        sink.notify(
            SEARCH_TITLE,
            &format!("Looking up coordinates for: {query}"),
            NotificationPriority::Info,
        );
        true
    }

    /// Advance the escalation schedule by `delta`.
    ///
    /// Returns the epoch escalated by the timer, if any.
    pub fn advance(&mut self, delta: Duration, sink: &mut impl NotificationSink) -> Option<Epoch> {
        let mut escalated = None;
        for epoch in self.schedule.advance(delta) {
            let incident = match std::mem::take(&mut self.state) {
                IncidentState::Analyzing(incident) if incident.epoch == epoch => incident,
                other => {
                    self.stale_escalations += 1;
                    debug!(
                        "Discarding stale escalation for incident {} (current {}, {})",
                        epoch,
                        self.epoch,
                        other.phase().label()
                    );
                    self.state = other;
                    continue;
                }
            };
            info!(
                "Incident {} escalated automatically: risk {} at {}",
                incident.epoch, incident.risk, incident.location_label
            );
            sink.notify(
                ESCALATION_TITLE,
                &format!(
                    "Risk {} at {}. Awaiting operator broadcast.",
                    incident.risk, incident.location_label
                ),
                NotificationPriority::Emergency,
            );
            escalated = Some(incident.epoch);
            self.escalate(incident);
        }
        escalated
    }

    fn escalate(&mut self, incident: Incident) {
        self.escalated = Some(incident.clone());
        self.state = IncidentState::Escalating(incident);
    }

    // -------------------------------------------------------------------------
    // Read-only projections
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &IncidentState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Epoch of the most recent incident (zero before the first selection).
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn latest_incident(&self) -> Option<&Incident> {
        self.latest.as_ref()
    }

    /// Every flood zone recorded this session, oldest first.
    pub fn flood_zones(&self) -> &[FloodZone] {
        &self.zones
    }

    pub fn pending_escalations(&self) -> &EscalationSchedule {
        &self.schedule
    }

    /// Number of timer escalations discarded because their incident had
    /// been replaced or had left the analyzing state.
    pub fn stale_escalations(&self) -> u64 {
        self.stale_escalations
    }

    pub fn analysis(&self) -> AnalysisContext {
        match &self.latest {
            Some(incident) => AnalysisContext {
                risk_score: incident.risk,
                location_label: incident.location_label.clone(),
                is_panel_open: self.phase() == Phase::Analyzing,
            },
            None => AnalysisContext::default(),
        }
    }

    pub fn emergency(&self) -> EmergencyContext {
        match &self.escalated {
            Some(incident) => EmergencyContext {
                is_modal_open: self.phase() == Phase::Escalating,
                triggering_risk_score: incident.risk,
                triggering_location: incident.location_label.clone(),
                epoch: incident.epoch,
            },
            None => EmergencyContext::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationEvent;
    use crate::risk_source::{ScriptedRiskSource, SimulatedRiskSource};

    fn surface() -> SurfaceDims {
        SurfaceDims::new(1000.0, 600.0)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_select_region_opens_panel() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([55]);
        let incident = ctl.select_region(0.0, 0.0, surface(), &mut source).clone();

        assert_eq!(incident.location_label, "20.0000°N, -20.0000°E");
        assert_eq!(incident.epoch, Epoch(1));
        assert_eq!(ctl.phase(), Phase::Analyzing);

        let analysis = ctl.analysis();
        assert!(analysis.is_panel_open);
        assert_eq!(analysis.risk_score.value(), 55);
        assert_eq!(analysis.location_label, "20.0000°N, -20.0000°E");
        assert!(!ctl.emergency().is_modal_open);
        assert_eq!(ctl.flood_zones().len(), 1);
    }

    #[test]
    fn test_random_scores_within_simulated_range() {
        let mut ctl = DashboardController::default();
        let mut source = SimulatedRiskSource::from_seed_u64(3);
        for i in 0..200 {
            let score = ctl
                .select_region(i as f64, i as f64, surface(), &mut source)
                .risk
                .value();
            assert!((40..=100).contains(&score));
        }
    }

    #[test]
    fn test_escalation_scheduled_iff_critical() {
        for score in [40u8, 60, 79, 80, 95, 100] {
            let mut ctl = DashboardController::default();
            let mut source = ScriptedRiskSource::new([score]);
            ctl.select_region(10.0, 10.0, surface(), &mut source);
            assert_eq!(
                !ctl.pending_escalations().is_empty(),
                score >= 80,
                "score {score}"
            );
        }
    }

    #[test]
    fn test_non_critical_never_escalates() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([79]);
        let mut sink = Vec::new();
        ctl.select_region(10.0, 10.0, surface(), &mut source);
        assert_eq!(ctl.advance(ms(60_000), &mut sink), None);
        assert_eq!(ctl.phase(), Phase::Analyzing);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_critical_escalates_after_delay() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([92]);
        let mut sink: Vec<NotificationEvent> = Vec::new();
        ctl.select_region(500.0, 300.0, surface(), &mut source);

        assert_eq!(ctl.advance(ms(1499), &mut sink), None);
        assert_eq!(ctl.phase(), Phase::Analyzing);

        assert_eq!(ctl.advance(ms(1), &mut sink), Some(Epoch(1)));
        assert_eq!(ctl.phase(), Phase::Escalating);
        let emergency = ctl.emergency();
        assert!(emergency.is_modal_open);
        assert_eq!(emergency.triggering_risk_score.value(), 92);
        assert_eq!(emergency.triggering_location, "40.0000°N, 40.0000°E");
        assert!(!ctl.analysis().is_panel_open);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].priority, NotificationPriority::Emergency);
    }

    #[test]
    fn test_superseded_incident_never_escalates() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([90, 50]);
        let mut sink = Vec::new();

        ctl.select_region(0.0, 0.0, surface(), &mut source);
        ctl.advance(ms(700), &mut sink);
        ctl.select_region(1000.0, 600.0, surface(), &mut source);

        ctl.advance(ms(5_000), &mut sink);
        assert_eq!(ctl.phase(), Phase::Analyzing);
        assert!(!ctl.emergency().is_modal_open);
        assert_eq!(ctl.stale_escalations(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_only_latest_critical_incident_escalates() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([88, 95]);
        let mut sink = Vec::new();

        ctl.select_region(0.0, 0.0, surface(), &mut source);
        ctl.advance(ms(1000), &mut sink);
        ctl.select_region(250.0, 150.0, surface(), &mut source);

        // First incident's timer comes due here and must be discarded.
        assert_eq!(ctl.advance(ms(500), &mut sink), None);
        assert_eq!(ctl.phase(), Phase::Analyzing);
        assert_eq!(ctl.stale_escalations(), 1);

        assert_eq!(ctl.advance(ms(1000), &mut sink), Some(Epoch(2)));
        let emergency = ctl.emergency();
        assert_eq!(emergency.epoch, Epoch(2));
        assert_eq!(emergency.triggering_risk_score.value(), 95);
        assert_eq!(emergency.triggering_location, "30.0000°N, 10.0000°E");
    }

    #[test]
    fn test_broadcast_bypasses_timer() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([85]);
        let mut sink = Vec::new();
        ctl.select_region(0.0, 0.0, surface(), &mut source);

        assert!(ctl.request_broadcast());
        assert_eq!(ctl.phase(), Phase::Escalating);
        assert!(!ctl.analysis().is_panel_open);
        assert!(ctl.emergency().is_modal_open);
        assert!(ctl.pending_escalations().is_empty());

        assert_eq!(ctl.advance(ms(5_000), &mut sink), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_broadcast_for_moderate_risk() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([45]);
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        assert!(ctl.request_broadcast());
        assert_eq!(ctl.emergency().triggering_risk_score.value(), 45);
    }

    #[test]
    fn test_notify_authorities_resolves_once() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([85]);
        let mut sink: Vec<NotificationEvent> = Vec::new();
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        ctl.request_broadcast();

        assert!(ctl.notify_authorities(&mut sink));
        assert_eq!(ctl.phase(), Phase::Resolved);
        assert!(!ctl.emergency().is_modal_open);
        assert!(!ctl.notify_authorities(&mut sink));

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].title, "Alert Broadcasted");
        assert_eq!(
            sink[0].description,
            "Emergency services have been notified. ETA: 12 minutes."
        );
    }

    #[test]
    fn test_intents_ignored_outside_their_state() {
        let mut ctl = DashboardController::default();
        let mut sink = Vec::new();
        assert!(!ctl.request_broadcast());
        assert!(!ctl.notify_authorities(&mut sink));
        assert!(!ctl.dismiss_analysis());
        assert!(!ctl.dismiss_emergency());
        assert_eq!(ctl.phase(), Phase::Idle);

        let mut source = ScriptedRiskSource::new([50]);
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        assert!(!ctl.notify_authorities(&mut sink));
        assert!(!ctl.dismiss_emergency());
        assert_eq!(ctl.phase(), Phase::Analyzing);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_dismissals_keep_history() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([50, 90]);
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        assert!(ctl.dismiss_analysis());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.flood_zones().len(), 1);

        ctl.select_region(10.0, 10.0, surface(), &mut source);
        ctl.request_broadcast();
        assert!(ctl.dismiss_emergency());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.flood_zones().len(), 2);
        // Panel data survives the dismissal for the next render.
        assert_eq!(ctl.analysis().risk_score.value(), 90);
        assert!(!ctl.analysis().is_panel_open);
    }

    #[test]
    fn test_dismissed_analysis_cancels_timer_effect() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([97]);
        let mut sink = Vec::new();
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        ctl.dismiss_analysis();
        assert_eq!(ctl.advance(ms(1500), &mut sink), None);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.stale_escalations(), 1);
    }

    #[test]
    fn test_dismissed_emergency_is_not_reopened_by_timer() {
        let mut ctl = DashboardController::default();
        let mut source = ScriptedRiskSource::new([97]);
        let mut sink = Vec::new();
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        ctl.advance(ms(1500), &mut sink);
        assert!(ctl.dismiss_emergency());
        ctl.advance(ms(10_000), &mut sink);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(!ctl.emergency().is_modal_open);
    }

    #[test]
    fn test_history_grows_by_one_per_selection() {
        let mut ctl = DashboardController::default();
        let mut source = SimulatedRiskSource::from_seed_u64(11);
        for n in 1..=25 {
            ctl.select_region(n as f64 * 3.0, n as f64 * 2.0, surface(), &mut source);
            assert_eq!(ctl.flood_zones().len(), n);
            assert_eq!(ctl.epoch(), Epoch(n as u64));
            if n % 3 == 0 {
                ctl.dismiss_analysis();
            }
        }
        let epochs: Vec<u64> = ctl.flood_zones().iter().map(|z| z.epoch.0).collect();
        assert_eq!(epochs, (1..=25).collect::<Vec<_>>());
        assert!(ctl.flood_zones().iter().all(|z| z.radius > 0.0));
    }

    #[test]
    fn test_search_notifies_and_keeps_state() {
        let mut ctl = DashboardController::default();
        let mut sink: Vec<NotificationEvent> = Vec::new();
        assert!(ctl.search("  New Delhi ", &mut sink));
        assert!(!ctl.search("   ", &mut sink));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].title, "Searching...");
        assert_eq!(sink[0].description, "Looking up coordinates for: New Delhi");
    }

    #[test]
    fn test_custom_delay_from_params() {
        let params = DashboardParams {
            escalation_delay_ms: 200,
            ..Default::default()
        };
        let mut ctl = DashboardController::new(params);
        let mut source = ScriptedRiskSource::new([81]);
        let mut sink = Vec::new();
        ctl.select_region(0.0, 0.0, surface(), &mut source);
        assert_eq!(ctl.advance(ms(200), &mut sink), Some(Epoch(1)));
    }

    #[test]
    fn test_placeholder_before_first_selection() {
        let ctl = DashboardController::default();
        assert_eq!(ctl.analysis().location_label, "Sector 7-Alpha");
        assert!(ctl.latest_incident().is_none());
        assert_eq!(ctl.epoch(), Epoch(0));
    }
}
