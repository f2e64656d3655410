//! Timer-driven escalation through `advance_escalation_timers`.

use crate::incident::{Epoch, Phase};
use crate::notifications::NotificationPriority;
use crate::test_harness::TestDashboard;
use crate::{DashboardParams, EscalationCause, IncidentEscalated};

#[test]
fn critical_reading_escalates_after_delay() {
    let mut dash = TestDashboard::new().with_scores([92]);
    dash.click(500.0, 300.0);

    dash.advance_ms(1400);
    dash.assert_phase(Phase::Analyzing);
    dash.assert_surfaces(true, false);

    dash.advance_ms(100);
    dash.assert_phase(Phase::Escalating);
    dash.assert_surfaces(false, true);

    let emergency = dash.emergency();
    assert_eq!(emergency.triggering_risk_score.value(), 92);
    assert_eq!(emergency.triggering_location, "40.0000°N, 40.0000°E");
    assert_eq!(
        dash.escalations(),
        &[IncidentEscalated {
            epoch: Epoch(1),
            cause: EscalationCause::Timer,
        }]
    );
    dash.assert_journal_count(NotificationPriority::Emergency, 1);
}

#[test]
fn below_threshold_never_escalates() {
    let mut dash = TestDashboard::new().with_scores([79]);
    dash.click(500.0, 300.0);
    dash.advance_ms(10_000);
    dash.assert_phase(Phase::Analyzing);
    assert!(dash.escalations().is_empty());
}

#[test]
fn threshold_score_escalates() {
    let mut dash = TestDashboard::new().with_scores([80]);
    dash.click(500.0, 300.0);
    dash.advance_ms(1500);
    dash.assert_phase(Phase::Escalating);
}

#[test]
fn superseded_critical_incident_is_suppressed() {
    let mut dash = TestDashboard::new().with_scores([95, 50]);
    dash.click(0.0, 0.0);
    dash.advance_ms(800);
    dash.click(1000.0, 600.0);
    dash.advance_ms(3000);

    dash.assert_phase(Phase::Analyzing);
    dash.assert_surfaces(true, false);
    assert_eq!(dash.analysis().risk_score.value(), 50);
    assert!(dash.escalations().is_empty());
    assert_eq!(dash.controller().stale_escalations(), 1);
    dash.assert_journal_count(NotificationPriority::Emergency, 0);
}

#[test]
fn second_critical_incident_escalates_with_its_own_data() {
    let mut dash = TestDashboard::new().with_scores([88, 97]);
    dash.click(0.0, 0.0);
    dash.advance_ms(1000);
    dash.click(250.0, 150.0);

    // First timer comes due while the second incident is analyzed.
    dash.advance_ms(600);
    dash.assert_phase(Phase::Analyzing);

    dash.advance_ms(1000);
    dash.assert_phase(Phase::Escalating);
    let emergency = dash.emergency();
    assert_eq!(emergency.epoch, Epoch(2));
    assert_eq!(emergency.triggering_risk_score.value(), 97);
    assert_eq!(emergency.triggering_location, "30.0000°N, 10.0000°E");
    assert_eq!(dash.escalations().len(), 1);
}

#[test]
fn manual_broadcast_preempts_timer() {
    let mut dash = TestDashboard::new().with_scores([99]);
    dash.click(0.0, 0.0);
    dash.advance_ms(500);
    dash.broadcast();
    dash.advance_ms(3000);

    assert_eq!(dash.escalations().len(), 1);
    assert_eq!(dash.escalations()[0].cause, EscalationCause::Operator);
    dash.assert_journal_count(NotificationPriority::Emergency, 0);
}

#[test]
fn dismissed_analysis_is_not_escalated_later() {
    let mut dash = TestDashboard::new().with_scores([90]);
    dash.click(0.0, 0.0);
    dash.dismiss_analysis();
    dash.advance_ms(2000);
    dash.assert_phase(Phase::Idle);
    dash.assert_surfaces(false, false);
}

#[test]
fn escalation_delay_follows_params() {
    let params = DashboardParams {
        escalation_delay_ms: 300,
        ..Default::default()
    };
    let mut dash = TestDashboard::with_params(params).with_scores([85]);
    dash.click(0.0, 0.0);
    dash.advance_ms(320);
    dash.assert_phase(Phase::Escalating);
}

#[test]
fn params_changed_at_runtime_reach_controller() {
    let mut dash = TestDashboard::new().with_scores([85]);
    dash.world_mut()
        .resource_mut::<DashboardParams>()
        .escalation_delay_ms = 100;
    dash.click(0.0, 0.0);
    assert_eq!(dash.controller().params().escalation_delay_ms, 100);
    dash.advance_ms(112);
    dash.assert_phase(Phase::Escalating);
}
