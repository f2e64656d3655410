//! ECS wiring for the dashboard controller.
//!
//! Display surfaces never touch [`DashboardController`] directly. They send
//! [`DashboardIntent`] events, which `apply_dashboard_intents` feeds into the
//! controller once per frame. `advance_escalation_timers` then drives the
//! escalation schedule from the frame delta.
//!
//! Headless drivers (tests, `--agent`) build their App with [`headless_app`]
//! and move the clock with [`step_update`].

use std::time::Duration;

use bevy::ecs::event::{EventRegistry, ShouldUpdateEvents};
use bevy::prelude::*;
use bevy::time::{TimeUpdateStrategy, Virtual};

use crate::controller::DashboardController;
use crate::dashboard_params::DashboardParams;
use crate::incident::Epoch;
use crate::notifications::NotificationEvent;
use crate::projection::SurfaceDims;
use crate::risk_source::RiskFeed;

// =============================================================================
// Events
// =============================================================================

/// Operator intents raised by the display surfaces.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    /// Click on the map. `pixel` is relative to the top-left corner of a
    /// surface of size `surface`.
    SelectRegion { pixel: Vec2, surface: Vec2 },
    /// "Broadcast Alert" in the analysis panel.
    RequestBroadcast,
    /// "Notify Authorities" in the emergency modal.
    NotifyAuthorities,
    DismissAnalysis,
    DismissEmergency,
    /// Location search submitted from the header.
    Search(String),
}

/// How an incident reached the emergency modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationCause {
    Operator,
    Timer,
}

/// Emitted whenever the emergency modal opens.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentEscalated {
    pub epoch: Epoch,
    pub cause: EscalationCause,
}

// =============================================================================
// Systems
// =============================================================================

/// Push tunable changes into the controller.
pub fn sync_dashboard_params(
    params: Res<DashboardParams>,
    mut controller: ResMut<DashboardController>,
) {
    if params.is_changed() && controller.params() != &*params {
        controller.set_params(params.clone());
    }
}

pub fn apply_dashboard_intents(
    mut intents: EventReader<DashboardIntent>,
    mut controller: ResMut<DashboardController>,
    mut feed: ResMut<RiskFeed>,
    mut notifications: EventWriter<NotificationEvent>,
    mut escalated: EventWriter<IncidentEscalated>,
) {
    for intent in intents.read() {
        match intent {
            DashboardIntent::SelectRegion { pixel, surface } => {
                let dims = SurfaceDims::new(surface.x as f64, surface.y as f64);
                controller.select_region(pixel.x as f64, pixel.y as f64, dims, &mut *feed);
            }
            DashboardIntent::RequestBroadcast => {
                if controller.request_broadcast() {
                    escalated.send(IncidentEscalated {
                        epoch: controller.epoch(),
                        cause: EscalationCause::Operator,
                    });
                }
            }
            DashboardIntent::NotifyAuthorities => {
                controller.notify_authorities(&mut notifications);
            }
            DashboardIntent::DismissAnalysis => {
                controller.dismiss_analysis();
            }
            DashboardIntent::DismissEmergency => {
                controller.dismiss_emergency();
            }
            DashboardIntent::Search(query) => {
                controller.search(query, &mut notifications);
            }
        }
    }
}

pub fn advance_escalation_timers(
    time: Res<Time>,
    mut controller: ResMut<DashboardController>,
    mut notifications: EventWriter<NotificationEvent>,
    mut escalated: EventWriter<IncidentEscalated>,
) {
    if controller.pending_escalations().is_empty() {
        return;
    }
    if let Some(epoch) = controller.advance(time.delta(), &mut notifications) {
        escalated.send(IncidentEscalated {
            epoch,
            cause: EscalationCause::Timer,
        });
    }
}

// =============================================================================
// Headless stepping
// =============================================================================

/// Largest single frame a headless driver may step.
const HEADLESS_MAX_DELTA: Duration = Duration::from_secs(60);

/// Window-less App running the dashboard on a manual clock.
///
/// Startup has already run when this returns; time stands still until
/// [`step_update`] moves it.
pub fn headless_app(params: DashboardParams) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(params);
    app.add_plugins(crate::MonitorPlugin);
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(HEADLESS_MAX_DELTA);
    step_update(&mut app, Duration::ZERO);
    app
}

/// Run one full frame whose clock advances by exactly `delta`.
pub fn step_update(app: &mut App, delta: Duration) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(delta));
    // Zero-length frames never tick FixedMain, which is what normally
    // releases event buffers for rotation. Nothing here runs in FixedMain.
    if let Some(mut registry) = app.world_mut().get_resource_mut::<EventRegistry>() {
        registry.should_update = ShouldUpdateEvents::Always;
    }
    app.update();
}

// =============================================================================
// Plugin
// =============================================================================

pub struct DashboardPlugin;

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        let params = app
            .world()
            .get_resource::<DashboardParams>()
            .cloned()
            .unwrap_or_default();
        if !app.world().contains_resource::<RiskFeed>() {
            app.insert_resource(RiskFeed::from_params(&params));
        }

        app.insert_resource(DashboardController::new(params))
            .add_event::<DashboardIntent>()
            .add_event::<IncidentEscalated>()
            .add_systems(
                Update,
                (sync_dashboard_params, apply_dashboard_intents)
                    .chain()
                    .in_set(crate::DashboardSet::Intents),
            )
            .add_systems(
                Update,
                advance_escalation_timers.in_set(crate::DashboardSet::Timers),
            );
    }
}
