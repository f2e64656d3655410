use bevy::prelude::*;

pub mod agent_protocol;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod dashboard_params;
pub mod escalation;
pub mod incident;
pub mod notifications;
pub mod projection;
pub mod risk;
pub mod risk_source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_harness;

#[cfg(test)]
mod integration_tests;

pub use controller::DashboardController;
pub use dashboard::{DashboardIntent, EscalationCause, IncidentEscalated};
pub use dashboard_params::{DashboardParams, ParamsError};
pub use notifications::{NotificationEvent, NotificationLog, NotificationPriority};

/// Per-frame ordering of the dashboard systems.
///
/// Intents are applied before timers advance, so a click and a due escalation
/// in the same frame resolve against the new incident. Notifications raised by
/// either are collected in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DashboardSet {
    Intents,
    Timers,
    Notifications,
}

pub struct MonitorPlugin;

impl Plugin for MonitorPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                DashboardSet::Intents,
                DashboardSet::Timers,
                DashboardSet::Notifications,
            )
                .chain(),
        );

        app.add_plugins((
            dashboard_params::DashboardParamsPlugin,
            notifications::NotificationsPlugin,
            dashboard::DashboardPlugin,
        ));
    }
}
