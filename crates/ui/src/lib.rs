use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use monitor::DashboardSet;

pub mod analysis_panel;
pub mod briefing;
pub mod emergency_modal;
pub mod map_view;
pub mod mission_dock;
pub mod risk_gauge;
pub mod telemetry_bar;
pub mod theme;
pub mod toasts;

/// Display surfaces for the dashboard.
///
/// Every surface reads the controller after the frame's intents, timers and
/// notifications have been processed, and raises its own intents for the next
/// frame. Panels are drawn in egui's required order: top bar, side panels,
/// then the central map; floating windows come last.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<map_view::MapLayers>()
            .init_resource::<map_view::ClickReticle>()
            .init_resource::<mission_dock::MissionDock>()
            .init_resource::<risk_gauge::GaugeAnimation>()
            .init_resource::<telemetry_bar::TickerScroll>()
            .init_resource::<telemetry_bar::SearchField>()
            .add_systems(Startup, theme::apply_sentinel_theme)
            .add_systems(
                Update,
                (map_view::tick_click_reticle, risk_gauge::animate_risk_gauge)
                    .after(DashboardSet::Notifications),
            )
            .add_systems(
                Update,
                (
                    telemetry_bar::telemetry_bar_ui,
                    mission_dock::mission_dock_ui,
                    analysis_panel::analysis_panel_ui,
                    map_view::map_view_ui,
                    mission_dock::dock_window_ui,
                    emergency_modal::emergency_modal_ui,
                    toasts::toasts_ui,
                )
                    .chain()
                    .after(risk_gauge::animate_risk_gauge)
                    .after(DashboardSet::Notifications),
            );
    }
}
