//! Left-hand mission dock and the side window for the selected item.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::{DashboardController, DashboardParams, NotificationLog};

use crate::map_view::MapLayers;
use crate::theme;

const DOCK_COLLAPSED: f32 = 56.0;
const DOCK_EXPANDED: f32 = 200.0;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockItem {
    #[default]
    Layers,
    Alerts,
    Satellites,
    Radar,
    History,
    Settings,
}

impl DockItem {
    pub const ALL: [DockItem; 6] = [
        DockItem::Layers,
        DockItem::Alerts,
        DockItem::Satellites,
        DockItem::Radar,
        DockItem::History,
        DockItem::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DockItem::Layers => "Map Layers",
            DockItem::Alerts => "Active Alerts",
            DockItem::Satellites => "Satellite Feed",
            DockItem::Radar => "Radar Systems",
            DockItem::History => "Analysis History",
            DockItem::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DockItem::Layers => "🗺",
            DockItem::Alerts => "⚠",
            DockItem::Satellites => "🛰",
            DockItem::Radar => "📡",
            DockItem::History => "🕘",
            DockItem::Settings => "⚙",
        }
    }
}

/// Dock selection. One item is always active; its window can be hidden.
#[derive(Resource, Debug)]
pub struct MissionDock {
    pub active: DockItem,
    pub window_open: bool,
    pub expanded: bool,
}

impl Default for MissionDock {
    fn default() -> Self {
        Self {
            active: DockItem::Layers,
            window_open: false,
            expanded: false,
        }
    }
}

impl MissionDock {
    /// Clicking the active item toggles its window; another item takes over.
    pub fn select(&mut self, item: DockItem) {
        if self.active == item {
            self.window_open = !self.window_open;
        } else {
            self.active = item;
            self.window_open = true;
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn mission_dock_ui(
    mut contexts: EguiContexts,
    mut dock: ResMut<MissionDock>,
    log: Res<NotificationLog>,
) {
    let alerting = log.has_active_emergency();
    let width = if dock.expanded {
        DOCK_EXPANDED
    } else {
        DOCK_COLLAPSED
    };
    let mut clicked = None;

    let response = egui::SidePanel::left("mission_dock")
        .exact_width(width)
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(1.0, theme::CYAN_DIM))
                .inner_margin(egui::Margin::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.add_space(80.0);
            for item in DockItem::ALL {
                let active = dock.active == item;
                let text = if dock.expanded {
                    format!("{}  {}", item.icon(), item.label())
                } else {
                    item.icon().to_string()
                };
                let color = if active { theme::CYAN } else { theme::TEXT_MUTED };
                let button = egui::Button::new(egui::RichText::new(text).size(16.0).color(color))
                    .fill(if active {
                        theme::with_alpha(theme::CYAN, 25)
                    } else {
                        egui::Color32::TRANSPARENT
                    });
                let response = ui.add_sized([ui.available_width(), 40.0], button);
                if item == DockItem::Alerts && alerting {
                    let badge = response.rect.right_top() + egui::vec2(-8.0, 8.0);
                    ui.painter().circle_filled(badge, 4.0, theme::ALERT);
                }
                if response.clicked() {
                    clicked = Some(item);
                }
                response.on_hover_text(item.label());
                ui.add_space(2.0);
            }
        })
        .response;

    dock.expanded = response.hovered() || response.contains_pointer();
    if let Some(item) = clicked {
        dock.select(item);
    }
}

pub fn dock_window_ui(
    mut contexts: EguiContexts,
    mut dock: ResMut<MissionDock>,
    mut layers: ResMut<MapLayers>,
    mut log: ResMut<NotificationLog>,
    controller: Res<DashboardController>,
    params: Res<DashboardParams>,
) {
    if !dock.window_open {
        return;
    }
    let item = dock.active;
    let mut open = true;

    egui::Window::new(item.label())
        .open(&mut open)
        .default_width(300.0)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(DOCK_EXPANDED + 12.0, 64.0))
        .resizable(false)
        .collapsible(false)
        .show(contexts.ctx_mut(), |ui| match item {
            DockItem::Layers => {
                ui.checkbox(&mut layers.hud_grid, "HUD grid");
                ui.checkbox(&mut layers.landmasses, "Landmasses");
                ui.checkbox(&mut layers.flood_zones, "Flood zones");
            }
            DockItem::Alerts => {
                ui.label(format!("{} entries", log.journal.len()));
                ui.separator();
                if log.journal.is_empty() {
                    ui.label("No alerts recorded yet.");
                    return;
                }
                let mut dismiss = None;
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for n in log.active.iter().filter(|n| !n.dismissed) {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(n.priority.label())
                                    .small()
                                    .color(theme::priority_color(n.priority)),
                            );
                            ui.label(&n.title);
                            if ui.small_button("x").clicked() {
                                dismiss = Some(n.id);
                            }
                        });
                    }
                    ui.separator();
                    for entry in log.journal.iter().rev() {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("{:>7.1}s", entry.created_at))
                                    .monospace()
                                    .small()
                                    .color(theme::TEXT_MUTED),
                            );
                            ui.label(
                                egui::RichText::new(&entry.title)
                                    .color(theme::priority_color(entry.priority)),
                            );
                        })
                        .response
                        .on_hover_text(&entry.description);
                    }
                });
                if let Some(id) = dismiss {
                    log.dismiss(id);
                }
            }
            DockItem::Satellites => {
                feed_rows(
                    ui,
                    &[
                        ("Platform", "SENTINEL-1B"),
                        ("Sensor", "C-band SAR"),
                        ("Mode", "Interferometric Wide"),
                        ("Link", "GEE API"),
                    ],
                );
            }
            DockItem::Radar => {
                feed_rows(
                    ui,
                    &[
                        ("SAR feed", "STREAMING"),
                        ("Latency", "45ms"),
                        ("Sync", "REAL-TIME"),
                    ],
                );
            }
            DockItem::History => {
                let zones = controller.flood_zones();
                ui.label(format!("{} regions analyzed", zones.len()));
                ui.separator();
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for zone in zones.iter().rev() {
                        let band = zone.risk.band();
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(zone.epoch.to_string())
                                    .monospace()
                                    .color(theme::TEXT_MUTED),
                            );
                            ui.label(egui::RichText::new(zone.center.label()).monospace());
                            ui.label(
                                egui::RichText::new(format!("{} {}", zone.risk, band.label()))
                                    .color(theme::band_color(band)),
                            );
                        });
                    }
                });
            }
            DockItem::Settings => {
                let delay = params.escalation_delay_ms.to_string();
                let scores = format!(
                    "{}-{}",
                    params.simulated_risk_min, params.simulated_risk_max
                );
                let radii = format!(
                    "{:.1}-{:.1}",
                    params.zone_radius_min, params.zone_radius_max
                );
                let seed = params
                    .rng_seed
                    .map_or_else(|| "default".to_string(), |s| s.to_string());
                feed_rows(
                    ui,
                    &[
                        ("Escalation delay (ms)", delay.as_str()),
                        ("Simulated risk", scores.as_str()),
                        ("Zone radius", radii.as_str()),
                        ("RNG seed", seed.as_str()),
                    ],
                );
                ui.separator();
                ui.label(
                    egui::RichText::new("Override with SENTINEL_PARAMS=<file.json>")
                        .small()
                        .color(theme::TEXT_MUTED),
                );
            }
        });

    if !open {
        dock.window_open = false;
    }
}

fn feed_rows(ui: &mut egui::Ui, rows: &[(&str, &str)]) {
    egui::Grid::new("feed_rows")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.label(egui::RichText::new(*label).color(theme::TEXT_MUTED));
                ui.label(egui::RichText::new(*value).monospace().color(theme::CYAN));
                ui.end_row();
            }
        });
}
