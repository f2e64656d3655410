//! Right-hand analysis panel for the incident under review.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::{DashboardController, DashboardIntent};

use crate::briefing::{self, Exposure};
use crate::risk_gauge::{risk_gauge, GaugeAnimation};
use crate::theme;

const PANEL_WIDTH: f32 = 380.0;

fn exposure_color(exposure: Exposure) -> egui::Color32 {
    match exposure {
        Exposure::Critical => theme::ALERT,
        Exposure::High => egui::Color32::from_rgb(251, 146, 60),
        Exposure::Moderate => egui::Color32::from_rgb(250, 204, 21),
    }
}

pub fn analysis_panel_ui(
    mut contexts: EguiContexts,
    controller: Res<DashboardController>,
    gauge: Res<GaugeAnimation>,
    mut intents: EventWriter<DashboardIntent>,
) {
    let analysis = controller.analysis();
    if !analysis.is_panel_open {
        return;
    }

    let mut broadcast = false;
    let mut close = false;

    egui::SidePanel::right("analysis_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(1.0, theme::CYAN_DIM))
                .inner_margin(egui::Margin::same(12)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("ANALYSIS RESULTS").strong().size(16.0));
                    ui.label(
                        egui::RichText::new(&analysis.location_label)
                            .monospace()
                            .small()
                            .color(theme::TEXT_MUTED),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("x").clicked() {
                        close = true;
                    }
                });
            });
            ui.separator();

            egui::TopBottomPanel::bottom("analysis_actions")
                .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(0, 8)))
                .show_inside(ui, |ui| {
                    let width = ui.available_width();
                    let alert = egui::Button::new(
                        egui::RichText::new("BROADCAST ALERT")
                            .strong()
                            .size(16.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(theme::ALERT);
                    if ui.add_sized([width, 44.0], alert).clicked() {
                        broadcast = true;
                    }
                    if ui
                        .add_sized([width, 28.0], egui::Button::new("Dismiss Analysis"))
                        .clicked()
                    {
                        close = true;
                    }
                });

            egui::ScrollArea::vertical().show(ui, |ui| {
                risk_gauge(ui, gauge.displayed, "Flood Risk Assessment");
                ui.add_space(12.0);

                egui::Grid::new("analysis_stats")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        for (i, stat) in briefing::ANALYSIS_STATS.iter().enumerate() {
                            egui::Frame::new()
                                .fill(theme::PANEL_RAISED)
                                .corner_radius(egui::CornerRadius::same(4))
                                .inner_margin(egui::Margin::same(8))
                                .show(ui, |ui| {
                                    ui.set_min_width(PANEL_WIDTH / 2.0 - 24.0);
                                    ui.label(
                                        egui::RichText::new(stat.label.to_uppercase())
                                            .small()
                                            .color(theme::TEXT_MUTED),
                                    );
                                    ui.label(egui::RichText::new(stat.value).monospace().size(18.0));
                                    ui.label(
                                        egui::RichText::new(stat.trend)
                                            .monospace()
                                            .small()
                                            .color(theme::CYAN),
                                    );
                                });
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
                ui.add_space(12.0);

                ui.label(
                    egui::RichText::new("⚠ CRITICAL INFRASTRUCTURE AT RISK")
                        .strong()
                        .color(theme::ALERT),
                );
                for facility in briefing::INFRASTRUCTURE {
                    let color = exposure_color(facility.exposure);
                    egui::Frame::new()
                        .fill(theme::PANEL_RAISED)
                        .corner_radius(egui::CornerRadius::same(4))
                        .inner_margin(egui::Margin::same(8))
                        .show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(facility.name);
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{:.1}km from flood zone",
                                            facility.distance_km
                                        ))
                                        .monospace()
                                        .small()
                                        .color(theme::TEXT_MUTED),
                                    );
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.label(
                                            egui::RichText::new(facility.exposure.label())
                                                .small()
                                                .color(color),
                                        );
                                    },
                                );
                            });
                        });
                    ui.add_space(4.0);
                }
                ui.add_space(12.0);

                ui.label(egui::RichText::new("ESTIMATED IMPACT TIMELINE").strong());
                egui::Frame::new()
                    .fill(theme::PANEL_RAISED)
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        for (offset, event) in briefing::IMPACT_TIMELINE {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(format!("{offset:<5}"))
                                        .monospace()
                                        .color(theme::ALERT),
                                );
                                ui.label(egui::RichText::new(event).color(theme::TEXT_MUTED));
                            });
                        }
                    });
            });
        });

    if broadcast {
        intents.send(DashboardIntent::RequestBroadcast);
    } else if close {
        intents.send(DashboardIntent::DismissAnalysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_exposure_uses_alert_color() {
        assert_eq!(exposure_color(Exposure::Critical), theme::ALERT);
        assert_ne!(exposure_color(Exposure::High), exposure_color(Exposure::Moderate));
    }
}
