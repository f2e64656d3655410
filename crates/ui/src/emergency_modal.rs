//! Critical flood warning modal.
//!
//! Shown while the controller is escalating an incident. A red backdrop
//! blocks the map and the panels behind it; the operator either notifies the
//! authorities or dismisses the warning.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::{DashboardController, DashboardIntent};

use crate::briefing::{EMERGENCY_DETECTION, EMERGENCY_FOOTER, EMERGENCY_IMPACT};
use crate::theme;

const MODAL_WIDTH: f32 = 440.0;

/// Seconds for one radar wave to expand and fade.
const WAVE_PERIOD: f32 = 3.0;
const WAVE_COUNT: usize = 4;

/// `(radius_fraction, alpha)` of each radar wave at `elapsed` seconds.
pub fn radar_waves(elapsed: f32) -> [(f32, f32); WAVE_COUNT] {
    let mut waves = [(0.0, 0.0); WAVE_COUNT];
    for (i, wave) in waves.iter_mut().enumerate() {
        let offset = i as f32 * WAVE_PERIOD / WAVE_COUNT as f32;
        let phase = ((elapsed + offset) % WAVE_PERIOD) / WAVE_PERIOD;
        *wave = (phase, 1.0 - phase);
    }
    waves
}

pub fn emergency_modal_ui(
    mut contexts: EguiContexts,
    controller: Res<DashboardController>,
    time: Res<Time>,
    mut intents: EventWriter<DashboardIntent>,
) {
    let emergency = controller.emergency();
    if !emergency.is_modal_open {
        return;
    }

    let ctx = contexts.ctx_mut();

    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("emergency_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_rgba_unmultiplied(60, 0, 0, 150),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click());
        });

    let mut notify = false;
    let mut dismiss = false;

    egui::Window::new("CRITICAL FLOOD WARNING")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(MODAL_WIDTH)
        .order(egui::Order::Foreground)
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(2.0, theme::ALERT))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::same(20)),
        )
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();
            for (fraction, alpha) in radar_waves(time.elapsed_secs()) {
                painter.circle_stroke(
                    rect.center(),
                    rect.width() * 0.5 * fraction,
                    egui::Stroke::new(1.0, theme::with_alpha(theme::ALERT, (alpha * 60.0) as u8)),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.small_button("x").clicked() {
                    dismiss = true;
                }
            });

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("⚠").size(40.0).color(theme::ALERT));
                ui.label(
                    egui::RichText::new("CRITICAL FLOOD WARNING")
                        .strong()
                        .size(22.0)
                        .color(theme::ALERT),
                );
                ui.label(
                    egui::RichText::new("Immediate action required for affected region")
                        .color(theme::TEXT_MUTED),
                );
            });
            ui.add_space(12.0);

            ui.columns(2, |cols| {
                stat_card(
                    &mut cols[0],
                    "RISK LEVEL",
                    egui::RichText::new(emergency.triggering_risk_score.to_string())
                        .monospace()
                        .size(28.0)
                        .color(theme::ALERT),
                );
                stat_card(
                    &mut cols[1],
                    "LOCATION",
                    egui::RichText::new(&emergency.triggering_location).monospace(),
                );
            });
            ui.add_space(12.0);

            egui::Frame::new()
                .fill(theme::PANEL_RAISED)
                .stroke(egui::Stroke::new(1.0, theme::with_alpha(theme::ALERT, 50)))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(EMERGENCY_DETECTION);
                    ui.label(
                        egui::RichText::new(EMERGENCY_IMPACT)
                            .small()
                            .color(theme::TEXT_MUTED),
                    );
                });
            ui.add_space(12.0);

            let width = ui.available_width();
            let notify_button = egui::Button::new(
                egui::RichText::new("NOTIFY AUTHORITIES")
                    .strong()
                    .size(16.0)
                    .color(egui::Color32::WHITE),
            )
            .fill(theme::ALERT);
            if ui.add_sized([width, 44.0], notify_button).clicked() {
                notify = true;
            }
            if ui
                .add_sized([width, 28.0], egui::Button::new("Dismiss Warning"))
                .clicked()
            {
                dismiss = true;
            }

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(EMERGENCY_FOOTER)
                        .small()
                        .color(theme::TEXT_MUTED),
                );
            });
        });

    if notify {
        intents.send(DashboardIntent::NotifyAuthorities);
    } else if dismiss {
        intents.send(DashboardIntent::DismissEmergency);
    }
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: egui::RichText) {
    egui::Frame::new()
        .fill(theme::PANEL_RAISED)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(label).small().color(theme::TEXT_MUTED));
                ui.label(value);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_waves_staggered() {
        let waves = radar_waves(0.0);
        assert_eq!(waves[0], (0.0, 1.0));
        for pair in waves.windows(2) {
            assert!(pair[1].0 > pair[0].0);
        }
    }

    #[test]
    fn test_radar_waves_repeat_each_period() {
        let a = radar_waves(0.4);
        let b = radar_waves(0.4 + WAVE_PERIOD);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.0 - y.0).abs() < 1e-4);
        }
    }
}
