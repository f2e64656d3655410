//! Bottom-right toast stack fed by the `NotificationLog`.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::notifications::Notification;
use monitor::NotificationLog;

use crate::theme;

const TOAST_WIDTH: f32 = 320.0;
const MARGIN: f32 = 16.0;
const MAX_VISIBLE: usize = 5;

/// Toasts to draw, most urgent first and newest first within a priority.
pub fn visible_toasts(active: &[Notification]) -> Vec<&Notification> {
    let mut list: Vec<&Notification> = active.iter().filter(|n| !n.dismissed).collect();
    list.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.created_at.total_cmp(&a.created_at))
    });
    list.truncate(MAX_VISIBLE);
    list
}

pub fn toasts_ui(mut contexts: EguiContexts, mut log: ResMut<NotificationLog>) {
    if log.active.is_empty() {
        return;
    }

    let mut dismiss_id = None;

    egui::Area::new(egui::Id::new("toast_stack"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-MARGIN, -MARGIN))
        .order(egui::Order::Tooltip)
        .show(contexts.ctx_mut(), |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for toast in visible_toasts(&log.active) {
                let color = theme::priority_color(toast.priority);
                egui::Frame::new()
                    .fill(theme::PANEL_RAISED)
                    .stroke(egui::Stroke::new(1.0, color))
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&toast.title).strong().color(color));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("x").clicked() {
                                        dismiss_id = Some(toast.id);
                                    }
                                },
                            );
                        });
                        if !toast.description.is_empty() {
                            ui.label(
                                egui::RichText::new(&toast.description)
                                    .small()
                                    .color(theme::TEXT),
                            );
                        }
                    });
                ui.add_space(6.0);
            }
        });

    if let Some(id) = dismiss_id {
        log.dismiss(id);
    }
}
