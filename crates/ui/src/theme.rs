use bevy_egui::{egui, EguiContexts};

use monitor::notifications::NotificationPriority;
use monitor::risk::RiskBand;

// Void panels with cyan accents
pub const VOID: egui::Color32 = egui::Color32::from_rgb(8, 12, 20);
pub const PANEL: egui::Color32 = egui::Color32::from_rgb(14, 20, 32);
pub const PANEL_RAISED: egui::Color32 = egui::Color32::from_rgb(22, 30, 46);
pub const CYAN: egui::Color32 = egui::Color32::from_rgb(0, 230, 255);
pub const CYAN_DIM: egui::Color32 = egui::Color32::from_rgb(0, 110, 130);
pub const ALERT: egui::Color32 = egui::Color32::from_rgb(240, 82, 82);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(120, 140, 160);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(210, 225, 235);

pub fn apply_sentinel_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let inactive = egui::Color32::from_rgb(24, 34, 52);
    let hover = egui::Color32::from_rgb(30, 60, 80);
    let active = CYAN_DIM;

    style.visuals.dark_mode = true;
    style.visuals.override_text_color = Some(TEXT);

    style.visuals.widgets.noninteractive.bg_fill = PANEL;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, CYAN);

    style.visuals.window_fill = PANEL;
    style.visuals.panel_fill = PANEL;
    style.visuals.window_stroke = egui::Stroke::new(1.0, CYAN_DIM);
    style.visuals.extreme_bg_color = VOID;
    style.visuals.faint_bg_color = PANEL_RAISED;

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, CYAN);

    // Sharp HUD corners
    let window_rounding = egui::CornerRadius::same(4);
    let widget_rounding = egui::CornerRadius::same(2);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}

/// Display color for a risk band.
pub fn band_color(band: RiskBand) -> egui::Color32 {
    let [r, g, b] = band.rgb();
    egui::Color32::from_rgb(r, g, b)
}

pub fn priority_color(priority: NotificationPriority) -> egui::Color32 {
    match priority {
        NotificationPriority::Emergency => ALERT,
        NotificationPriority::Info => CYAN,
        NotificationPriority::Positive => egui::Color32::from_rgb(80, 220, 140),
    }
}

/// Same color with a new alpha, unmultiplied.
pub fn with_alpha(color: egui::Color32, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_distinct() {
        let colors = [
            band_color(RiskBand::Low),
            band_color(RiskBand::Moderate),
            band_color(RiskBand::High),
            band_color(RiskBand::Critical),
        ];
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j], "Band colors must be distinct");
            }
        }
    }

    #[test]
    fn test_priority_colors_distinct() {
        let colors = [
            priority_color(NotificationPriority::Emergency),
            priority_color(NotificationPriority::Info),
            priority_color(NotificationPriority::Positive),
        ];
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j], "Priority colors must be distinct");
            }
        }
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = with_alpha(CYAN, 255);
        assert_eq!(c, CYAN);
        assert_eq!(with_alpha(CYAN, 0).a(), 0);
    }
}
