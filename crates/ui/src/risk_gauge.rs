//! Semicircular risk gauge drawn inside the analysis panel.

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_egui::egui;

use monitor::incident::Epoch;
use monitor::risk::{classify, RiskScore};
use monitor::DashboardController;

use crate::theme;

const ARC_RADIUS: f32 = 80.0;
const ARC_WIDTH: f32 = 12.0;
const TICKS: [u8; 5] = [0, 25, 50, 75, 100];

/// Approach rate of the displayed value, per second.
const EASE_RATE: f32 = 3.0;

/// Value currently shown by the gauge. It restarts from zero for every new
/// incident and eases toward the incident's score.
#[derive(Resource, Debug, Default)]
pub struct GaugeAnimation {
    pub displayed: f32,
    pub epoch: Epoch,
}

/// Exponential ease-out from `current` toward `target` over `dt` seconds.
pub fn ease_toward(current: f32, target: f32, dt: f32) -> f32 {
    let k = 1.0 - (-EASE_RATE * dt.max(0.0)).exp();
    let next = current + (target - current) * k;
    if (target - next).abs() < 0.05 {
        target
    } else {
        next
    }
}

/// Screen angle for a gauge value. 0 maps to the left end, 100 to the right.
fn value_angle(value: f32) -> f32 {
    -PI + PI * value.clamp(0.0, 100.0) / 100.0
}

fn polar(center: egui::Pos2, radius: f32, angle: f32) -> egui::Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}

/// Points along the gauge arc from 0 up to `value`.
pub fn arc_points(center: egui::Pos2, radius: f32, value: f32, segments: usize) -> Vec<egui::Pos2> {
    let end = value_angle(value);
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let a = -PI + (end + PI) * i as f32 / segments as f32;
            polar(center, radius, a)
        })
        .collect()
}

pub fn animate_risk_gauge(
    time: Res<Time>,
    controller: Res<DashboardController>,
    mut gauge: ResMut<GaugeAnimation>,
) {
    let Some(incident) = controller.latest_incident() else {
        return;
    };
    if incident.epoch != gauge.epoch {
        gauge.epoch = incident.epoch;
        gauge.displayed = 0.0;
    }
    let target = incident.risk.value() as f32;
    if gauge.displayed != target {
        gauge.displayed = ease_toward(gauge.displayed, target, time.delta_secs());
    }
}

/// Draw the gauge for `displayed` with `label` underneath.
pub fn risk_gauge(ui: &mut egui::Ui, displayed: f32, label: &str) {
    let assessment = classify(displayed.round() as i32);
    let color = theme::band_color(assessment.band);

    let size = egui::vec2(ui.available_width().min(240.0), 150.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = egui::pos2(rect.center().x, rect.min.y + 110.0);

    painter.add(egui::Shape::line(
        arc_points(center, ARC_RADIUS, 100.0, 48),
        egui::Stroke::new(ARC_WIDTH, egui::Color32::from_gray(51)),
    ));
    if displayed > 0.0 {
        painter.add(egui::Shape::line(
            arc_points(center, ARC_RADIUS, displayed, 48),
            egui::Stroke::new(ARC_WIDTH, color),
        ));
    }

    let tick_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(102));
    for tick in TICKS {
        let angle = value_angle(tick as f32);
        let inner = polar(center, ARC_RADIUS, angle);
        let outer = polar(center, ARC_RADIUS + 15.0, angle);
        painter.line_segment([inner, outer], tick_stroke);
        painter.text(
            outer + egui::vec2(0.0, -6.0),
            egui::Align2::CENTER_BOTTOM,
            tick.to_string(),
            egui::FontId::monospace(8.0),
            theme::TEXT_MUTED,
        );
    }

    painter.text(
        center + egui::vec2(0.0, -18.0),
        egui::Align2::CENTER_CENTER,
        RiskScore::clamped(displayed.round() as i32).to_string(),
        egui::FontId::monospace(32.0),
        color,
    );
    painter.text(
        center + egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        assessment.label(),
        egui::FontId::proportional(13.0),
        color,
    );

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(label.to_uppercase())
                .small()
                .color(theme::TEXT_MUTED),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_converges_and_snaps() {
        let mut v = 0.0;
        for _ in 0..600 {
            v = ease_toward(v, 92.0, 1.0 / 60.0);
        }
        assert_eq!(v, 92.0);
    }

    #[test]
    fn test_ease_is_monotone() {
        let a = ease_toward(0.0, 80.0, 0.1);
        let b = ease_toward(a, 80.0, 0.1);
        assert!(0.0 < a && a < b && b <= 80.0);
        assert_eq!(ease_toward(50.0, 50.0, 0.1), 50.0);
    }

    #[test]
    fn test_arc_spans_upper_semicircle() {
        let center = egui::pos2(100.0, 100.0);
        let full = arc_points(center, 80.0, 100.0, 4);
        assert_eq!(full.len(), 5);
        assert!((full[0] - egui::pos2(20.0, 100.0)).length() < 1e-3);
        assert!((full[2] - egui::pos2(100.0, 20.0)).length() < 1e-3);
        assert!((full[4] - egui::pos2(180.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_arc_clamps_value() {
        let center = egui::pos2(0.0, 0.0);
        let over = arc_points(center, 10.0, 150.0, 8);
        let max = arc_points(center, 10.0, 100.0, 8);
        assert_eq!(over, max);
    }
}
