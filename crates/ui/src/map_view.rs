//! Central map surface.
//!
//! Draws a stylised world (HUD grid, landmass silhouettes), the flood-zone
//! history and a short-lived click reticle. A click anywhere on the surface
//! raises [`DashboardIntent::SelectRegion`] with the pointer position relative
//! to the surface's top-left corner.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::incident::FloodZone;
use monitor::projection::unproject;
use monitor::{DashboardController, DashboardIntent};

use crate::theme;

// =============================================================================
// Constants
// =============================================================================

/// Spacing of the HUD grid lines in pixels.
const GRID_SPACING: f32 = 40.0;

/// Flood-zone overlay diameter per map unit of radius.
const ZONE_PX_PER_UNIT: f32 = 20.0;

/// How long the click reticle stays on screen.
const RETICLE_SECS: f32 = 1.0;

/// Landmass silhouettes in a 1000x600 design space. Each entry is a start
/// point followed by quadratic segments `(control, end)`.
const LANDMASSES: [([f32; 2], [([f32; 2], [f32; 2]); 4]); 5] = [
    (
        [150.0, 200.0],
        [
            ([200.0, 180.0], [250.0, 200.0]),
            ([280.0, 220.0], [270.0, 260.0]),
            ([250.0, 290.0], [200.0, 280.0]),
            ([160.0, 260.0], [150.0, 200.0]),
        ],
    ),
    (
        [400.0, 150.0],
        [
            ([450.0, 130.0], [500.0, 150.0]),
            ([550.0, 180.0], [540.0, 230.0]),
            ([510.0, 270.0], [450.0, 260.0]),
            ([400.0, 230.0], [400.0, 150.0]),
        ],
    ),
    (
        [600.0, 180.0],
        [
            ([700.0, 160.0], [750.0, 200.0]),
            ([780.0, 250.0], [750.0, 300.0]),
            ([700.0, 340.0], [650.0, 320.0]),
            ([600.0, 280.0], [600.0, 180.0]),
        ],
    ),
    (
        [300.0, 350.0],
        [
            ([350.0, 330.0], [400.0, 360.0]),
            ([430.0, 400.0], [400.0, 440.0]),
            ([350.0, 460.0], [300.0, 430.0]),
            ([280.0, 390.0], [300.0, 350.0]),
        ],
    ),
    (
        [800.0, 250.0],
        [
            ([850.0, 230.0], [900.0, 260.0]),
            ([930.0, 300.0], [900.0, 350.0]),
            ([850.0, 380.0], [800.0, 350.0]),
            ([770.0, 300.0], [800.0, 250.0]),
        ],
    ),
];

const DESIGN_SIZE: egui::Vec2 = egui::vec2(1000.0, 600.0);

// =============================================================================
// Resources
// =============================================================================

/// Which map layers are drawn. Toggled from the mission dock.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLayers {
    pub hud_grid: bool,
    pub landmasses: bool,
    pub flood_zones: bool,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self {
            hud_grid: true,
            landmasses: true,
            flood_zones: true,
        }
    }
}

/// Most recent click position, relative to the map surface.
#[derive(Resource, Default)]
pub struct ClickReticle {
    pub pos: Option<egui::Vec2>,
    pub age: f32,
}

// =============================================================================
// Geometry helpers
// =============================================================================

fn quad_bezier(p0: egui::Pos2, p1: egui::Pos2, p2: egui::Pos2, t: f32) -> egui::Pos2 {
    let u = 1.0 - t;
    egui::pos2(
        u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
        u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
    )
}

/// Scale a design-space point onto `rect`.
fn to_screen(rect: egui::Rect, design: [f32; 2]) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + design[0] / DESIGN_SIZE.x * rect.width(),
        rect.min.y + design[1] / DESIGN_SIZE.y * rect.height(),
    )
}

/// Sampled outline of one landmass on `rect`.
pub fn landmass_outline(index: usize, rect: egui::Rect, samples_per_segment: usize) -> Vec<egui::Pos2> {
    let Some((start, segments)) = LANDMASSES.get(index) else {
        return Vec::new();
    };
    let samples = samples_per_segment.max(1);
    let mut points = Vec::with_capacity(segments.len() * samples);
    let mut from = to_screen(rect, *start);
    for (control, end) in segments {
        let control = to_screen(rect, *control);
        let end = to_screen(rect, *end);
        for i in 0..samples {
            points.push(quad_bezier(from, control, end, i as f32 / samples as f32));
        }
        from = end;
    }
    points
}

/// Fill mesh for an outline, fanned from its centroid.
///
/// Landmass outlines are concave in places but star-shaped around their
/// centroid, so a fan covers them without overlap.
pub fn outline_fill(outline: &[egui::Pos2], color: egui::Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    if outline.len() < 3 {
        return mesh;
    }
    let sum = outline
        .iter()
        .fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let centroid = (sum / outline.len() as f32).to_pos2();

    mesh.colored_vertex(centroid, color);
    for p in outline {
        mesh.colored_vertex(*p, color);
    }
    let n = outline.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Screen center and radius of a flood-zone overlay on `rect`.
pub fn zone_circle(zone: &FloodZone, rect: egui::Rect) -> (egui::Pos2, f32) {
    let (x, y) = unproject(zone.center, rect.width() as f64, rect.height() as f64);
    let center = egui::pos2(rect.min.x + x as f32, rect.min.y + y as f32);
    (center, zone.radius * ZONE_PX_PER_UNIT * 0.5)
}

/// Reticle `(scale, alpha)` at `age` seconds, or `None` once it has faded.
pub fn reticle_frame(age: f32) -> Option<(f32, f32)> {
    if !(0.0..RETICLE_SECS).contains(&age) {
        return None;
    }
    let t = age / RETICLE_SECS;
    Some((2.0 * t, 1.0 - t))
}

// =============================================================================
// Systems
// =============================================================================

pub fn tick_click_reticle(time: Res<Time>, mut reticle: ResMut<ClickReticle>) {
    if reticle.pos.is_none() {
        return;
    }
    reticle.age += time.delta_secs();
    if reticle_frame(reticle.age).is_none() {
        reticle.pos = None;
    }
}

pub fn map_view_ui(
    mut contexts: EguiContexts,
    controller: Res<DashboardController>,
    layers: Res<MapLayers>,
    time: Res<Time>,
    mut reticle: ResMut<ClickReticle>,
    mut intents: EventWriter<DashboardIntent>,
) {
    let modal_open = controller.emergency().is_modal_open;
    let pulse = 0.5 + 0.5 * (time.elapsed_secs() * 3.0).sin();

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme::VOID))
        .show(contexts.ctx_mut(), |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click());
            let rect = response.rect;

            if layers.hud_grid {
                draw_hud_grid(&painter, rect);
            }

            if layers.landmasses {
                let fill = egui::Color32::from_rgba_unmultiplied(13, 52, 58, 90);
                for i in 0..LANDMASSES.len() {
                    let outline = landmass_outline(i, rect, 8);
                    painter.add(egui::Shape::mesh(outline_fill(&outline, fill)));
                    painter.add(egui::Shape::closed_line(
                        outline,
                        egui::Stroke::new(1.0, theme::with_alpha(theme::CYAN_DIM, 120)),
                    ));
                }
            }

            if layers.flood_zones {
                for zone in controller.flood_zones() {
                    let (center, radius) = zone_circle(zone, rect);
                    let alpha = (70.0 + 50.0 * pulse) as u8;
                    painter.circle_filled(center, radius, theme::with_alpha(theme::ALERT, alpha));
                    painter.circle_stroke(center, radius, egui::Stroke::new(1.0, theme::ALERT));
                }
            }

            if let Some(pos) = reticle.pos {
                if let Some((scale, alpha)) = reticle_frame(reticle.age) {
                    draw_reticle(&painter, rect.min + pos, scale, alpha);
                }
            }

            draw_overlays(&painter, rect);

            if response.clicked() && !modal_open {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let local = pointer - rect.min;
                    reticle.pos = Some(local);
                    reticle.age = 0.0;
                    intents.send(DashboardIntent::SelectRegion {
                        pixel: Vec2::new(local.x, local.y),
                        surface: Vec2::new(rect.width(), rect.height()),
                    });
                }
            }
        });
}

fn draw_hud_grid(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(0.5, theme::with_alpha(theme::CYAN, 18));
    let mut x = rect.min.x;
    while x <= rect.max.x {
        painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
        x += GRID_SPACING;
    }
    let mut y = rect.min.y;
    while y <= rect.max.y {
        painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
        y += GRID_SPACING;
    }
}

fn draw_reticle(painter: &egui::Painter, center: egui::Pos2, scale: f32, alpha: f32) {
    let a = (alpha * 255.0) as u8;
    let color = theme::with_alpha(theme::CYAN, a);
    painter.circle_stroke(center, 20.0 * scale, egui::Stroke::new(2.0, color));
    painter.circle_stroke(center, 10.0 * scale, egui::Stroke::new(1.0, color));
    let stroke = egui::Stroke::new(1.0, color);
    for (dx, dy) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
        let dir = egui::vec2(dx, dy);
        painter.line_segment([center + dir * 12.0 * scale, center + dir * 25.0 * scale], stroke);
    }
}

fn draw_overlays(painter: &egui::Painter, rect: egui::Rect) {
    let mono = egui::FontId::monospace(12.0);

    painter.text(
        egui::pos2(rect.center().x, rect.max.y - 20.0),
        egui::Align2::CENTER_CENTER,
        "Click anywhere to analyze region",
        mono.clone(),
        theme::TEXT_MUTED,
    );

    let corner = egui::pos2(rect.max.x - 16.0, rect.min.y + 16.0);
    let lines = [
        ("VIEWPORT", theme::TEXT_MUTED),
        ("LAT: 28.6139° N", theme::CYAN),
        ("LNG: 77.2090° E", theme::CYAN),
        ("ZOOM: 8.5x", theme::TEXT_MUTED),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        painter.text(
            corner + egui::vec2(0.0, i as f32 * 16.0),
            egui::Align2::RIGHT_TOP,
            *text,
            mono.clone(),
            *color,
        );
    }
}
