//! Top telemetry bar: brand, scrolling feed status, location search and the
//! UTC clock.

use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use monitor::{DashboardController, DashboardIntent};

use crate::briefing::FEED_STATUS;
use crate::theme;

const BAR_HEIGHT: f32 = 48.0;

/// Ticker speed in pixels per second.
const TICKER_SPEED: f32 = 30.0;

// =============================================================================
// Resources
// =============================================================================

/// Horizontal scroll offset of the status ticker.
#[derive(Resource, Default)]
pub struct TickerScroll {
    pub offset: f32,
}

/// Text in the search box. Kept after submission.
#[derive(Resource, Default)]
pub struct SearchField {
    pub query: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// `HH:MM:SS` for a UNIX timestamp, in UTC.
pub fn utc_clock(unix_secs: u64) -> String {
    let day_secs = unix_secs % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        day_secs / 3600,
        (day_secs / 60) % 60,
        day_secs % 60
    )
}

/// Feed status cells followed by the live region count.
pub fn status_cells(active_regions: usize) -> Vec<(String, String)> {
    FEED_STATUS
        .iter()
        .map(|s| (s.label.to_string(), s.value.to_string()))
        .chain(std::iter::once((
            "ACTIVE REGIONS".to_string(),
            active_regions.to_string(),
        )))
        .collect()
}

// =============================================================================
// System
// =============================================================================

pub fn telemetry_bar_ui(
    mut contexts: EguiContexts,
    controller: Res<DashboardController>,
    time: Res<Time>,
    mut scroll: ResMut<TickerScroll>,
    mut search: ResMut<SearchField>,
    mut intents: EventWriter<DashboardIntent>,
) {
    scroll.offset += time.delta_secs() * TICKER_SPEED;
    let cells = status_cells(controller.flood_zones().len());
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let live_alpha = (160.0 + 95.0 * (time.elapsed_secs() * 4.0).sin()) as u8;

    let mut submitted = None;

    egui::TopBottomPanel::top("telemetry_bar")
        .exact_height(BAR_HEIGHT)
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(1.0, theme::CYAN_DIM))
                .inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                egui::Frame::new()
                    .fill(theme::with_alpha(theme::CYAN, 40))
                    .stroke(egui::Stroke::new(1.0, theme::CYAN_DIM))
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::symmetric(6, 4))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("OS").strong().color(theme::CYAN));
                    });
                ui.label(egui::RichText::new("ORBITAL").strong());
                ui.label(egui::RichText::new("//").strong().color(theme::CYAN));
                ui.label(egui::RichText::new("SENTINEL").strong().color(theme::TEXT_MUTED));
                ui.separator();

                // Right-hand cluster first so the ticker takes what is left.
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new("LIVE")
                            .small()
                            .strong()
                            .color(theme::CYAN),
                    );
                    let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter().circle_filled(
                        dot.center(),
                        4.0,
                        theme::with_alpha(theme::CYAN, live_alpha),
                    );
                    ui.separator();
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new("UTC").monospace().small().color(theme::TEXT_MUTED));
                        ui.label(egui::RichText::new(utc_clock(now)).monospace());
                    });
                    ui.separator();

                    let response = ui.add(
                        egui::TextEdit::singleline(&mut search.query)
                            .hint_text("Enter coordinates or city...")
                            .desired_width(200.0)
                            .font(egui::TextStyle::Monospace),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = Some(search.query.clone());
                    }
                    ui.label(egui::RichText::new("🔍").color(theme::TEXT_MUTED));

                    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                        let output = egui::ScrollArea::horizontal()
                            .id_salt("status_ticker")
                            .scroll_bar_visibility(
                                egui::scroll_area::ScrollBarVisibility::AlwaysHidden,
                            )
                            .enable_scrolling(false)
                            .horizontal_scroll_offset(scroll.offset)
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    // Two copies so the wrap-around is seamless.
                                    for (label, value) in cells.iter().chain(cells.iter()) {
                                        let (dot, _) = ui.allocate_exact_size(
                                            egui::vec2(6.0, 6.0),
                                            egui::Sense::hover(),
                                        );
                                        ui.painter().circle_filled(dot.center(), 3.0, theme::CYAN);
                                        ui.label(
                                            egui::RichText::new(format!("{label}:"))
                                                .monospace()
                                                .small()
                                                .color(theme::TEXT_MUTED),
                                        );
                                        ui.label(
                                            egui::RichText::new(value)
                                                .monospace()
                                                .small()
                                                .color(theme::CYAN),
                                        );
                                        ui.add_space(18.0);
                                    }
                                });
                            });
                        let half = output.content_size.x * 0.5;
                        if half > 0.0 && scroll.offset >= half {
                            scroll.offset -= half;
                        }
                    });
                });
            });
        });

    if let Some(query) = submitted {
        intents.send(DashboardIntent::Search(query));
    }
}
