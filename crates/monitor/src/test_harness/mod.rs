//! # TestDashboard: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `MonitorPlugin` so the
//! full intent -> controller -> timer -> notification pipeline can run without
//! a window. Time is driven manually: each frame is a full `app.update()`
//! whose clock advances by an exact delta.

mod assertions;
mod queries;

use std::time::Duration;

use bevy::app::App;
use bevy::ecs::event::EventCursor;
use bevy::prelude::*;

use crate::dashboard::{headless_app, step_update, DashboardIntent, IncidentEscalated};
use crate::dashboard_params::DashboardParams;
use crate::risk_source::{RiskFeed, ScriptedRiskSource};

/// Map surface used by [`TestDashboard::click`] unless overridden.
pub const TEST_SURFACE: Vec2 = Vec2::new(1000.0, 600.0);

/// A headless Bevy App wrapping `MonitorPlugin` for integration testing.
pub struct TestDashboard {
    app: App,
    surface: Vec2,
    escalation_cursor: EventCursor<IncidentEscalated>,
    escalations: Vec<IncidentEscalated>,
}

impl Default for TestDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDashboard {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default tunables with the seeded random risk feed.
    pub fn new() -> Self {
        Self::with_params(DashboardParams::default())
    }

    /// Build with custom tunables, inserted before the plugin so the
    /// controller and feed pick them up at construction.
    pub fn with_params(params: DashboardParams) -> Self {
        let app = headless_app(params);
        let escalation_cursor = app
            .world()
            .resource::<Events<IncidentEscalated>>()
            .get_cursor_current();

        Self {
            app,
            surface: TEST_SURFACE,
            escalation_cursor,
            escalations: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    /// Replace the random feed with a scripted sequence of scores.
    pub fn with_scores(mut self, scores: impl IntoIterator<Item = u8>) -> Self {
        self.app
            .insert_resource(RiskFeed::new(ScriptedRiskSource::new(scores)));
        self
    }

    /// Use a different map surface size for subsequent clicks.
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface = Vec2::new(width, height);
        self
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Advance `Time` by `delta`, run one `Update` pass and collect the
    /// escalations it emitted.
    pub fn frame(&mut self, delta: Duration) {
        step_update(&mut self.app, delta);

        let events = self.app.world().resource::<Events<IncidentEscalated>>();
        self.escalations
            .extend(self.escalation_cursor.read(events).copied());
    }

    /// Run `ms` milliseconds of frames at roughly 60 fps.
    pub fn advance_ms(&mut self, ms: u64) {
        const FRAME_MS: u64 = 16;
        let mut left = ms;
        while left > 0 {
            let step = left.min(FRAME_MS);
            self.frame(Duration::from_millis(step));
            left -= step;
        }
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Send an intent and process it in a zero-length frame.
    pub fn send(&mut self, intent: DashboardIntent) {
        self.app.world_mut().send_event(intent);
        self.frame(Duration::ZERO);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        let surface = self.surface;
        self.send(DashboardIntent::SelectRegion {
            pixel: Vec2::new(x, y),
            surface,
        });
    }

    pub fn broadcast(&mut self) {
        self.send(DashboardIntent::RequestBroadcast);
    }

    pub fn notify_authorities(&mut self) {
        self.send(DashboardIntent::NotifyAuthorities);
    }

    pub fn dismiss_analysis(&mut self) {
        self.send(DashboardIntent::DismissAnalysis);
    }

    pub fn dismiss_emergency(&mut self) {
        self.send(DashboardIntent::DismissEmergency);
    }

    pub fn search(&mut self, query: &str) {
        self.send(DashboardIntent::Search(query.to_string()));
    }
}
