use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use monitor::risk_source::{RiskFeed, ScriptedRiskSource};
use monitor::{DashboardIntent, DashboardParams, ParamsError};

mod agent_mode;

fn main() {
    let loaded = load_params();

    if std::env::args().any(|arg| arg == "--agent") {
        let params = loaded.unwrap_or_else(|(path, err)| {
            eprintln!("failed to load {path}: {err}; using default parameters");
            DashboardParams::default()
        });
        agent_mode::run_agent_mode(params);
        return;
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "ORBITAL // SENTINEL".to_string(),
            resolution: (1440.0, 900.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // LogPlugin is live from here on.
    let params = loaded.unwrap_or_else(|(path, err)| {
        warn!("Failed to load dashboard parameters from {path}: {err}. Using defaults.");
        DashboardParams::default()
    });
    info!(
        "Escalation delay {} ms, simulated risk {}..={}",
        params.escalation_delay_ms, params.simulated_risk_min, params.simulated_risk_max
    );

    // Screenshot mode: scripted intents, one capture per step, then exit
    let screenshots = std::env::var("SENTINEL_SCREENSHOTS").is_ok();
    if screenshots {
        app.insert_resource(RiskFeed::new(ScriptedRiskSource::new([55, 92])));
    }

    app.insert_resource(params)
        .add_plugins((monitor::MonitorPlugin, ui::UiPlugin))
        .add_systems(Startup, spawn_camera);

    if screenshots {
        app.insert_resource(ScreenshotQueue::standard())
            .add_systems(Update, drive_screenshots.before(monitor::DashboardSet::Intents));
    }

    app.run();
}

/// Read `SENTINEL_PARAMS` if set. Errors carry the offending path.
fn load_params() -> Result<DashboardParams, (String, ParamsError)> {
    match std::env::var("SENTINEL_PARAMS") {
        Ok(path) => DashboardParams::load_from_path(&path).map_err(|e| (path, e)),
        Err(_) => Ok(DashboardParams::default()),
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

// =============================================================================
// Screenshot mode
// =============================================================================

/// Frames to wait before the first step, for fonts and the theme to settle.
const WARMUP_FRAMES: u32 = 60;
/// Frames between steps. The capture happens halfway through.
const STEP_FRAMES: u32 = 40;

#[derive(Resource)]
struct ScreenshotQueue {
    frame: u32,
    current: usize,
    steps: Vec<ShotStep>,
}

struct ShotStep {
    name: &'static str,
    intents: Vec<DashboardIntent>,
}

impl ScreenshotQueue {
    fn standard() -> Self {
        let surface = Vec2::new(1000.0, 600.0);
        Self {
            frame: 0,
            current: 0,
            steps: vec![
                ShotStep {
                    name: "01_idle",
                    intents: Vec::new(),
                },
                ShotStep {
                    name: "02_analysis",
                    intents: vec![DashboardIntent::SelectRegion {
                        pixel: Vec2::new(320.0, 260.0),
                        surface,
                    }],
                },
                ShotStep {
                    name: "03_critical_analysis",
                    intents: vec![
                        DashboardIntent::Search("Jakarta".to_string()),
                        DashboardIntent::SelectRegion {
                            pixel: Vec2::new(760.0, 340.0),
                            surface,
                        },
                    ],
                },
                ShotStep {
                    name: "04_emergency",
                    intents: vec![DashboardIntent::RequestBroadcast],
                },
                ShotStep {
                    name: "05_resolved",
                    intents: vec![DashboardIntent::NotifyAuthorities],
                },
            ],
        }
    }
}

fn drive_screenshots(
    mut commands: Commands,
    mut queue: ResMut<ScreenshotQueue>,
    mut intents: EventWriter<DashboardIntent>,
    mut exit: EventWriter<AppExit>,
) {
    queue.frame += 1;
    if queue.frame < WARMUP_FRAMES {
        return;
    }

    let idx = queue.current;
    if idx >= queue.steps.len() {
        // Give the last save a few frames before exiting
        if queue.frame > WARMUP_FRAMES + queue.steps.len() as u32 * STEP_FRAMES + 20 {
            exit.send(AppExit::Success);
        }
        return;
    }

    let phase = (queue.frame - WARMUP_FRAMES) % STEP_FRAMES;
    if phase == 0 {
        for intent in &queue.steps[idx].intents {
            intents.send(intent.clone());
        }
    } else if phase == STEP_FRAMES / 2 {
        let path = format!("/tmp/sentinel_{}.png", queue.steps[idx].name);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        queue.current += 1;
    }
}
