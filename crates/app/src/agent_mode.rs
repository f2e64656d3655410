//! Headless `--agent` mode: a blocking loop that reads JSON commands from
//! stdin and writes JSON responses to stdout.
//!
//! The display plugins are skipped. Time only moves when an `advance`
//! command asks for it, so escalations fire deterministically.
//!
//! See [`monitor::agent_protocol`] for the wire format.

use std::io::{BufRead, Write};
use std::time::Duration;

use bevy::prelude::*;

use monitor::agent_protocol::{
    make_response, AgentCommand, AgentResponse, DashboardSnapshot, ResponsePayload,
    PROTOCOL_VERSION,
};
use monitor::dashboard::{headless_app, step_update};
use monitor::{DashboardController, DashboardIntent, DashboardParams, NotificationLog};

/// Frame length used to cover an `advance` request.
const AGENT_FRAME: Duration = Duration::from_millis(16);

pub fn run_agent_mode(params: DashboardParams) {
    let mut app = headless_app(params);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    write_response(&mut stdout, &make_response(ResponsePayload::Ready));
    eprintln!("sentinel agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    eprintln!("sentinel agent mode shutting down");
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => eprintln!("failed to encode response: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    let intent = match cmd {
        AgentCommand::SelectRegion {
            x,
            y,
            width,
            height,
        } => Some(DashboardIntent::SelectRegion {
            pixel: Vec2::new(x, y),
            surface: Vec2::new(width, height),
        }),
        AgentCommand::Broadcast => Some(DashboardIntent::RequestBroadcast),
        AgentCommand::NotifyAuthorities => Some(DashboardIntent::NotifyAuthorities),
        AgentCommand::DismissAnalysis => Some(DashboardIntent::DismissAnalysis),
        AgentCommand::DismissEmergency => Some(DashboardIntent::DismissEmergency),
        AgentCommand::Search { query } => Some(DashboardIntent::Search(query)),
        AgentCommand::Advance { ms } => {
            let mut left = Duration::from_millis(ms);
            while !left.is_zero() {
                let step = left.min(AGENT_FRAME);
                step_update(app, step);
                left -= step;
            }
            None
        }
        AgentCommand::Observe => None,
        AgentCommand::Quit => return make_response(ResponsePayload::Goodbye),
    };

    if let Some(intent) = intent {
        app.world_mut().send_event(intent);
        step_update(app, Duration::ZERO);
    }

    snapshot(app)
}

fn snapshot(app: &App) -> AgentResponse {
    let world = app.world();
    match (
        world.get_resource::<DashboardController>(),
        world.get_resource::<NotificationLog>(),
    ) {
        (Some(controller), Some(log)) => make_response(ResponsePayload::Snapshot {
            snapshot: DashboardSnapshot::capture(controller, log),
        }),
        _ => make_response(ResponsePayload::Error {
            message: "dashboard resources missing".to_string(),
        }),
    }
}
