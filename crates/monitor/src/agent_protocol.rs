//! Line-delimited JSON protocol for driving the dashboard headlessly.
//!
//! Each stdin line is one [`AgentCommand`]; each response is one
//! [`AgentResponse`] line on stdout. Map clicks carry explicit surface
//! dimensions so a scripted operator can reproduce any pixel the display
//! would send.

use serde::{Deserialize, Serialize};

use crate::controller::DashboardController;
use crate::incident::{Epoch, FloodZone};
use crate::notifications::NotificationLog;
use crate::risk::RiskBand;

/// Bumped whenever the wire format changes.
pub const PROTOCOL_VERSION: u32 = 1;

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    #[serde(rename = "select_region")]
    SelectRegion {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[serde(rename = "broadcast")]
    Broadcast,

    #[serde(rename = "notify_authorities")]
    NotifyAuthorities,

    #[serde(rename = "dismiss_analysis")]
    DismissAnalysis,

    #[serde(rename = "dismiss_emergency")]
    DismissEmergency,

    #[serde(rename = "search")]
    Search { query: String },

    /// Run frames covering `ms` milliseconds of simulated time.
    #[serde(rename = "advance")]
    Advance { ms: u64 },

    #[serde(rename = "observe")]
    Observe,

    #[serde(rename = "quit")]
    Quit,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "snapshot")]
    Snapshot { snapshot: DashboardSnapshot },

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything an observer of the display could read off the screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub phase: String,
    pub epoch: u64,
    pub analysis: Option<SurfaceSnapshot>,
    pub emergency: Option<SurfaceSnapshot>,
    pub zones: Vec<ZoneSnapshot>,
    pub pending_escalations: Vec<u64>,
    pub toasts: Vec<ToastSnapshot>,
    pub journal_len: usize,
}

/// Contents of an open analysis panel or emergency modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceSnapshot {
    pub risk_score: u8,
    pub band: RiskBand,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSnapshot {
    pub epoch: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f32,
    pub risk_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastSnapshot {
    pub title: String,
    pub description: String,
    pub priority: String,
}

impl From<&FloodZone> for ZoneSnapshot {
    fn from(zone: &FloodZone) -> Self {
        Self {
            epoch: zone.epoch.0,
            latitude: zone.center.latitude,
            longitude: zone.center.longitude,
            radius: zone.radius,
            risk_score: zone.risk.value(),
        }
    }
}

impl DashboardSnapshot {
    pub fn capture(controller: &DashboardController, log: &NotificationLog) -> Self {
        let analysis = controller.analysis();
        let emergency = controller.emergency();

        Self {
            phase: controller.phase().label().to_string(),
            epoch: controller.epoch().0,
            analysis: analysis.is_panel_open.then(|| SurfaceSnapshot {
                risk_score: analysis.risk_score.value(),
                band: analysis.risk_score.band(),
                location: analysis.location_label.clone(),
            }),
            emergency: emergency.is_modal_open.then(|| SurfaceSnapshot {
                risk_score: emergency.triggering_risk_score.value(),
                band: emergency.triggering_risk_score.band(),
                location: emergency.triggering_location.clone(),
            }),
            zones: controller.flood_zones().iter().map(ZoneSnapshot::from).collect(),
            pending_escalations: controller
                .pending_escalations()
                .iter()
                .map(|task| task.epoch.0)
                .collect(),
            toasts: log
                .active
                .iter()
                .filter(|n| !n.dismissed)
                .map(|n| ToastSnapshot {
                    title: n.title.clone(),
                    description: n.description.clone(),
                    priority: n.priority.label().to_string(),
                })
                .collect(),
            journal_len: log.journal.len(),
        }
    }

    pub fn epoch(&self) -> Epoch {
        Epoch(self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard_params::DashboardParams;
    use crate::notifications::{NotificationEvent, NotificationPriority};
    use crate::projection::SurfaceDims;
    use crate::risk_source::ScriptedRiskSource;

    fn surface() -> SurfaceDims {
        SurfaceDims::new(1000.0, 600.0)
    }

    #[test]
    fn deserialize_select_region_command() {
        let json = r#"{"cmd":"select_region","x":500,"y":300,"width":1000,"height":600}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            AgentCommand::SelectRegion {
                x: 500.0,
                y: 300.0,
                width: 1000.0,
                height: 600.0,
            }
        );
    }

    #[test]
    fn deserialize_unit_commands() {
        let cases = [
            (r#"{"cmd":"broadcast"}"#, AgentCommand::Broadcast),
            (r#"{"cmd":"notify_authorities"}"#, AgentCommand::NotifyAuthorities),
            (r#"{"cmd":"dismiss_analysis"}"#, AgentCommand::DismissAnalysis),
            (r#"{"cmd":"dismiss_emergency"}"#, AgentCommand::DismissEmergency),
            (r#"{"cmd":"observe"}"#, AgentCommand::Observe),
            (r#"{"cmd":"quit"}"#, AgentCommand::Quit),
        ];
        for (json, expected) in cases {
            let cmd: AgentCommand = serde_json::from_str(json).unwrap();
            assert_eq!(cmd, expected, "{json}");
        }
    }

    #[test]
    fn deserialize_advance_and_search() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"cmd":"advance","ms":1500}"#).unwrap();
        assert_eq!(cmd, AgentCommand::Advance { ms: 1500 });

        let cmd: AgentCommand =
            serde_json::from_str(r#"{"cmd":"search","query":"Dhaka"}"#).unwrap();
        assert_eq!(
            cmd,
            AgentCommand::Search {
                query: "Dhaka".to_string()
            }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(serde_json::from_str::<AgentCommand>(r#"{"cmd":"launch"}"#).is_err());
        assert!(serde_json::from_str::<AgentCommand>(r#"{"cmd":"advance"}"#).is_err());
    }

    #[test]
    fn serialize_ready_response() {
        let json = serde_json::to_string(&make_response(ResponsePayload::Ready)).unwrap();
        assert!(json.contains("\"protocol_version\":1"));
        assert!(json.contains("\"type\":\"ready\""));
    }

    #[test]
    fn serialize_error_response() {
        let resp = make_response(ResponsePayload::Error {
            message: "bad line".to_string(),
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("bad line"));
    }

    #[test]
    fn idle_snapshot_has_no_surfaces() {
        let controller = DashboardController::new(DashboardParams::default());
        let snapshot = DashboardSnapshot::capture(&controller, &NotificationLog::default());
        assert_eq!(snapshot.phase, "IDLE");
        assert_eq!(snapshot.epoch(), Epoch(0));
        assert!(snapshot.analysis.is_none());
        assert!(snapshot.emergency.is_none());
        assert!(snapshot.zones.is_empty());
    }

    #[test]
    fn snapshot_reports_open_analysis_and_pending_escalation() {
        let mut controller = DashboardController::new(DashboardParams::default());
        let mut source = ScriptedRiskSource::new([92]);
        controller.select_region(500.0, 300.0, surface(), &mut source);

        let snapshot = DashboardSnapshot::capture(&controller, &NotificationLog::default());
        assert_eq!(snapshot.phase, "ANALYZING");
        let analysis = snapshot.analysis.as_ref().unwrap();
        assert_eq!(analysis.risk_score, 92);
        assert_eq!(analysis.band, RiskBand::Critical);
        assert_eq!(analysis.location, "40.0000°N, 40.0000°E");
        assert_eq!(snapshot.pending_escalations, vec![1]);
        assert_eq!(snapshot.zones.len(), 1);
        assert_eq!(snapshot.zones[0].epoch, 1);

        let json = serde_json::to_string(&make_response(ResponsePayload::Snapshot { snapshot }))
            .unwrap();
        assert!(json.contains("\"type\":\"snapshot\""));
        assert!(json.contains("\"band\":\"Critical\""));
    }

    #[test]
    fn snapshot_skips_dismissed_toasts() {
        let controller = DashboardController::new(DashboardParams::default());
        let mut log = NotificationLog::default();
        let event = NotificationEvent {
            title: "Search".to_string(),
            description: "Searching for Dhaka".to_string(),
            priority: NotificationPriority::Info,
        };
        let first = log.push(&event, 0.0);
        log.push(&event, 1.0);
        log.dismiss(first);

        let snapshot = DashboardSnapshot::capture(&controller, &log);
        assert_eq!(snapshot.toasts.len(), 1);
        assert_eq!(snapshot.journal_len, 2);
    }
}
