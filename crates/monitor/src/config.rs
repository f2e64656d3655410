/// Latitude at the top edge of the map surface.
pub const LAT_ORIGIN: f64 = 20.0;
/// Degrees of latitude spanned by the full surface height.
pub const LAT_SPAN: f64 = 40.0;
/// Longitude at the left edge of the map surface.
pub const LON_ORIGIN: f64 = -20.0;
/// Degrees of longitude spanned by the full surface width.
pub const LON_SPAN: f64 = 120.0;

/// Smallest surface dimension accepted by the projector, in pixels.
pub const MIN_SURFACE_EXTENT: f64 = 1.0;

/// Score at or above which an incident escalates to an emergency.
pub const CRITICAL_THRESHOLD: u8 = 80;

/// Delay between a critical reading and its automatic escalation.
pub const DEFAULT_ESCALATION_DELAY_MS: u64 = 1500;

/// Simulated scores only cover regions of at least moderate concern.
pub const DEFAULT_SIMULATED_RISK_MIN: u8 = 40;
pub const DEFAULT_SIMULATED_RISK_MAX: u8 = 100;

/// Flood-zone overlay radius range (map units, drawn at 20 px per unit).
pub const DEFAULT_ZONE_RADIUS_MIN: f32 = 2.0;
pub const DEFAULT_ZONE_RADIUS_MAX: f32 = 5.0;

/// Seed used for the simulated risk feed when none is configured.
pub const DEFAULT_RISK_SEED: u64 = 42;

/// Label shown before the operator has selected any region.
pub const PLACEHOLDER_LOCATION: &str = "Sector 7-Alpha";
/// Score shown before the operator has selected any region.
pub const PLACEHOLDER_RISK: u8 = 65;

pub const BROADCAST_TITLE: &str = "Alert Broadcasted";
pub const BROADCAST_DESCRIPTION: &str = "Emergency services have been notified. ETA: 12 minutes.";
pub const SEARCH_TITLE: &str = "Searching...";
pub const ESCALATION_TITLE: &str = "Flood Emergency";
