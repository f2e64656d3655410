//! Integration tests for the dashboard using the `TestDashboard` harness.
//!
//! These spin up a headless Bevy App with `MonitorPlugin` and drive it with
//! intent events and manual frame deltas.

mod escalation_tests;
