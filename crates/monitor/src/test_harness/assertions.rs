//! Assertion helpers for `TestDashboard` integration tests.

use crate::incident::Phase;
use crate::notifications::NotificationPriority;

use super::TestDashboard;

impl TestDashboard {
    pub fn assert_phase(&self, expected: Phase) {
        let phase = self.phase();
        assert_eq!(
            phase,
            expected,
            "Expected phase {}, got {}",
            expected.label(),
            phase.label()
        );
    }

    /// Assert the panel/modal visibility pair.
    pub fn assert_surfaces(&self, panel_open: bool, modal_open: bool) {
        let panel = self.analysis().is_panel_open;
        let modal = self.emergency().is_modal_open;
        assert_eq!(
            (panel, modal),
            (panel_open, modal_open),
            "Expected (panel, modal) = ({panel_open}, {modal_open}), got ({panel}, {modal})"
        );
        assert!(!(panel && modal), "panel and modal open at the same time");
    }

    pub fn assert_zone_count(&self, expected: usize) {
        let count = self.zones().len();
        assert_eq!(count, expected, "Expected {expected} flood zones, got {count}");
    }

    /// Assert a toast with this title is on screen.
    pub fn assert_toast(&self, title: &str) {
        assert!(
            self.toasts().iter().any(|n| n.title == title),
            "Expected toast {title:?}, active: {:?}",
            self.toasts().iter().map(|n| &n.title).collect::<Vec<_>>()
        );
    }

    /// Assert how many journal entries carry the given priority.
    pub fn assert_journal_count(&self, priority: NotificationPriority, expected: usize) {
        let count = self
            .journal()
            .iter()
            .filter(|e| e.priority == priority)
            .count();
        assert_eq!(
            count,
            expected,
            "Expected {expected} {} journal entries, got {count}",
            priority.label()
        );
    }
}
