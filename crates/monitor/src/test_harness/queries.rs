//! Read-only accessors for `TestDashboard`.

use bevy::prelude::*;

use crate::controller::DashboardController;
use crate::dashboard::IncidentEscalated;
use crate::dashboard_params::DashboardParams;
use crate::incident::{AnalysisContext, EmergencyContext, FloodZone, Phase};
use crate::notifications::{JournalEntry, Notification, NotificationLog};

use super::TestDashboard;

impl TestDashboard {
    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn controller(&self) -> &DashboardController {
        self.resource::<DashboardController>()
    }

    pub fn params(&self) -> &DashboardParams {
        self.resource::<DashboardParams>()
    }

    pub fn phase(&self) -> Phase {
        self.controller().phase()
    }

    pub fn analysis(&self) -> AnalysisContext {
        self.controller().analysis()
    }

    pub fn emergency(&self) -> EmergencyContext {
        self.controller().emergency()
    }

    pub fn zones(&self) -> &[FloodZone] {
        self.controller().flood_zones()
    }

    /// Toasts currently on screen.
    pub fn toasts(&self) -> &[Notification] {
        &self.resource::<NotificationLog>().active
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.resource::<NotificationLog>().journal
    }

    /// Events of type `E` still held in the world's double buffer.
    pub fn event_backlog<E: Event>(&self) -> usize {
        self.resource::<Events<E>>().len()
    }

    /// Every `IncidentEscalated` event observed since construction.
    pub fn escalations(&self) -> &[IncidentEscalated] {
        &self.escalations
    }
}
