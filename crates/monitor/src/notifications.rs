//! Toast notifications and the alert journal.
//!
//! The dashboard controller reports operator-visible outcomes (broadcast
//! confirmed, search started, automatic escalation) through the
//! [`NotificationSink`] trait. Inside the ECS the sink is an
//! `EventWriter<NotificationEvent>`; events are collected into the
//! [`NotificationLog`], which the toast stack and the alerts window render.
//!
//! Emergency toasts persist until dismissed; everything else expires after a
//! short lifetime.

use bevy::prelude::*;

// =============================================================================
// Priority Levels
// =============================================================================

/// Notification priority, from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationPriority {
    /// Flood emergencies. Persists until dismissed.
    Emergency,
    /// General information (search acknowledgements).
    Info,
    /// Confirmations (authorities notified).
    Positive,
}

impl NotificationPriority {
    /// Toast lifetime in seconds. `None` means persist until dismissed.
    pub fn lifetime_secs(&self) -> Option<f32> {
        match self {
            NotificationPriority::Emergency => None,
            NotificationPriority::Info => Some(5.0),
            NotificationPriority::Positive => Some(5.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationPriority::Emergency => "EMERGENCY",
            NotificationPriority::Info => "INFO",
            NotificationPriority::Positive => "CONFIRMED",
        }
    }
}

// =============================================================================
// Sink
// =============================================================================

/// Fire-and-forget channel for operator-visible messages.
pub trait NotificationSink {
    fn notify(&mut self, title: &str, description: &str, priority: NotificationPriority);
}

impl NotificationSink for EventWriter<'_, NotificationEvent> {
    fn notify(&mut self, title: &str, description: &str, priority: NotificationPriority) {
        self.send(NotificationEvent {
            title: title.to_string(),
            description: description.to_string(),
            priority,
        });
    }
}

/// Collects messages in memory. Used by unit tests and headless callers.
impl NotificationSink for Vec<NotificationEvent> {
    fn notify(&mut self, title: &str, description: &str, priority: NotificationPriority) {
        self.push(NotificationEvent {
            title: title.to_string(),
            description: description.to_string(),
            priority,
        });
    }
}

// =============================================================================
// Types
// =============================================================================

/// Event emitted to create a toast.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub title: String,
    pub description: String,
    pub priority: NotificationPriority,
}

/// A toast on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: NotificationPriority,
    /// Seconds since startup when the toast was created.
    pub created_at: f32,
    pub dismissed: bool,
}

/// An archived notification.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub title: String,
    pub description: String,
    pub priority: NotificationPriority,
    pub created_at: f32,
}

// =============================================================================
// NotificationLog Resource
// =============================================================================

/// Active toasts and the archived journal.
#[derive(Resource)]
pub struct NotificationLog {
    pub active: Vec<Notification>,
    pub journal: Vec<JournalEntry>,
    /// Maximum journal size before old entries are trimmed.
    pub max_journal: usize,
    next_id: u64,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            journal: Vec::new(),
            max_journal: 200,
            next_id: 1,
        }
    }
}

impl NotificationLog {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a toast from an event and archive it in the journal.
    pub fn push(&mut self, event: &NotificationEvent, now: f32) -> u64 {
        let id = self.next_id();
        self.active.push(Notification {
            id,
            title: event.title.clone(),
            description: event.description.clone(),
            priority: event.priority,
            created_at: now,
            dismissed: false,
        });

        self.journal.push(JournalEntry {
            title: event.title.clone(),
            description: event.description.clone(),
            priority: event.priority,
            created_at: now,
        });

        if self.journal.len() > self.max_journal {
            let excess = self.journal.len() - self.max_journal;
            self.journal.drain(0..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        if let Some(n) = self.active.iter_mut().find(|n| n.id == id) {
            n.dismissed = true;
        }
    }

    /// Drop dismissed and expired toasts.
    pub fn sweep(&mut self, now: f32) {
        self.active.retain(|n| {
            if n.dismissed {
                return false;
            }
            match n.priority.lifetime_secs() {
                Some(ttl) => now - n.created_at < ttl,
                None => true,
            }
        });
    }

    /// Whether any emergency toast is still on screen.
    pub fn has_active_emergency(&self) -> bool {
        self.active
            .iter()
            .any(|n| n.priority == NotificationPriority::Emergency && !n.dismissed)
    }
}

// =============================================================================
// Systems
// =============================================================================

fn collect_notifications(
    mut events: EventReader<NotificationEvent>,
    mut log: ResMut<NotificationLog>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    for event in events.read() {
        info!("Notification [{}]: {}", event.priority.label(), event.title);
        log.push(event, now);
    }
}

fn sweep_expired_notifications(mut log: ResMut<NotificationLog>, time: Res<Time>) {
    log.sweep(time.elapsed_secs());
}

// =============================================================================
// Plugin
// =============================================================================

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotificationLog>()
            .add_event::<NotificationEvent>()
            .add_systems(
                Update,
                (collect_notifications, sweep_expired_notifications)
                    .chain()
                    .in_set(crate::DashboardSet::Notifications),
            );
    }
}

// =============================================================================
// Tests
// =============================================================================
