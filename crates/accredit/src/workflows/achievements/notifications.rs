use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use super::domain::{AchievementStatus, Actor, Notification, NotificationId, Role};
use super::lifecycle::TransitionEvent;

/// Converts transition events into reviewer notifications.
#[derive(Debug, Default)]
pub struct NotificationDispatcher {
    sequence: AtomicU64,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only a student submission flagged at creation notifies anyone: every faculty
    /// member of the record's department and every administrator, in directory order.
    pub fn on_transition(
        &self,
        event: &TransitionEvent,
        directory: &[Actor],
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        let record = &event.record;
        let flagged_on_creation =
            event.is_creation() && event.current == AchievementStatus::Flagged;
        if !flagged_on_creation || record.created_by != Role::Student {
            return Vec::new();
        }

        let faculty = directory.iter().filter(|actor| {
            actor.role == Role::Faculty && actor.department == record.department
        });
        let administrators = directory
            .iter()
            .filter(|actor| actor.role == Role::Administrator);

        let faculty_message = format!(
            "Flagged entry needs review: \"{}\" by {}",
            record.title, record.owner_name
        );
        let administrator_message = format!(
            "New flagged entry in {}: \"{}\" by {}",
            record.department, record.title, record.owner_name
        );

        faculty
            .map(|actor| (actor, faculty_message.as_str()))
            .chain(administrators.map(|actor| (actor, administrator_message.as_str())))
            .map(|(actor, message)| Notification {
                id: self.next_id(),
                recipient: actor.id.clone(),
                message: message.to_string(),
                read: false,
                created_at: now,
                record_id: Some(record.id.clone()),
            })
            .collect()
    }

    fn next_id(&self) -> NotificationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        NotificationId(format!("ntf-{id:06}"))
    }
}
