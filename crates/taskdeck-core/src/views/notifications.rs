use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Session;
use crate::derive::Tone;
use crate::derive::display::notification_tone;
use crate::model::NotificationKind;
use crate::store::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRow {
    pub id: String,
    pub kind: NotificationKind,
    pub tone: Tone,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Title of the linked task, when it still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationsView {
    pub unread: usize,
    pub summary: String,
    /// Newest first.
    pub items: Vec<NotificationRow>,
}

/// `All caught up!` at zero, otherwise the pluralized unread count.
#[must_use]
pub fn summary_line(unread: usize) -> String {
    match unread {
        0 => "All caught up!".to_string(),
        1 => "1 unread notification".to_string(),
        n => format!("{n} unread notifications"),
    }
}

#[must_use]
pub fn notification_list(state: &ViewState, _session: &Session<'_>) -> NotificationsView {
    let mut items: Vec<NotificationRow> = state
        .notifications()
        .iter()
        .map(|n| NotificationRow {
            id: n.id.clone(),
            kind: n.kind,
            tone: notification_tone(n.kind),
            message: n.message.clone(),
            task_id: n.task_id.clone(),
            task_title: n
                .task_id
                .as_deref()
                .and_then(|id| state.task(id))
                .map(|t| t.title.clone()),
            read: n.read,
            created_at: n.created_at,
        })
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let unread = state.unread_count();
    NotificationsView {
        unread,
        summary: summary_line(unread),
        items,
    }
}
