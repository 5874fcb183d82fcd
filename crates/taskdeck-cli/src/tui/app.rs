//! Key handling and state for `td ui`.
//!
//! Keys become [`Intent`]s; [`App::dispatch`] feeds them to the store and
//! keeps the screen-local bits (cursor, filters, status line) consistent
//! with the new snapshot.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taskdeck_core::model::{TaskPriority, TaskStatus, TaskType};
use taskdeck_core::nav::{ViewId, menu_for};
use taskdeck_core::store::{Intent, ViewState};
use taskdeck_core::views::{
    Session, TaskFilter, dashboard, notification_list, project_viewer, selected_detail,
    task_board, team_overview,
};
use tracing::debug;

use crate::cmd::Workspace;

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// One selectable line in the active screen's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Task(String),
    Notification { id: String, task_id: Option<String> },
}

pub struct App<'a> {
    pub ws: &'a Workspace,
    pub session: Session<'a>,
    pub state: ViewState,
    pub filter: TaskFilter,
    pub cursor: usize,
    pub subtask_cursor: usize,
    pub status_msg: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(ws: &'a Workspace) -> Self {
        Self {
            ws,
            session: ws.session(),
            state: ws.state(),
            filter: TaskFilter::default(),
            cursor: 0,
            subtask_cursor: 0,
            status_msg: None,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_msg = Some((msg.into(), Instant::now()));
    }

    /// The status message, if it is still fresh.
    pub fn status(&self) -> Option<&str> {
        self.status_msg
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    /// Selectable rows of the active screen, in display order.
    pub fn rows(&self) -> Vec<Row> {
        let tasks = |ids: Vec<String>| -> Vec<Row> { ids.into_iter().map(Row::Task).collect() };
        match self.state.active_view() {
            ViewId::Dashboard => {
                let view = dashboard(&self.state, &self.session);
                tasks(
                    view.overdue
                        .into_iter()
                        .chain(view.upcoming)
                        .map(|c| c.id)
                        .collect(),
                )
            }
            ViewId::Tasks => {
                let view = task_board(&self.state, &self.session, self.filter);
                tasks(
                    view.columns
                        .into_iter()
                        .flat_map(|col| col.tasks)
                        .map(|c| c.id)
                        .collect(),
                )
            }
            ViewId::Team => {
                let view = team_overview(&self.state, &self.session);
                tasks(view.attention.into_iter().map(|c| c.id).collect())
            }
            ViewId::Viewer => {
                let view = project_viewer(&self.state, &self.session);
                tasks(
                    view.projects
                        .into_iter()
                        .flat_map(|p| p.milestones)
                        .flat_map(|m| m.tasks)
                        .map(|c| c.id)
                        .collect(),
                )
            }
            ViewId::Notifications => notification_list(&self.state, &self.session)
                .items
                .into_iter()
                .map(|n| Row::Notification {
                    id: n.id,
                    task_id: n.task_id,
                })
                .collect(),
            ViewId::Analytics | ViewId::Settings => Vec::new(),
        }
    }

    /// Translate a key press into intents. Screen-local keys (cursor moves,
    /// filters, quit) are handled here and produce no intent.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Intent> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        match self.state.selected_task_id().map(str::to_string) {
            Some(task_id) => self.handle_overlay_key(key.code, task_id),
            None => self.handle_screen_key(key.code),
        }
    }

    fn handle_overlay_key(&mut self, code: KeyCode, task_id: String) -> Vec<Intent> {
        let Some(detail) = selected_detail(&self.state, &self.session) else {
            return vec![Intent::SelectTask { task_id: None }];
        };
        match code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Intent::SelectTask { task_id: None }],
            KeyCode::Char('s') | KeyCode::Char('1'..='4') if !detail.can_edit => {
                self.set_status("You can only change the status of your own tasks.");
                Vec::new()
            }
            KeyCode::Char('s') => {
                let next = TaskStatus::ALL
                    .iter()
                    .position(|s| *s == detail.status)
                    .map_or(TaskStatus::Todo, |i| {
                        TaskStatus::ALL[(i + 1) % TaskStatus::ALL.len()]
                    });
                vec![Intent::ChangeStatus {
                    task_id,
                    status: next,
                }]
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                vec![Intent::ChangeStatus {
                    task_id,
                    status: TaskStatus::ALL[index],
                }]
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.subtask_cursor = step(self.subtask_cursor, detail.subtasks.len(), true);
                Vec::new()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.subtask_cursor = step(self.subtask_cursor, detail.subtasks.len(), false);
                Vec::new()
            }
            KeyCode::Char(' ') if !detail.can_edit => {
                self.set_status("You can only tick off subtasks on your own tasks.");
                Vec::new()
            }
            KeyCode::Char(' ') => detail
                .subtasks
                .get(self.subtask_cursor)
                .map(|s| Intent::ToggleSubtask {
                    task_id,
                    subtask_id: s.id.clone(),
                })
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) -> Vec<Intent> {
        let view = self.state.active_view();
        let menu = menu_for(self.session.user.role);
        let go = |view: ViewId| vec![Intent::SetActiveView { view }];

        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let at = menu.iter().position(|v| *v == view).unwrap_or(0);
                let next = if code == KeyCode::Tab {
                    (at + 1) % menu.len()
                } else {
                    (at + menu.len() - 1) % menu.len()
                };
                go(menu[next])
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                menu.get(index).map_or_else(Vec::new, |v| go(*v))
            }
            KeyCode::Char('D') => go(ViewId::Dashboard),
            KeyCode::Char('T') => go(ViewId::Tasks),
            KeyCode::Char('M') => go(ViewId::Team),
            KeyCode::Char('A') => go(ViewId::Analytics),
            KeyCode::Char('V') => go(ViewId::Viewer),
            KeyCode::Char('N') => go(ViewId::Notifications),
            KeyCode::Char('S') => go(ViewId::Settings),
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = step(self.cursor, self.rows().len(), true);
                Vec::new()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = step(self.cursor, self.rows().len(), false);
                Vec::new()
            }
            KeyCode::Enter => match self.rows().get(self.cursor) {
                Some(Row::Task(id)) => vec![Intent::SelectTask {
                    task_id: Some(id.clone()),
                }],
                Some(Row::Notification { id, task_id }) => {
                    let mut intents = vec![Intent::MarkNotificationRead { id: id.clone() }];
                    if task_id.as_deref().is_some_and(|t| self.state.task(t).is_some()) {
                        intents.push(Intent::SelectTask {
                            task_id: task_id.clone(),
                        });
                    }
                    intents
                }
                None => Vec::new(),
            },
            KeyCode::Char(c @ ('f' | 'p' | 't' | 'c')) if view == ViewId::Tasks => {
                match c {
                    'f' => self.filter.status = cycle(self.filter.status, &TaskStatus::ALL),
                    'p' => self.filter.priority = cycle(self.filter.priority, &TaskPriority::ALL),
                    't' => self.filter.task_type = cycle(self.filter.task_type, &TaskType::ALL),
                    _ => self.filter = TaskFilter::default(),
                }
                self.cursor = 0;
                Vec::new()
            }
            KeyCode::Char('r') if view == ViewId::Notifications => {
                match self.rows().get(self.cursor) {
                    Some(Row::Notification { id, .. }) => {
                        vec![Intent::MarkNotificationRead { id: id.clone() }]
                    }
                    _ => Vec::new(),
                }
            }
            KeyCode::Char('a') if view == ViewId::Notifications => vec![Intent::MarkAllRead],
            _ => Vec::new(),
        }
    }

    /// Apply one intent to the store and reconcile screen-local state.
    pub fn dispatch(&mut self, intent: &Intent, now: DateTime<Utc>) {
        debug!(?intent, "dispatch");
        let before_view = self.state.active_view();
        let before_selection = self.state.selected_task_id().map(str::to_string);

        let next = if self.ws.enforce_roles {
            match self.state.apply_enforced(intent, now, &self.session.caps) {
                Ok(next) => next,
                Err(err) => {
                    self.set_status(err.to_string());
                    return;
                }
            }
        } else {
            self.state.apply(intent, now)
        };
        self.state = next;

        if self.state.active_view() != before_view {
            self.cursor = 0;
            self.filter = TaskFilter::default();
        }
        if self.state.selected_task_id().map(str::to_string) != before_selection {
            self.subtask_cursor = 0;
        }
        let rows = self.rows().len();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }

        match intent {
            Intent::ChangeStatus { task_id, status } => {
                self.set_status(format!("{task_id} is now {}", status.label()));
            }
            Intent::MarkAllRead => self.set_status("All notifications marked as read."),
            _ => {}
        }
    }
}

/// Move a cursor over `len` rows, wrapping at both ends.
fn step(cursor: usize, len: usize, forward: bool) -> usize {
    match (len, forward) {
        (0, _) => 0,
        (_, true) => (cursor + 1) % len,
        (_, false) => (cursor + len - 1) % len,
    }
}

/// Advance a filter criterion: all, then each value, then back to all.
fn cycle<T: Copy + PartialEq>(current: Option<T>, values: &[T]) -> Option<T> {
    match current {
        None => values.first().copied(),
        Some(v) => values
            .iter()
            .position(|x| *x == v)
            .and_then(|i| values.get(i + 1))
            .copied(),
    }
}
