//! Capability resolution for the session role.
//!
//! [`role_permissions`] is consulted once per render; screens read flags from
//! the returned [`Capabilities`] instead of comparing role strings.
//!
//! These flags shape what the UI offers. They are not an authorization
//! boundary; the only enforcing path is
//! [`crate::store::ViewState::try_set_active_view`].

use serde::Serialize;

use crate::model::{Role, Task};
use crate::nav::{ViewId, is_listed_for};

/// Capability flags derived from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub role: Role,
    pub view_dashboard: bool,
    pub view_tasks: bool,
    pub view_team: bool,
    pub view_analytics: bool,
    pub view_projects: bool,
    /// May change status and subtasks of any task, not only assigned ones.
    pub edit_any_task: bool,
    /// May read a task's internal notes.
    pub see_internal_notes: bool,
}

impl Capabilities {
    /// Whether the menu offers `view`.
    #[must_use]
    pub const fn can_view(&self, view: ViewId) -> bool {
        match view {
            ViewId::Dashboard => self.view_dashboard,
            ViewId::Tasks => self.view_tasks,
            ViewId::Team => self.view_team,
            ViewId::Analytics => self.view_analytics,
            ViewId::Viewer => self.view_projects,
            ViewId::Notifications | ViewId::Settings => true,
        }
    }

    /// Status changes and subtask toggles are offered for `task`.
    #[must_use]
    pub fn can_edit_task(&self, user_id: &str, task: &Task) -> bool {
        self.edit_any_task || task.is_assigned_to(user_id)
    }
}

/// Resolve the capability set for `role`.
#[must_use]
pub fn role_permissions(role: Role) -> Capabilities {
    Capabilities {
        role,
        view_dashboard: is_listed_for(ViewId::Dashboard, role),
        view_tasks: is_listed_for(ViewId::Tasks, role),
        view_team: is_listed_for(ViewId::Team, role),
        view_analytics: is_listed_for(ViewId::Analytics, role),
        view_projects: is_listed_for(ViewId::Viewer, role),
        edit_any_task: matches!(role, Role::Admin | Role::Manager),
        see_internal_notes: role != Role::Viewer,
    }
}

/// Returned by the enforcing store path when a role may not open a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("view '{view}' is not available to role '{role}'")]
pub struct AccessError {
    pub view: ViewId,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::test_support::task;

    #[test]
    fn flags_follow_menu_table() {
        let employee = role_permissions(Role::Employee);
        assert!(employee.view_dashboard && employee.view_tasks);
        assert!(!employee.view_team && !employee.view_analytics && !employee.view_projects);
        assert!(!employee.edit_any_task);
        assert!(employee.see_internal_notes);

        let viewer = role_permissions(Role::Viewer);
        assert!(viewer.view_projects);
        assert!(!viewer.view_dashboard);
        assert!(!viewer.see_internal_notes);
        assert!(viewer.can_view(ViewId::Notifications));

        let manager = role_permissions(Role::Manager);
        assert!(manager.view_team && manager.view_analytics && manager.edit_any_task);
    }

    #[test]
    fn can_view_matches_menu_for_every_role() {
        for role in Role::ALL {
            let caps = role_permissions(role);
            for view in ViewId::ALL {
                assert_eq!(caps.can_view(view), is_listed_for(view, role));
            }
        }
    }

    #[test]
    fn assignees_can_edit_their_tasks() {
        let mut t = task("t1", TaskStatus::Todo);
        t.assigned_to = vec!["e1".into()];

        let employee = role_permissions(Role::Employee);
        assert!(employee.can_edit_task("e1", &t));
        assert!(!employee.can_edit_task("e2", &t));

        let admin = role_permissions(Role::Admin);
        assert!(admin.can_edit_task("anyone", &t));

        let viewer = role_permissions(Role::Viewer);
        assert!(!viewer.can_edit_task("v1", &t));
    }
}
