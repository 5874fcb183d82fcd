//! Navigation shell: the role-filtered menu and the unread badge.
//!
//! The menu table is the only place that says which role sees which screen.
//! [`crate::access::role_permissions`] derives its view flags from it.
//! Hiding an entry is presentation only: [`crate::store::ViewState::set_active_view`]
//! accepts any view.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::derive::user_initials;
use crate::model::{ParseEnumError, Role, User, normalize};

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Dashboard,
    Tasks,
    Team,
    Analytics,
    Viewer,
    Notifications,
    Settings,
}

impl ViewId {
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Tasks,
        Self::Team,
        Self::Analytics,
        Self::Viewer,
        Self::Notifications,
        Self::Settings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Tasks => "tasks",
            Self::Team => "team",
            Self::Analytics => "analytics",
            Self::Viewer => "viewer",
            Self::Notifications => "notifications",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tasks => "My Tasks",
            Self::Team => "Team Overview",
            Self::Analytics => "Analytics",
            Self::Viewer => "Project View",
            Self::Notifications => "Notifications",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "tasks" => Ok(Self::Tasks),
            "team" => Ok(Self::Team),
            "analytics" => Ok(Self::Analytics),
            "viewer" | "projects" => Ok(Self::Viewer),
            "notifications" => Ok(Self::Notifications),
            "settings" => Ok(Self::Settings),
            _ => Err(ParseEnumError::new("view", s)),
        }
    }
}

/// One row of the primary menu table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub view: ViewId,
    pub roles: &'static [Role],
}

const STAFF: &[Role] = &[Role::Admin, Role::Manager, Role::Employee];
const LEADS: &[Role] = &[Role::Admin, Role::Manager];
const VIEWERS: &[Role] = &[Role::Viewer];

/// Primary menu, in display order.
pub const MENU: [MenuEntry; 5] = [
    MenuEntry {
        view: ViewId::Dashboard,
        roles: STAFF,
    },
    MenuEntry {
        view: ViewId::Tasks,
        roles: STAFF,
    },
    MenuEntry {
        view: ViewId::Team,
        roles: LEADS,
    },
    MenuEntry {
        view: ViewId::Analytics,
        roles: LEADS,
    },
    MenuEntry {
        view: ViewId::Viewer,
        roles: VIEWERS,
    },
];

/// Footer entries every role sees.
pub const FOOTER: [ViewId; 2] = [ViewId::Notifications, ViewId::Settings];

/// Whether the menu offers `view` to `role`.
#[must_use]
pub fn is_listed_for(view: ViewId, role: Role) -> bool {
    if FOOTER.contains(&view) {
        return true;
    }
    MENU.iter()
        .any(|entry| entry.view == view && entry.roles.contains(&role))
}

/// Primary menu filtered to `role`, followed by the footer entries.
#[must_use]
pub fn menu_for(role: Role) -> Vec<ViewId> {
    MENU.iter()
        .filter(|entry| entry.roles.contains(&role))
        .map(|entry| entry.view)
        .chain(FOOTER)
        .collect()
}

/// Screen a session opens on.
#[must_use]
pub const fn default_view(role: Role) -> ViewId {
    match role {
        Role::Viewer => ViewId::Viewer,
        Role::Admin | Role::Manager | Role::Employee => ViewId::Dashboard,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: ViewId,
    pub label: &'static str,
    pub active: bool,
    /// Unread count, only on the notifications entry and only when non-zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<usize>,
}

/// Everything the sidebar draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub user_name: String,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub role: Role,
    pub items: Vec<NavItem>,
}

/// Build the sidebar for `user` with `active` highlighted.
#[must_use]
pub fn sidebar(user: &User, active: ViewId, unread: usize) -> Sidebar {
    let items = menu_for(user.role)
        .into_iter()
        .map(|view| NavItem {
            view,
            label: view.label(),
            active: view == active,
            badge: (view == ViewId::Notifications && unread > 0).then_some(unread),
        })
        .collect();

    Sidebar {
        user_name: user.name.clone(),
        initials: user_initials(&user.name),
        department: user.department.clone(),
        role: user.role,
        items,
    }
}
