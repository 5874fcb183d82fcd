use std::fmt;

use crate::access::AccessError;
use crate::fixture::FixtureError;
use crate::model::ParseEnumError;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    FixtureLoadFailed,
    FixtureInvalid,
    UnknownUser,
    TaskNotFound,
    InvalidEnumValue,
    ViewNotPermitted,
    TerminalUnavailable,
    InternalUnexpected,
}

impl ErrorCode {
    pub const ALL: [Self; 9] = [
        Self::ConfigParseError,
        Self::FixtureLoadFailed,
        Self::FixtureInvalid,
        Self::UnknownUser,
        Self::TaskNotFound,
        Self::InvalidEnumValue,
        Self::ViewNotPermitted,
        Self::TerminalUnavailable,
        Self::InternalUnexpected,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::FixtureLoadFailed => "E1002",
            Self::FixtureInvalid => "E1003",
            Self::UnknownUser => "E2001",
            Self::TaskNotFound => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::ViewNotPermitted => "E3001",
            Self::TerminalUnavailable => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::FixtureLoadFailed => "Fixture file could not be read",
            Self::FixtureInvalid => "Fixture file is malformed",
            Self::UnknownUser => "Unknown session user",
            Self::TaskNotFound => "Task not found",
            Self::InvalidEnumValue => "Invalid status/priority/type value",
            Self::ViewNotPermitted => "View not available to this role",
            Self::TerminalUnavailable => "Terminal unavailable",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .taskdeck/config.toml and retry."),
            Self::FixtureLoadFailed => Some("Check the --fixture path and its permissions."),
            Self::FixtureInvalid => {
                Some("Fixtures must be .json, .toml, .yaml or .yml with RFC 3339 timestamps.")
            }
            Self::UnknownUser => Some("Pass --user with an id listed by `td fixture`."),
            Self::TaskNotFound => Some("List task ids with `td tasks`."),
            Self::InvalidEnumValue => Some("Use one of the documented status/priority/type values."),
            Self::ViewNotPermitted => {
                Some("Pick a view from `td menu`, or unset navigation.enforce_roles.")
            }
            Self::TerminalUnavailable => Some("Run `td ui` from an interactive terminal."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced at the edges of the core: fixture loading, session
/// resolution, lookups by id and enforced navigation.
#[derive(Debug, thiserror::Error)]
pub enum TaskdeckError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("task '{0}' not found")]
    TaskNotFound(String),

    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl TaskdeckError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Fixture(err) => err.error_code(),
            Self::TaskNotFound(_) => ErrorCode::TaskNotFound,
            Self::InvalidValue(_) => ErrorCode::InvalidEnumValue,
            Self::Access(_) => ErrorCode::ViewNotPermitted,
        }
    }

    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        self.error_code().hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::nav::ViewId;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let codes: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ErrorCode::ALL {
            let text = code.code();
            assert_eq!(text.len(), 5);
            assert!(text.starts_with('E'));
            assert!(text[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn taskdeck_errors_map_to_codes() {
        let missing = TaskdeckError::TaskNotFound("t9".into());
        assert_eq!(missing.error_code(), ErrorCode::TaskNotFound);
        assert_eq!(missing.to_string(), "task 't9' not found");

        let denied = TaskdeckError::from(AccessError {
            view: ViewId::Team,
            role: Role::Viewer,
        });
        assert_eq!(denied.error_code().code(), "E3001");
        assert!(denied.suggestion().is_some());

        let bad: TaskdeckError = "sideways".parse::<Role>().unwrap_err().into();
        assert_eq!(bad.error_code(), ErrorCode::InvalidEnumValue);
    }
}
