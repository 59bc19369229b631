//! Load state for a search session.

use std::fmt;

/// Tri-state fetch status driving what the UI renders.
///
/// The states are mutually exclusive: a session is idle, has a fetch in
/// flight, or is showing the error from its most recent failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch in flight and no error to show.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The most recent fetch failed; carries the user-facing message.
    Error(String),
}

impl LoadState {
    /// True while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The user-facing error message, when in the error state.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs and status lines.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
