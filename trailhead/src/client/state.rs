//! Per-call lifecycle

use std::fmt;
use std::sync::Arc;

use super::error::ApiOperation;

/// Lifecycle of one backend call
///
/// `Idle -> InFlight -> Succeeded | Failed`. Both outcomes are terminal;
/// a call is never retried or cancelled once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl CallState {
    /// `Idle` becomes `InFlight`; any other state is kept
    #[must_use]
    pub fn start(self) -> Self {
        match self {
            Self::Idle => Self::InFlight,
            other => other,
        }
    }

    /// `InFlight` becomes `Succeeded` or `Failed`; any other state is kept
    #[must_use]
    pub fn finish(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (Self::InFlight, true) => Self::Succeeded,
            (Self::InFlight, false) => Self::Failed,
            (other, _) => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether a view should show its loading indicator
    pub fn is_loading(self) -> bool {
        self == Self::InFlight
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InFlight => write!(f, "in_flight"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A state change of one call, as delivered to a [`CallListener`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEvent {
    pub operation: ApiOperation,
    pub resource: String,
    pub state: CallState,
}

/// Callback receiving every call's state changes, e.g. to drive a spinner
pub type CallListener = Arc<dyn Fn(&CallEvent) + Send + Sync>;
