//! Error types.
//!
//! Running out of frontier is not an error: it is the `Exhausted` outcome.

use std::fmt;

use gridstar_core::{Point, Range};

use crate::engine::SearchState;

/// A session was set up with inputs the engine cannot start from.
///
/// Reported before any state transition and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero or negative.
    NonPositiveDimensions { width: i32, height: i32 },
    StartOutOfBounds(Point),
    GoalOutOfBounds(Point),
    /// Start and goal coincide and the session does not allow it.
    SameEndpoints(Point),
    StartBlocked(Point),
    GoalBlocked(Point),
    /// The blocked-cell registry was mutated after the search started. Holds
    /// the cell that was touched, or `None` for a bulk clear.
    RegistryFrozen(Option<Point>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::GoalOutOfBounds(p) => write!(f, "goal {p} is outside the grid"),
            Self::SameEndpoints(p) => write!(f, "start and goal are both {p}"),
            Self::StartBlocked(p) => write!(f, "start {p} is blocked"),
            Self::GoalBlocked(p) => write!(f, "goal {p} is blocked"),
            Self::RegistryFrozen(Some(p)) => {
                write!(f, "cannot change blocked cell {p}: search already started")
            }
            Self::RegistryFrozen(None) => {
                write!(f, "cannot clear blocked cells: search already started")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by the grid, the registry and the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    Config(ConfigError),
    /// A coordinate outside the grid was passed to an accessor.
    OutOfBounds { pos: Point, range: Range },
    /// The engine reached a state it must never be in. Fatal for the run.
    InternalInvariant(String),
    /// A command was issued in a state that does not accept it.
    InvalidState {
        command: &'static str,
        state: SearchState,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::OutOfBounds { pos, range } => write!(f, "{pos} is outside grid {range}"),
            Self::InternalInvariant(msg) => write!(f, "internal invariant violated: {msg}"),
            Self::InvalidState { command, state } => {
                write!(f, "`{command}` is not valid in state {state:?}")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
