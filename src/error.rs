//! Error and outcome types for the city planner.

use thiserror::Error;

/// All errors that can occur while planning a city.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// An operation referred to a location that does not exist.
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Input the driver could not interpret.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error while talking to the user.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    /// Returns true for [`PlannerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlannerError::NotFound(_))
    }
}

/// Convenience result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Status of a mutating operation that did not fail.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The structure was modified.
    Changed,
    /// The location or road was already there; nothing was modified.
    AlreadyExists,
    /// There was nothing to remove; nothing was modified.
    Unchanged,
}

impl Outcome {
    pub fn is_changed(self) -> bool {
        self == Outcome::Changed
    }
}
