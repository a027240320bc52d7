use thiserror::Error;

use crate::models::drag::{DragKind, DragPayloadError};
use crate::models::schedule::Position;
use crate::services::schedule_api::RemoteErrorKind;

/// How a failure reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged only; a local consistency problem rather than a user mistake.
    Silent,
    /// Short non-blocking notice.
    Notice,
    /// Blocking alert the user has to dismiss.
    Alert,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("malformed drag data: {0}")]
    MalformedDragData(String),
    #[error("only {} can be placed here, got {}", .expected.assignment_kind().label(), .found.assignment_kind().label())]
    WrongKind { expected: DragKind, found: DragKind },
    #[error("part {0} not found in the schedule")]
    PartNotFound(u32),
    #[error("no time row resolvable at {0}")]
    TimeNotResolvable(Position),
    #[error("no slot id resolvable at {0}")]
    SlotNotResolvable(Position),
    #[error("server rejected the assignment ({kind:?}): {message}")]
    Remote { kind: RemoteErrorKind, message: String },
    #[error("server rejected the removal: {0}")]
    RemoveFailed(String),
    #[error("change saved but the schedule could not be refreshed: {0}")]
    ReconcileFailed(String),
}

impl From<DragPayloadError> for AssignmentError {
    fn from(err: DragPayloadError) -> Self {
        AssignmentError::MalformedDragData(err.to_string())
    }
}

impl AssignmentError {
    pub fn severity(&self) -> Severity {
        match self {
            AssignmentError::MalformedDragData(_)
            | AssignmentError::WrongKind { .. }
            | AssignmentError::ReconcileFailed(_) => Severity::Notice,
            AssignmentError::PartNotFound(_)
            | AssignmentError::TimeNotResolvable(_)
            | AssignmentError::SlotNotResolvable(_) => Severity::Silent,
            AssignmentError::Remote { .. } | AssignmentError::RemoveFailed(_) => Severity::Alert,
        }
    }

    /// False for failures caught before any request was sent.
    pub fn reached_server(&self) -> bool {
        matches!(
            self,
            AssignmentError::Remote { .. }
                | AssignmentError::RemoveFailed(_)
                | AssignmentError::ReconcileFailed(_)
        )
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AssignmentError::MalformedDragData(_) => {
                "Invalid drag data. Please try dragging again.".to_string()
            }
            AssignmentError::WrongKind { expected, .. } => format!(
                "Only {} can be placed on this schedule.",
                expected.assignment_kind().label()
            ),
            AssignmentError::PartNotFound(_)
            | AssignmentError::TimeNotResolvable(_)
            | AssignmentError::SlotNotResolvable(_) => {
                "This cell is not available. Refresh the schedule and try again.".to_string()
            }
            AssignmentError::Remote { kind, .. } => match kind {
                RemoteErrorKind::AlreadyAssigned => {
                    "Already assigned: this slot or entity is taken at that time.".to_string()
                }
                RemoteErrorKind::Invalid => {
                    "The assignment was rejected as invalid. Check the schedule setup.".to_string()
                }
                RemoteErrorKind::PermissionDenied => {
                    "You do not have permission to change this schedule.".to_string()
                }
                RemoteErrorKind::Other => "Failed to assign. Please try again.".to_string(),
            },
            AssignmentError::RemoveFailed(_) => {
                "Failed to remove the assignment. Please try again.".to_string()
            }
            AssignmentError::ReconcileFailed(_) => {
                "Saved, but the schedule could not be refreshed.".to_string()
            }
        }
    }
}
