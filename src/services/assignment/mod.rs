//! Drop handling for the scheduling grids.
//!
//! The controller validates a drop locally, resolves the backend coordinates
//! for the target cell (part id, `HH:MM:SS`, 1-based field number), issues the
//! mutation and, on success, reconciles the board. Local failures never reach
//! the network. Every path ends with the drag session cleared.

pub mod errors;

use crate::models::drag::{DragKind, DragPayload, DragSession};
use crate::models::schedule::{AssignmentKind, Position};
use crate::services::board::{Reconcile, ScheduleBoard};
use crate::services::schedule_api::{ApiError, AssignRequest, RemoveRequest, ScheduleApi};
use crate::utils::time::to_wire_time;

pub use errors::{AssignmentError, Severity};

/// The two grids that accept drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// General work schedule: caddies, reordered in place.
    WorkSchedule,
    /// Special-team overlay: crews, removable per cell.
    SpecialTeam,
}

impl SurfaceKind {
    pub fn accepts(&self) -> DragKind {
        match self {
            SurfaceKind::WorkSchedule => DragKind::Caddie,
            SurfaceKind::SpecialTeam => DragKind::SpecialGroup,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SurfaceKind::WorkSchedule => "Work schedule",
            SurfaceKind::SpecialTeam => "Special team",
        }
    }

    pub fn allows_removal(&self) -> bool {
        matches!(self, SurfaceKind::SpecialTeam)
    }

    /// Dropping a placed entity elsewhere moves it rather than duplicating it.
    pub fn allows_reorder(&self) -> bool {
        matches!(self, SurfaceKind::WorkSchedule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned,
    Moved { from: Position },
    /// Dropped back onto its own cell.
    Unchanged,
}

/// Lifecycle of one drag gesture, as shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    /// Drop accepted locally; the write is in flight.
    Requesting,
    Succeeded,
    Failed(String),
    /// Drop refused before any network call.
    Rejected(String),
}

impl GestureState {
    pub fn begin_drag(&mut self) {
        *self = GestureState::Dragging;
    }

    /// A drop that passed local checks.
    pub fn start_request(&mut self) {
        if matches!(self, GestureState::Dragging) {
            *self = GestureState::Requesting;
        }
    }

    /// Settle the gesture from the controller result.
    pub fn finish<T>(&mut self, result: &Result<T, AssignmentError>) {
        *self = match result {
            Ok(_) => GestureState::Succeeded,
            Err(err) if err.reached_server() => GestureState::Failed(err.user_message()),
            Err(err) => GestureState::Rejected(err.user_message()),
        };
    }

    /// Drag ended without a drop.
    pub fn cancel(&mut self) {
        if matches!(self, GestureState::Dragging) {
            *self = GestureState::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = GestureState::Idle;
    }

    pub fn label(&self) -> String {
        match self {
            GestureState::Idle => "Ready".to_string(),
            GestureState::Dragging => "Dragging".to_string(),
            GestureState::Requesting => "Saving".to_string(),
            GestureState::Succeeded => "Saved".to_string(),
            GestureState::Failed(message) => format!("Failed: {}", message),
            GestureState::Rejected(message) => format!("Not placed: {}", message),
        }
    }
}

pub struct AssignmentController<'a> {
    api: &'a dyn ScheduleApi,
    surface: SurfaceKind,
}

impl<'a> AssignmentController<'a> {
    pub fn new(api: &'a dyn ScheduleApi, surface: SurfaceKind) -> Self {
        Self { api, surface }
    }

    /// Handle a drop of `raw_payload` onto `position`.
    pub fn assign(
        &self,
        board: &mut ScheduleBoard,
        session: &mut DragSession,
        raw_payload: &str,
        position: Position,
    ) -> Result<AssignOutcome, AssignmentError> {
        let result = self.try_assign(board, raw_payload, position);
        session.clear();

        match &result {
            Ok(outcome) => log::info!("Drop on {} at {}: {:?}", self.surface.title(), position, outcome),
            Err(err) => Self::log_failure("assign", position, err),
        }
        result
    }

    /// Clear the slot at `position`.
    pub fn remove(
        &self,
        board: &mut ScheduleBoard,
        position: Position,
    ) -> Result<(), AssignmentError> {
        let result = self.try_remove(board, position);
        match &result {
            Ok(()) => log::info!("Removed assignment at {} on {}", position, self.surface.title()),
            Err(err) => Self::log_failure("remove", position, err),
        }
        result
    }

    fn try_assign(
        &self,
        board: &mut ScheduleBoard,
        raw_payload: &str,
        position: Position,
    ) -> Result<AssignOutcome, AssignmentError> {
        let payload = DragPayload::parse(raw_payload)?;

        let expected = self.surface.accepts();
        if payload.kind != expected {
            return Err(AssignmentError::WrongKind {
                expected,
                found: payload.kind,
            });
        }

        if payload.source == Some(position) {
            return Ok(AssignOutcome::Unchanged);
        }

        let request = Self::assign_request(board, &payload, position)?;

        // Resolve the source slot now; the mapper is rebuilt after the write.
        let source_removal = match payload.source {
            Some(source) if self.surface.allows_reorder() => Some((
                source,
                Self::remove_request(board, source, payload.kind.assignment_kind())?,
            )),
            _ => None,
        };

        self.api
            .assign_to_slot(&request)
            .map_err(Self::classify_assign_failure)?;

        let outcome = match source_removal {
            None => AssignOutcome::Assigned,
            Some((from, removal)) => {
                if let Err(err) = self.api.remove_assignment(&removal) {
                    // The assign landed; the board must still reflect it.
                    if let Err(refetch_err) = board.reconcile(self.api) {
                        log::warn!("Refetch after partial move failed: {}", refetch_err);
                    }
                    return Err(AssignmentError::RemoveFailed(err.to_string()));
                }
                AssignOutcome::Moved { from }
            }
        };

        self.reconcile(board)?;
        Ok(outcome)
    }

    fn try_remove(&self, board: &mut ScheduleBoard, position: Position) -> Result<(), AssignmentError> {
        let kind = board
            .entity_at(position)
            .map(|entity| entity.kind())
            .unwrap_or_else(|| self.surface.accepts().assignment_kind());
        let request = Self::remove_request(board, position, kind)?;

        self.api
            .remove_assignment(&request)
            .map_err(|err| AssignmentError::RemoveFailed(err.to_string()))?;

        self.reconcile(board)
    }

    fn assign_request(
        board: &ScheduleBoard,
        payload: &DragPayload,
        position: Position,
    ) -> Result<AssignRequest, AssignmentError> {
        let part = board
            .part(position.part_number)
            .ok_or(AssignmentError::PartNotFound(position.part_number))?;
        let time = board
            .time_at(position)
            .ok_or(AssignmentError::TimeNotResolvable(position))?;

        Ok(AssignRequest::new(
            part.id.clone(),
            to_wire_time(time),
            position.field_index as u32 + 1,
            payload.kind.assignment_kind(),
            payload.id.clone(),
        ))
    }

    fn remove_request(
        board: &ScheduleBoard,
        position: Position,
        kind: AssignmentKind,
    ) -> Result<RemoveRequest, AssignmentError> {
        let slot_id = board
            .slot_id_at(position)
            .ok_or(AssignmentError::SlotNotResolvable(position))?;

        Ok(RemoveRequest {
            slot_id: slot_id.clone(),
            assignment_type: kind,
        })
    }

    fn reconcile(&self, board: &mut ScheduleBoard) -> Result<(), AssignmentError> {
        board
            .reconcile(self.api)
            .map_err(|err| AssignmentError::ReconcileFailed(err.to_string()))
    }

    fn classify_assign_failure(err: ApiError) -> AssignmentError {
        AssignmentError::Remote {
            kind: err.remote_kind(),
            message: err.to_string(),
        }
    }

    fn log_failure(action: &str, position: Position, err: &AssignmentError) {
        match err.severity() {
            Severity::Silent => {
                log::error!("Cannot {} at {}: {}", action, position, err)
            }
            Severity::Notice | Severity::Alert => {
                log::warn!("Failed to {} at {}: {}", action, position, err)
            }
        }
    }
}
