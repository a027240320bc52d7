//! Boundary to the remote work-schedule API.
//!
//! Everything the scheduling grid needs from the server goes through
//! [`ScheduleApi`]: one read (the schedule detail) and two writes (assign and
//! remove). The HTTP implementation lives in [`client`].

pub mod client;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::models::schedule::{AssignmentKind, EntityId, PartId, ScheduleId, ScheduleSnapshot, SlotId};

pub use client::HttpScheduleApi;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server rejected the request (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Why the server refused a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    AlreadyAssigned,
    Invalid,
    PermissionDenied,
    Other,
}

impl RemoteErrorKind {
    /// Typed error code, when the backend sends one.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "already_assigned" | "duplicate_assignment" | "slot_occupied" => {
                Some(RemoteErrorKind::AlreadyAssigned)
            }
            "invalid" | "invalid_request" | "validation_error" => Some(RemoteErrorKind::Invalid),
            "permission_denied" | "forbidden" | "not_authenticated" => {
                Some(RemoteErrorKind::PermissionDenied)
            }
            _ => None,
        }
    }

    /// Substring fallback while the upstream error contract is untyped.
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("already assigned") {
            RemoteErrorKind::AlreadyAssigned
        } else if message.contains("invalid") {
            RemoteErrorKind::Invalid
        } else if message.contains("permission") {
            RemoteErrorKind::PermissionDenied
        } else {
            RemoteErrorKind::Other
        }
    }
}

impl ApiError {
    pub fn remote_kind(&self) -> RemoteErrorKind {
        match self {
            ApiError::Rejected {
                status,
                code,
                message,
            } => code
                .as_deref()
                .and_then(RemoteErrorKind::from_code)
                .unwrap_or_else(|| match RemoteErrorKind::from_message(message) {
                    RemoteErrorKind::Other if *status == 403 => RemoteErrorKind::PermissionDenied,
                    RemoteErrorKind::Other if *status == 409 => RemoteErrorKind::AlreadyAssigned,
                    kind => kind,
                }),
            ApiError::Network(message) | ApiError::Decode(message) => {
                RemoteErrorKind::from_message(message)
            }
        }
    }
}

/// Body of the assign call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignRequest {
    pub part_id: PartId,
    /// `"HH:MM:SS"`.
    pub time: String,
    /// 1-based.
    pub field_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caddie_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_group_id: Option<EntityId>,
}

impl AssignRequest {
    pub fn new(
        part_id: PartId,
        time: String,
        field_number: u32,
        kind: AssignmentKind,
        entity_id: EntityId,
    ) -> Self {
        let (caddie_id, special_group_id) = match kind {
            AssignmentKind::Caddie => (Some(entity_id), None),
            AssignmentKind::SpecialGroup => (None, Some(entity_id)),
        };
        Self {
            part_id,
            time,
            field_number,
            caddie_id,
            special_group_id,
        }
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        self.caddie_id.as_ref().or(self.special_group_id.as_ref())
    }

    pub fn kind(&self) -> AssignmentKind {
        if self.special_group_id.is_some() {
            AssignmentKind::SpecialGroup
        } else {
            AssignmentKind::Caddie
        }
    }
}

fn serialize_kind<S: Serializer>(kind: &AssignmentKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.wire_name())
}

/// Body of the remove call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveRequest {
    pub slot_id: SlotId,
    #[serde(serialize_with = "serialize_kind")]
    pub assignment_type: AssignmentKind,
}

#[cfg_attr(test, mockall::automock)]
pub trait ScheduleApi {
    fn fetch_schedule(&self, schedule_id: &ScheduleId) -> Result<ScheduleSnapshot, ApiError>;

    fn assign_to_slot(&self, request: &AssignRequest) -> Result<(), ApiError>;

    fn remove_assignment(&self, request: &RemoveRequest) -> Result<(), ApiError>;
}
