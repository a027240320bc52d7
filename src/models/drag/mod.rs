// Drag session model
// The single in-flight drag and the JSON payload carried between grid surfaces

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::schedule::{Assignment, AssignmentKind, EntityId, Position};

/// Entity kind carried by a drag payload. Serialized as the payload's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragKind {
    Caddie,
    SpecialGroup,
}

impl DragKind {
    pub fn assignment_kind(&self) -> AssignmentKind {
        match self {
            DragKind::Caddie => AssignmentKind::Caddie,
            DragKind::SpecialGroup => AssignmentKind::SpecialGroup,
        }
    }
}

impl From<AssignmentKind> for DragKind {
    fn from(kind: AssignmentKind) -> Self {
        match kind {
            AssignmentKind::Caddie => DragKind::Caddie,
            AssignmentKind::SpecialGroup => DragKind::SpecialGroup,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragPayloadError {
    #[error("drag payload is not valid JSON or lacks a type: {0}")]
    Unparsable(String),
    #[error("drag payload has an empty entity id")]
    MissingId,
}

/// What crosses from a drag source to a drop target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Set when the entity is being moved out of a grid cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Position>,
}

impl DragPayload {
    pub fn for_entity(entity: &Assignment, source: Option<Position>) -> Self {
        Self {
            kind: entity.kind().into(),
            id: entity.id().clone(),
            name: entity.name().to_string(),
            source,
        }
    }

    pub fn to_json(&self) -> String {
        // Only strings and integers inside; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn parse(raw: &str) -> Result<Self, DragPayloadError> {
        let payload: DragPayload = serde_json::from_str(raw)
            .map_err(|err| DragPayloadError::Unparsable(err.to_string()))?;
        if payload.id.is_blank() {
            return Err(DragPayloadError::MissingId);
        }
        Ok(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub payload: DragPayload,
    pub entity: Assignment,
    pub hovered: Option<Position>,
}

/// Holds at most one in-flight drag. Owned by the screen and passed to the
/// grids that need it.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `entity`. `source` is the cell it is leaving, if any.
    /// A stale drag is replaced.
    pub fn begin(&mut self, entity: Assignment, source: Option<Position>) -> &DragPayload {
        if let Some(stale) = self.active.take() {
            log::debug!("Replacing stale drag of '{}'", stale.entity.name());
        }
        log::debug!(
            "Drag started: {} '{}' from {:?}",
            entity.kind().label(),
            entity.name(),
            source
        );
        let payload = DragPayload::for_entity(&entity, source);
        let active = self.active.insert(ActiveDrag {
            payload,
            entity,
            hovered: None,
        });
        &active.payload
    }

    pub fn hover(&mut self, position: Position) {
        if let Some(active) = self.active.as_mut() {
            active.hovered = Some(position);
        }
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_hovering(&self, position: Position) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.hovered == Some(position))
    }

    pub fn take(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }

    pub fn clear(&mut self) {
        if self.active.take().is_some() {
            log::debug!("Drag session cleared");
        }
    }
}
