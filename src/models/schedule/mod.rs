// Schedule domain model
// Fields, parts, positions and the assignments that occupy slots

pub mod wire;

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(
    /// Backend identifier of a whole work schedule (one golf course, one date).
    ScheduleId
);
opaque_id!(
    /// Backend identifier of a part (round).
    PartId
);
opaque_id!(
    /// Backend identifier of the atomic (field, time, part) unit.
    SlotId
);
opaque_id!(
    /// Backend identifier of a caddie or a special group.
    EntityId
);

/// A physical playing field. `index` is the grid column (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub index: usize,
    pub display_name: String,
}

/// A round (morning/afternoon/evening) owning its own list of time rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub part_number: u32,
    pub name: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl Part {
    pub fn is_configured(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    pub fn part_index(&self) -> usize {
        self.part_number.saturating_sub(1) as usize
    }
}

/// Local grid coordinate. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub field_index: usize,
    pub time_index: usize,
    pub part_number: u32,
}

impl Position {
    pub fn new(field_index: usize, time_index: usize, part_number: u32) -> Self {
        Self {
            field_index,
            time_index,
            part_number,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {} / part {} / row {}",
            self.field_index + 1,
            self.part_number,
            self.time_index
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentKind {
    Caddie,
    SpecialGroup,
}

impl AssignmentKind {
    /// Name used by the backend's removal endpoint.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AssignmentKind::Caddie => "caddie",
            AssignmentKind::SpecialGroup => "special",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentKind::Caddie => "caddies",
            AssignmentKind::SpecialGroup => "special groups",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaddieAssignment {
    pub id: EntityId,
    pub name: String,
    pub group_badge: Option<String>,
    pub status: String,
    pub special_badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialGroupAssignment {
    pub id: EntityId,
    pub name: String,
    pub member_count: u32,
    pub color: Option<String>,
    pub is_active: bool,
}

/// Whatever occupies a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    Caddie(CaddieAssignment),
    SpecialGroup(SpecialGroupAssignment),
}

impl Assignment {
    pub fn id(&self) -> &EntityId {
        match self {
            Assignment::Caddie(caddie) => &caddie.id,
            Assignment::SpecialGroup(group) => &group.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Assignment::Caddie(caddie) => &caddie.name,
            Assignment::SpecialGroup(group) => &group.name,
        }
    }

    pub fn kind(&self) -> AssignmentKind {
        match self {
            Assignment::Caddie(_) => AssignmentKind::Caddie,
            Assignment::SpecialGroup(_) => AssignmentKind::SpecialGroup,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey {
            kind: self.kind(),
            id: self.id().clone(),
        }
    }
}

/// Cache key for an entity. Caddie `7` and special group `7` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub kind: AssignmentKind,
    pub id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSlot {
    pub field_number: u32,
    pub slot_id: SlotId,
    pub assignment: Option<Assignment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub time: String,
    pub slots: Vec<MatrixSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartMatrix {
    pub part: Part,
    pub rows: Vec<MatrixRow>,
}

/// Full server view of one schedule. Replaced wholesale after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    pub schedule_id: ScheduleId,
    pub date: Option<NaiveDate>,
    pub golf_course_name: Option<String>,
    pub fields: Vec<Field>,
    pub parts: Vec<PartMatrix>,
    pub available_caddies: Vec<CaddieAssignment>,
    pub available_special_groups: Vec<SpecialGroupAssignment>,
}

impl ScheduleSnapshot {
    pub fn part(&self, part_number: u32) -> Option<&Part> {
        self.parts
            .iter()
            .map(|matrix| &matrix.part)
            .find(|part| part.part_number == part_number)
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.iter().find(|field| field.index == index)
    }

    /// Entities that can be dragged onto the grid, caddies first.
    pub fn available_entities(&self) -> Vec<Assignment> {
        self.available_caddies
            .iter()
            .cloned()
            .map(Assignment::Caddie)
            .chain(
                self.available_special_groups
                    .iter()
                    .cloned()
                    .map(Assignment::SpecialGroup),
            )
            .collect()
    }
}

/// Per-part ordered `"HH:MM"` time rows, indexed by `part_number - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlots {
    parts: Vec<Vec<String>>,
}

impl TimeSlots {
    pub fn new(parts: Vec<Vec<String>>) -> Self {
        Self { parts }
    }

    pub fn for_part(&self, part_number: u32) -> Option<&[String]> {
        let index = (part_number as usize).checked_sub(1)?;
        self.parts.get(index).map(Vec::as_slice)
    }

    pub fn time_at(&self, part_number: u32, time_index: usize) -> Option<&str> {
        self.for_part(part_number)?
            .get(time_index)
            .map(String::as_str)
    }

    pub fn index_of(&self, part_number: u32, time: &str) -> Option<usize> {
        self.for_part(part_number)?
            .iter()
            .position(|row| row == time)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caddie(id: &str) -> Assignment {
        Assignment::Caddie(CaddieAssignment {
            id: EntityId::from(id),
            name: "Kim".to_string(),
            group_badge: Some("1조".to_string()),
            status: "active".to_string(),
            special_badge: None,
        })
    }

    fn group(id: &str) -> Assignment {
        Assignment::SpecialGroup(SpecialGroupAssignment {
            id: EntityId::from(id),
            name: "A조".to_string(),
            member_count: 3,
            color: None,
            is_active: true,
        })
    }

    #[test]
    fn test_entity_keys_do_not_collide_across_kinds() {
        assert_ne!(caddie("7").key(), group("7").key());
        assert_eq!(caddie("7").key(), caddie("7").key());
    }

    #[test]
    fn test_time_slots_lookup_is_one_based_by_part() {
        let slots = TimeSlots::new(vec![
            vec!["06:00".to_string(), "06:10".to_string()],
            vec!["12:00".to_string()],
        ]);

        assert_eq!(slots.time_at(1, 1), Some("06:10"));
        assert_eq!(slots.time_at(2, 0), Some("12:00"));
        assert_eq!(slots.time_at(2, 1), None);
        assert_eq!(slots.time_at(0, 0), None);
        assert_eq!(slots.index_of(1, "06:10"), Some(1));
        assert_eq!(slots.index_of(1, "06:10:00"), None);
    }

    #[test]
    fn test_part_configuration_requires_both_bounds() {
        let mut part = Part {
            id: PartId::from("p1"),
            part_number: 1,
            name: "1부".to_string(),
            start_time: NaiveTime::from_hms_opt(6, 0, 0),
            end_time: None,
        };
        assert!(!part.is_configured());

        part.end_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(part.is_configured());
    }
}
