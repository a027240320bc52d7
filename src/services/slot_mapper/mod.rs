//! Position/slot mapping for the scheduling grid.
//!
//! Replays a [`ScheduleSnapshot`] matrix against the externally supplied
//! [`TimeSlots`] and produces the lookups the grid and the assignment
//! controller work from:
//!
//! - position → slot id (what the backend calls the cell),
//! - (entity, slot) → position (who sits where; a special group may sit in
//!   several fields at the same time row),
//! - entity key → entity detail (deduplicated).
//!
//! The mapper never fails. Incomplete configuration is reported through
//! [`Readiness`] so the UI can prompt for setup instead of drawing a broken
//! grid.

use std::collections::HashMap;
use std::fmt;

use crate::models::schedule::{
    Assignment, EntityKey, Position, ScheduleSnapshot, SlotId, TimeSlots,
};

/// Composite key: one entry per (entity, slot) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    pub entity: EntityKey,
    pub slot_id: SlotId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    NoFields,
    NoParts,
    PartUnconfigured { part_number: u32 },
    MissingTimeRows { part_number: u32 },
    UnmatchedRowTime { part_number: u32, time: String },
    UnknownField { part_number: u32, field_number: u32 },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::NoFields => write!(f, "No fields are set up for this golf course"),
            ConfigIssue::NoParts => write!(f, "No parts (rounds) are set up for this schedule"),
            ConfigIssue::PartUnconfigured { part_number } => {
                write!(f, "Part {} has no start or end time", part_number)
            }
            ConfigIssue::MissingTimeRows { part_number } => {
                write!(f, "Part {} has no time rows", part_number)
            }
            ConfigIssue::UnmatchedRowTime { part_number, time } => write!(
                f,
                "Part {} has a row at {} that is not in its time rows",
                part_number, time
            ),
            ConfigIssue::UnknownField {
                part_number,
                field_number,
            } => write!(
                f,
                "Part {} references field {} which does not exist",
                part_number, field_number
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(Vec<ConfigIssue>),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionSlotMapper {
    position_to_slot: HashMap<Position, SlotId>,
    placements: HashMap<PlacementKey, Position>,
    entity_cache: HashMap<EntityKey, Assignment>,
    issues: Vec<ConfigIssue>,
}

impl PositionSlotMapper {
    pub fn build(snapshot: &ScheduleSnapshot, time_slots: &TimeSlots) -> Self {
        let mut mapper = Self::default();

        if snapshot.fields.is_empty() {
            mapper.issues.push(ConfigIssue::NoFields);
        }
        if snapshot.parts.is_empty() {
            mapper.issues.push(ConfigIssue::NoParts);
        }

        // Full detail from the side lists beats the partial copies in the matrix.
        let detail: HashMap<EntityKey, Assignment> = snapshot
            .available_entities()
            .into_iter()
            .map(|entity| (entity.key(), entity))
            .collect();

        for matrix in &snapshot.parts {
            let part_number = matrix.part.part_number;

            if !matrix.part.is_configured() {
                mapper
                    .issues
                    .push(ConfigIssue::PartUnconfigured { part_number });
            }

            if time_slots.for_part(part_number).map_or(true, <[String]>::is_empty) {
                mapper
                    .issues
                    .push(ConfigIssue::MissingTimeRows { part_number });
                continue;
            }

            for row in &matrix.rows {
                let Some(time_index) = time_slots.index_of(part_number, &row.time) else {
                    log::warn!(
                        "Dropping matrix row {} of part {}: not in the part's time rows",
                        row.time,
                        part_number
                    );
                    mapper.issues.push(ConfigIssue::UnmatchedRowTime {
                        part_number,
                        time: row.time.clone(),
                    });
                    continue;
                };

                for slot in &row.slots {
                    let field_index = slot.field_number.saturating_sub(1) as usize;
                    if snapshot.field(field_index).is_none() {
                        log::warn!(
                            "Part {} row {} references unknown field {}",
                            part_number,
                            row.time,
                            slot.field_number
                        );
                        let issue = ConfigIssue::UnknownField {
                            part_number,
                            field_number: slot.field_number,
                        };
                        if !mapper.issues.contains(&issue) {
                            mapper.issues.push(issue);
                        }
                    }

                    let position = Position::new(field_index, time_index, part_number);
                    if let Some(previous) = mapper
                        .position_to_slot
                        .insert(position, slot.slot_id.clone())
                    {
                        log::warn!(
                            "Slot {} replaces slot {} at {}",
                            slot.slot_id,
                            previous,
                            position
                        );
                    }

                    let Some(assignment) = &slot.assignment else {
                        continue;
                    };

                    let key = assignment.key();
                    mapper
                        .entity_cache
                        .entry(key.clone())
                        .or_insert_with(|| {
                            detail
                                .get(&key)
                                .cloned()
                                .unwrap_or_else(|| assignment.clone())
                        });
                    mapper.placements.insert(
                        PlacementKey {
                            entity: key,
                            slot_id: slot.slot_id.clone(),
                        },
                        position,
                    );
                }
            }
        }

        log::debug!(
            "Mapped {} slots, {} placements, {} issues",
            mapper.position_to_slot.len(),
            mapper.placements.len(),
            mapper.issues.len()
        );

        mapper
    }

    pub fn slot_id_at(&self, position: Position) -> Option<&SlotId> {
        self.position_to_slot.get(&position)
    }

    /// Linear scan over placements; the matrix is a few hundred cells at most.
    pub fn assignment_at(
        &self,
        field_index: usize,
        time_index: usize,
        part_number: u32,
    ) -> Option<&Assignment> {
        let target = Position::new(field_index, time_index, part_number);
        self.placements
            .iter()
            .find(|(key, position)| {
                **position == target && self.position_to_slot.get(*position) == Some(&key.slot_id)
            })
            .and_then(|(key, _)| self.entity_cache.get(&key.entity))
    }

    pub fn assignment_at_position(&self, position: Position) -> Option<&Assignment> {
        self.assignment_at(position.field_index, position.time_index, position.part_number)
    }

    /// Every position an entity currently occupies, in grid order.
    pub fn placements_of(&self, entity: &EntityKey) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .placements
            .iter()
            .filter(|(key, _)| key.entity == *entity)
            .map(|(_, position)| *position)
            .collect();
        positions.sort();
        positions
    }

    pub fn slot_count(&self) -> usize {
        self.position_to_slot.len()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn readiness(&self) -> Readiness {
        if self.issues.is_empty() {
            Readiness::Ready
        } else {
            Readiness::NotReady(self.issues.clone())
        }
    }
}
