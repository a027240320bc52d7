//! The schedule currently on screen.
//!
//! A [`ScheduleBoard`] owns the latest server snapshot together with the time
//! rows and the mapper derived from it. It is never patched: every successful
//! mutation is followed by [`Reconcile::reconcile`], which refetches the whole
//! schedule and rebuilds the derived state wholesale.

use crate::models::schedule::{
    Assignment, AssignmentKind, Part, Position, ScheduleId, ScheduleSnapshot, SlotId, TimeSlots,
};
use crate::models::settings::ScheduleSettings;
use crate::services::schedule_api::{ApiError, ScheduleApi};
use crate::services::slot_mapper::{PositionSlotMapper, Readiness};
use crate::utils::time::generate_rows;

/// Where the per-part time rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSlotSource {
    /// Fixed lists, one per part.
    Explicit(TimeSlots),
    /// Derived from each part's start/end time every `minutes`.
    Interval { minutes: u32 },
}

impl TimeSlotSource {
    pub fn from_settings(settings: &ScheduleSettings) -> Self {
        match &settings.time_slots {
            Some(rows) => TimeSlotSource::Explicit(TimeSlots::new(rows.clone())),
            None => TimeSlotSource::Interval {
                minutes: settings.slot_interval_minutes,
            },
        }
    }

    pub fn resolve(&self, snapshot: &ScheduleSnapshot) -> TimeSlots {
        match self {
            TimeSlotSource::Explicit(time_slots) => time_slots.clone(),
            TimeSlotSource::Interval { minutes } => {
                let part_count = snapshot
                    .parts
                    .iter()
                    .map(|matrix| matrix.part.part_number as usize)
                    .max()
                    .unwrap_or(0);

                let mut rows = vec![Vec::new(); part_count];
                for matrix in &snapshot.parts {
                    let part = &matrix.part;
                    if let (Some(start), Some(end), Some(slot)) =
                        (part.start_time, part.end_time, rows.get_mut(part.part_index()))
                    {
                        *slot = generate_rows(start, end, *minutes);
                    }
                }
                TimeSlots::new(rows)
            }
        }
    }
}

/// Refetch-and-rebuild after a successful write.
pub trait Reconcile {
    fn reconcile(&mut self, api: &dyn ScheduleApi) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ScheduleBoard {
    schedule_id: ScheduleId,
    time_slot_source: TimeSlotSource,
    time_slots: TimeSlots,
    snapshot: ScheduleSnapshot,
    mapper: PositionSlotMapper,
    generation: u64,
}

impl ScheduleBoard {
    pub fn load(
        api: &dyn ScheduleApi,
        schedule_id: ScheduleId,
        time_slot_source: TimeSlotSource,
    ) -> Result<Self, ApiError> {
        let snapshot = api.fetch_schedule(&schedule_id)?;
        log::info!(
            "Loaded schedule {} ({} fields, {} parts)",
            schedule_id,
            snapshot.fields.len(),
            snapshot.parts.len()
        );
        let mut board = Self::from_snapshot(snapshot, time_slot_source);
        board.schedule_id = schedule_id;
        Ok(board)
    }

    pub fn from_snapshot(snapshot: ScheduleSnapshot, time_slot_source: TimeSlotSource) -> Self {
        let time_slots = time_slot_source.resolve(&snapshot);
        let mapper = PositionSlotMapper::build(&snapshot, &time_slots);
        Self {
            schedule_id: snapshot.schedule_id.clone(),
            time_slot_source,
            time_slots,
            snapshot,
            mapper,
            generation: 0,
        }
    }

    /// Replace everything derived from the previous snapshot.
    pub fn apply_snapshot(&mut self, snapshot: ScheduleSnapshot) {
        let time_slots = self.time_slot_source.resolve(&snapshot);
        let mapper = PositionSlotMapper::build(&snapshot, &time_slots);
        self.time_slots = time_slots;
        self.mapper = mapper;
        self.snapshot = snapshot;
        self.generation += 1;
    }

    pub fn schedule_id(&self) -> &ScheduleId {
        &self.schedule_id
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    pub fn mapper(&self) -> &PositionSlotMapper {
        &self.mapper
    }

    pub fn time_slots(&self) -> &TimeSlots {
        &self.time_slots
    }

    /// How many times the board has been rebuilt since it was loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn readiness(&self) -> Readiness {
        self.mapper.readiness()
    }

    pub fn part(&self, part_number: u32) -> Option<&Part> {
        self.snapshot.part(part_number)
    }

    pub fn time_at(&self, position: Position) -> Option<&str> {
        self.time_slots
            .time_at(position.part_number, position.time_index)
    }

    pub fn slot_id_at(&self, position: Position) -> Option<&SlotId> {
        self.mapper.slot_id_at(position)
    }

    pub fn entity_at(&self, position: Position) -> Option<&Assignment> {
        self.mapper.assignment_at_position(position)
    }

    /// Entities of `kind` that the status panel offers for placement.
    pub fn available(&self, kind: AssignmentKind) -> Vec<Assignment> {
        match kind {
            AssignmentKind::Caddie => self
                .snapshot
                .available_caddies
                .iter()
                .cloned()
                .map(Assignment::Caddie)
                .collect(),
            AssignmentKind::SpecialGroup => self
                .snapshot
                .available_special_groups
                .iter()
                .cloned()
                .map(Assignment::SpecialGroup)
                .collect(),
        }
    }
}

impl Reconcile for ScheduleBoard {
    fn reconcile(&mut self, api: &dyn ScheduleApi) -> Result<(), ApiError> {
        let snapshot = api.fetch_schedule(&self.schedule_id)?;
        self.apply_snapshot(snapshot);
        log::debug!(
            "Schedule {} reconciled (generation {})",
            self.schedule_id,
            self.generation
        );
        Ok(())
    }
}
