// Test fixtures - an in-memory schedule server and sample data
// Shared by the integration and property tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use caddie_console::models::schedule::{
    Assignment, AssignmentKind, CaddieAssignment, EntityId, Field, MatrixRow, MatrixSlot, Part,
    PartId, PartMatrix, ScheduleId, ScheduleSnapshot, SlotId, SpecialGroupAssignment, TimeSlots,
};
use caddie_console::services::board::{ScheduleBoard, TimeSlotSource};
use caddie_console::services::schedule_api::{
    ApiError, AssignRequest, RemoveRequest, ScheduleApi,
};
use chrono::NaiveTime;

pub const TIMES: [&str; 3] = ["06:00", "06:10", "06:20"];

pub fn slot_id(field_index: usize, time_index: usize) -> SlotId {
    SlotId::new(format!("slot-{}-{}", field_index, time_index))
}

pub fn caddie(id: &str, name: &str) -> CaddieAssignment {
    CaddieAssignment {
        id: EntityId::from(id),
        name: name.to_string(),
        group_badge: Some("1조".to_string()),
        status: "active".to_string(),
        special_badge: None,
    }
}

pub fn group(id: &str, name: &str, member_count: u32) -> SpecialGroupAssignment {
    SpecialGroupAssignment {
        id: EntityId::from(id),
        name: name.to_string(),
        member_count,
        color: Some("#3366cc".to_string()),
        is_active: true,
    }
}

/// One part, `fields` fields, three ten-minute rows, every cell open.
pub fn empty_schedule(fields: usize) -> ScheduleSnapshot {
    ScheduleSnapshot {
        schedule_id: ScheduleId::from("sch-1"),
        date: None,
        golf_course_name: Some("Lakeside".to_string()),
        fields: (0..fields)
            .map(|index| Field {
                index,
                display_name: format!("Field {}", index + 1),
            })
            .collect(),
        parts: vec![PartMatrix {
            part: Part {
                id: PartId::from("p1"),
                part_number: 1,
                name: "1부".to_string(),
                start_time: NaiveTime::from_hms_opt(6, 0, 0),
                end_time: NaiveTime::from_hms_opt(6, 30, 0),
            },
            rows: TIMES
                .iter()
                .enumerate()
                .map(|(time_index, time)| MatrixRow {
                    time: time.to_string(),
                    slots: (0..fields)
                        .map(|field_index| MatrixSlot {
                            field_number: field_index as u32 + 1,
                            slot_id: slot_id(field_index, time_index),
                            assignment: None,
                        })
                        .collect(),
                })
                .collect(),
        }],
        available_caddies: vec![caddie("c1", "Kim"), caddie("c2", "Lee")],
        available_special_groups: vec![group("g1", "A조", 3), group("g2", "B조", 4)],
    }
}

pub fn explicit_times() -> TimeSlotSource {
    TimeSlotSource::Explicit(TimeSlots::new(vec![TIMES
        .iter()
        .map(|time| time.to_string())
        .collect()]))
}

pub fn board_for(server: &FakeScheduleServer) -> ScheduleBoard {
    ScheduleBoard::load(server, ScheduleId::from("sch-1"), explicit_times())
        .expect("fake server always serves the schedule")
}

/// Behaves like the backend for the three endpoints the console uses.
pub struct FakeScheduleServer {
    schedule: RefCell<ScheduleSnapshot>,
    pub fetch_calls: Cell<usize>,
    pub assign_calls: Cell<usize>,
    pub remove_calls: Cell<usize>,
    reject_next_assign: RefCell<Option<ApiError>>,
    fail_fetches: Cell<bool>,
}

impl FakeScheduleServer {
    pub fn new(schedule: ScheduleSnapshot) -> Self {
        Self {
            schedule: RefCell::new(schedule),
            fetch_calls: Cell::new(0),
            assign_calls: Cell::new(0),
            remove_calls: Cell::new(0),
            reject_next_assign: RefCell::new(None),
            fail_fetches: Cell::new(false),
        }
    }

    pub fn reject_next_assign(&self, error: ApiError) {
        *self.reject_next_assign.borrow_mut() = Some(error);
    }

    pub fn set_fetch_failure(&self, failing: bool) {
        self.fail_fetches.set(failing);
    }

    pub fn mutation_calls(&self) -> usize {
        self.assign_calls.get() + self.remove_calls.get()
    }

    pub fn occupant(&self, slot: &SlotId) -> Option<Assignment> {
        self.schedule
            .borrow()
            .parts
            .iter()
            .flat_map(|matrix| matrix.rows.iter())
            .flat_map(|row| row.slots.iter())
            .find(|cell| &cell.slot_id == slot)
            .and_then(|cell| cell.assignment.clone())
    }

    fn entity(&self, kind: AssignmentKind, id: &EntityId) -> Option<Assignment> {
        let schedule = self.schedule.borrow();
        match kind {
            AssignmentKind::Caddie => schedule
                .available_caddies
                .iter()
                .find(|caddie| &caddie.id == id)
                .cloned()
                .map(Assignment::Caddie),
            AssignmentKind::SpecialGroup => schedule
                .available_special_groups
                .iter()
                .find(|group| &group.id == id)
                .cloned()
                .map(Assignment::SpecialGroup),
        }
    }

    fn rejected(status: u16, message: &str) -> ApiError {
        ApiError::Rejected {
            status,
            code: None,
            message: message.to_string(),
        }
    }
}

impl ScheduleApi for FakeScheduleServer {
    fn fetch_schedule(&self, schedule_id: &ScheduleId) -> Result<ScheduleSnapshot, ApiError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.fail_fetches.get() {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        let schedule = self.schedule.borrow();
        if &schedule.schedule_id != schedule_id {
            return Err(Self::rejected(404, "Not found."));
        }
        Ok(schedule.clone())
    }

    fn assign_to_slot(&self, request: &AssignRequest) -> Result<(), ApiError> {
        self.assign_calls.set(self.assign_calls.get() + 1);
        if let Some(error) = self.reject_next_assign.borrow_mut().take() {
            return Err(error);
        }

        let entity_id = request
            .entity_id()
            .ok_or_else(|| Self::rejected(400, "Invalid request: no entity"))?;
        let entity = self
            .entity(request.kind(), entity_id)
            .ok_or_else(|| Self::rejected(400, "Invalid entity"))?;
        let row_time = request.time.strip_suffix(":00").unwrap_or(&request.time);

        let mut schedule = self.schedule.borrow_mut();
        let cell = schedule
            .parts
            .iter_mut()
            .filter(|matrix| matrix.part.id == request.part_id)
            .flat_map(|matrix| matrix.rows.iter_mut())
            .filter(|row| row.time == row_time)
            .flat_map(|row| row.slots.iter_mut())
            .find(|cell| cell.field_number == request.field_number)
            .ok_or_else(|| Self::rejected(400, "Invalid slot"))?;

        if cell.assignment.is_some() {
            return Err(Self::rejected(400, "This slot is already assigned"));
        }
        cell.assignment = Some(entity);
        Ok(())
    }

    fn remove_assignment(&self, request: &RemoveRequest) -> Result<(), ApiError> {
        self.remove_calls.set(self.remove_calls.get() + 1);

        let mut schedule = self.schedule.borrow_mut();
        let cell = schedule
            .parts
            .iter_mut()
            .flat_map(|matrix| matrix.rows.iter_mut())
            .flat_map(|row| row.slots.iter_mut())
            .find(|cell| cell.slot_id == request.slot_id)
            .ok_or_else(|| Self::rejected(404, "Slot not found"))?;

        match &cell.assignment {
            Some(assignment) if assignment.kind() == request.assignment_type => {
                cell.assignment = None;
                Ok(())
            }
            _ => Err(Self::rejected(400, "Nothing of that type to remove")),
        }
    }
}
