// Property-based tests for the slot mapper and the assignment controller
mod fixtures;

use caddie_console::models::drag::DragSession;
use caddie_console::models::schedule::{
    Assignment, CaddieAssignment, EntityId, MatrixRow, MatrixSlot, Position, SlotId,
    SpecialGroupAssignment, TimeSlots,
};
use caddie_console::services::assignment::{AssignmentController, SurfaceKind};
use caddie_console::services::slot_mapper::PositionSlotMapper;
use fixtures::{board_for, empty_schedule, group, FakeScheduleServer, TIMES};
use proptest::prelude::*;

fn row_time(time_index: usize) -> String {
    format!("{:02}:{:02}", 6 + time_index / 6, (time_index % 6) * 10)
}

fn occupant(kind: u8, field_index: usize, time_index: usize) -> Option<Assignment> {
    let suffix = format!("{}-{}", field_index, time_index);
    match kind {
        1 => Some(Assignment::Caddie(CaddieAssignment {
            id: EntityId::new(format!("c{}", suffix)),
            name: format!("Caddie {}", suffix),
            group_badge: None,
            status: "active".to_string(),
            special_badge: None,
        })),
        2 => Some(Assignment::SpecialGroup(SpecialGroupAssignment {
            id: EntityId::new(format!("g{}", suffix)),
            name: format!("Group {}", suffix),
            member_count: 2,
            color: None,
            is_active: true,
        })),
        _ => None,
    }
}

/// (fields, rows, per-cell occupancy: 0 open, 1 caddie, 2 group, 3 no slot)
fn grid_strategy() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..6, 1usize..8).prop_flat_map(|(fields, rows)| {
        (
            Just(fields),
            Just(rows),
            prop::collection::vec(0u8..4, fields * rows),
        )
    })
}

proptest! {
    /// Every slot present in the snapshot is found again at its coordinates.
    #[test]
    fn prop_mapper_round_trips_every_present_slot((fields, rows, cells) in grid_strategy()) {
        let mut snapshot = empty_schedule(fields);
        snapshot.available_caddies.clear();
        snapshot.available_special_groups.clear();
        snapshot.parts[0].rows = (0..rows)
            .map(|time_index| MatrixRow {
                time: row_time(time_index),
                slots: (0..fields)
                    .filter(|field_index| cells[time_index * fields + field_index] != 3)
                    .map(|field_index| MatrixSlot {
                        field_number: field_index as u32 + 1,
                        slot_id: SlotId::new(format!("s{}-{}", field_index, time_index)),
                        assignment: occupant(cells[time_index * fields + field_index], field_index, time_index),
                    })
                    .collect(),
            })
            .collect();
        let time_slots = TimeSlots::new(vec![(0..rows).map(row_time).collect()]);

        let mapper = PositionSlotMapper::build(&snapshot, &time_slots);

        for (time_index, row) in snapshot.parts[0].rows.iter().enumerate() {
            for slot in &row.slots {
                let field_index = slot.field_number as usize - 1;
                let position = Position::new(field_index, time_index, 1);
                prop_assert_eq!(mapper.slot_id_at(position), Some(&slot.slot_id));
                prop_assert_eq!(
                    mapper.assignment_at(field_index, time_index, 1),
                    slot.assignment.as_ref()
                );
            }
        }
    }

    /// A special group may sit in two fields of the same time row.
    #[test]
    fn prop_group_occupies_distinct_fields_at_once(
        fields in 2usize..6,
        time_index in 0usize..TIMES.len(),
        picks in (0usize..100, 1usize..100),
    ) {
        let f1 = picks.0 % fields;
        let f2 = (f1 + 1 + picks.1 % (fields - 1)) % fields;
        prop_assume!(f1 != f2);

        let server = FakeScheduleServer::new(empty_schedule(fields));
        let mut board = board_for(&server);
        let mut session = DragSession::new();
        let controller = AssignmentController::new(&server, SurfaceKind::SpecialTeam);
        let entity = Assignment::SpecialGroup(group("g1", "A조", 3));

        for field_index in [f1, f2] {
            let raw = session.begin(entity.clone(), None).to_json();
            let result = controller.assign(&mut board, &mut session, &raw, Position::new(field_index, time_index, 1));
            prop_assert!(result.is_ok());
        }

        prop_assert_eq!(board.entity_at(Position::new(f1, time_index, 1)), Some(&entity));
        prop_assert_eq!(board.entity_at(Position::new(f2, time_index, 1)), Some(&entity));
    }

    /// After a successful removal and refetch the cell reads as open.
    #[test]
    fn prop_removed_cell_reads_empty(
        fields in 1usize..5,
        field_pick in 0usize..100,
        time_index in 0usize..TIMES.len(),
    ) {
        let field_index = field_pick % fields;
        let position = Position::new(field_index, time_index, 1);
        let server = FakeScheduleServer::new(empty_schedule(fields));
        let mut board = board_for(&server);
        let mut session = DragSession::new();
        let controller = AssignmentController::new(&server, SurfaceKind::SpecialTeam);

        let raw = session
            .begin(Assignment::SpecialGroup(group("g2", "B조", 4)), None)
            .to_json();
        prop_assert!(controller.assign(&mut board, &mut session, &raw, position).is_ok());
        prop_assert!(board.entity_at(position).is_some());

        prop_assert!(controller.remove(&mut board, position).is_ok());
        prop_assert!(board.entity_at(position).is_none());
    }

    /// Rows past the end of the part never reach the server.
    #[test]
    fn prop_out_of_range_row_never_mutates(
        fields in 1usize..5,
        overshoot in 0usize..20,
    ) {
        let server = FakeScheduleServer::new(empty_schedule(fields));
        let mut board = board_for(&server);
        let mut session = DragSession::new();
        let controller = AssignmentController::new(&server, SurfaceKind::SpecialTeam);

        let raw = session
            .begin(Assignment::SpecialGroup(group("g1", "A조", 3)), None)
            .to_json();
        let position = Position::new(0, TIMES.len() + overshoot, 1);

        prop_assert!(controller.assign(&mut board, &mut session, &raw, position).is_err());
        prop_assert_eq!(server.mutation_calls(), 0);
        prop_assert!(!session.is_active());
    }
}
