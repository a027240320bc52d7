// Benchmark for slot mapper construction and lookups
// Sized like a large course: up to 27 fields, 3 parts, 8-minute rows

use caddie_console::models::schedule::{
    Assignment, EntityId, Field, MatrixRow, MatrixSlot, Part, PartId, PartMatrix, Position,
    ScheduleId, ScheduleSnapshot, SlotId, SpecialGroupAssignment, TimeSlots,
};
use caddie_console::services::slot_mapper::PositionSlotMapper;
use caddie_console::utils::time::generate_rows;
use chrono::NaiveTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn schedule(fields: usize) -> (ScheduleSnapshot, TimeSlots) {
    let bounds = [(6, 11), (11, 16), (16, 19)];
    let mut time_slots = Vec::new();
    let mut parts = Vec::new();

    for (part_index, (start, end)) in bounds.iter().enumerate() {
        let start = NaiveTime::from_hms_opt(*start, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(*end, 0, 0).unwrap();
        let rows = generate_rows(start, end, 8);
        let part_number = part_index as u32 + 1;

        parts.push(PartMatrix {
            part: Part {
                id: PartId::new(format!("p{}", part_number)),
                part_number,
                name: format!("{}부", part_number),
                start_time: Some(start),
                end_time: Some(end),
            },
            rows: rows
                .iter()
                .enumerate()
                .map(|(time_index, time)| MatrixRow {
                    time: time.clone(),
                    slots: (0..fields)
                        .map(|field_index| MatrixSlot {
                            field_number: field_index as u32 + 1,
                            slot_id: SlotId::new(format!("{}-{}-{}", part_number, field_index, time_index)),
                            assignment: (field_index % 3 == 0).then(|| {
                                Assignment::SpecialGroup(SpecialGroupAssignment {
                                    id: EntityId::new(format!("g{}", time_index % 12)),
                                    name: format!("Group {}", time_index % 12),
                                    member_count: 4,
                                    color: None,
                                    is_active: true,
                                })
                            }),
                        })
                        .collect(),
                })
                .collect(),
        });
        time_slots.push(rows);
    }

    let snapshot = ScheduleSnapshot {
        schedule_id: ScheduleId::from("bench"),
        date: None,
        golf_course_name: None,
        fields: (0..fields)
            .map(|index| Field {
                index,
                display_name: format!("Field {}", index + 1),
            })
            .collect(),
        parts,
        available_caddies: Vec::new(),
        available_special_groups: Vec::new(),
    };
    (snapshot, TimeSlots::new(time_slots))
}

fn bench_mapper_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapper_build");

    for fields in [3usize, 9, 27] {
        let (snapshot, time_slots) = schedule(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| PositionSlotMapper::build(black_box(&snapshot), black_box(&time_slots)));
        });
    }

    group.finish();
}

fn bench_assignment_lookup(c: &mut Criterion) {
    let (snapshot, time_slots) = schedule(27);
    let mapper = PositionSlotMapper::build(&snapshot, &time_slots);

    c.bench_function("assignment_at_full_grid", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for time_index in 0..10 {
                for field_index in 0..27 {
                    if mapper
                        .assignment_at_position(black_box(Position::new(field_index, time_index, 2)))
                        .is_some()
                    {
                        found += 1;
                    }
                }
            }
            found
        });
    });
}

criterion_group!(benches, bench_mapper_build, bench_assignment_lookup);
criterion_main!(benches);
