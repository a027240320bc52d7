//! What the schedule grid shows, independent of egui.
//!
//! `build_grid` flattens a [`ScheduleBoard`] into fields × parts × time rows.
//! It is rebuilt from scratch every frame, so a reconcile is visible on the
//! next repaint without any cache invalidation.

use crate::models::schedule::{Assignment, Position, SlotId};
use crate::services::assignment::SurfaceKind;
use crate::services::board::ScheduleBoard;
use crate::services::slot_mapper::{ConfigIssue, Readiness};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub position: Position,
    pub time: String,
    pub slot_id: Option<SlotId>,
    pub occupant: Option<Assignment>,
    /// Shows the per-cell remove button.
    pub removable: bool,
}

impl GridCell {
    pub fn is_open(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub time: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSection {
    pub part_number: u32,
    pub name: String,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub surface: SurfaceKind,
    pub title: String,
    /// Column headers, one per field.
    pub fields: Vec<String>,
    pub parts: Vec<PartSection>,
}

impl GridLayout {
    /// Field numbers may have gaps, so cells are matched on their position
    /// rather than their column.
    pub fn cell(&self, position: Position) -> Option<&GridCell> {
        self.parts
            .iter()
            .find(|section| section.part_number == position.part_number)?
            .rows
            .get(position.time_index)?
            .cells
            .iter()
            .find(|cell| cell.position.field_index == position.field_index)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|cell| !cell.is_open()).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.parts
            .iter()
            .flat_map(|section| section.rows.iter())
            .flat_map(|row| row.cells.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridState {
    NotReady(Vec<ConfigIssue>),
    Ready(GridLayout),
}

pub fn build_grid(board: &ScheduleBoard, surface: SurfaceKind) -> GridState {
    if let Readiness::NotReady(issues) = board.readiness() {
        return GridState::NotReady(issues);
    }

    let snapshot = board.snapshot();
    let fields: Vec<String> = snapshot
        .fields
        .iter()
        .map(|field| field.display_name.clone())
        .collect();

    let parts = snapshot
        .parts
        .iter()
        .map(|matrix| {
            let part_number = matrix.part.part_number;
            let times = board.time_slots().for_part(part_number).unwrap_or(&[]);
            let rows = times
                .iter()
                .enumerate()
                .map(|(time_index, time)| GridRow {
                    time: time.clone(),
                    cells: snapshot
                        .fields
                        .iter()
                        .map(|field| {
                            let position = Position::new(field.index, time_index, part_number);
                            let occupant = board.entity_at(position).cloned();
                            GridCell {
                                position,
                                time: time.clone(),
                                slot_id: board.slot_id_at(position).cloned(),
                                removable: surface.allows_removal() && occupant.is_some(),
                                occupant,
                            }
                        })
                        .collect(),
                })
                .collect();

            PartSection {
                part_number,
                name: matrix.part.name.clone(),
                rows,
            }
        })
        .collect();

    let title = match &snapshot.golf_course_name {
        Some(course) => format!("{} · {}", surface.title(), course),
        None => surface.title().to_string(),
    };

    GridState::Ready(GridLayout {
        surface,
        title,
        fields,
        parts,
    })
}
