//! Grid view: field columns, one section per part, one row per time.

use egui::{Align2, FontId, RichText, ScrollArea, Sense, Vec2};

use super::grid_cell::{render_grid_cell, CELL_HEIGHT};
use super::grid_model::{GridLayout, GridState, PartSection};
use super::palette::GridPalette;
use crate::models::drag::DragSession;
use crate::models::schedule::{Assignment, Position};

pub const TIME_LABEL_WIDTH: f32 = 56.0;
const MIN_COLUMN_WIDTH: f32 = 110.0;
const HEADER_HEIGHT: f32 = 26.0;

/// Everything the user did to the grid this frame.
#[derive(Debug, Default)]
pub struct GridInteraction {
    /// Entity picked up from a cell, with the cell it left.
    pub drag_started: Option<(Assignment, Position)>,
    pub hovered: Option<Position>,
    pub dropped_on: Option<Position>,
    pub remove_requested: Option<Position>,
}

impl GridInteraction {
    fn absorb(&mut self, position: Position, cell: super::grid_cell::CellInteraction) {
        if cell.drag_started.is_some() {
            self.drag_started = cell.drag_started;
        }
        if cell.hovered {
            self.hovered = Some(position);
        }
        if cell.dropped {
            self.dropped_on = Some(position);
        }
        if cell.remove_clicked {
            self.remove_requested = Some(position);
        }
    }
}

pub(crate) fn render_schedule_grid(
    ui: &mut egui::Ui,
    state: &GridState,
    session: &DragSession,
    palette: &GridPalette,
) -> GridInteraction {
    match state {
        GridState::NotReady(issues) => {
            render_setup_prompt(ui, issues);
            GridInteraction::default()
        }
        GridState::Ready(layout) => render_layout(ui, layout, session, palette),
    }
}

fn render_setup_prompt(ui: &mut egui::Ui, issues: &[crate::services::slot_mapper::ConfigIssue]) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Schedule setup is incomplete");
        ui.add_space(8.0);
        ui.label("Finish the course setup before assigning. Missing:");
        ui.add_space(6.0);
        for issue in issues {
            ui.label(RichText::new(format!("• {}", issue)).weak());
        }
    });
}

fn render_layout(
    ui: &mut egui::Ui,
    layout: &GridLayout,
    session: &DragSession,
    palette: &GridPalette,
) -> GridInteraction {
    let mut result = GridInteraction::default();
    ui.label(RichText::new(&layout.title).heading());
    ui.add_space(4.0);

    let field_count = layout.fields.len().max(1) as f32;
    let column_width =
        ((ui.available_width() - TIME_LABEL_WIDTH) / field_count).max(MIN_COLUMN_WIDTH);

    ScrollArea::both()
        .id_source("schedule_grid_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::ZERO;
            render_header(ui, layout, column_width, palette);

            for section in &layout.parts {
                render_part_banner(ui, section, column_width * field_count, palette);
                for row in &section.rows {
                    ui.horizontal(|ui| {
                        let (label_rect, _) = ui.allocate_exact_size(
                            Vec2::new(TIME_LABEL_WIDTH, CELL_HEIGHT),
                            Sense::hover(),
                        );
                        ui.painter().text(
                            label_rect.center(),
                            Align2::CENTER_CENTER,
                            &row.time,
                            FontId::monospace(12.0),
                            palette.header_text,
                        );

                        for cell in &row.cells {
                            let interaction =
                                render_grid_cell(ui, cell, column_width, session, palette);
                            result.absorb(cell.position, interaction);
                        }
                    });
                }
            }
        });

    result
}

fn render_header(ui: &mut egui::Ui, layout: &GridLayout, column_width: f32, palette: &GridPalette) {
    ui.horizontal(|ui| {
        let (corner, _) =
            ui.allocate_exact_size(Vec2::new(TIME_LABEL_WIDTH, HEADER_HEIGHT), Sense::hover());
        ui.painter().rect_filled(corner, 0.0, palette.header_bg);

        for field in &layout.fields {
            let (rect, _) =
                ui.allocate_exact_size(Vec2::new(column_width, HEADER_HEIGHT), Sense::hover());
            ui.painter().rect_filled(rect, 0.0, palette.header_bg);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                field,
                FontId::proportional(13.0),
                palette.header_text,
            );
        }
    });
}

fn render_part_banner(ui: &mut egui::Ui, section: &PartSection, width: f32, palette: &GridPalette) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(TIME_LABEL_WIDTH + width, HEADER_HEIGHT - 4.0),
        Sense::hover(),
    );
    ui.painter().rect_filled(rect, 0.0, palette.part_bg);
    ui.painter().text(
        rect.left_center() + Vec2::new(8.0, 0.0),
        Align2::LEFT_CENTER,
        format!("{} · {} rows", section.name, section.rows.len()),
        FontId::proportional(12.0),
        palette.header_text,
    );
}
