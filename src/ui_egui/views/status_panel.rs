//! Side list of entities that can be dragged onto the active grid.

use egui::{Align2, FontId, RichText, ScrollArea, Sense, Stroke, Vec2};

use super::palette::GridPalette;
use crate::models::drag::DragSession;
use crate::models::schedule::Assignment;
use crate::services::assignment::SurfaceKind;
use crate::services::board::ScheduleBoard;
use crate::ui_egui::drag::drag_source_started;

const CHIP_HEIGHT: f32 = 30.0;

#[derive(Debug, Default)]
pub struct PanelInteraction {
    pub drag_started: Option<Assignment>,
}

pub(crate) fn render_status_panel(
    ui: &mut egui::Ui,
    board: &ScheduleBoard,
    surface: SurfaceKind,
    session: &DragSession,
    palette: &GridPalette,
) -> PanelInteraction {
    let mut result = PanelInteraction::default();
    let kind = surface.accepts().assignment_kind();
    let entities = board.available(kind);

    ui.heading(format!("Available {}", kind.label()));
    ui.label(RichText::new("Drag onto an open slot").small().weak());
    ui.separator();

    if entities.is_empty() {
        ui.label(RichText::new(format!("No {} available", kind.label())).weak());
        return result;
    }

    ScrollArea::vertical()
        .id_source("status_panel_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let width = ui.available_width();
            for entity in &entities {
                let placed = board.mapper().placements_of(&entity.key()).len();
                let dragging_this = session
                    .active()
                    .is_some_and(|active| active.entity.key() == entity.key());

                let (rect, response) =
                    ui.allocate_exact_size(Vec2::new(width, CHIP_HEIGHT), Sense::click_and_drag());
                let painter = ui.painter();
                painter.rect_filled(rect.shrink(2.0), 4.0, palette.card_fill(entity));
                if dragging_this {
                    painter.rect_stroke(
                        rect.shrink(2.0),
                        4.0,
                        Stroke::new(2.0, palette.drop_target_border),
                    );
                }
                painter.text(
                    rect.left_center() + Vec2::new(10.0, 0.0),
                    Align2::LEFT_CENTER,
                    chip_label(entity),
                    FontId::proportional(13.0),
                    palette.card_text,
                );
                if placed > 0 {
                    painter.text(
                        rect.right_center() - Vec2::new(10.0, 0.0),
                        Align2::RIGHT_CENTER,
                        format!("×{}", placed),
                        FontId::proportional(11.0),
                        palette.inactive_text,
                    );
                }

                if drag_source_started(ui, &response) {
                    result.drag_started = Some(entity.clone());
                }
            }
        });

    result
}

fn chip_label(entity: &Assignment) -> String {
    match entity {
        Assignment::Caddie(caddie) => match &caddie.group_badge {
            Some(group) => format!("{} · {}", caddie.name, group),
            None => caddie.name.clone(),
        },
        Assignment::SpecialGroup(group) => format!("{} ({}명)", group.name, group.member_count),
    }
}
