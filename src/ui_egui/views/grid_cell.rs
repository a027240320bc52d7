//! One slot of the schedule grid: background, occupant card or open
//! placeholder, drop highlighting, and the remove button.

use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::grid_model::GridCell;
use super::palette::GridPalette;
use crate::models::drag::DragSession;
use crate::models::schedule::{Assignment, Position};
use crate::ui_egui::drag::{drag_source_started, probe_drop_target};

pub const CELL_HEIGHT: f32 = 44.0;
const CARD_MARGIN: f32 = 3.0;
const REMOVE_BUTTON_SIZE: f32 = 16.0;

#[derive(Debug, Default)]
pub struct CellInteraction {
    pub drag_started: Option<(Assignment, Position)>,
    pub hovered: bool,
    pub dropped: bool,
    pub remove_clicked: bool,
}

pub(crate) fn render_grid_cell(
    ui: &mut egui::Ui,
    cell: &GridCell,
    width: f32,
    session: &DragSession,
    palette: &GridPalette,
) -> CellInteraction {
    let mut result = CellInteraction::default();
    let (rect, response) =
        ui.allocate_exact_size(Vec2::new(width, CELL_HEIGHT), Sense::click_and_drag());

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.cell_bg);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, palette.cell_border));

    let probe = probe_drop_target(ui, rect, session);
    result.hovered = probe.hovered;
    result.dropped = probe.released;

    if probe.hovered || session.is_hovering(cell.position) {
        painter.rect_filled(rect, 0.0, palette.hover_overlay);
        painter.rect_stroke(rect.shrink(1.0), 2.0, Stroke::new(2.0, palette.drop_target_border));
    }

    match &cell.occupant {
        Some(occupant) => {
            let card = rect.shrink(CARD_MARGIN);
            paint_card(ui, card, occupant, palette);

            if cell.removable {
                let button = Rect::from_min_size(
                    Pos2::new(card.right() - REMOVE_BUTTON_SIZE - 2.0, card.top() + 2.0),
                    Vec2::splat(REMOVE_BUTTON_SIZE),
                );
                let remove = ui
                    .interact(button, response.id.with("remove"), Sense::click())
                    .on_hover_text("Remove from this slot");
                let color = if remove.hovered() {
                    palette.drop_target_border
                } else {
                    palette.inactive_text
                };
                ui.painter().text(
                    button.center(),
                    Align2::CENTER_CENTER,
                    "✕",
                    FontId::proportional(12.0),
                    color,
                );
                if remove.clicked() {
                    result.remove_clicked = true;
                }
            }

            if drag_source_started(ui, &response) {
                result.drag_started = Some((occupant.clone(), cell.position));
            }
            if !session.is_active() {
                response.on_hover_text(occupant_tooltip(occupant, &cell.time));
            }
        }
        None => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "+",
                FontId::proportional(16.0),
                palette.placeholder_text,
            );
            if response.hovered() && session.is_active() {
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            }
        }
    }

    result
}

fn paint_card(ui: &egui::Ui, card: Rect, occupant: &Assignment, palette: &GridPalette) {
    let painter = ui.painter();
    painter.rect_filled(card, 4.0, palette.card_fill(occupant));

    let (name, badge, inactive) = match occupant {
        Assignment::Caddie(caddie) => (
            caddie.name.clone(),
            caddie
                .special_badge
                .clone()
                .or_else(|| caddie.group_badge.clone()),
            caddie.status != "active",
        ),
        Assignment::SpecialGroup(group) => (
            group.name.clone(),
            Some(format!("{}명", group.member_count)),
            !group.is_active,
        ),
    };

    let text_color = if inactive {
        palette.inactive_text
    } else {
        palette.card_text
    };
    painter.text(
        card.left_top() + Vec2::new(6.0, 4.0),
        Align2::LEFT_TOP,
        name,
        FontId::proportional(13.0),
        text_color,
    );

    if let Some(badge) = badge {
        let galley = painter.layout_no_wrap(badge, FontId::proportional(10.0), palette.badge_text);
        let badge_rect = Rect::from_min_size(
            card.left_bottom() + Vec2::new(6.0, -galley.size().y - 6.0),
            galley.size() + Vec2::new(8.0, 2.0),
        );
        painter.rect_filled(badge_rect, 3.0, palette.badge_bg);
        painter.galley(badge_rect.min + Vec2::new(4.0, 1.0), galley, palette.badge_text);
    }
}

fn occupant_tooltip(occupant: &Assignment, time: &str) -> String {
    match occupant {
        Assignment::Caddie(caddie) => {
            let mut lines = vec![format!("{} at {}", caddie.name, time)];
            if let Some(group) = &caddie.group_badge {
                lines.push(format!("Group: {}", group));
            }
            if let Some(team) = &caddie.special_badge {
                lines.push(format!("Special team: {}", team));
            }
            lines.push(format!("Status: {}", caddie.status));
            lines.join("\n")
        }
        Assignment::SpecialGroup(group) => format!(
            "{} at {}\n{} members{}",
            group.name,
            time,
            group.member_count,
            if group.is_active { "" } else { " (inactive)" }
        ),
    }
}
