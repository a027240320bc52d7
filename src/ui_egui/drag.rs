//! egui glue for the drag session: pointer tests for drop targets and the
//! floating card that follows the pointer.

use egui::{Align2, Context, CursorIcon, FontId, Id, LayerId, Order, Rect, Response, Stroke, Ui, Vec2};

use crate::models::drag::DragSession;
use crate::models::schedule::Assignment;

use super::views::palette::GridPalette;

const GHOST_SIZE: Vec2 = Vec2::new(140.0, 28.0);

/// Pointer state of one drop target for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropProbe {
    pub hovered: bool,
    pub released: bool,
}

/// Hit-test `rect` against the pointer while a drag is in progress.
pub fn probe_drop_target(ui: &Ui, rect: Rect, session: &DragSession) -> DropProbe {
    if !session.is_active() {
        return DropProbe::default();
    }

    let over = ui
        .ctx()
        .pointer_latest_pos()
        .is_some_and(|pos| rect.contains(pos));
    if !over {
        return DropProbe::default();
    }

    DropProbe {
        hovered: true,
        released: ui.input(|i| i.pointer.primary_released()),
    }
}

/// Mark a drag source; returns true on the frame the drag starts.
pub fn drag_source_started(ui: &Ui, response: &Response) -> bool {
    if response.hovered() && !response.dragged() {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }
    response.drag_started()
}

pub fn pointer_released(ctx: &Context) -> bool {
    ctx.input(|i| i.pointer.primary_released())
}

/// Paint the dragged entity next to the pointer, above every panel.
pub(crate) fn paint_drag_ghost(ctx: &Context, session: &DragSession, palette: &GridPalette) {
    let Some(active) = session.active() else {
        return;
    };
    let Some(pointer) = ctx.pointer_latest_pos() else {
        return;
    };

    ctx.set_cursor_icon(CursorIcon::Grabbing);

    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("schedule_drag_ghost")));
    let rect = Rect::from_min_size(pointer + Vec2::new(12.0, 8.0), GHOST_SIZE);
    painter.rect_filled(rect, 6.0, palette.card_fill(&active.entity));
    painter.rect_stroke(rect, 6.0, Stroke::new(1.0, palette.drop_target_border));
    painter.text(
        rect.left_center() + Vec2::new(8.0, 0.0),
        Align2::LEFT_CENTER,
        ghost_label(&active.entity),
        FontId::proportional(13.0),
        palette.card_text,
    );
}

fn ghost_label(entity: &Assignment) -> String {
    match entity {
        Assignment::Caddie(caddie) => caddie.name.clone(),
        Assignment::SpecialGroup(group) => format!("{} ({})", group.name, group.member_count),
    }
}
