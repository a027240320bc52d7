//! Status bar: schedule, gesture state, readiness, placement count.

use super::ConsoleApp;
use crate::services::assignment::GestureState;
use crate::services::slot_mapper::Readiness;
use egui::{Color32, RichText};

const SEPARATOR_WIDTH: f32 = 8.0;

fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

fn gesture_color(gesture: &GestureState, is_dark: bool) -> Color32 {
    match gesture {
        GestureState::Failed(_) => Color32::from_rgb(200, 70, 70),
        GestureState::Rejected(_) => Color32::from_rgb(200, 140, 40),
        GestureState::Succeeded => Color32::from_rgb(60, 150, 80),
        _ => secondary_text_color(is_dark),
    }
}

impl ConsoleApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let is_dark = ctx.style().visuals.dark_mode;
        let secondary = secondary_text_color(is_dark);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    match &self.board {
                        Some(board) => {
                            ui.label(
                                RichText::new(format!("Schedule {}", board.schedule_id())).small(),
                            );
                            ui.add_space(SEPARATOR_WIDTH);

                            match board.readiness() {
                                Readiness::Ready => {
                                    ui.label(
                                        RichText::new(format!(
                                            "{} placed · {} slots",
                                            board.mapper().placement_count(),
                                            board.mapper().slot_count()
                                        ))
                                        .small()
                                        .color(secondary),
                                    );
                                }
                                Readiness::NotReady(issues) => {
                                    ui.label(
                                        RichText::new(format!("Setup incomplete ({})", issues.len()))
                                            .small()
                                            .color(Color32::from_rgb(200, 140, 40)),
                                    );
                                }
                            }
                        }
                        None => {
                            ui.label(RichText::new("No schedule").small().color(secondary));
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.gesture.label())
                                .small()
                                .color(gesture_color(&self.gesture, is_dark)),
                        );
                        ui.add_space(SEPARATOR_WIDTH);
                        ui.label(
                            RichText::new(self.state.surface.title()).small().color(secondary),
                        );
                    });
                });
            });
    }
}
