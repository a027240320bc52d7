use egui::RichText;

use super::ConsoleApp;
use crate::services::assignment::SurfaceKind;

impl ConsoleApp {
    /// Schedule selector, load/refresh, and the surface tabs.
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let mut load_clicked = false;
        let mut refresh_clicked = false;
        let mut selected_surface = self.state.surface;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Schedule");
                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.state.input.schedule_id)
                        .desired_width(90.0)
                        .hint_text("id"),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    load_clicked = true;
                }
                if ui.button("Load").clicked() {
                    load_clicked = true;
                }
                if ui
                    .add_enabled(self.board.is_some(), egui::Button::new("⟳ Refresh"))
                    .clicked()
                {
                    refresh_clicked = true;
                }

                ui.separator();
                for surface in [SurfaceKind::SpecialTeam, SurfaceKind::WorkSchedule] {
                    ui.selectable_value(&mut selected_surface, surface, surface.title());
                }

                ui.separator();
                ui.checkbox(&mut self.state.show_side_panel, "Available list");

                if let Some(error) = &self.state.input.load_error {
                    ui.label(RichText::new(format!("⚠ {}", error)).color(ui.visuals().warn_fg_color))
                        .on_hover_text("Last load failed");
                }
            });
            ui.add_space(4.0);
        });

        self.set_surface(selected_surface);
        if load_clicked {
            self.load_schedule();
        } else if refresh_clicked {
            self.refresh_schedule();
        }
    }
}
