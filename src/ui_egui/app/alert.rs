//! Blocking alert for server rejections. Stays up until acknowledged.

use egui::{Context, RichText};

use super::ConsoleApp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct AlertState {
    pending: Option<Alert>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A newer alert replaces one still on screen.
    pub fn raise(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.pending = Some(Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&Alert> {
        self.pending.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Returns true on the frame the alert is dismissed.
    pub fn render(&mut self, ctx: &Context) -> bool {
        let Some(alert) = self.pending() else {
            return false;
        };

        let mut dismissed = false;

        egui::Window::new(alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.set_max_width(420.0);

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("⚠")
                            .size(24.0)
                            .color(egui::Color32::from_rgb(220, 150, 50)),
                    );
                    ui.vertical(|ui| {
                        ui.label(alert.message.as_str());
                    });
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
                ui.add_space(5.0);
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            dismissed = true;
        }

        if dismissed {
            self.dismiss();
        }
        dismissed
    }
}

impl ConsoleApp {
    pub(super) fn handle_alert(&mut self, ctx: &Context) {
        if self.alert.render(ctx) {
            log::debug!("Alert dismissed");
        }
    }
}
