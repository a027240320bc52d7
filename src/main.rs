// Caddie Console
// Main entry point

use caddie_console::ui_egui::ConsoleApp;

fn main() -> eframe::Result {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Caddie Console");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Caddie Console")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Caddie Console",
        options,
        Box::new(|cc| Ok(Box::new(ConsoleApp::new(cc)))),
    )
}
