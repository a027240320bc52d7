mod app;
pub mod drag;
pub mod views;

pub use app::ConsoleApp;
