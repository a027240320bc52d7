// Module exports for models

pub mod drag;
pub mod schedule;
pub mod settings;
