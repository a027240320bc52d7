pub mod grid_cell;
pub mod grid_model;
pub(crate) mod palette;
pub mod schedule_grid;
pub mod status_panel;

pub use grid_model::{build_grid, GridCell, GridLayout, GridState};
pub use schedule_grid::GridInteraction;
