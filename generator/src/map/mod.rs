mod carve;
mod helpers;
mod search;
mod walls;

// Re-export public utilities
pub use carve::carve_maze;
pub use helpers::{exit_cell, pick_direction, spawn_cell};
pub use search::nearest_free_cell;
pub use walls::{is_breakable_candidate, is_restricted};
