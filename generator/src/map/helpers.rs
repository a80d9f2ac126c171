use common::grid::{Grid, GridDirection, GridPos};

// Players always start in the north-west corner
#[must_use]
pub const fn spawn_cell() -> GridPos {
    GridPos::new(0, 0)
}

// The exit sits in the opposite corner from the spawn
#[must_use]
pub const fn exit_cell(grid: &Grid) -> GridPos {
    GridPos::new(grid.width() - 1, grid.height() - 1)
}

// Uniform pick from the options, None when there are none
pub fn pick_direction<T: rand::Rng>(rng: &mut T, options: &[GridDirection]) -> Option<GridDirection> {
    if options.is_empty() {
        None
    } else {
        Some(options[rng.random_range(0..options.len())])
    }
}
