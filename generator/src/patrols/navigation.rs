use rand::Rng;

use crate::resources::ReservedCells;
use common::grid::{Grid, GridDirection, GridPos};

// Directions from `from`, out of `candidates`, that step through an open
// corridor into a cell nobody has reserved
#[must_use]
pub fn free_directions(
    grid: &Grid,
    reserved: &ReservedCells,
    from: GridPos,
    candidates: &[GridDirection],
) -> Vec<GridDirection> {
    candidates
        .iter()
        .copied()
        .filter(|dir| {
            grid.adjacent(from, *dir)
                .is_some_and(|next| grid.is_corridor_open(from, next) && !reserved.contains(next))
        })
        .collect()
}

// Walk straight from `start` along `dir` until the corridor turns, ends or runs
// into a reserved cell. Once the run holds `min_cells` cells, every further
// step flips a fair coin to stop early.
pub fn grow_run<R: Rng>(
    grid: &Grid,
    reserved: &ReservedCells,
    start: GridPos,
    dir: GridDirection,
    min_cells: usize,
    stop_chance: f64,
    rng: &mut R,
) -> Vec<GridPos> {
    let mut run = vec![start];
    let mut current = start;

    while let Some(next) = grid.adjacent(current, dir) {
        if !grid.is_corridor_open(current, next) || reserved.contains(next) {
            break;
        }

        run.push(next);
        current = next;

        if run.len() >= min_cells && rng.random_bool(stop_chance) {
            break;
        }
    }

    run
}
