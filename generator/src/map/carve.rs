use rand::Rng;
use tracing::debug;

use common::grid::{Grid, GridDirection, GridError, GridPos};

use super::helpers::pick_direction;

// ============================================================================
// Maze Carving
// ============================================================================

// Randomized depth-first search from (0, 0) with an explicit stack. Removes
// exactly one wall per newly visited cell, so the open corridors always form
// a spanning tree. Returns the number of corridors opened.
pub fn carve_maze<R: Rng>(grid: &mut Grid, rng: &mut R) -> Result<usize, GridError> {
    let mut stack = Vec::new();
    let mut current = GridPos::new(0, 0);
    let mut opened = 0;

    grid.set_visited(current, true)?;

    loop {
        let unvisited: Vec<GridDirection> = GridDirection::ALL
            .into_iter()
            .filter(|dir| grid.adjacent(current, *dir).is_some_and(|next| !grid.is_visited(next)))
            .collect();

        if let Some(dir) = pick_direction(rng, &unvisited) {
            stack.push(current);
            let next = grid.remove_wall(current, dir)?;
            grid.set_visited(next, true)?;
            opened += 1;
            current = next;
        } else if let Some(previous) = stack.pop() {
            // Dead end, backtrack
            current = previous;
        } else {
            break;
        }
    }

    debug!(
        width = grid.width(),
        height = grid.height(),
        corridors = opened,
        "carved maze"
    );
    Ok(opened)
}
