use std::collections::{HashSet, VecDeque};

use common::grid::{Grid, GridDirection, GridPos};

// Breadth-first search over raw grid adjacency (walls are ignored) for the
// closest cell that is not blocked. Ties go to whichever cell was enqueued first.
pub fn nearest_free_cell(grid: &Grid, start: GridPos, is_blocked: impl Fn(GridPos) -> bool) -> Option<GridPos> {
    if !grid.contains(start) {
        return None;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if !is_blocked(pos) {
            return Some(pos);
        }

        for dir in GridDirection::ALL {
            if let Some(next) = grid.adjacent(pos, dir)
                && visited.insert(next)
            {
                queue.push_back(next);
            }
        }
    }

    None
}
