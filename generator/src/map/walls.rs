use common::grid::{Grid, GridDirection, GridPos};

// ============================================================================
// Wall Junction Classification
// ============================================================================

// Does the wall on `dir` of this cell meet one of the cell's perpendicular walls?
// Two walls make an L-corner, three make a T.
fn forms_junction(grid: &Grid, pos: GridPos, dir: GridDirection) -> bool {
    let Ok(cell) = grid.cell(pos) else {
        return false;
    };
    cell.has_wall(dir) && dir.perpendicular().into_iter().any(|side| cell.has_wall(side))
}

// A wall that is part of an L or T junction, seen from either of its two cells,
// must stay solid
#[must_use]
pub fn is_restricted(grid: &Grid, pos: GridPos, dir: GridDirection) -> bool {
    if forms_junction(grid, pos, dir) {
        return true;
    }

    grid.adjacent(pos, dir)
        .is_some_and(|next| forms_junction(grid, next, dir.opposite()))
}

// Walls on the outside of the field and junction walls are never breakable
#[must_use]
pub fn is_breakable_candidate(grid: &Grid, pos: GridPos, dir: GridDirection) -> bool {
    grid.has_wall(pos, dir) && !grid.is_boundary(pos, dir) && !is_restricted(grid, pos, dir)
}
