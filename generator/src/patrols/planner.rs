use rand::Rng;
use tracing::{debug, trace};

use super::navigation::{free_directions, grow_run};
use crate::{
    map::{pick_direction, spawn_cell},
    resources::{PathStage, ReservedCells, WallStage},
};
use common::{
    config::{FeatureCategory, GeneratorConfig, StyleBundle},
    constants::{EARLY_STOP_CHANCE, MIN_PATH_CELLS, MIN_RUN_CELLS},
    grid::{Grid, GridDirection, GridPos},
    protocol::{PathShape, PatrolPath},
};

// ============================================================================
// Path Shapes
// ============================================================================

// One straight run of at least three cells in a random free direction
pub fn straight_path<R: Rng>(
    grid: &Grid,
    reserved: &ReservedCells,
    start: GridPos,
    rng: &mut R,
) -> Option<PatrolPath> {
    let options = free_directions(grid, reserved, start, &GridDirection::ALL);
    let dir = pick_direction(rng, &options)?;

    let cells = grow_run(grid, reserved, start, dir, MIN_PATH_CELLS, EARLY_STOP_CHANCE, rng);
    (cells.len() >= MIN_PATH_CELLS).then_some(PatrolPath {
        shape: PathShape::Straight,
        cells,
    })
}

// A straight run followed by a single 90 degree turn. Both legs hold at least
// two cells and share the turning cell.
pub fn l_shaped_path<R: Rng>(
    grid: &Grid,
    reserved: &ReservedCells,
    start: GridPos,
    rng: &mut R,
) -> Option<PatrolPath> {
    let options = free_directions(grid, reserved, start, &GridDirection::ALL);
    let dir = pick_direction(rng, &options)?;

    let primary = grow_run(grid, reserved, start, dir, MIN_RUN_CELLS, EARLY_STOP_CHANCE, rng);
    if primary.len() < MIN_RUN_CELLS {
        return None;
    }

    let turn = *primary.last()?;
    let side_options = free_directions(grid, reserved, turn, &dir.perpendicular());
    let side = pick_direction(rng, &side_options)?;

    let secondary = grow_run(grid, reserved, turn, side, MIN_RUN_CELLS, EARLY_STOP_CHANCE, rng);
    if secondary.len() < MIN_RUN_CELLS {
        return None;
    }

    let mut cells = primary;
    cells.extend_from_slice(&secondary[1..]);
    (cells.len() >= MIN_PATH_CELLS).then_some(PatrolPath {
        shape: PathShape::LShaped,
        cells,
    })
}

// ============================================================================
// Path Planning Pass
// ============================================================================

// Try to start a patrol path at every unreserved cell in scan order. A start that
// fails is abandoned; accepted paths reserve their cells for the rest of the run.
// Runs after the collectible and breakable-wall pass, whose stage it borrows.
pub fn plan_patrol_paths<R: Rng>(
    grid: &Grid,
    walls: &WallStage,
    config: &GeneratorConfig,
    style: &StyleBundle,
    rng: &mut R,
) -> PathStage {
    let mut reserved = ReservedCells::new(spawn_cell());
    let mut paths = Vec::new();

    if !style.provides(FeatureCategory::Enemy) {
        return PathStage { paths, reserved };
    }

    for start in grid.positions() {
        if reserved.contains(start) || !rng.random_bool(config.enemy_path_spawn_chance) {
            continue;
        }

        let path = if rng.random_bool(0.5) {
            straight_path(grid, &reserved, start, rng)
        } else {
            l_shaped_path(grid, &reserved, start, rng)
        };

        let Some(path) = path else {
            trace!(?start, "no patrol path from start cell");
            continue;
        };

        let claimed = reserved.claim_all(&path.cells);
        debug_assert!(claimed, "patrol path overlaps a reserved cell: {:?}", path.cells);
        if claimed {
            paths.push(path);
        }
    }

    debug!(
        paths = paths.len(),
        reserved = reserved.len(),
        collectibles = walls.plan.collectible_count(),
        "planned patrol paths"
    );
    PathStage { paths, reserved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::carve_maze;
    use common::{grid::direction_between, protocol::PlacementPlan};
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn corridor(len: i32) -> Grid {
        let mut grid = Grid::new(len, 1).unwrap();
        for x in 0..len - 1 {
            grid.remove_wall(GridPos::new(x, 0), GridDirection::East).unwrap();
        }
        grid
    }

    fn bare_walls(grid: &Grid) -> WallStage {
        WallStage {
            plan: PlacementPlan::new(grid.width(), grid.height()),
        }
    }

    fn always_paths() -> GeneratorConfig {
        GeneratorConfig {
            enemy_path_spawn_chance: 1.0,
            ..GeneratorConfig::default()
        }
    }

    fn assert_valid_path(grid: &Grid, path: &PatrolPath) {
        assert!(path.len() >= MIN_PATH_CELLS, "path too short: {path:?}");
        for pair in path.cells.windows(2) {
            assert!(grid.is_corridor_open(pair[0], pair[1]), "step through a wall: {path:?}");
        }
        let unique: HashSet<_> = path.cells.iter().collect();
        assert_eq!(unique.len(), path.len(), "path repeats a cell: {path:?}");

        let turns = path
            .cells
            .windows(3)
            .filter(|w| direction_between(w[0], w[1]) != direction_between(w[1], w[2]))
            .count();
        match path.shape {
            PathShape::Straight => assert_eq!(turns, 0),
            PathShape::LShaped => assert_eq!(turns, 1),
        }
    }

    #[test]
    fn corridor_path_runs_to_the_boundary() {
        let grid = corridor(4);
        let reserved = ReservedCells::new(spawn_cell());
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let path = straight_path(&grid, &reserved, GridPos::new(1, 0), &mut rng).unwrap();
            assert_eq!(path.cells, vec![GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(3, 0)]);
        }
    }

    #[test]
    fn corridor_has_no_room_for_a_turn() {
        let grid = corridor(4);
        let reserved = ReservedCells::new(spawn_cell());
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(l_shaped_path(&grid, &reserved, GridPos::new(1, 0), &mut rng).is_none());
        }
    }

    #[test]
    fn spawn_cell_never_starts_a_path() {
        let grid = corridor(4);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let stage = plan_patrol_paths(&grid, &bare_walls(&grid), &always_paths(), &StyleBundle::default(), &mut rng);
            assert!(stage.reserved.contains(spawn_cell()));
            assert!(stage.paths.len() <= 1);
            for path in &stage.paths {
                assert!(!path.contains(spawn_cell()));
                assert_eq!(path.shape, PathShape::Straight);
                assert_eq!(path.len(), 3);
                // A path from (1, 0) can only head east and ends at the boundary
                if path.cells[0] == GridPos::new(1, 0) {
                    assert_eq!(path.cells, vec![GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(3, 0)]);
                }
            }
        }
    }

    #[test]
    fn too_short_corridor_yields_nothing() {
        // Only two cells besides the spawn
        let grid = corridor(3);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let stage = plan_patrol_paths(&grid, &bare_walls(&grid), &always_paths(), &StyleBundle::default(), &mut rng);
            assert!(stage.paths.is_empty());
            assert_eq!(stage.reserved.len(), 1);
        }
    }

    #[test]
    fn l_path_turns_once() {
        // Open the top row and the right column of a 3x3 grid
        let mut grid = Grid::new(3, 3).unwrap();
        grid.remove_wall(GridPos::new(0, 0), GridDirection::East).unwrap();
        grid.remove_wall(GridPos::new(1, 0), GridDirection::East).unwrap();
        grid.remove_wall(GridPos::new(2, 0), GridDirection::South).unwrap();
        grid.remove_wall(GridPos::new(2, 1), GridDirection::South).unwrap();
        let reserved = ReservedCells::default();

        let mut found = false;
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(path) = l_shaped_path(&grid, &reserved, GridPos::new(1, 0), &mut rng) {
                assert_valid_path(&grid, &path);
                assert_eq!(path.cells[..3], [GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(2, 1)]);
                found = true;
            }
        }
        assert!(found, "no seed produced the L-shaped path");
    }

    #[test]
    fn disabled_enemies_plan_nothing() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        carve_maze(&mut grid, &mut rng).unwrap();
        let style = StyleBundle {
            enemy_variants: 0,
            ..StyleBundle::default()
        };
        let stage = plan_patrol_paths(&grid, &bare_walls(&grid), &always_paths(), &style, &mut rng);
        assert!(stage.paths.is_empty());
    }

    #[test]
    fn planned_paths_are_valid_and_disjoint() {
        for seed in 0..40 {
            let mut grid = Grid::new(9, 7).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            carve_maze(&mut grid, &mut rng).unwrap();
            let stage = plan_patrol_paths(&grid, &bare_walls(&grid), &always_paths(), &StyleBundle::default(), &mut rng);

            let mut seen = HashSet::new();
            for path in &stage.paths {
                assert_valid_path(&grid, path);
                assert!(!path.contains(spawn_cell()));
                for pos in &path.cells {
                    assert!(seen.insert(*pos), "cell {pos:?} claimed twice");
                    assert!(stage.reserved.contains(*pos));
                }
            }
            // Spawn plus every claimed cell, nothing else
            assert_eq!(stage.reserved.len(), seen.len() + 1);
        }
    }
}
