use rand::Rng;
use tracing::debug;

use crate::{
    map::{exit_cell, is_breakable_candidate, spawn_cell},
    resources::WallStage,
};
use common::{
    config::{FeatureCategory, GeneratorConfig, StyleBundle},
    grid::Grid,
    protocol::PlacementPlan,
};

// ============================================================================
// Collectibles & Breakable Walls
// ============================================================================

// First placement pass, in scan order. Each cell draws for a collectible (never
// on the spawn or exit), then every wall it has draws for breakability. The
// breakable draw happens before the eligibility check so the random stream
// does not depend on the shape of the maze.
pub fn place_collectibles_and_walls<R: Rng>(
    grid: &Grid,
    config: &GeneratorConfig,
    style: &StyleBundle,
    rng: &mut R,
) -> WallStage {
    let collectibles = style.provides(FeatureCategory::Collectible);
    let breakables = style.provides(FeatureCategory::BreakableWall);
    let (spawn, exit) = (spawn_cell(), exit_cell(grid));

    let mut plan = PlacementPlan::new(grid.width(), grid.height());

    for (pos, cell) in grid.cells() {
        let placement = &mut plan.cells[grid.index(pos)];

        if collectibles && pos != spawn && pos != exit {
            placement.collectible = rng.random_bool(config.collectible_spawn_chance);
        }

        for dir in cell.walls() {
            placement.decoration_edges.push(dir);

            if breakables {
                let roll = rng.random_bool(config.breakable_wall_chance);
                placement.breakable[dir.index()] = roll && is_breakable_candidate(grid, pos, dir);
            }
        }
    }

    debug!(
        collectibles = plan.collectible_count(),
        breakable_walls = plan.breakable_count(),
        "placed collectibles and breakable walls"
    );
    WallStage { plan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{carve_maze, is_restricted};
    use common::grid::{GridDirection, GridPos};
    use rand::{SeedableRng, rngs::StdRng};

    fn carved(width: i32, height: i32, seed: u64) -> (Grid, StdRng) {
        let mut grid = Grid::new(width, height).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        carve_maze(&mut grid, &mut rng).unwrap();
        (grid, rng)
    }

    fn generous() -> GeneratorConfig {
        GeneratorConfig {
            collectible_spawn_chance: 1.0,
            breakable_wall_chance: 1.0,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn breakable_walls_avoid_boundaries_and_junctions() {
        for seed in 0..30 {
            let (grid, mut rng) = carved(8, 8, seed);
            let stage = place_collectibles_and_walls(&grid, &generous(), &StyleBundle::default(), &mut rng);

            for (pos, cell) in grid.cells() {
                let placement = stage.plan.cell(pos).unwrap();
                for dir in GridDirection::ALL {
                    if !placement.is_breakable(dir) {
                        continue;
                    }
                    assert!(cell.has_wall(dir));
                    assert!(!grid.is_boundary(pos, dir), "outer wall {dir:?} of {pos:?} marked breakable");
                    assert!(!is_restricted(&grid, pos, dir), "junction wall {dir:?} of {pos:?} marked breakable");
                }
            }
        }
    }

    #[test]
    fn certain_chance_marks_every_candidate() {
        let (grid, mut rng) = carved(10, 10, 11);
        let stage = place_collectibles_and_walls(&grid, &generous(), &StyleBundle::default(), &mut rng);
        for (pos, cell) in grid.cells() {
            for dir in cell.walls() {
                assert_eq!(
                    stage.plan.cell(pos).unwrap().is_breakable(dir),
                    is_breakable_candidate(&grid, pos, dir)
                );
            }
        }
    }

    #[test]
    fn decoration_edges_match_walls() {
        let (grid, mut rng) = carved(5, 4, 2);
        let stage = place_collectibles_and_walls(&grid, &GeneratorConfig::default(), &StyleBundle::default(), &mut rng);
        for (pos, cell) in grid.cells() {
            assert_eq!(stage.plan.cell(pos).unwrap().decoration_edges, cell.walls());
        }
    }

    #[test]
    fn collectibles_skip_spawn_and_exit() {
        let (grid, mut rng) = carved(4, 4, 9);
        let stage = place_collectibles_and_walls(&grid, &generous(), &StyleBundle::default(), &mut rng);
        assert!(!stage.plan.has_collectible(GridPos::new(0, 0)));
        assert!(!stage.plan.has_collectible(GridPos::new(3, 3)));
        assert_eq!(stage.plan.collectible_count(), 14);
    }

    #[test]
    fn empty_categories_are_omitted() {
        let (grid, mut rng) = carved(6, 6, 4);
        let style = StyleBundle {
            collectible_variants: 0,
            breakable_wall_variants: 0,
            ..StyleBundle::default()
        };
        let stage = place_collectibles_and_walls(&grid, &generous(), &style, &mut rng);
        assert_eq!(stage.plan.collectible_count(), 0);
        assert_eq!(stage.plan.breakable_count(), 0);
    }

    #[test]
    fn breakable_roll_is_drawn_for_every_wall() {
        // Boundary and junction walls consume their roll too, so the stream after
        // this pass depends only on how many walls each cell has
        for chance in [0.0, 0.5] {
            let (grid, mut rng) = carved(7, 6, 21);
            let mut replay = rng.clone();
            let config = GeneratorConfig {
                collectible_spawn_chance: 0.3,
                breakable_wall_chance: chance,
                ..GeneratorConfig::default()
            };
            let _ = place_collectibles_and_walls(&grid, &config, &StyleBundle::default(), &mut rng);

            let (spawn, exit) = (spawn_cell(), exit_cell(&grid));
            let mut rolls = 0;
            for (pos, cell) in grid.cells() {
                if pos != spawn && pos != exit {
                    let _ = replay.random_bool(0.3);
                }
                for _ in cell.walls() {
                    let _ = replay.random_bool(chance);
                    rolls += 1;
                }
            }
            assert!(rolls > 2 * grid.len());
            assert_eq!(rng.random::<u64>(), replay.random::<u64>(), "chance {chance}");
        }
    }

    #[test]
    fn zero_chances_place_nothing() {
        let (grid, mut rng) = carved(6, 6, 4);
        let config = GeneratorConfig {
            collectible_spawn_chance: 0.0,
            breakable_wall_chance: 0.0,
            ..GeneratorConfig::default()
        };
        let stage = place_collectibles_and_walls(&grid, &config, &StyleBundle::default(), &mut rng);
        assert_eq!(stage.plan.collectible_count(), 0);
        assert_eq!(stage.plan.breakable_count(), 0);
        assert!(stage.plan.cells.iter().all(|cell| cell.floor));
    }
}
