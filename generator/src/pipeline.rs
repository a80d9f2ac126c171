use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    map::{carve_maze, exit_cell, spawn_cell},
    patrols::plan_patrol_paths,
    placement::{place_collectibles_and_walls, place_decorations},
};
use common::{
    config::{ConfigError, GeneratorConfig},
    grid::{Grid, GridError},
    protocol::MazeLayout,
};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

// ============================================================================
// Generation Entry Point
// ============================================================================

// Run one full generation: carve, then collectibles and breakable walls, then
// patrol paths, then decorations. The configuration is validated before the
// grid is allocated or a single random number is drawn.
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<MazeLayout, GenerateError> {
    config.validate()?;
    let style = config.resolve_style()?;

    for category in style.missing_categories() {
        warn!(
            style = %style.name,
            category = category.name(),
            "style has no variants for category, omitting it"
        );
    }

    let mut grid = Grid::new(config.width, config.height)?;
    let corridors = carve_maze(&mut grid, rng)?;
    debug_assert!(grid.walls_consistent(), "carving left mismatched walls");
    debug_assert_eq!(corridors, grid.len() - 1, "carving did not produce a spanning tree");

    let walls = place_collectibles_and_walls(&grid, config, style, rng);
    let paths = plan_patrol_paths(&grid, &walls, config, style, rng);
    let plan = place_decorations(&grid, walls, &paths, config, style, rng);

    info!(
        width = grid.width(),
        height = grid.height(),
        style = %style.name,
        collectibles = plan.collectible_count(),
        breakable_walls = plan.breakable_count(),
        decorations = plan.decorations.len(),
        patrol_paths = paths.paths.len(),
        "generated maze"
    );

    Ok(MazeLayout {
        spawn: spawn_cell(),
        exit: exit_cell(&grid),
        style: style.name.clone(),
        seed: None,
        plan,
        paths: paths.paths,
        grid,
    })
}

// Generate from a seeded `StdRng` and record the seed in the layout so it can
// be replayed
pub fn generate_from_seed(config: &GeneratorConfig, seed: u64) -> Result<MazeLayout, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = generate(config, &mut rng)?;
    layout.seed = Some(seed);
    Ok(layout)
}
