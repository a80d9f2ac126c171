use rand::Rng;
use tracing::debug;

use crate::{
    map::{nearest_free_cell, pick_direction},
    resources::{PathStage, ReservedCells, WallStage},
};
use common::{
    config::{FeatureCategory, GeneratorConfig, StyleBundle},
    grid::{Grid, GridPos},
    protocol::{DecorationAnchor, PlacementPlan},
};

// ============================================================================
// Decorations
// ============================================================================

// Anchor a decoration for `pos`. A cell holding a collectible hands the
// decoration to the nearest cell that holds neither a collectible nor a
// reservation. The anchor is one of the target's walled edges; a target with
// no walls gets nothing.
pub fn decorate_cell<R: Rng>(
    grid: &Grid,
    plan: &PlacementPlan,
    reserved: &ReservedCells,
    pos: GridPos,
    rng: &mut R,
) -> Option<DecorationAnchor> {
    let target = if plan.has_collectible(pos) {
        let free = nearest_free_cell(grid, pos, |cell| plan.has_collectible(cell) || reserved.contains(cell));
        debug!(?pos, ?free, "decoration collides with a collectible, retargeting");
        free?
    } else {
        pos
    };

    let edge = pick_direction(rng, &plan.cell(target)?.decoration_edges)?;
    Some(DecorationAnchor { cell: target, edge })
}

// Last placement pass, in scan order. Cells with a collectible or a reservation
// are skipped before any draw is made.
#[must_use]
pub fn place_decorations<R: Rng>(
    grid: &Grid,
    walls: WallStage,
    paths: &PathStage,
    config: &GeneratorConfig,
    style: &StyleBundle,
    rng: &mut R,
) -> PlacementPlan {
    let WallStage { mut plan } = walls;

    if !style.provides(FeatureCategory::Decoration) {
        return plan;
    }

    for pos in grid.positions() {
        if plan.has_collectible(pos) || paths.reserved.contains(pos) {
            continue;
        }

        if !rng.random_bool(config.decoration_spawn_chance) {
            continue;
        }

        if let Some(anchor) = decorate_cell(grid, &plan, &paths.reserved, pos, rng) {
            plan.decorations.push(anchor);
        }
    }

    debug!(decorations = plan.decorations.len(), "placed decorations");
    plan
}
