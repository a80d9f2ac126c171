use std::collections::HashSet;

use common::{
    grid::GridPos,
    protocol::{PatrolPath, PlacementPlan},
};

// ============================================================================
// Per-Run Generation State
// ============================================================================

// Cells that no later path or placement may use: the spawn cell plus every
// cell claimed by a patrol path. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ReservedCells(HashSet<GridPos>);

impl ReservedCells {
    #[must_use]
    pub fn new(spawn: GridPos) -> Self {
        Self(HashSet::from([spawn]))
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.0.contains(&pos)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Claim every cell or none of them. Returns false, leaving the set untouched,
    // if any cell is already reserved or listed twice.
    pub fn claim_all(&mut self, cells: &[GridPos]) -> bool {
        let unique: HashSet<GridPos> = cells.iter().copied().collect();
        if unique.len() != cells.len() || unique.iter().any(|pos| self.0.contains(pos)) {
            return false;
        }
        self.0.extend(unique);
        true
    }
}

// Output of the collectible and breakable-wall pass. Only that pass builds one,
// so holding a `WallStage` proves its draws have already been made.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct WallStage {
    pub plan: PlacementPlan,
}

// Output of the patrol path pass
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PathStage {
    pub paths: Vec<PatrolPath>,
    pub reserved: ReservedCells,
}
