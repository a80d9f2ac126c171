#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use crate::{
    constants::DECORATION_WALL_INSET,
    grid::{Grid, GridDirection, GridPos, cell_count},
};

// Macro to reduce boilerplate for the structs handed to the presentation layer
macro_rules! output {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "bincode", derive(Encode, Decode))]
        pub struct $name $body
    };
}

// ============================================================================
// Patrol Paths
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum PathShape {
    Straight,
    LShaped,
}

output! {
// Ordered corridor cells an agent walks back and forth along
struct PatrolPath {
    pub shape: PathShape,
    pub cells: Vec<GridPos>,
}
}

impl PatrolPath {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains(&pos)
    }
}

// ============================================================================
// Placement Plan
// ============================================================================

output! {
// Everything decided for one cell
struct CellPlacement {
    pub floor: bool,
    pub collectible: bool,
    // Edges that carry a wall and can host a decoration
    pub decoration_edges: Vec<GridDirection>,
    // Indexed by `GridDirection::index`
    pub breakable: [bool; 4],
}
}

impl Default for CellPlacement {
    fn default() -> Self {
        Self {
            floor: true,
            collectible: false,
            decoration_edges: Vec::new(),
            breakable: [false; 4],
        }
    }
}

impl CellPlacement {
    #[must_use]
    pub const fn is_breakable(&self, dir: GridDirection) -> bool {
        self.breakable[dir.index()]
    }
}

output! {
// A decoration hangs on one walled edge of a cell
struct DecorationAnchor {
    pub cell: GridPos,
    pub edge: GridDirection,
}
}

impl DecorationAnchor {
    // Anchor point in grid units, measured from the cell's north-west corner,
    // pulled slightly off the wall so props don't clip into it
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        let (dx, dy) = self.edge.offset();
        let reach = 0.5 - DECORATION_WALL_INSET;
        (
            (dx as f32).mul_add(reach, 0.5) + self.cell.x as f32,
            (dy as f32).mul_add(reach, 0.5) + self.cell.y as f32,
        )
    }
}

output! {
struct PlacementPlan {
    pub width: i32,
    pub height: i32,
    // Row-major, same indexing as `Grid`
    pub cells: Vec<CellPlacement>,
    pub decorations: Vec<DecorationAnchor>,
}
}

impl PlacementPlan {
    // Dimensions a grid would reject give an empty plan
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellPlacement::default(); cell_count(width, height).unwrap_or(0)],
            decorations: Vec::new(),
        }
    }

    #[must_use]
    pub fn cell(&self, pos: GridPos) -> Option<&CellPlacement> {
        if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
            return None;
        }
        let idx = i64::from(pos.y) * i64::from(self.width) + i64::from(pos.x);
        usize::try_from(idx).ok().and_then(|idx| self.cells.get(idx))
    }

    #[must_use]
    pub fn has_collectible(&self, pos: GridPos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.collectible)
    }

    #[must_use]
    pub fn collectible_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.collectible).count()
    }

    #[must_use]
    pub fn breakable_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.breakable.iter().filter(|b| **b).count())
            .sum()
    }
}

// ============================================================================
// Complete Layout
// ============================================================================

output! {
// Result of one generation run, consumed by the presentation layer
struct MazeLayout {
    pub grid: Grid,
    pub plan: PlacementPlan,
    pub paths: Vec<PatrolPath>,
    pub spawn: GridPos,
    pub exit: GridPos,
    pub style: String,
    // Seed of the random stream, when generation started from one; feeding it
    // back with the same config rebuilds this layout
    pub seed: Option<u64>,
}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_anchor_sits_inside_its_cell_near_the_edge() {
        let anchor = DecorationAnchor {
            cell: GridPos::new(2, 3),
            edge: GridDirection::North,
        };
        let (x, y) = anchor.offset();
        assert!((x - 2.5).abs() < 1e-6);
        assert!((y - (3.0 + DECORATION_WALL_INSET)).abs() < 1e-6);

        let anchor = DecorationAnchor {
            cell: GridPos::new(0, 0),
            edge: GridDirection::East,
        };
        let (x, y) = anchor.offset();
        assert!((x - (1.0 - DECORATION_WALL_INSET)).abs() < 1e-6);
        assert!((y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn plan_lookup_respects_bounds() {
        let mut plan = PlacementPlan::new(2, 2);
        plan.cells[3].collectible = true;
        assert!(plan.has_collectible(GridPos::new(1, 1)));
        assert!(!plan.has_collectible(GridPos::new(0, 1)));
        assert!(plan.cell(GridPos::new(2, 0)).is_none());
        assert!(plan.cell(GridPos::new(0, -1)).is_none());
        assert_eq!(plan.collectible_count(), 1);
        assert!(plan.cells.iter().all(|cell| cell.floor));
    }

    #[test]
    fn oversized_plan_is_empty() {
        let plan = PlacementPlan::new(50_000, 50_000);
        assert!(plan.cells.is_empty());
        assert!(plan.cell(GridPos::new(1, 1)).is_none());
        assert!(PlacementPlan::new(-2, 3).cells.is_empty());
    }

    #[test]
    fn breakable_flags_index_by_direction() {
        let mut cell = CellPlacement::default();
        cell.breakable[GridDirection::West.index()] = true;
        assert!(cell.is_breakable(GridDirection::West));
        assert!(!cell.is_breakable(GridDirection::East));
    }
}
