#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use std::collections::{HashSet, VecDeque};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive and fit in i32 cells, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("cell ({}, {}) is outside the {width}x{height} grid", .pos.x, .pos.y)]
    OutOfBounds { pos: GridPos, width: i32, height: i32 },
}

// ============================================================================
// Coordinates & Directions
// ============================================================================

// Grid coordinate - x grows east, y grows south
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // One step in `dir`, or None if the coordinate would overflow
    #[must_use]
    pub const fn step(self, dir: GridDirection) -> Option<Self> {
        let (dx, dy) = dir.offset();
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum GridDirection {
    North,
    South,
    East,
    West,
}

impl GridDirection {
    // Enumeration order used everywhere a draw depends on direction order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    #[must_use]
    pub const fn perpendicular(self) -> [Self; 2] {
        match self {
            Self::North | Self::South => [Self::East, Self::West],
            Self::East | Self::West => [Self::North, Self::South],
        }
    }

    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    // Position of this direction inside `ALL`, for per-direction arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

// ============================================================================
// Cells
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Cell {
    pub visited: bool,
    pub has_north_wall: bool,
    pub has_south_wall: bool,
    pub has_east_wall: bool,
    pub has_west_wall: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            visited: false,
            has_north_wall: true,
            has_south_wall: true,
            has_east_wall: true,
            has_west_wall: true,
        }
    }
}

impl Cell {
    #[must_use]
    pub const fn has_wall(&self, dir: GridDirection) -> bool {
        match dir {
            GridDirection::North => self.has_north_wall,
            GridDirection::South => self.has_south_wall,
            GridDirection::East => self.has_east_wall,
            GridDirection::West => self.has_west_wall,
        }
    }

    // Private so that walls can only be removed in pairs through `Grid::remove_wall`
    fn set_wall(&mut self, dir: GridDirection, present: bool) {
        match dir {
            GridDirection::North => self.has_north_wall = present,
            GridDirection::South => self.has_south_wall = present,
            GridDirection::East => self.has_east_wall = present,
            GridDirection::West => self.has_west_wall = present,
        }
    }

    // Count how many walls a cell has (0-4)
    #[must_use]
    pub const fn wall_count(&self) -> u8 {
        let mut count = 0;
        if self.has_north_wall {
            count += 1;
        }
        if self.has_south_wall {
            count += 1;
        }
        if self.has_east_wall {
            count += 1;
        }
        if self.has_west_wall {
            count += 1;
        }
        count
    }

    #[must_use]
    pub fn walls(&self) -> Vec<GridDirection> {
        GridDirection::ALL.into_iter().filter(|dir| self.has_wall(*dir)).collect()
    }
}

// ============================================================================
// Grid
// ============================================================================

// Row-major array of cells. Adjacent cells always agree on their shared wall.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        let Some(count) = cell_count(width, height) else {
            return Err(GridError::InvalidDimensions { width, height });
        };
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); count],
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        (self.width * self.height) as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    // Row-major index of an in-bounds position
    #[must_use]
    pub const fn index(&self, pos: GridPos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    const fn check(&self, pos: GridPos) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(self.index(pos))
        } else {
            Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cell(&self, pos: GridPos) -> Result<&Cell, GridError> {
        let idx = self.check(pos)?;
        Ok(&self.cells[idx])
    }

    pub fn set_visited(&mut self, pos: GridPos, visited: bool) -> Result<(), GridError> {
        let idx = self.check(pos)?;
        self.cells[idx].visited = visited;
        Ok(())
    }

    #[must_use]
    pub fn is_visited(&self, pos: GridPos) -> bool {
        self.cell(pos).is_ok_and(|cell| cell.visited)
    }

    // Neighbor in `dir`, or None past the edge of the grid or when `pos` itself is outside
    #[must_use]
    pub const fn adjacent(&self, pos: GridPos, dir: GridDirection) -> Option<GridPos> {
        if !self.contains(pos) {
            return None;
        }
        match pos.step(dir) {
            Some(next) if self.contains(next) => Some(next),
            _ => None,
        }
    }

    // Does the wall on `dir` of this in-bounds cell face outside the grid?
    #[must_use]
    pub const fn is_boundary(&self, pos: GridPos, dir: GridDirection) -> bool {
        self.contains(pos) && self.adjacent(pos, dir).is_none()
    }

    #[must_use]
    pub fn has_wall(&self, pos: GridPos, dir: GridDirection) -> bool {
        self.cell(pos).is_ok_and(|cell| cell.has_wall(dir))
    }

    // True iff a and b are grid-adjacent and the wall between them is absent on both sides
    #[must_use]
    pub fn is_corridor_open(&self, a: GridPos, b: GridPos) -> bool {
        let Some(dir) = direction_between(a, b) else {
            return false;
        };
        match (self.cell(a), self.cell(b)) {
            (Ok(ca), Ok(cb)) => !ca.has_wall(dir) && !cb.has_wall(dir.opposite()),
            _ => false,
        }
    }

    // Remove the wall on `dir` of `pos` together with the matching wall of its neighbor
    pub fn remove_wall(&mut self, pos: GridPos, dir: GridDirection) -> Result<GridPos, GridError> {
        let here = self.check(pos)?;
        let Some(next) = pos.step(dir) else {
            return Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            });
        };
        let there = self.check(next)?;
        self.cells[here].set_wall(dir, false);
        self.cells[there].set_wall(dir.opposite(), false);
        Ok(next)
    }

    // All positions in scan order (rows top to bottom, columns left to right)
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPos::new(x, y)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.positions().zip(self.cells.iter())
    }

    // Number of open corridors, counting each adjacent pair once
    #[must_use]
    pub fn open_corridor_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [GridDirection::South, GridDirection::East]
                    .into_iter()
                    .filter_map(|dir| self.adjacent(pos, dir))
                    .filter(|&next| self.is_corridor_open(pos, next))
                    .count()
            })
            .sum()
    }

    // Every pair of adjacent cells agrees on its shared wall
    #[must_use]
    pub fn walls_consistent(&self) -> bool {
        self.positions().all(|pos| {
            [GridDirection::South, GridDirection::East].into_iter().all(|dir| {
                self.adjacent(pos, dir).is_none_or(|next| {
                    self.cells[self.index(pos)].has_wall(dir) == self.cells[self.index(next)].has_wall(dir.opposite())
                })
            })
        })
    }

    // Check if all grid cells are reachable from (0, 0) through open corridors
    #[must_use]
    pub fn all_cells_reachable(&self) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let target_count = self.len();

        let origin = GridPos::new(0, 0);
        queue.push_back(origin);
        visited.insert(origin);

        while let Some(pos) = queue.pop_front() {
            for dir in GridDirection::ALL {
                let Some(next) = self.adjacent(pos, dir) else {
                    continue;
                };
                if self.is_corridor_open(pos, next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }

            if visited.len() == target_count {
                return true;
            }
        }

        visited.len() == target_count
    }
}

// Cell count of a width x height grid, or None unless both sides are positive
// and the product fits in i32
#[must_use]
pub fn cell_count(width: i32, height: i32) -> Option<usize> {
    if width <= 0 || height <= 0 {
        return None;
    }
    width.checked_mul(height).and_then(|count| usize::try_from(count).ok())
}

// Direction that leads from a to an adjacent b
#[must_use]
pub const fn direction_between(a: GridPos, b: GridPos) -> Option<GridDirection> {
    match (b.x.checked_sub(a.x), b.y.checked_sub(a.y)) {
        (Some(0), Some(-1)) => Some(GridDirection::North),
        (Some(0), Some(1)) => Some(GridDirection::South),
        (Some(1), Some(0)) => Some(GridDirection::East),
        (Some(-1), Some(0)) => Some(GridDirection::West),
        _ => None,
    }
}
