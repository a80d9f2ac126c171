use std::collections::HashSet;

use common::{
    grid::{GridDirection, GridPos},
    protocol::MazeLayout,
};

// ============================================================================
// ASCII Preview
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Edge {
    Open,
    Solid,
    Breakable,
}

// A wall shows as breakable if either of its two sides was marked breakable
fn edge(layout: &MazeLayout, pos: GridPos, dir: GridDirection) -> Edge {
    if !layout.grid.has_wall(pos, dir) {
        return Edge::Open;
    }

    let here = layout.plan.cell(pos).is_some_and(|cell| cell.is_breakable(dir));
    let there = layout
        .grid
        .adjacent(pos, dir)
        .and_then(|next| layout.plan.cell(next))
        .is_some_and(|cell| cell.is_breakable(dir.opposite()));

    if here || there { Edge::Breakable } else { Edge::Solid }
}

const fn horizontal(edge: Edge) -> &'static str {
    match edge {
        Edge::Open => "   ",
        Edge::Solid => "---",
        Edge::Breakable => "~~~",
    }
}

const fn vertical(edge: Edge) -> char {
    match edge {
        Edge::Open => ' ',
        Edge::Solid => '|',
        Edge::Breakable => ':',
    }
}

// Render the layout as text: S spawn, E exit, * collectible, p patrol path,
// d decoration, ~ and : breakable walls
#[must_use]
pub fn render_ascii(layout: &MazeLayout) -> String {
    let grid = &layout.grid;
    let patrol: HashSet<GridPos> = layout.paths.iter().flat_map(|path| path.cells.iter().copied()).collect();
    let decorated: HashSet<GridPos> = layout.plan.decorations.iter().map(|anchor| anchor.cell).collect();

    let marker = |pos: GridPos| {
        if pos == layout.spawn {
            'S'
        } else if pos == layout.exit {
            'E'
        } else if layout.plan.has_collectible(pos) {
            '*'
        } else if patrol.contains(&pos) {
            'p'
        } else if decorated.contains(&pos) {
            'd'
        } else {
            ' '
        }
    };

    let mut out = String::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push('+');
            out.push_str(horizontal(edge(layout, GridPos::new(x, y), GridDirection::North)));
        }
        out.push_str("+\n");

        for x in 0..grid.width() {
            let pos = GridPos::new(x, y);
            out.push(vertical(edge(layout, pos, GridDirection::West)));
            out.push(' ');
            out.push(marker(pos));
            out.push(' ');
        }
        out.push(vertical(edge(layout, GridPos::new(grid.width() - 1, y), GridDirection::East)));
        out.push('\n');
    }

    for x in 0..grid.width() {
        out.push('+');
        out.push_str(horizontal(edge(layout, GridPos::new(x, grid.height() - 1), GridDirection::South)));
    }
    out.push_str("+\n");

    out
}
