mod decorations;
mod items;

pub use decorations::{decorate_cell, place_decorations};
pub use items::place_collectibles_and_walls;
