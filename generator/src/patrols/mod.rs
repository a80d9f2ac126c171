mod navigation;
mod planner;

pub use navigation::{free_directions, grow_run};
pub use planner::{l_shaped_path, plan_patrol_paths, straight_path};
