pub mod config;
pub mod constants;
pub mod grid;
pub mod protocol;
