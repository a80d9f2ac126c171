pub mod map;
pub mod patrols;
pub mod placement;
pub mod render;
pub mod resources;

mod pipeline;

pub use pipeline::{GenerateError, generate, generate_from_seed};

use tracing_subscriber::EnvFilter;

const LOG_FILTER: &str = "info";

// Log to stderr so stdout stays clean for the generated output.
// RUST_LOG overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER)))
        .with_writer(std::io::stderr)
        .init();
}
