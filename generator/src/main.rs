use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

use common::config::GeneratorConfig;
use generator::{generate_from_seed, init_tracing, render::render_ascii};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Bincode,
}

#[derive(Parser)]
#[command(author, version, about = "Maze generator", long_about = None)]
struct Args {
    /// JSON configuration file; command-line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random stream; a random one is picked and logged when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Chance that a cell holds a collectible
    #[arg(long)]
    collectible_chance: Option<f64>,

    /// Chance that a cell gets a decoration
    #[arg(long)]
    decoration_chance: Option<f64>,

    /// Chance that an eligible wall is breakable
    #[arg(long)]
    breakable_chance: Option<f64>,

    /// Chance that a cell starts a patrol path
    #[arg(long)]
    enemy_path_chance: Option<f64>,

    /// Style bundle name
    #[arg(long)]
    style: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Write to this file instead of stdout (required for bincode)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(chance) = self.collectible_chance {
            config.collectible_spawn_chance = chance;
        }
        if let Some(chance) = self.decoration_chance {
            config.decoration_spawn_chance = chance;
        }
        if let Some(chance) = self.breakable_chance {
            config.breakable_wall_chance = chance;
        }
        if let Some(chance) = self.enemy_path_chance {
            config.enemy_path_spawn_chance = chance;
        }
        if let Some(style) = &self.style {
            config.style = Some(style.clone());
        }
    }

    const fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { self.format }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    args.apply(&mut config);

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, "seeding generator");

    let layout = generate_from_seed(&config, seed)?;

    let bytes = match args.output_format() {
        OutputFormat::Ascii => render_ascii(&layout).into_bytes(),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
            text.push('\n');
            text.into_bytes()
        }
        OutputFormat::Bincode => {
            if args.output.is_none() {
                bail!("bincode output needs --output");
            }
            bincode::encode_to_vec(&layout, bincode::config::standard()).context("Failed to encode layout")?
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote layout");
        }
        None => print!("{}", String::from_utf8_lossy(&bytes)),
    }

    Ok(())
}
