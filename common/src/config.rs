#[cfg(feature = "json")]
use anyhow::{Context, Result};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "json")]
use std::path::Path;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use thiserror::Error;

use crate::{constants::*, grid::cell_count};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive and fit in i32 cells, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidChance { name: &'static str, value: f64 },

    #[error("no style bundles configured")]
    NoStyles,

    #[error("style bundle {0:?} is not configured")]
    MissingStyle(String),
}

// ============================================================================
// Style Bundles
// ============================================================================

// Feature categories a style bundle provides variants for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
    Floor,
    Wall,
    Collectible,
    BreakableWall,
    Decoration,
    Enemy,
}

impl FeatureCategory {
    pub const ALL: [Self; 6] = [
        Self::Floor,
        Self::Wall,
        Self::Collectible,
        Self::BreakableWall,
        Self::Decoration,
        Self::Enemy,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Collectible => "collectible",
            Self::BreakableWall => "breakable wall",
            Self::Decoration => "decoration",
            Self::Enemy => "enemy",
        }
    }
}

// One visual theme. Only the identity and how many variants exist per category
// matter here; the presentation layer maps them to real assets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct StyleBundle {
    pub name: String,
    pub floor_variants: u32,
    pub wall_variants: u32,
    pub collectible_variants: u32,
    pub breakable_wall_variants: u32,
    pub decoration_variants: u32,
    pub enemy_variants: u32,
}

impl Default for StyleBundle {
    fn default() -> Self {
        Self {
            name: DEFAULT_STYLE_NAME.to_string(),
            floor_variants: 1,
            wall_variants: 1,
            collectible_variants: 1,
            breakable_wall_variants: 1,
            decoration_variants: 1,
            enemy_variants: 1,
        }
    }
}

impl StyleBundle {
    #[must_use]
    pub const fn variants(&self, category: FeatureCategory) -> u32 {
        match category {
            FeatureCategory::Floor => self.floor_variants,
            FeatureCategory::Wall => self.wall_variants,
            FeatureCategory::Collectible => self.collectible_variants,
            FeatureCategory::BreakableWall => self.breakable_wall_variants,
            FeatureCategory::Decoration => self.decoration_variants,
            FeatureCategory::Enemy => self.enemy_variants,
        }
    }

    // A category with no variants is left out of the plan entirely
    #[must_use]
    pub const fn provides(&self, category: FeatureCategory) -> bool {
        self.variants(category) > 0
    }

    // Categories this bundle cannot populate
    #[must_use]
    pub fn missing_categories(&self) -> Vec<FeatureCategory> {
        FeatureCategory::ALL
            .into_iter()
            .filter(|category| !self.provides(*category))
            .collect()
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    pub collectible_spawn_chance: f64,
    pub decoration_spawn_chance: f64,
    pub breakable_wall_chance: f64,
    pub enemy_path_spawn_chance: f64,
    pub styles: Vec<StyleBundle>,
    // Name of the bundle to use; the first bundle when unset
    pub style: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_COLS,
            height: DEFAULT_GRID_ROWS,
            collectible_spawn_chance: DEFAULT_COLLECTIBLE_SPAWN_CHANCE,
            decoration_spawn_chance: DEFAULT_DECORATION_SPAWN_CHANCE,
            breakable_wall_chance: DEFAULT_BREAKABLE_WALL_CHANCE,
            enemy_path_spawn_chance: DEFAULT_ENEMY_PATH_SPAWN_CHANCE,
            styles: vec![StyleBundle::default()],
            style: None,
        }
    }
}

impl GeneratorConfig {
    #[cfg(feature = "json")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn chances(&self) -> [(&'static str, f64); 4] {
        [
            ("collectible_spawn_chance", self.collectible_spawn_chance),
            ("decoration_spawn_chance", self.decoration_spawn_chance),
            ("breakable_wall_chance", self.breakable_wall_chance),
            ("enemy_path_spawn_chance", self.enemy_path_spawn_chance),
        ]
    }

    // Fail fast on anything that would make generation meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if cell_count(self.width, self.height).is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        for (name, value) in self.chances() {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidChance { name, value });
            }
        }

        self.resolve_style().map(|_| ())
    }

    pub fn resolve_style(&self) -> Result<&StyleBundle, ConfigError> {
        match &self.style {
            Some(name) => self
                .styles
                .iter()
                .find(|bundle| &bundle.name == name)
                .ok_or_else(|| ConfigError::MissingStyle(name.clone())),
            None => self.styles.first().ok_or(ConfigError::NoStyles),
        }
    }
}
