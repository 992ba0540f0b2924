//! Data-driven game balance
//!
//! Level table, physics constants and generation constants. Everything here is
//! plain serde data so a host can ship its own JSON; the defaults come from
//! [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Authoring-time configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("level table is empty")]
    EmptyTable,

    #[error("level {level}: grid size {grid_size} is below the minimum of 2")]
    GridTooSmall { level: usize, grid_size: usize },

    #[error("level {level}: exit width fraction {fraction} must be in (0, {max}]")]
    ExitTooWide { level: usize, fraction: f32, max: f32 },

    #[error("level {level}: obstacle count is {count} but no obstacle types are allowed")]
    NoObstacleTypes { level: usize, count: usize },

    #[error("setting {field} has invalid value {value}")]
    InvalidSetting { field: &'static str, value: f32 },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable per-level record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Rows and columns of the maze grid
    pub grid_size: usize,
    /// Extra random wall removals after carving
    #[serde(default)]
    pub extra_connections: usize,
    /// Total obstacles, teleporter endpoints included
    #[serde(default)]
    pub obstacle_count: usize,
    /// Obstacle types allowed on this level
    #[serde(default)]
    pub obstacle_types: Vec<ObstacleKind>,
    /// Exit opening width as a fraction of the canvas width
    #[serde(default = "default_exit_width_fraction")]
    pub exit_width_fraction: f32,
    pub seed: u64,
}

fn default_exit_width_fraction() -> f32 {
    DEFAULT_EXIT_WIDTH_FRACTION
}

impl LevelConfig {
    pub fn new(grid_size: usize, seed: u64) -> Self {
        Self {
            grid_size,
            extra_connections: 0,
            obstacle_count: 0,
            obstacle_types: Vec::new(),
            exit_width_fraction: DEFAULT_EXIT_WIDTH_FRACTION,
            seed,
        }
    }

    pub fn allows(&self, kind: ObstacleKind) -> bool {
        self.obstacle_types.contains(&kind)
    }

    /// Authoring-time checks; `level` is only used in the error message
    pub fn validate(&self, level: usize) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall {
                level,
                grid_size: self.grid_size,
            });
        }
        // Opening must leave room for both side walls
        let max = MAX_EXIT_WIDTH_FRACTION;
        if !(self.exit_width_fraction > 0.0 && self.exit_width_fraction <= max) {
            return Err(ConfigError::ExitTooWide {
                level,
                fraction: self.exit_width_fraction,
                max,
            });
        }
        if self.obstacle_count > 0 && self.obstacle_types.is_empty() {
            return Err(ConfigError::NoObstacleTypes {
                level,
                count: self.obstacle_count,
            });
        }
        Ok(())
    }
}

/// Ordered level records; levels past the end reuse the last entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl Default for LevelTable {
    fn default() -> Self {
        use ObstacleKind::*;
        let entry = |grid, extra, count, types: &[ObstacleKind], seed| LevelConfig {
            grid_size: grid,
            extra_connections: extra,
            obstacle_count: count,
            obstacle_types: types.to_vec(),
            exit_width_fraction: DEFAULT_EXIT_WIDTH_FRACTION,
            seed,
        };

        Self {
            levels: vec![
                entry(3, 0, 0, &[], 12345),
                entry(3, 1, 2, &[Spike], 23456),
                entry(4, 2, 3, &[Spike, Patrolling], 34567),
                entry(4, 2, 4, &[Spike, Patrolling, SlipZone], 45678),
                entry(5, 3, 5, &[Spike, Patrolling, SlipZone, Teleporter], 56789),
                entry(6, 4, 6, &[Spike, Patrolling, SlipZone, Teleporter], 67890),
                entry(7, 4, 8, &[Spike, Patrolling, SlipZone, Teleporter], 78901),
                entry(8, 5, 10, &[Spike, Patrolling, SlipZone, Teleporter], 89012),
            ],
        }
    }
}

impl LevelTable {
    /// Build and validate a table
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        let table = Self { levels };
        table.validate()?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Config for a 1-based level number, clamped to the last entry
    ///
    /// Level 0 is treated as level 1. Panics only on an empty table, which
    /// `new`/`from_json` reject.
    pub fn get(&self, level: u32) -> &LevelConfig {
        let idx = (level.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i + 1)?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        log::info!("Loaded level table with {} levels", table.len());
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON level table from disk (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Per-tick physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Per-axis velocity clamp (pixels per tick)
    pub max_velocity: f32,
    /// Multiplicative damping per tick
    pub damping: f32,
    /// Fraction of velocity kept (sign-inverted) after a bounce
    pub restitution: f32,
    /// Minimum post-bounce speed that emits a bounce notification
    pub bounce_threshold: f32,
    /// Velocity multiplier per tick of slip-zone contact
    pub slip_factor: f32,
    /// Horizontal kick = hazard velocity × this
    pub push_multiplier: f32,
    /// Vertical velocity kept (sign-inverted) after a patrol push
    pub push_damping: f32,
    /// Ticks both teleporter endpoints stay inert after a jump
    pub teleport_cooldown: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            max_velocity: MAX_VELOCITY,
            damping: DAMPING,
            restitution: RESTITUTION,
            bounce_threshold: BOUNCE_THRESHOLD,
            slip_factor: SLIP_FACTOR,
            push_multiplier: PUSH_MULTIPLIER,
            push_damping: PUSH_DAMPING,
            teleport_cooldown: TELEPORT_COOLDOWN_TICKS,
        }
    }
}

/// Level generation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    /// Wall width as a fraction of the shorter canvas side
    pub wall_fraction: f32,
    /// Ball radius as a fraction of the wall width
    pub ball_radius_factor: f32,
    /// Entry opening width in wall widths
    pub entry_walls: f32,
    /// Minimum exit opening width in wall widths
    pub min_exit_walls: f32,
    /// Top and bottom bands kept free of obstacles, as a fraction of the height
    pub safe_zone_fraction: f32,
    /// Margin around the exit zone kept free of obstacles (pixels)
    pub exit_safe_margin: f32,
    /// Added (with the level number) to the seed on each regeneration
    pub regeneration_seed_offset: u64,
    /// Regenerations tried for a blocked exit before nudging it
    pub max_regenerations: u32,
    /// Added to the level seed for the obstacle placer's PRNG
    pub obstacle_seed_salt: u64,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            wall_fraction: WALL_FRACTION,
            ball_radius_factor: BALL_RADIUS_FACTOR,
            entry_walls: ENTRY_WALLS,
            min_exit_walls: MIN_EXIT_WALLS,
            safe_zone_fraction: SAFE_ZONE_FRACTION,
            exit_safe_margin: EXIT_SAFE_MARGIN,
            regeneration_seed_offset: REGENERATION_SEED_OFFSET,
            max_regenerations: MAX_REGENERATIONS,
            obstacle_seed_salt: OBSTACLE_SEED_SALT,
        }
    }
}

/// All tunables the simulation reads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub generation: GenerationTuning,
}
