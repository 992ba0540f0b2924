//! Tilt Maze - steer a ball through a procedurally generated maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, validation, obstacles, physics)
//! - `tuning`: Data-driven level table and physics constants
//! - `settings`: Player preferences
//! - `audio`: Notification-to-sound-cue mapping
//! - `platform`: Input mapping and the browser binding
//! - `session`: Fixed-timestep loop around the simulation

pub mod audio;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::{ConfigError, LevelConfig, LevelTable, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (display-synchronized)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Ticks between level completion and the next level starting
    pub const LEVEL_COMPLETE_DELAY_TICKS: u32 = 2 * TICKS_PER_SECOND;

    /// Physics (per tick)
    pub const MAX_VELOCITY: f32 = 10.0;
    pub const DAMPING: f32 = 0.98;
    pub const RESTITUTION: f32 = 0.5;
    pub const BOUNCE_THRESHOLD: f32 = 1.0;
    pub const SLIP_FACTOR: f32 = 1.05;
    pub const PUSH_MULTIPLIER: f32 = 2.0;
    pub const PUSH_DAMPING: f32 = 0.5;
    pub const TELEPORT_COOLDOWN_TICKS: u32 = 60;

    /// Maze geometry
    pub const WALL_FRACTION: f32 = 0.025;
    pub const BALL_RADIUS_FACTOR: f32 = 0.6;
    pub const ENTRY_WALLS: f32 = 3.0;
    pub const MIN_EXIT_WALLS: f32 = 4.0;
    /// Exit zone height in wall widths before any nudging
    pub const EXIT_ZONE_WALLS: f32 = 3.0;
    pub const DEFAULT_EXIT_WIDTH_FRACTION: f32 = 0.15;
    pub const MAX_EXIT_WIDTH_FRACTION: f32 = 0.9;
    pub const WALL_COLOR: u32 = 0xaa_aa_aa;
    /// Overlap below this (pixels) counts as touching
    pub const LAYOUT_TOLERANCE: f32 = 1e-3;

    /// Generation and validation
    pub const REGENERATION_SEED_OFFSET: u64 = 1000;
    pub const MAX_REGENERATIONS: u32 = 2;
    pub const OBSTACLE_SEED_SALT: u64 = 7919;

    /// Obstacle placement
    pub const SAFE_ZONE_FRACTION: f32 = 0.15;
    pub const EXIT_SAFE_MARGIN: f32 = 30.0;
    /// Share of the obstacle budget spent on teleporter pairs
    pub const TELEPORTER_PAIR_SHARE: f32 = 0.2;
    /// Teleporter endpoints live in the outer 40% on each side
    pub const TELEPORTER_SIDE_FRACTION: f32 = 0.4;

    /// Default canvas when the host does not supply one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;
}

/// Wall width for a canvas: a fixed fraction of its shorter side
#[inline]
pub fn wall_width_for(canvas: Vec2, wall_fraction: f32) -> f32 {
    canvas.x.min(canvas.y) * wall_fraction
}

/// Clamp each component to [-max, max]
#[inline]
pub fn clamp_per_axis(v: Vec2, max: f32) -> Vec2 {
    v.clamp(Vec2::splat(-max), Vec2::splat(max))
}
