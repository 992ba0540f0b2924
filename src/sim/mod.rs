//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded level PRNG only (effects use their own stream)
//! - Stable iteration order (walls and obstacles in generation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod geometry;
pub mod level;
pub mod maze;
pub mod obstacles;
pub mod rng;
pub mod state;
pub mod tick;
pub mod validate;

pub use autopilot::Autopilot;
pub use effects::{Effects, Particle, ParticleKind};
pub use geometry::Rect;
pub use level::{Level, generate_level};
pub use maze::{Maze, WallKind, WallSegment, generate_maze};
pub use obstacles::{
    Obstacle, ObstacleId, ObstacleKind, ObstacleOutcome, apply_effect, clear_safe_zones,
    place_obstacles, update_obstacles,
};
pub use rng::SeededRandom;
pub use state::{Ball, GameEvent, GamePhase, SimulationState, Snapshot};
pub use tick::{TickInput, check_exit, tick};
pub use validate::{ValidationReport, find_path, is_reachable, validate_maze};
