//! Level pipeline
//!
//! generator -> validator -> obstacle placer -> safe-zone cleanup.
//! Everything is derived from the level config and canvas size, so the same
//! inputs always give the same level.

use glam::Vec2;

use super::maze::{Maze, generate_maze};
use super::obstacles::{Obstacle, clear_safe_zones, place_obstacles};
use super::rng::SeededRandom;
use super::validate::{ValidationReport, validate_maze};
use crate::tuning::{GenerationTuning, LevelConfig};

/// A fully built, playable level
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// 1-based level number
    pub number: u32,
    pub config: LevelConfig,
    pub maze: Maze,
    pub obstacles: Vec<Obstacle>,
    pub report: ValidationReport,
    /// Obstacles dropped by the safe-zone cleanup
    pub obstacles_cleared: usize,
}

impl Level {
    /// Ball start position
    pub fn start(&self) -> Vec2 {
        self.maze.start
    }
}

/// Build level `number` from its config for a canvas of the given size
pub fn generate_level(
    config: &LevelConfig,
    number: u32,
    canvas: Vec2,
    tuning: &GenerationTuning,
) -> Level {
    let mut rng = SeededRandom::new(config.seed);
    let maze = generate_maze(config, canvas, tuning, &mut rng, config.seed);
    let (maze, report) = validate_maze(maze, config, number, tuning);

    // Independent stream so hazards do not shift when the maze regenerates
    let mut obstacle_rng = SeededRandom::new(config.seed.wrapping_add(tuning.obstacle_seed_salt));
    let mut obstacles = place_obstacles(config, &maze, &mut obstacle_rng, tuning);
    let obstacles_cleared = clear_safe_zones(&mut obstacles, &maze, tuning);

    log::info!(
        "Level {}: {}x{} grid, seed {}, {} walls, {} obstacles",
        number,
        maze.rows,
        maze.cols,
        maze.seed,
        maze.walls.len(),
        obstacles.len()
    );
    if !report.is_clean() {
        log::debug!("Level {} repairs: {:?}", number, report);
    }

    Level {
        number,
        config: config.clone(),
        maze,
        obstacles,
        report,
        obstacles_cleared,
    }
}
