//! Simulation state and core types
//!
//! One [`SimulationState`] owns everything a level needs: the maze, its
//! obstacles, the ball and the decorative effects. Components receive it by
//! reference; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{Effects, Particle};
use super::geometry::Rect;
use super::level::{Level, generate_level};
use super::maze::{Maze, WallSegment};
use super::obstacles::Obstacle;
use super::validate::ValidationReport;
use crate::tuning::{LevelTable, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball responds to input
    Playing,
    /// Exit reached; frozen until the next level starts
    LevelComplete,
}

/// The player's ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Where resets put the ball back
    pub start: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            start: pos,
        }
    }

    /// Back to the start position, at rest
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.vel = Vec2::ZERO;
    }
}

/// Fire-and-forget notifications for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Ball bounced off a canvas edge or wall hard enough to hear
    Bounce { speed: f32 },
    /// Spike hit or crushed by a patrolling hazard; ball was reset
    HazardHit { pos: Vec2 },
    /// Ball jumped between teleporter ends
    Teleported { from: Vec2, to: Vec2 },
    /// Ball entered a slip zone
    SlipZone,
    LevelComplete { level: u32 },
    LevelStarted { level: u32 },
}

/// Read-only view for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u32,
    pub phase: GamePhase,
    pub canvas: Vec2,
    pub wall_width: f32,
    pub walls: Vec<WallSegment>,
    pub obstacles: Vec<Obstacle>,
    pub ball: Ball,
    pub entry: Rect,
    pub exit: Rect,
    pub particles: Vec<Particle>,
}

/// Everything the tick reads and writes
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// 1-based current level
    pub level: u32,
    pub phase: GamePhase,
    pub table: LevelTable,
    pub tuning: Tuning,
    pub canvas: Vec2,
    pub maze: Maze,
    pub obstacles: Vec<Obstacle>,
    pub ball: Ball,
    pub effects: Effects,
    /// Repairs the validator made to the current level
    pub report: ValidationReport,
    /// Ticks simulated on the current level
    pub time_ticks: u64,
    /// Ball was inside a slip zone last tick
    pub(crate) on_slip_zone: bool,
    events: Vec<GameEvent>,
}

impl SimulationState {
    /// Build level 1
    pub fn new(table: LevelTable, tuning: Tuning, canvas: Vec2, max_particles: usize) -> Self {
        let level = generate_level(table.get(1), 1, canvas, &tuning.generation);
        let mut state = Self {
            level: 1,
            phase: GamePhase::Playing,
            table,
            tuning,
            canvas,
            ball: Ball::new(level.start(), level.maze.ball_radius),
            effects: Effects::new(level.config.seed, max_particles),
            maze: level.maze.clone(),
            obstacles: Vec::new(),
            report: ValidationReport::default(),
            time_ticks: 0,
            on_slip_zone: false,
            events: Vec::new(),
        };
        state.install(level);
        state
    }

    fn install(&mut self, level: Level) {
        self.level = level.number;
        self.phase = GamePhase::Playing;
        self.ball = Ball::new(level.start(), level.maze.ball_radius);
        self.maze = level.maze;
        self.obstacles = level.obstacles;
        self.report = level.report;
        self.time_ticks = 0;
        self.on_slip_zone = false;
        let max_particles = self.effects.max_particles();
        self.effects = Effects::new(level.config.seed, max_particles);
        self.events.push(GameEvent::LevelStarted { level: self.level });
    }

    /// Generate and enter a level (1-based; past the table end reuses the last entry)
    pub fn start_level(&mut self, number: u32) {
        let number = number.max(1);
        let level = generate_level(
            self.table.get(number),
            number,
            self.canvas,
            &self.tuning.generation,
        );
        self.install(level);
    }

    pub fn advance_level(&mut self) {
        self.start_level(self.level + 1);
    }

    pub fn restart_level(&mut self) {
        self.start_level(self.level);
    }

    /// Canvas size changed: rebuild the current level at the new size
    pub fn resize(&mut self, canvas: Vec2) {
        if canvas == self.canvas {
            return;
        }
        log::info!("Canvas resized to {}x{}", canvas.x, canvas.y);
        self.canvas = canvas;
        self.restart_level();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all notifications since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level,
            phase: self.phase,
            canvas: self.canvas,
            wall_width: self.maze.wall_width,
            walls: self.maze.walls.clone(),
            obstacles: self.obstacles.clone(),
            ball: self.ball,
            entry: self.maze.entry,
            exit: self.maze.exit,
            particles: self.effects.particles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn state() -> SimulationState {
        SimulationState::new(
            LevelTable::default(),
            Tuning::default(),
            Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            256,
        )
    }

    #[test]
    fn test_new_state_starts_level_one() {
        let mut state = state();
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos, state.maze.start);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted { level: 1 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_advance_level() {
        let mut state = state();
        state.phase = GamePhase::LevelComplete;
        state.advance_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.maze.rows, state.table.get(2).grid_size);
    }

    #[test]
    fn test_ball_reset() {
        let mut ball = Ball::new(Vec2::new(10.0, 20.0), 3.0);
        ball.pos = Vec2::new(99.0, 99.0);
        ball.vel = Vec2::new(1.0, -1.0);
        ball.reset();
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_resize_rebuilds_level() {
        let mut state = state();
        let before = state.maze.wall_width;
        state.resize(Vec2::new(400.0, 300.0));
        assert!(state.maze.wall_width < before);
        assert_eq!(state.level, 1);
        assert_eq!(state.ball.pos, state.maze.start);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = state();
        let json = serde_json::to_string(&state.snapshot()).expect("serialize");
        let back: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.walls.len(), state.maze.walls.len());
        assert_eq!(back.level, 1);
    }
}
