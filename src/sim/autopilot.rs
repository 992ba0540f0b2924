//! Demo steering
//!
//! Follows the validator's breadth-first route through the occupancy grid,
//! pushing the ball toward the next waypoint. Replans when the ball is thrown
//! off course (hazard reset, teleport, hard bounce).

use glam::Vec2;

use super::maze::Maze;
use super::state::Ball;
use super::validate::find_path_from;

/// Cruise speed toward a waypoint (pixels per tick)
const CRUISE_SPEED: f32 = 3.0;
/// Fraction of the velocity error corrected per tick
const STEER_GAIN: f32 = 0.35;
/// Waypoint counts as reached within this many wall widths
const REACH_WALLS: f32 = 1.0;
/// Replan when farther than this many wall widths from the current waypoint
const OFF_COURSE_WALLS: f32 = 4.0;
/// Ticks without getting closer to the waypoint before giving up on it
const STALL_TICKS: u32 = 90;
/// Distance gain (pixels) that counts as progress
const PROGRESS_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    path: Vec<Vec2>,
    next: usize,
    replans: u32,
    /// Closest approach to the current waypoint
    best: Option<f32>,
    stalled: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining waypoints
    pub fn path(&self) -> &[Vec2] {
        self.path.get(self.next..).unwrap_or(&[])
    }

    pub fn replans(&self) -> u32 {
        self.replans
    }

    fn plan(&mut self, maze: &Maze, from: Vec2) {
        self.path = find_path_from(maze, from).unwrap_or_default();
        self.next = 0;
        self.replans += 1;
        self.best = None;
        self.stalled = 0;
        log::debug!("Autopilot planned {} waypoints", self.path.len());
    }

    /// Force to apply this tick
    pub fn steer(&mut self, maze: &Maze, ball: &Ball) -> Vec2 {
        let reach = maze.wall_width * REACH_WALLS;
        let off_course = maze.wall_width * OFF_COURSE_WALLS;

        let needs_plan = match self.path.get(self.next) {
            None => true,
            Some(&target) => ball.pos.distance(target) > off_course,
        };
        if needs_plan {
            self.plan(maze, ball.pos);
        }

        while self.next + 1 < self.path.len() && ball.pos.distance(self.path[self.next]) < reach {
            self.next += 1;
            self.best = None;
            self.stalled = 0;
        }

        let Some(&target) = self.path.get(self.next) else {
            return Vec2::ZERO;
        };
        self.track_progress(maze, ball, target);
        let Some(&target) = self.path.get(self.next) else {
            return Vec2::ZERO;
        };
        let desired = (target - ball.pos).clamp_length_max(CRUISE_SPEED);
        (desired - ball.vel) * STEER_GAIN
    }

    /// Skip a waypoint the ball cannot get closer to (caught on a wall end);
    /// replan once the last one stalls too
    fn track_progress(&mut self, maze: &Maze, ball: &Ball, target: Vec2) {
        let distance = ball.pos.distance(target);
        match self.best {
            Some(best) if distance > best - PROGRESS_EPSILON => self.stalled += 1,
            _ => {
                self.best = Some(distance);
                self.stalled = 0;
            }
        }
        if self.stalled < STALL_TICKS {
            return;
        }

        if self.next + 1 < self.path.len() {
            log::debug!("Autopilot stalled, skipping waypoint {}", self.next);
            self.next += 1;
            self.best = None;
            self.stalled = 0;
        } else {
            self.plan(maze, ball.pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::generate_level;
    use crate::tuning::{GenerationTuning, LevelTable};

    fn level_one() -> Maze {
        generate_level(
            LevelTable::default().get(1),
            1,
            Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            &GenerationTuning::default(),
        )
        .maze
    }

    #[test]
    fn test_plans_on_first_steer() {
        let maze = level_one();
        let ball = Ball::new(maze.start, maze.ball_radius);
        let mut pilot = Autopilot::new();
        pilot.steer(&maze, &ball);
        assert_eq!(pilot.replans(), 1);
        let last = *pilot.path().last().expect("path to exit");
        assert!(maze.exit.contains_point(last));
    }

    #[test]
    fn test_force_points_at_waypoint() {
        let maze = level_one();
        let ball = Ball::new(maze.start, maze.ball_radius);
        let mut pilot = Autopilot::new();
        let force = pilot.steer(&maze, &ball);
        let target = pilot.path()[0];
        assert!(force.length() > 0.0 || ball.pos.distance(target) < maze.wall_width);
        assert!(force.length() <= CRUISE_SPEED * STEER_GAIN + 1e-4);
    }

    #[test]
    fn test_replans_when_thrown_off_course() {
        let maze = level_one();
        let mut ball = Ball::new(maze.start, maze.ball_radius);
        let mut pilot = Autopilot::new();
        pilot.steer(&maze, &ball);
        ball.pos = maze.cell_rect(1, 1).center();
        pilot.steer(&maze, &ball);
        assert_eq!(pilot.replans(), 2);
    }

    #[test]
    fn test_skips_waypoint_after_stalling() {
        let maze = level_one();
        let ball = Ball::new(maze.start, maze.ball_radius);
        let mut pilot = Autopilot::new();
        pilot.steer(&maze, &ball);
        let remaining = pilot.path().len();
        assert!(remaining > 2);

        // Ball pinned in place: no progress toward the waypoint
        for _ in 0..STALL_TICKS {
            pilot.steer(&maze, &ball);
        }
        assert_eq!(pilot.path().len(), remaining - 1);
        assert_eq!(pilot.replans(), 1);
    }
}
