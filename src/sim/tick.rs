//! Fixed timestep simulation tick
//!
//! One call advances the ball by one display frame: integrate, canvas edges,
//! walls, obstacles, then the goal check. All constants are per tick.

use glam::Vec2;

use super::collision::{resolve_boundaries, resolve_wall};
use super::geometry::Rect;
use super::obstacles::{
    ObstacleKind, ObstacleOutcome, apply_effect, arm_teleporter, update_obstacles,
};
use super::state::{GameEvent, GamePhase, SimulationState};
use crate::clamp_per_axis;
use crate::tuning::PhysicsTuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Acceleration added to the ball velocity this tick
    pub force: Vec2,
}

impl TickInput {
    pub fn new(force: Vec2) -> Self {
        Self { force }
    }
}

/// Ball center strictly inside the exit zone
pub fn check_exit(ball_pos: Vec2, exit: &Rect) -> bool {
    exit.contains_point(ball_pos)
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    // Decorative effects keep animating while the level is frozen
    if state.phase != GamePhase::Playing {
        state.effects.update();
        return;
    }
    state.time_ticks += 1;
    let physics = state.tuning.physics.clone();

    // 1. Integrate
    let ball = &mut state.ball;
    ball.vel = clamp_per_axis(ball.vel + input.force, physics.max_velocity);
    ball.vel *= physics.damping;
    ball.pos += ball.vel;

    // 2. Canvas edges
    let mut bounces: Vec<f32> = resolve_boundaries(ball, state.canvas, physics.restitution)
        .into_iter()
        .map(|c| c.speed)
        .collect();

    // 3. Walls
    for wall in &state.maze.walls {
        if let Some(contact) = resolve_wall(ball, &wall.rect, physics.restitution) {
            bounces.push(contact.speed);
        }
    }
    for speed in bounces {
        if speed > physics.bounce_threshold {
            state.push_event(GameEvent::Bounce { speed });
        }
    }

    // 4. Moving parts
    update_obstacles(&mut state.obstacles, state.canvas.x, state.maze.wall_width);
    state.effects.update();

    // 5. Obstacles
    resolve_obstacles(state, &physics);

    // 6. Goal
    if check_exit(state.ball.pos, &state.maze.exit) {
        state.phase = GamePhase::LevelComplete;
        state.ball.vel = Vec2::ZERO;
        log::info!(
            "Level {} complete after {} ticks",
            state.level,
            state.time_ticks
        );
        state.push_event(GameEvent::LevelComplete { level: state.level });
    }
}

/// Apply every obstacle's effect in order
///
/// A reset ends resolution for the tick. Teleports arm both ends before the
/// next obstacle is checked, so the arrival end cannot fire in the same tick.
fn resolve_obstacles(state: &mut SimulationState, physics: &PhysicsTuning) {
    let mut on_slip_zone = false;

    for index in 0..state.obstacles.len() {
        let outcome = apply_effect(
            index,
            &state.ball,
            &state.maze.walls,
            &state.obstacles,
            physics,
        );
        match outcome {
            ObstacleOutcome::None => {}
            ObstacleOutcome::Reset => {
                let pos = state.ball.pos;
                state.effects.explosion(pos);
                state.ball.reset();
                log::debug!("Hazard hit at {:?}, ball reset", pos);
                state.push_event(GameEvent::HazardHit { pos });
                break;
            }
            ObstacleOutcome::Redirect(vel) => {
                if state.obstacles[index].kind() == ObstacleKind::SlipZone {
                    on_slip_zone = true;
                }
                state.ball.vel = vel;
            }
            ObstacleOutcome::Teleport { to, partner } => {
                let from = state.ball.pos;
                state.effects.teleport_flash(from);
                state.ball.pos = to;
                state.ball.vel = Vec2::ZERO;
                state.effects.teleport_flash(to);

                let id = state.obstacles[index].id();
                arm_teleporter(&mut state.obstacles, id, physics.teleport_cooldown);
                arm_teleporter(&mut state.obstacles, partner, physics.teleport_cooldown);
                state.push_event(GameEvent::Teleported { from, to });
            }
        }
    }

    if on_slip_zone && !state.on_slip_zone {
        state.push_event(GameEvent::SlipZone);
    }
    state.on_slip_zone = on_slip_zone;
}
