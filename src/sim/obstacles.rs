//! Obstacle placement and effects
//!
//! Obstacles are a closed set of variants. Placement draws from the level's
//! seeded PRNG, so a level's hazards are as reproducible as its walls.
//! Effects are pure: [`apply_effect`] inspects the ball and reports an
//! [`ObstacleOutcome`]; the tick applies it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ball_box_overlap, circle_rect_collision, triangle_circle_collision};
use super::geometry::Rect;
use super::maze::{Maze, WallSegment};
use super::rng::SeededRandom;
use super::state::Ball;
use crate::consts::{TELEPORTER_PAIR_SHARE, TELEPORTER_SIDE_FRACTION};
use crate::tuning::{GenerationTuning, LevelConfig, PhysicsTuning};

/// Stable identifier of an obstacle within one level
pub type ObstacleId = u32;

/// Obstacle type names as used in level tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Spike,
    #[serde(alias = "moving")]
    Patrolling,
    #[serde(alias = "ice")]
    SlipZone,
    Teleporter,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Spike,
        ObstacleKind::Patrolling,
        ObstacleKind::SlipZone,
        ObstacleKind::Teleporter,
    ];

    /// Dangerous obstacles can reset the ball
    pub fn is_dangerous(self) -> bool {
        matches!(self, ObstacleKind::Spike | ObstacleKind::Patrolling)
    }

    pub fn name(self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Patrolling => "patrolling",
            ObstacleKind::SlipZone => "slip_zone",
            ObstacleKind::Teleporter => "teleporter",
        }
    }
}

/// Static triangular hazard, point up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub id: ObstacleId,
    pub bounds: Rect,
    /// Bottom-left, apex, bottom-right
    pub points: [Vec2; 3],
}

impl Spike {
    pub fn new(id: ObstacleId, bounds: Rect) -> Self {
        let points = [
            Vec2::new(bounds.x, bounds.bottom()),
            Vec2::new(bounds.x + bounds.width / 2.0, bounds.y),
            Vec2::new(bounds.right(), bounds.bottom()),
        ];
        Self { id, bounds, points }
    }
}

/// Block sliding horizontally between the side walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrollingHazard {
    pub id: ObstacleId,
    pub bounds: Rect,
    /// Horizontal speed in pixels per tick (sign is direction)
    pub vx: f32,
}

impl PatrollingHazard {
    /// Advance one tick, reversing at the side walls
    pub fn step(&mut self, canvas_width: f32, wall_width: f32) {
        let prev_x = self.bounds.x;
        self.bounds.x += self.vx;
        if self.bounds.x < wall_width || self.bounds.right() > canvas_width - wall_width {
            self.vx = -self.vx;
            self.bounds.x = prev_x;
        }
    }
}

/// Low-friction patch that speeds the ball up while it is inside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipZone {
    pub id: ObstacleId,
    pub bounds: Rect,
}

/// One end of a linked teleporter pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teleporter {
    pub id: ObstacleId,
    pub bounds: Rect,
    /// Id of the other end
    pub partner: ObstacleId,
    /// Ticks until this end can fire again
    pub cooldown: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Obstacle {
    Spike(Spike),
    Patrolling(PatrollingHazard),
    SlipZone(SlipZone),
    Teleporter(Teleporter),
}

impl Obstacle {
    pub fn id(&self) -> ObstacleId {
        match self {
            Obstacle::Spike(o) => o.id,
            Obstacle::Patrolling(o) => o.id,
            Obstacle::SlipZone(o) => o.id,
            Obstacle::Teleporter(o) => o.id,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Spike(_) => ObstacleKind::Spike,
            Obstacle::Patrolling(_) => ObstacleKind::Patrolling,
            Obstacle::SlipZone(_) => ObstacleKind::SlipZone,
            Obstacle::Teleporter(_) => ObstacleKind::Teleporter,
        }
    }

    /// Bounding rectangle
    pub fn bounds(&self) -> &Rect {
        match self {
            Obstacle::Spike(o) => &o.bounds,
            Obstacle::Patrolling(o) => &o.bounds,
            Obstacle::SlipZone(o) => &o.bounds,
            Obstacle::Teleporter(o) => &o.bounds,
        }
    }

    pub fn is_dangerous(&self) -> bool {
        self.kind().is_dangerous()
    }

    /// Contact test: exact triangle for spikes, bounding box for the rest
    pub fn touches(&self, ball: &Ball) -> bool {
        match self {
            Obstacle::Spike(spike) => {
                triangle_circle_collision(&spike.points, ball.pos, ball.radius)
            }
            other => ball_box_overlap(ball.pos, ball.radius, other.bounds()),
        }
    }

    pub fn cooldown(&self) -> u32 {
        match self {
            Obstacle::Teleporter(t) => t.cooldown,
            _ => 0,
        }
    }
}

/// What touching an obstacle does to the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleOutcome {
    /// Hazard hit: back to the start
    Reset,
    /// Replace the ball velocity
    Redirect(Vec2),
    /// Move the ball here and stop it; `partner` is the arrival end
    Teleport { to: Vec2, partner: ObstacleId },
    None,
}

/// Find an obstacle by id
pub fn find_obstacle(obstacles: &[Obstacle], id: ObstacleId) -> Option<&Obstacle> {
    obstacles.iter().find(|o| o.id() == id)
}

/// Effect of obstacle `index` on the ball this tick
///
/// Returns [`ObstacleOutcome::None`] when the ball is not touching it.
pub fn apply_effect(
    index: usize,
    ball: &Ball,
    walls: &[WallSegment],
    obstacles: &[Obstacle],
    physics: &PhysicsTuning,
) -> ObstacleOutcome {
    let Some(obstacle) = obstacles.get(index) else {
        return ObstacleOutcome::None;
    };
    if !obstacle.touches(ball) {
        return ObstacleOutcome::None;
    }

    match obstacle {
        Obstacle::Spike(_) => ObstacleOutcome::Reset,
        Obstacle::Patrolling(hazard) => {
            // Where the hazard would shove the ball next tick
            let next = Vec2::new(ball.pos.x + hazard.vx, ball.pos.y);
            let into_wall = walls
                .iter()
                .any(|w| circle_rect_collision(next, ball.radius, &w.rect));
            let into_obstacle = obstacles
                .iter()
                .enumerate()
                .any(|(i, o)| i != index && circle_rect_collision(next, ball.radius, o.bounds()));

            if into_wall || into_obstacle {
                ObstacleOutcome::Reset
            } else {
                ObstacleOutcome::Redirect(Vec2::new(
                    hazard.vx * physics.push_multiplier,
                    -ball.vel.y * physics.push_damping,
                ))
            }
        }
        Obstacle::SlipZone(_) => ObstacleOutcome::Redirect(ball.vel * physics.slip_factor),
        Obstacle::Teleporter(teleporter) => {
            if teleporter.cooldown > 0 {
                return ObstacleOutcome::None;
            }
            match find_obstacle(obstacles, teleporter.partner) {
                Some(partner @ Obstacle::Teleporter(_)) => ObstacleOutcome::Teleport {
                    to: partner.bounds().center(),
                    partner: partner.id(),
                },
                _ => ObstacleOutcome::None,
            }
        }
    }
}

/// Arm the cooldown on a teleporter end
pub fn arm_teleporter(obstacles: &mut [Obstacle], id: ObstacleId, ticks: u32) {
    for obstacle in obstacles.iter_mut() {
        if let Obstacle::Teleporter(t) = obstacle {
            if t.id == id {
                t.cooldown = ticks;
            }
        }
    }
}

/// Per-tick obstacle motion and cooldowns
pub fn update_obstacles(obstacles: &mut [Obstacle], canvas_width: f32, wall_width: f32) {
    for obstacle in obstacles.iter_mut() {
        match obstacle {
            Obstacle::Patrolling(hazard) => hazard.step(canvas_width, wall_width),
            Obstacle::Teleporter(t) => t.cooldown = t.cooldown.saturating_sub(1),
            Obstacle::Spike(_) | Obstacle::SlipZone(_) => {}
        }
    }
}

/// Uniform draw in [lo, hi], or `lo` when the span is empty
fn span(rng: &mut SeededRandom, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.range(lo, hi) } else { lo }
}

/// Scatter the level's obstacles over the maze
///
/// Teleporter pairs go first, one end on each side of the field. The rest
/// are typed by uniform draws from the allowed set, teleporters excluded.
pub fn place_obstacles(
    config: &LevelConfig,
    maze: &Maze,
    rng: &mut SeededRandom,
    tuning: &GenerationTuning,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    if config.obstacle_count == 0 {
        return obstacles;
    }

    let canvas = maze.canvas;
    let wall = maze.wall_width;
    let (cw, ch) = (maze.cell_width, maze.cell_height);
    let min_y = canvas.y * tuning.safe_zone_fraction;
    let max_y = canvas.y * (1.0 - tuning.safe_zone_fraction);
    let mut next_id: ObstacleId = 0;

    let pairs = if config.allows(ObstacleKind::Teleporter) {
        (config.obstacle_count as f32 * TELEPORTER_PAIR_SHARE).floor() as usize
    } else {
        0
    };

    let (tw, th) = (cw * 0.6, ch * 0.6);
    for _ in 0..pairs {
        let left_x = span(rng, wall, canvas.x * TELEPORTER_SIDE_FRACTION - tw);
        let left_y = span(rng, min_y, max_y - th);
        let right_x = span(
            rng,
            canvas.x * (1.0 - TELEPORTER_SIDE_FRACTION),
            canvas.x - wall - tw,
        );
        let right_y = span(rng, min_y, max_y - th);

        let (a, b) = (next_id, next_id + 1);
        next_id += 2;
        obstacles.push(Obstacle::Teleporter(Teleporter {
            id: a,
            bounds: Rect::new(left_x, left_y, tw, th),
            partner: b,
            cooldown: 0,
        }));
        obstacles.push(Obstacle::Teleporter(Teleporter {
            id: b,
            bounds: Rect::new(right_x, right_y, tw, th),
            partner: a,
            cooldown: 0,
        }));
    }

    let kinds: Vec<ObstacleKind> = config
        .obstacle_types
        .iter()
        .copied()
        .filter(|&k| k != ObstacleKind::Teleporter)
        .collect();
    let remaining = config.obstacle_count.saturating_sub(pairs * 2);
    if kinds.is_empty() {
        if remaining > 0 {
            log::debug!("No non-teleporter types allowed, skipping {} obstacles", remaining);
        }
        return obstacles;
    }

    for _ in 0..remaining {
        let kind = kinds[rng.index(kinds.len())];
        let (w, h) = match kind {
            ObstacleKind::Spike => (cw * 0.5, ch * 0.5),
            ObstacleKind::Patrolling => (cw * 0.5, ch * 0.25),
            ObstacleKind::SlipZone | ObstacleKind::Teleporter => (cw * 0.8, ch * 0.8),
        };
        let x = span(rng, wall, canvas.x - wall - w);
        let y = span(rng, min_y, max_y - h);
        let bounds = Rect::new(x, y, w, h);
        let id = next_id;
        next_id += 1;

        obstacles.push(match kind {
            ObstacleKind::Spike => Obstacle::Spike(Spike::new(id, bounds)),
            ObstacleKind::Patrolling => {
                let speed = rng.range(1.0, 3.0);
                let vx = if rng.chance(0.5) { speed } else { -speed };
                Obstacle::Patrolling(PatrollingHazard { id, bounds, vx })
            }
            _ => Obstacle::SlipZone(SlipZone { id, bounds }),
        });
    }

    obstacles
}

/// Band below the entry kept free of obstacles
pub fn entry_safe_zone(maze: &Maze, tuning: &GenerationTuning) -> Rect {
    let center_x = maze.entry.center().x;
    Rect::new(
        center_x - maze.cell_width,
        0.0,
        maze.cell_width * 2.0,
        maze.canvas.y * tuning.safe_zone_fraction + tuning.exit_safe_margin,
    )
}

/// Exit zone grown by the safe margin
pub fn exit_safe_zone(maze: &Maze, tuning: &GenerationTuning) -> Rect {
    maze.exit.expanded(tuning.exit_safe_margin)
}

/// Remove obstacles inside the entry or exit safe zones
///
/// Teleporters whose partner was removed go too. Returns the number removed.
pub fn clear_safe_zones(
    obstacles: &mut Vec<Obstacle>,
    maze: &Maze,
    tuning: &GenerationTuning,
) -> usize {
    let before = obstacles.len();
    let entry = entry_safe_zone(maze, tuning);
    let exit = exit_safe_zone(maze, tuning);
    obstacles.retain(|o| !o.bounds().intersects(&entry) && !o.bounds().intersects(&exit));

    let ids: Vec<ObstacleId> = obstacles.iter().map(Obstacle::id).collect();
    obstacles.retain(|o| match o {
        Obstacle::Teleporter(t) => ids.contains(&t.partner),
        _ => true,
    });

    let removed = before - obstacles.len();
    if removed > 0 {
        log::debug!("Cleared {} obstacles from safe zones", removed);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::maze::generate_maze;
    use crate::tuning::LevelTable;

    fn maze_for(config: &LevelConfig) -> Maze {
        let mut rng = SeededRandom::new(config.seed);
        generate_maze(
            config,
            Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            &GenerationTuning::default(),
            &mut rng,
            config.seed,
        )
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 5.0)
    }

    fn pair(a_center: Vec2, b_center: Vec2) -> Vec<Obstacle> {
        vec![
            Obstacle::Teleporter(Teleporter {
                id: 0,
                bounds: Rect::from_center(a_center, 40.0, 40.0),
                partner: 1,
                cooldown: 0,
            }),
            Obstacle::Teleporter(Teleporter {
                id: 1,
                bounds: Rect::from_center(b_center, 40.0, 40.0),
                partner: 0,
                cooldown: 0,
            }),
        ]
    }

    #[test]
    fn test_kind_names_match_serde() {
        for kind in ObstacleKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize");
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_only_spikes_and_patrols_are_dangerous() {
        let dangerous: Vec<_> = ObstacleKind::ALL
            .into_iter()
            .filter(|k| k.is_dangerous())
            .collect();
        assert_eq!(dangerous, vec![ObstacleKind::Spike, ObstacleKind::Patrolling]);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let table = LevelTable::default();
        let config = table.get(8);
        let maze = maze_for(config);
        let tuning = GenerationTuning::default();
        let a = place_obstacles(config, &maze, &mut SeededRandom::new(9), &tuning);
        let b = place_obstacles(config, &maze, &mut SeededRandom::new(9), &tuning);
        assert_eq!(a, b);
        assert_eq!(a.len(), config.obstacle_count);
    }

    #[test]
    fn test_teleporter_pairs_are_linked() {
        let table = LevelTable::default();
        let config = table.get(8);
        let maze = maze_for(config);
        let obstacles = place_obstacles(
            config,
            &maze,
            &mut SeededRandom::new(3),
            &GenerationTuning::default(),
        );

        let teleporters: Vec<&Teleporter> = obstacles
            .iter()
            .filter_map(|o| match o {
                Obstacle::Teleporter(t) => Some(t),
                _ => None,
            })
            .collect();
        // floor(10 * 0.2) pairs
        assert_eq!(teleporters.len(), 4);
        for t in &teleporters {
            let partner = find_obstacle(&obstacles, t.partner).expect("partner exists");
            assert_eq!(partner.kind(), ObstacleKind::Teleporter);
            assert!(matches!(partner, Obstacle::Teleporter(p) if p.partner == t.id));
        }
        // One end left of 40%, the other right of 60%
        let left = teleporters[0].bounds;
        let right = teleporters[1].bounds;
        assert!(left.right() <= DEFAULT_CANVAS_WIDTH * 0.4 + 1e-3);
        assert!(right.x >= DEFAULT_CANVAS_WIDTH * 0.6 - 1e-3);
    }

    #[test]
    fn test_obstacles_stay_out_of_safe_bands() {
        let table = LevelTable::default();
        for level in 2..=8 {
            let config = table.get(level);
            let maze = maze_for(config);
            let obstacles = place_obstacles(
                config,
                &maze,
                &mut SeededRandom::new(level as u64),
                &GenerationTuning::default(),
            );
            for o in &obstacles {
                let b = o.bounds();
                assert!(b.y >= DEFAULT_CANVAS_HEIGHT * SAFE_ZONE_FRACTION - 1e-3);
                assert!(b.bottom() <= DEFAULT_CANVAS_HEIGHT * (1.0 - SAFE_ZONE_FRACTION) + 1e-3);
                assert!(config.allows(o.kind()));
            }
        }
    }

    #[test]
    fn test_no_obstacles_for_empty_level() {
        let config = LevelConfig::new(4, 12345);
        let maze = maze_for(&config);
        let obstacles = place_obstacles(
            &config,
            &maze,
            &mut SeededRandom::new(1),
            &GenerationTuning::default(),
        );
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_teleporter_only_level_places_pairs_only() {
        let mut config = LevelConfig::new(4, 1);
        config.obstacle_count = 5;
        config.obstacle_types = vec![ObstacleKind::Teleporter];
        let maze = maze_for(&config);
        let obstacles = place_obstacles(
            &config,
            &maze,
            &mut SeededRandom::new(1),
            &GenerationTuning::default(),
        );
        assert_eq!(obstacles.len(), 2);
    }

    #[test]
    fn test_clear_safe_zones_drops_orphans() {
        let config = LevelConfig::new(4, 1);
        let maze = maze_for(&config);
        let tuning = GenerationTuning::default();
        let mut obstacles = pair(maze.exit.center(), Vec2::new(400.0, 300.0));
        obstacles.push(Obstacle::SlipZone(SlipZone {
            id: 2,
            bounds: Rect::new(100.0, 300.0, 20.0, 20.0),
        }));

        let removed = clear_safe_zones(&mut obstacles, &maze, &tuning);
        assert_eq!(removed, 2);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].kind(), ObstacleKind::SlipZone);
    }

    #[test]
    fn test_entry_zone_clears_obstacle_under_entry() {
        let config = LevelConfig::new(4, 1);
        let maze = maze_for(&config);
        let tuning = GenerationTuning::default();
        let mut obstacles = vec![Obstacle::Spike(Spike::new(
            0,
            Rect::from_center(Vec2::new(maze.start.x, DEFAULT_CANVAS_HEIGHT * 0.16), 20.0, 20.0),
        ))];
        assert_eq!(clear_safe_zones(&mut obstacles, &maze, &tuning), 1);
    }

    #[test]
    fn test_spike_uses_exact_shape() {
        let spike = Obstacle::Spike(Spike::new(0, Rect::new(100.0, 100.0, 40.0, 40.0)));
        let physics = PhysicsTuning::default();
        // Empty top-left corner of the bounding box
        let corner = ball_at(103.0, 103.0);
        assert!(ball_box_overlap(corner.pos, corner.radius, spike.bounds()));
        assert_eq!(
            apply_effect(0, &corner, &[], std::slice::from_ref(&spike), &physics),
            ObstacleOutcome::None
        );
        let center = ball_at(120.0, 130.0);
        assert_eq!(
            apply_effect(0, &center, &[], &[spike], &physics),
            ObstacleOutcome::Reset
        );
    }

    #[test]
    fn test_patrol_pushes_ball() {
        let hazard = Obstacle::Patrolling(PatrollingHazard {
            id: 0,
            bounds: Rect::new(100.0, 100.0, 40.0, 10.0),
            vx: 2.0,
        });
        let mut ball = ball_at(143.0, 105.0);
        ball.vel = Vec2::new(-1.0, 4.0);
        let outcome = apply_effect(0, &ball, &[], &[hazard], &PhysicsTuning::default());
        assert_eq!(outcome, ObstacleOutcome::Redirect(Vec2::new(4.0, -2.0)));
    }

    #[test]
    fn test_patrol_crushes_ball_against_wall() {
        let hazard = Obstacle::Patrolling(PatrollingHazard {
            id: 0,
            bounds: Rect::new(100.0, 100.0, 40.0, 10.0),
            vx: 2.0,
        });
        let wall = WallSegment {
            rect: Rect::new(148.0, 50.0, 10.0, 100.0),
            color: WALL_COLOR,
            kind: crate::sim::maze::WallKind::Interior,
        };
        let ball = ball_at(143.0, 105.0);
        let outcome = apply_effect(0, &ball, &[wall], &[hazard], &PhysicsTuning::default());
        assert_eq!(outcome, ObstacleOutcome::Reset);
    }

    #[test]
    fn test_patrol_crushes_ball_against_obstacle() {
        let hazard = Obstacle::Patrolling(PatrollingHazard {
            id: 0,
            bounds: Rect::new(100.0, 100.0, 40.0, 10.0),
            vx: 2.0,
        });
        // Next step puts the ball 4px from the hazard's own edge
        let ball = ball_at(142.0, 105.0);
        let physics = PhysicsTuning::default();
        let alone = [hazard.clone()];
        assert!(matches!(
            apply_effect(0, &ball, &[], &alone, &physics),
            ObstacleOutcome::Redirect(_)
        ));

        let zone = Obstacle::SlipZone(SlipZone {
            id: 1,
            bounds: Rect::new(148.0, 80.0, 30.0, 50.0),
        });
        let pinned = [hazard, zone];
        assert_eq!(
            apply_effect(0, &ball, &[], &pinned, &physics),
            ObstacleOutcome::Reset
        );
    }

    #[test]
    fn test_slip_zone_scales_velocity() {
        let zone = Obstacle::SlipZone(SlipZone {
            id: 0,
            bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
        });
        let mut ball = ball_at(25.0, 25.0);
        ball.vel = Vec2::new(2.0, -4.0);
        let outcome = apply_effect(0, &ball, &[], &[zone], &PhysicsTuning::default());
        let ObstacleOutcome::Redirect(v) = outcome else {
            panic!("expected redirect, got {:?}", outcome);
        };
        assert!((v - Vec2::new(2.1, -4.2)).length() < 1e-5);
    }

    #[test]
    fn test_teleporter_targets_partner_center() {
        let obstacles = pair(Vec2::new(100.0, 300.0), Vec2::new(600.0, 200.0));
        let ball = ball_at(100.0, 300.0);
        let outcome = apply_effect(0, &ball, &[], &obstacles, &PhysicsTuning::default());
        assert_eq!(
            outcome,
            ObstacleOutcome::Teleport {
                to: Vec2::new(600.0, 200.0),
                partner: 1
            }
        );
    }

    #[test]
    fn test_teleporter_respects_cooldown() {
        let mut obstacles = pair(Vec2::new(100.0, 300.0), Vec2::new(600.0, 200.0));
        arm_teleporter(&mut obstacles, 0, 60);
        assert_eq!(obstacles[0].cooldown(), 60);
        assert_eq!(obstacles[1].cooldown(), 0);
        let ball = ball_at(100.0, 300.0);
        let outcome = apply_effect(0, &ball, &[], &obstacles, &PhysicsTuning::default());
        assert_eq!(outcome, ObstacleOutcome::None);

        update_obstacles(&mut obstacles, 800.0, 15.0);
        assert_eq!(obstacles[0].cooldown(), 59);
    }

    #[test]
    fn test_patrol_reverses_at_side_wall() {
        let mut hazard = PatrollingHazard {
            id: 0,
            bounds: Rect::new(16.0, 100.0, 40.0, 10.0),
            vx: -3.0,
        };
        hazard.step(800.0, 15.0);
        assert_eq!(hazard.vx, 3.0);
        assert_eq!(hazard.bounds.x, 16.0);
        hazard.step(800.0, 15.0);
        assert_eq!(hazard.bounds.x, 19.0);
    }
}
