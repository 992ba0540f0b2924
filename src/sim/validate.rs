//! Maze validation and repair
//!
//! Two checks gate every generated maze:
//! 1. Exit clearance: no wall may overlap the exit zone. Blocked mazes are
//!    regenerated a bounded number of times, then the exit is nudged toward
//!    its opening, and finally any wall still in the way is removed.
//! 2. Reachability: a breadth-first search over a rasterized occupancy grid
//!    must get from the ball start to the exit. Unreachable mazes get a
//!    straight corridor carved from entry to exit.
//!
//! Every repair is deterministic and bounded, so validation always terminates
//! with a playable maze.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::segment_rect_distance;
use super::geometry::Rect;
use super::maze::{Maze, WallKind, WallSegment, generate_maze};
use super::rng::SeededRandom;
use crate::consts::LAYOUT_TOLERANCE;
use crate::tuning::{GenerationTuning, LevelConfig};

/// Extra corridor clearance, in wall widths, beyond the ball radius
///
/// A raster cell touching the corridor centerline lies within √2 wall widths
/// of it; clearing 1.5 wall widths keeps every such cell free.
const CORRIDOR_SLACK_WALLS: f32 = 1.5;

/// Slack (pixels) when matching a wall to the inner face of the bottom boundary
const FLOOR_TOLERANCE: f32 = 0.01;

/// What the validator had to do to accept a maze
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Full regenerations caused by a blocked exit
    pub regenerations: u32,
    /// Times the exit zone was shifted toward its opening
    pub exit_nudges: u32,
    /// Walls removed because they still blocked the exit after nudging
    pub blockers_removed: usize,
    /// Whether the corridor fallback ran
    pub corridor_carved: bool,
    /// Walls removed by the corridor fallback
    pub walls_carved: usize,
}

impl ValidationReport {
    /// True when the first generated maze was accepted untouched
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Uniform occupancy grid over the canvas, one cell per wall width
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    pub cell_size: f32,
    pub cols: usize,
    pub rows: usize,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Rasterize the maze walls; a cell is blocked if any wall overlaps it
    pub fn rasterize(maze: &Maze) -> Self {
        let cell_size = maze.wall_width.max(1.0);
        let cols = (maze.canvas.x / cell_size).ceil() as usize;
        let rows = (maze.canvas.y / cell_size).ceil() as usize;
        let mut blocked = vec![false; cols * rows];

        for wall in &maze.walls {
            // Only visit cells under the wall's bounding box
            let c0 = ((wall.rect.x / cell_size).floor().max(0.0) as usize).min(cols);
            let c1 = ((wall.rect.right() / cell_size).ceil().max(0.0) as usize).min(cols);
            let r0 = ((wall.rect.y / cell_size).floor().max(0.0) as usize).min(rows);
            let r1 = ((wall.rect.bottom() / cell_size).ceil().max(0.0) as usize).min(rows);
            for row in r0..r1 {
                for col in c0..c1 {
                    let idx = row * cols + col;
                    if !blocked[idx] {
                        let cell = Self::rect_of(cell_size, col, row);
                        blocked[idx] = cell.overlaps(&wall.rect, LAYOUT_TOLERANCE);
                    }
                }
            }
        }

        Self {
            cell_size,
            cols,
            rows,
            blocked,
        }
    }

    fn rect_of(cell_size: f32, col: usize, row: usize) -> Rect {
        Rect::new(
            col as f32 * cell_size,
            row as f32 * cell_size,
            cell_size,
            cell_size,
        )
    }

    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Self::rect_of(self.cell_size, col, row)
    }

    /// Raster cell containing a canvas point
    pub fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell_size) as usize;
        let row = (p.y / self.cell_size) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    pub fn is_blocked(&self, col: usize, row: usize) -> bool {
        self.blocked[row * self.cols + col]
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Copy with every cell next to a blocked cell (8-neighborhood) blocked too
    pub fn inflated(&self) -> Self {
        let mut blocked = self.blocked.clone();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !self.is_blocked(col, row) {
                    continue;
                }
                for r in row.saturating_sub(1)..(row + 2).min(self.rows) {
                    for c in col.saturating_sub(1)..(col + 2).min(self.cols) {
                        blocked[r * self.cols + c] = true;
                    }
                }
            }
        }
        Self {
            blocked,
            ..*self
        }
    }

    /// 4-connected BFS from `start` to any free cell overlapping `target`
    ///
    /// Returns the cell path, start first. The start cell itself may be blocked.
    pub fn search(&self, start: Vec2, target: &Rect) -> Option<Vec<(usize, usize)>> {
        let (sc, sr) = self.cell_of(start)?;

        let is_goal = |col: usize, row: usize| {
            self.cell_rect(col, row).overlaps(target, LAYOUT_TOLERANCE)
        };

        let mut parent: Vec<Option<usize>> = vec![None; self.cols * self.rows];
        let mut seen = vec![false; self.cols * self.rows];
        let mut queue = VecDeque::new();
        let start_idx = sr * self.cols + sc;
        seen[start_idx] = true;
        queue.push_back(start_idx);

        while let Some(idx) = queue.pop_front() {
            let (col, row) = (idx % self.cols, idx / self.cols);
            if !self.blocked[idx] && is_goal(col, row) {
                let mut path = vec![(col, row)];
                let mut cur = idx;
                while let Some(prev) = parent[cur] {
                    path.push((prev % self.cols, prev / self.cols));
                    cur = prev;
                }
                path.reverse();
                return Some(path);
            }

            let neighbors = [
                (col > 0).then(|| idx - 1),
                (col + 1 < self.cols).then(|| idx + 1),
                (row > 0).then(|| idx - self.cols),
                (row + 1 < self.rows).then(|| idx + self.cols),
            ];
            for next in neighbors.into_iter().flatten() {
                if !seen[next] && !self.blocked[next] {
                    seen[next] = true;
                    parent[next] = Some(idx);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

/// Whether the ball start can reach the exit zone
pub fn is_reachable(maze: &Maze) -> bool {
    let grid = OccupancyGrid::rasterize(maze);
    let (col, row) = match grid.cell_of(maze.start) {
        Some(cell) => cell,
        None => return false,
    };
    !grid.is_blocked(col, row) && grid.search(maze.start, &maze.exit).is_some()
}

/// Waypoints (raster cell centers) from the ball start to the exit zone
pub fn find_path(maze: &Maze) -> Option<Vec<Vec2>> {
    find_path_from(maze, maze.start)
}

/// Waypoints from `from` to the exit zone, preferring a route away from walls
///
/// Searches the inflated grid first so waypoints keep a wall width of
/// clearance, then falls back to the plain grid.
pub fn find_path_from(maze: &Maze, from: Vec2) -> Option<Vec<Vec2>> {
    let grid = OccupancyGrid::rasterize(maze);
    let inflated = grid.inflated();
    let (grid, cells) = match inflated.search(from, &maze.exit) {
        Some(cells) => (inflated, cells),
        None => {
            let cells = grid.search(from, &maze.exit)?;
            (grid, cells)
        }
    };
    let mut points: Vec<Vec2> = cells
        .into_iter()
        .map(|(c, r)| grid.cell_rect(c, r).center())
        .collect();
    if let Some(last) = points.last_mut() {
        // Finish inside the goal rather than on the raster cell center
        *last = maze.exit.center();
    }
    Some(points)
}

/// Shift the exit zone one wall width toward its opening, shrinking it
///
/// The bottom edge stays put. Returns false once the zone is a single wall
/// width tall and cannot move further.
pub fn nudge_exit(maze: &mut Maze) -> bool {
    let step = maze.wall_width;
    if maze.exit.height <= step + LAYOUT_TOLERANCE {
        return false;
    }
    let bottom = maze.exit.bottom();
    maze.exit.height = (maze.exit.height - step).max(step);
    maze.exit.y = bottom - maze.exit.height;
    true
}

/// Remove interior walls too close to the straight entry-to-exit line
///
/// Returns the number of walls removed. Boundary walls are never carved.
pub fn carve_corridor(maze: &mut Maze) -> usize {
    let from = maze.start;
    let to = maze.exit.center();
    let clearance = maze.ball_radius + maze.wall_width * CORRIDOR_SLACK_WALLS;

    let before = maze.walls.len();
    maze.walls.retain(|wall| {
        wall.kind == WallKind::Boundary || segment_rect_distance(from, to, &wall.rect) >= clearance
    });
    before - maze.walls.len()
}

/// Bottom wall of a last-row cell; carving never opens these, so every seed
/// produces the same ones
fn is_floor_wall(maze: &Maze, wall: &WallSegment) -> bool {
    wall.kind == WallKind::Interior
        && wall.rect.is_horizontal()
        && (wall.rect.bottom() - (maze.canvas.y - maze.wall_width)).abs() < FLOOR_TOLERANCE
}

/// Validate a freshly generated maze, repairing it until it is playable
pub fn validate_maze(
    mut maze: Maze,
    config: &LevelConfig,
    level: u32,
    tuning: &GenerationTuning,
) -> (Maze, ValidationReport) {
    let mut report = ValidationReport::default();

    // 1. Exit clearance: bounded regeneration first
    let mut seed = maze.seed;
    while report.regenerations < tuning.max_regenerations {
        let blockers = maze.exit_blockers();
        if blockers.is_empty() {
            break;
        }
        if blockers.iter().all(|&i| is_floor_wall(&maze, &maze.walls[i])) {
            log::debug!(
                "Level {}: only floor walls block the exit, skipping regeneration",
                level
            );
            break;
        }
        seed = seed
            .wrapping_add(tuning.regeneration_seed_offset)
            .wrapping_add(level as u64);
        log::debug!(
            "Level {}: exit blocked by {} walls, regenerating with seed {}",
            level,
            maze.exit_blockers().len(),
            seed
        );
        let mut rng = SeededRandom::new(seed);
        maze = generate_maze(config, maze.canvas, tuning, &mut rng, seed);
        report.regenerations += 1;
    }

    while !maze.exit_blockers().is_empty() && nudge_exit(&mut maze) {
        report.exit_nudges += 1;
        log::debug!("Level {}: nudged exit to {:?}", level, maze.exit);
    }

    let blockers = maze.exit_blockers();
    if !blockers.is_empty() {
        log::warn!(
            "Level {}: removing {} walls still blocking the exit",
            level,
            blockers.len()
        );
        report.blockers_removed = blockers.len();
        let mut idx = 0;
        maze.walls.retain(|_| {
            let keep = !blockers.contains(&idx);
            idx += 1;
            keep
        });
    }

    // 2. Reachability: corridor fallback instead of regenerating
    if !is_reachable(&maze) {
        let removed = carve_corridor(&mut maze);
        report.corridor_carved = true;
        report.walls_carved = removed;
        log::warn!(
            "Level {}: exit unreachable, carved corridor through {} walls",
            level,
            removed
        );
        if !is_reachable(&maze) {
            log::warn!("Level {}: exit still unreachable after carving", level);
        }
    }

    (maze, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn canvas() -> Vec2 {
        Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    fn generate(grid_size: usize, seed: u64) -> (Maze, LevelConfig) {
        let config = LevelConfig::new(grid_size, seed);
        let mut rng = SeededRandom::new(seed);
        let maze = generate_maze(&config, canvas(), &GenerationTuning::default(), &mut rng, seed);
        (maze, config)
    }

    /// Seal the start cell off with a ring of walls
    fn wall_in_start(maze: &mut Maze) {
        let r = maze.wall_width * 3.0;
        let s = maze.start;
        for rect in [
            Rect::new(s.x - r, s.y + r, r * 2.0, maze.wall_width),
            Rect::new(s.x - r - maze.wall_width, s.y - r, maze.wall_width, r * 2.5),
            Rect::new(s.x + r, s.y - r, maze.wall_width, r * 2.5),
        ] {
            maze.walls.push(WallSegment {
                rect,
                color: WALL_COLOR,
                kind: WallKind::Interior,
            });
        }
    }

    #[test]
    fn test_generated_maze_is_reachable() {
        let (maze, _) = generate(4, 12345);
        assert!(is_reachable(&maze));
        let path = find_path(&maze).expect("path");
        assert!(maze.exit.contains_point(*path.last().expect("non-empty")));
    }

    #[test]
    fn test_rasterize_blocks_walls_only() {
        let (maze, _) = generate(3, 1);
        let grid = OccupancyGrid::rasterize(&maze);
        // Side walls block the first column everywhere
        assert!((0..grid.rows).all(|r| grid.is_blocked(0, r)));
        let (sc, sr) = grid.cell_of(maze.start).expect("start on canvas");
        assert!(!grid.is_blocked(sc, sr));
        assert!(grid.blocked_count() < grid.cols * grid.rows);
    }

    #[test]
    fn test_nudge_exit_is_bounded() {
        let (mut maze, _) = generate(4, 3);
        let bottom = maze.exit.bottom();
        let mut nudges = 0;
        while nudge_exit(&mut maze) {
            nudges += 1;
            assert!(nudges < 10);
        }
        assert_eq!(nudges, 2);
        assert!((maze.exit.height - maze.wall_width).abs() < 1e-3);
        assert!((maze.exit.bottom() - bottom).abs() < 1e-3);
    }

    #[test]
    fn test_sealed_start_gets_corridor() {
        let (mut maze, config) = generate(4, 12345);
        wall_in_start(&mut maze);
        assert!(!is_reachable(&maze));

        let (maze, report) = validate_maze(maze, &config, 1, &GenerationTuning::default());
        assert!(report.corridor_carved);
        assert!(report.walls_carved >= 1);
        assert!(is_reachable(&maze));
    }

    #[test]
    fn test_corridor_keeps_boundary() {
        let (mut maze, _) = generate(6, 8);
        let boundary_before = maze.walls.len() - maze.interior_wall_count();
        carve_corridor(&mut maze);
        let boundary_after = maze.walls.len() - maze.interior_wall_count();
        assert_eq!(boundary_before, boundary_after);
    }

    #[test]
    fn test_clean_report_for_open_exit() {
        // A large-cell grid leaves the exit opening inside the middle cell
        let (maze, config) = generate(3, 12345);
        let (_, report) = validate_maze(maze, &config, 1, &GenerationTuning::default());
        assert_eq!(report.blockers_removed, 0);
        assert!(!report.corridor_carved);
    }

    /// Vertical wall standing in the middle of the exit zone
    fn block_exit(maze: &mut Maze) {
        let exit = maze.exit;
        maze.walls.push(WallSegment {
            rect: Rect::new(
                exit.center().x - maze.wall_width / 2.0,
                exit.y,
                maze.wall_width,
                exit.height,
            ),
            color: WALL_COLOR,
            kind: WallKind::Interior,
        });
    }

    #[test]
    fn test_blocked_exit_regenerates_with_offset_seed() {
        let (mut maze, config) = generate(3, 12345);
        block_exit(&mut maze);
        assert!(!maze.exit_blockers().is_empty());

        let tuning = GenerationTuning::default();
        let level = 2;
        let (maze, report) = validate_maze(maze, &config, level, &tuning);
        assert_eq!(report.regenerations, 1);
        assert_eq!(maze.seed, 12345 + tuning.regeneration_seed_offset + level as u64);
        assert_eq!(report.exit_nudges, 0);
        assert_eq!(report.blockers_removed, 0);
        assert!(maze.exit_blockers().is_empty());
    }

    #[test]
    fn test_nudge_and_removal_follow_exhausted_regenerations() {
        let (mut maze, config) = generate(3, 12345);
        block_exit(&mut maze);
        let tuning = GenerationTuning {
            max_regenerations: 0,
            ..GenerationTuning::default()
        };

        let (maze, report) = validate_maze(maze, &config, 1, &tuning);
        assert_eq!(report.regenerations, tuning.max_regenerations);
        assert_eq!(maze.seed, 12345);
        // The wall spans the whole zone, so nudging cannot clear it
        assert_eq!(report.exit_nudges, 2);
        assert_eq!(report.blockers_removed, 1);
        assert!(maze.exit_blockers().is_empty());
    }

    #[test]
    fn test_floor_walls_do_not_trigger_regeneration() {
        let tuning = GenerationTuning::default();
        let level = 4;
        for seed in 0..20u64 {
            let (maze, config) = generate(8, seed);
            // The exit is wider than the middle cell, so neighbouring floors overlap it
            let blockers = maze.exit_blockers();
            assert!(blockers.iter().any(|&i| is_floor_wall(&maze, &maze.walls[i])));
            let floor_only = blockers.iter().all(|&i| is_floor_wall(&maze, &maze.walls[i]));

            let (maze, report) = validate_maze(maze, &config, level, &tuning);
            assert!(report.regenerations <= tuning.max_regenerations);
            assert_eq!(
                maze.seed,
                seed + report.regenerations as u64
                    * (tuning.regeneration_seed_offset + level as u64),
                "seed {}",
                seed
            );
            if floor_only {
                assert_eq!(report.regenerations, 0, "seed {}", seed);
            }
            assert!(report.exit_nudges >= 1, "seed {}", seed);
            assert!(maze.exit_blockers().is_empty(), "seed {}", seed);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_validated_maze_has_clear_reachable_exit(
            seed in 0u64..1_000_000,
            grid_size in 2usize..=10,
            extra in 0usize..8,
            level in 1u32..20,
        ) {
            let mut config = LevelConfig::new(grid_size, seed);
            config.extra_connections = extra;
            let tuning = GenerationTuning::default();
            let mut rng = SeededRandom::new(seed);
            let maze = generate_maze(&config, canvas(), &tuning, &mut rng, seed);
            let (maze, _) = validate_maze(maze, &config, level, &tuning);

            prop_assert!(maze.exit_blockers().is_empty());
            prop_assert!(is_reachable(&maze));
        }
    }
}
