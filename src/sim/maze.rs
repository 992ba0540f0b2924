//! Maze grid generation
//!
//! Carves a spanning tree over a rows × cols grid with a randomized iterative
//! depth-first traversal, then converts the surviving cell walls into
//! rectangular wall segments framed by the canvas boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::SeededRandom;
use crate::consts::*;
use crate::tuning::{GenerationTuning, LevelConfig};
use crate::wall_width_for;

/// Grid direction; also names the wall on that side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// (row, col) offset
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Which of a cell's four walls are still standing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWalls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for CellWalls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl CellWalls {
    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn clear(&mut self, dir: Direction) {
        match dir {
            Direction::Top => self.top = false,
            Direction::Right => self.right = false,
            Direction::Bottom => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }
}

/// One grid cell; only lives for the duration of a generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    pub visited: bool,
    pub walls: CellWalls,
}

/// Row-major cell grid
#[derive(Debug, Clone)]
pub struct MazeGrid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<GridCell>,
}

impl MazeGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![GridCell::default(); rows * cols],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &GridCell {
        &self.cells[row * self.cols + col]
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut GridCell {
        &mut self.cells[row * self.cols + col]
    }

    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.offset();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// Remove the wall between a cell and its neighbor; false if there is no neighbor
    pub fn carve(&mut self, row: usize, col: usize, dir: Direction) -> bool {
        let Some((nr, nc)) = self.neighbor(row, col, dir) else {
            return false;
        };
        self.cell_mut(row, col).walls.clear(dir);
        self.cell_mut(nr, nc).walls.clear(dir.opposite());
        true
    }

    /// Clear a wall on the outer edge of the grid (entry/exit openings)
    pub fn open_outer(&mut self, row: usize, col: usize, dir: Direction) {
        self.cell_mut(row, col).walls.clear(dir);
    }

    /// Randomized depth-first carve from `start`, using an explicit stack
    pub fn carve_passages(&mut self, start: (usize, usize), rng: &mut SeededRandom) {
        let mut stack = vec![start];
        self.cell_mut(start.0, start.1).visited = true;

        while let Some(&(row, col)) = stack.last() {
            let mut dirs = Direction::ALL;
            rng.shuffle(&mut dirs);

            let next = dirs.into_iter().find_map(|dir| {
                self.neighbor(row, col, dir)
                    .filter(|&(nr, nc)| !self.cell(nr, nc).visited)
                    .map(|n| (dir, n))
            });

            match next {
                Some((dir, (nr, nc))) => {
                    self.carve(row, col, dir);
                    self.cell_mut(nr, nc).visited = true;
                    stack.push((nr, nc));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Guarantee at least one cleared bottom wall on the last row
    ///
    /// Returns true when the middle column had to be forced open.
    pub fn ensure_bottom_opening(&mut self) -> bool {
        let last = self.rows - 1;
        let connected = (0..self.cols).any(|c| !self.cell(last, c).walls.bottom);
        if !connected {
            self.open_outer(last, self.cols / 2, Direction::Bottom);
        }
        !connected
    }

    /// Knock down `count` random interior walls to add cycles
    pub fn add_extra_connections(&mut self, count: usize, rng: &mut SeededRandom) -> usize {
        let mut removed = 0;
        for _ in 0..count {
            let row = rng.index(self.rows);
            let col = rng.index(self.cols);
            let dir = Direction::ALL[rng.index(4)];
            if self.carve(row, col, dir) {
                removed += 1;
            }
        }
        removed
    }

    pub fn all_visited(&self) -> bool {
        self.cells.iter().all(|c| c.visited)
    }
}

/// Boundary walls frame the canvas; interior walls come from grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    Boundary,
    Interior,
}

/// Axis-aligned wall rectangle plus display color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub rect: Rect,
    pub color: u32,
    pub kind: WallKind,
}

impl WallSegment {
    fn boundary(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            color: WALL_COLOR,
            kind: WallKind::Boundary,
        }
    }

    fn interior(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            color: WALL_COLOR,
            kind: WallKind::Interior,
        }
    }
}

/// A generated level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub walls: Vec<WallSegment>,
    /// Canvas size the layout was built for
    pub canvas: Vec2,
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub wall_width: f32,
    pub ball_radius: f32,
    /// Gap in the top boundary wall
    pub entry: Rect,
    /// Gap in the bottom boundary wall
    pub exit_opening: Rect,
    /// Goal region
    pub exit: Rect,
    /// Ball start position
    pub start: Vec2,
    /// Seed the layout was carved with (after any regeneration)
    pub seed: u64,
}

impl Maze {
    /// Top-left corner of a grid cell
    pub fn cell_origin(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            self.wall_width + col as f32 * self.cell_width,
            self.wall_width + row as f32 * self.cell_height,
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(o.x, o.y, self.cell_width, self.cell_height)
    }

    /// Walls overlapping the exit zone
    pub fn exit_blockers(&self) -> Vec<usize> {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, w)| w.rect.overlaps(&self.exit, LAYOUT_TOLERANCE))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn interior_wall_count(&self) -> usize {
        self.walls
            .iter()
            .filter(|w| w.kind == WallKind::Interior)
            .count()
    }
}

/// Horizontal span of an opening centered on `center_x`, kept inside the side walls
fn opening_span(center_x: f32, width: f32, canvas_width: f32, wall: f32) -> (f32, f32) {
    let width = width.min(canvas_width - 2.0 * wall);
    let x = (center_x - width / 2.0).clamp(wall, canvas_width - wall - width);
    (x, width)
}

/// Carve a maze for `config` on a canvas of the given size
pub fn generate_maze(
    config: &LevelConfig,
    canvas: Vec2,
    tuning: &GenerationTuning,
    rng: &mut SeededRandom,
    seed: u64,
) -> Maze {
    let rows = config.grid_size.max(2);
    let cols = rows;
    let wall = wall_width_for(canvas, tuning.wall_fraction);
    let cell_width = (canvas.x - 2.0 * wall) / cols as f32;
    let cell_height = (canvas.y - 2.0 * wall) / rows as f32;
    let ball_radius = wall * tuning.ball_radius_factor;

    // Openings line up with the center of the middle column
    let mid_col = cols / 2;
    let opening_center = wall + (mid_col as f32 + 0.5) * cell_width;
    let (entry_x, entry_width) =
        opening_span(opening_center, wall * tuning.entry_walls, canvas.x, wall);
    let exit_width = (wall * tuning.min_exit_walls).max(canvas.x * config.exit_width_fraction);
    let (exit_x, exit_width) = opening_span(opening_center, exit_width, canvas.x, wall);

    let mut grid = MazeGrid::new(rows, cols);
    let start_cell = (0, mid_col);
    grid.carve_passages(start_cell, rng);
    grid.open_outer(0, mid_col, Direction::Top);
    grid.ensure_bottom_opening();
    let extra = grid.add_extra_connections(config.extra_connections, rng);
    log::debug!(
        "Carved {}x{} grid from {:?}, {} extra connections",
        rows,
        cols,
        start_cell,
        extra
    );

    let mut walls = vec![
        // Top, split by the entry
        WallSegment::boundary(0.0, 0.0, entry_x, wall),
        WallSegment::boundary(
            entry_x + entry_width,
            0.0,
            canvas.x - (entry_x + entry_width),
            wall,
        ),
        // Bottom, split by the exit
        WallSegment::boundary(0.0, canvas.y - wall, exit_x, wall),
        WallSegment::boundary(
            exit_x + exit_width,
            canvas.y - wall,
            canvas.x - (exit_x + exit_width),
            wall,
        ),
        // Sides
        WallSegment::boundary(0.0, 0.0, wall, canvas.y),
        WallSegment::boundary(canvas.x - wall, 0.0, wall, canvas.y),
    ];

    for row in 0..rows {
        for col in 0..cols {
            let cell = grid.cell(row, col);
            let x = wall + col as f32 * cell_width;
            let y = wall + row as f32 * cell_height;

            if cell.walls.top {
                walls.push(WallSegment::interior(x, y, cell_width, wall));
            }
            if cell.walls.left {
                walls.push(WallSegment::interior(x, y, wall, cell_height));
            }
            // Shared edges are emitted once, from the top/left side
            if cell.walls.right && col == cols - 1 {
                walls.push(WallSegment::interior(
                    x + cell_width - wall,
                    y,
                    wall,
                    cell_height,
                ));
            }
            if cell.walls.bottom && row == rows - 1 {
                walls.push(WallSegment::interior(
                    x,
                    y + cell_height - wall,
                    cell_width,
                    wall,
                ));
            }
        }
    }

    let exit_height = wall * EXIT_ZONE_WALLS;
    Maze {
        walls,
        canvas,
        rows,
        cols,
        cell_width,
        cell_height,
        wall_width: wall,
        ball_radius,
        entry: Rect::new(entry_x, 0.0, entry_width, wall),
        exit_opening: Rect::new(exit_x, canvas.y - wall, exit_width, wall),
        exit: Rect::new(exit_x, canvas.y - exit_height, exit_width, exit_height),
        start: Vec2::new(entry_x + entry_width / 2.0, wall + ball_radius + 1.0),
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Vec2 {
        Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    fn build(grid_size: usize, seed: u64) -> Maze {
        let config = LevelConfig::new(grid_size, seed);
        let mut rng = SeededRandom::new(seed);
        generate_maze(&config, canvas(), &GenerationTuning::default(), &mut rng, seed)
    }

    /// Union-find over grid cells joined by cleared walls
    fn connected_components(grid: &MazeGrid) -> usize {
        let mut seen = vec![false; grid.rows * grid.cols];
        let mut components = 0;
        for start in 0..seen.len() {
            if seen[start] {
                continue;
            }
            components += 1;
            let mut stack = vec![(start / grid.cols, start % grid.cols)];
            seen[start] = true;
            while let Some((r, c)) = stack.pop() {
                for dir in Direction::ALL {
                    if grid.cell(r, c).walls.get(dir) {
                        continue;
                    }
                    if let Some((nr, nc)) = grid.neighbor(r, c, dir) {
                        let idx = nr * grid.cols + nc;
                        if !seen[idx] {
                            seen[idx] = true;
                            stack.push((nr, nc));
                        }
                    }
                }
            }
        }
        components
    }

    #[test]
    fn test_carve_visits_every_cell() {
        for size in 2..=10 {
            let mut grid = MazeGrid::new(size, size);
            let mut rng = SeededRandom::new(size as u64 * 31);
            grid.carve_passages((0, size / 2), &mut rng);
            assert!(grid.all_visited(), "grid {} left cells unvisited", size);
            assert_eq!(connected_components(&grid), 1);
        }
    }

    #[test]
    fn test_carve_produces_a_tree() {
        // A spanning tree over n cells removes exactly n - 1 interior walls
        let mut grid = MazeGrid::new(6, 6);
        let mut rng = SeededRandom::new(4242);
        grid.carve_passages((0, 3), &mut rng);
        let mut cleared = 0;
        for r in 0..6 {
            for c in 0..6 {
                let walls = grid.cell(r, c).walls;
                if !walls.right && c + 1 < 6 {
                    cleared += 1;
                }
                if !walls.bottom && r + 1 < 6 {
                    cleared += 1;
                }
            }
        }
        assert_eq!(cleared, 35);
    }

    #[test]
    fn test_bottom_opening_forced_in_middle() {
        let mut grid = MazeGrid::new(4, 4);
        let mut rng = SeededRandom::new(1);
        grid.carve_passages((0, 2), &mut rng);
        assert!(grid.ensure_bottom_opening());
        assert!(!grid.cell(3, 2).walls.bottom);
        // Second call finds the opening and leaves it alone
        assert!(!grid.ensure_bottom_opening());
    }

    #[test]
    fn test_carve_rejects_outer_edges() {
        let mut grid = MazeGrid::new(3, 3);
        assert!(!grid.carve(0, 0, Direction::Top));
        assert!(!grid.carve(2, 2, Direction::Right));
        assert!(grid.carve(1, 1, Direction::Left));
        assert!(!grid.cell(1, 0).walls.right);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(build(6, 777), build(6, 777));
        assert_ne!(build(6, 777).walls, build(6, 778).walls);
    }

    #[test]
    fn test_boundary_openings_are_gaps() {
        let maze = build(5, 99);
        let boundary: Vec<_> = maze
            .walls
            .iter()
            .filter(|w| w.kind == WallKind::Boundary)
            .collect();
        assert_eq!(boundary.len(), 6);
        for wall in &boundary {
            assert!(!wall.rect.intersects(&maze.entry));
            assert!(!wall.rect.intersects(&maze.exit_opening));
        }
    }

    #[test]
    fn test_start_cell_is_open_to_entry() {
        let maze = build(4, 5);
        // No wall overlaps the ball at its start position
        let ball = Rect::around_circle(maze.start, maze.ball_radius);
        assert!(maze.walls.iter().all(|w| !w.rect.intersects(&ball)));
    }

    #[test]
    fn test_minimum_grid() {
        let maze = build(2, 12);
        assert_eq!(maze.rows, 2);
        assert!(maze.cell_width > maze.wall_width * 4.0);
    }
}
