//! Tilt Maze entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this is a headless runner: generate levels, inspect them, and
//! optionally let the autopilot play them.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use glam::Vec2;

    use tilt_maze::consts::*;
    use tilt_maze::sim::{GameEvent, generate_level, is_reachable};
    use tilt_maze::{LevelTable, Session, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "tilt-maze", about = "Headless tilt maze level runner")]
    pub struct Args {
        /// Level to start on (1-based)
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Canvas width in pixels
        #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
        width: f32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
        height: f32,

        /// JSON level table (defaults to the built-in table)
        #[arg(long)]
        levels: Option<PathBuf>,

        /// JSON physics and generation tuning
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// JSON player settings
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Ticks to simulate (0 only inspects the level)
        #[arg(short, long, default_value_t = 0)]
        ticks: u64,

        /// Let the autopilot steer
        #[arg(short, long)]
        autopilot: bool,

        /// Print the level snapshot as JSON
        #[arg(long)]
        dump: bool,
    }

    pub fn run(args: Args) -> Result<()> {
        if args.width <= 0.0 || args.height <= 0.0 {
            bail!("canvas must be positive, got {}x{}", args.width, args.height);
        }
        let canvas = Vec2::new(args.width, args.height);

        let table = match &args.levels {
            Some(path) => LevelTable::load(path)
                .with_context(|| format!("loading level table {}", path.display()))?,
            None => LevelTable::default(),
        };
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning {}", path.display()))?;
                serde_json::from_str::<Tuning>(&json)
                    .with_context(|| format!("parsing tuning {}", path.display()))?
            }
            None => Tuning::default(),
        };
        let settings = match &args.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };

        let level = generate_level(
            table.get(args.level),
            args.level.max(1),
            canvas,
            &tuning.generation,
        );
        println!(
            "Level {}: {}x{} grid, seed {}, {} walls ({} interior), {} obstacles ({} dangerous)",
            level.number,
            level.maze.rows,
            level.maze.cols,
            level.maze.seed,
            level.maze.walls.len(),
            level.maze.interior_wall_count(),
            level.obstacles.len(),
            level.obstacles.iter().filter(|o| o.is_dangerous()).count()
        );
        println!(
            "  wall {:.1}px, ball radius {:.1}px, exit {:?}",
            level.maze.wall_width, level.maze.ball_radius, level.maze.exit
        );
        println!(
            "  repairs: {} regenerations, {} exit nudges, {} blockers removed, {} walls carved",
            level.report.regenerations,
            level.report.exit_nudges,
            level.report.blockers_removed,
            level.report.walls_carved
        );
        println!("  reachable: {}", is_reachable(&level.maze));

        let mut session = Session::new(table, tuning, settings, canvas);
        if args.level > 1 {
            session.state_mut().start_level(args.level);
        }
        session.set_autopilot(args.autopilot);
        session.drain_events();

        let start_level = session.level();
        let mut completed = 0u32;
        let mut hazards = 0u32;
        let mut teleports = 0u32;
        for _ in 0..args.ticks {
            session.step();
            for event in session.drain_events() {
                match event {
                    GameEvent::LevelComplete { level } => {
                        completed += 1;
                        log::info!("Completed level {}", level);
                    }
                    GameEvent::HazardHit { .. } => hazards += 1,
                    GameEvent::Teleported { .. } => teleports += 1,
                    _ => {}
                }
            }
            session.drain_cues();
        }

        if args.ticks > 0 {
            let ball = session.state().ball;
            println!(
                "After {} ticks: level {} -> {}, {} completed, {} hazard hits, {} teleports",
                args.ticks,
                start_level,
                session.level(),
                completed,
                hazards,
                teleports
            );
            println!("  ball at ({:.1}, {:.1})", ball.pos.x, ball.pos.y);
            if session.autopilot_enabled() && completed == 0 {
                log::warn!("Autopilot did not reach the exit in {} ticks", args.ticks);
            }
        }

        if args.dump {
            let json = serde_json::to_string_pretty(&session.snapshot())
                .context("serializing snapshot")?;
            println!("{}", json);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tilt Maze (native) starting...");
    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
