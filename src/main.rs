//! Gravitrip entry point
//!
//! Native builds get a small CLI for generating mazes and watching an
//! autopiloted ball run them. The browser build goes through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};
    use glam::Vec2;

    use gravitrip::renderer::ascii;
    use gravitrip::sim::{ControlInput, Outcome};
    use gravitrip::{BestTimes, Difficulty, Session, Settings, cell_center};

    /// Autopilot cruising speed (units per tick)
    const AUTOPILOT_SPEED: f32 = 2.5;

    /// Tilt maze generator and simulator
    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    pub struct Args {
        /// Difficulty: easy, normal, hard or expert
        #[arg(long, default_value = "easy")]
        difficulty: String,

        /// Canvas width
        #[arg(long, default_value_t = 800.0)]
        width: f32,

        /// Canvas height
        #[arg(long, default_value_t = 600.0)]
        height: f32,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Print the generated maze
        Show {
            /// Mark the hole-free route from start to end
            #[arg(long)]
            route: bool,
        },
        /// Steer the ball along the solution and report the outcome
        Play {
            /// Give up after this many ticks
            #[arg(long, default_value_t = 20_000)]
            max_ticks: u64,

            /// Best times file (JSON); updated on a new best
            #[arg(long)]
            best_times: Option<PathBuf>,
        },
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let difficulty: Difficulty = args.difficulty.parse()?;
        let settings = match &args.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);

        let mut session = Session::start(difficulty, args.width, args.height, seed, &settings)?;
        let maze = &session.state().maze;
        println!(
            "{} maze, {}x{} cells, {} holes, seed {}",
            difficulty,
            maze.cols(),
            maze.rows(),
            maze.holes.len(),
            seed
        );

        match args.command {
            Command::Show { route } => {
                let path = if route { maze.solution_path() } else { None };
                if route && path.is_none() {
                    println!("No hole-free route to the end");
                }
                println!("{}", ascii::render(session.state(), path.as_deref()));
            }
            Command::Play {
                max_ticks,
                best_times,
            } => {
                let route = match maze.solution_path() {
                    Some(route) => route,
                    None => {
                        println!("No hole-free route; driving straight through");
                        maze.grid
                            .shortest_path(maze.start_cell, maze.end_cell, |_, _| false)
                            .unwrap_or_default()
                    }
                };
                let waypoints: Vec<Vec2> = route.iter().map(|&(c, r)| cell_center(c, r)).collect();

                let mut next = 0;
                let mut outcome = Outcome::Continue;
                while session.state().time_ticks < max_ticks && !outcome.is_terminal() {
                    let pos = session.state().ball.pos;
                    while next < waypoints.len() && pos.distance(waypoints[next]) < 0.5 {
                        next += 1;
                    }
                    let control = waypoints
                        .get(next)
                        .map(|&target| ControlInput::Velocity(steer(pos, target)))
                        .unwrap_or_default();
                    outcome = session.tick(control);
                }

                let report = session.stop(Outcome::Continue);
                println!("{}", ascii::render(session.state(), None));
                let verdict = match report.outcome {
                    Outcome::Win => "Reached the end",
                    Outcome::Loss => "Fell into a hole",
                    Outcome::Continue => "Gave up",
                };
                println!("{} after {:.2}s", verdict, report.elapsed_secs);

                if let Some(path) = best_times {
                    let mut times = BestTimes::load_from(&path)?;
                    if report.outcome == Outcome::Win && times.record_report(&report)? {
                        times.save_to(&path)?;
                        println!("New best on {}!", difficulty);
                    }
                    println!("Best ({}): {}", difficulty, times.display(difficulty));
                }
            }
        }

        Ok(())
    }

    /// Velocity that heads for `target` and lands on it after friction
    fn steer(pos: Vec2, target: Vec2) -> Vec2 {
        let to = target - pos;
        let dist = to.length();
        let speed = AUTOPILOT_SPEED.min(dist) / gravitrip::consts::FRICTION;
        to.normalize_or_zero() * speed
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Gravitrip (native) starting...");
    cli::run(cli::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
