use std::io::BufRead;
use std::io::Write;
use std::process::ExitCode;

use anstream::eprintln;
use anstream::print;
use anstream::println;
use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;
use thousands::Separable;

use maze_search::algorithms::Algorithm;
use maze_search::config::DEFAULT_HEIGHT;
use maze_search::config::DEFAULT_WALL_PROBABILITY;
use maze_search::config::DEFAULT_WIDTH;
use maze_search::config::GridConfig;
use maze_search::config::GridError;
use maze_search::grid::Cell;
use maze_search::grid::Grid;
use maze_search::logging;
use maze_search::maze_gen::generate;
use maze_search::render::GridView;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about = "Random grid mazes solved by classic search", long_about = None)]
pub struct Args {
    #[arg(short = 'W', long, env = "MAZE_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
    #[arg(short = 'H', long, env = "MAZE_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,
    #[arg(
        short = 'p',
        long,
        env = "MAZE_WALL_PROBABILITY",
        default_value_t = DEFAULT_WALL_PROBABILITY
    )]
    pub wall_probability: f64,

    /// Start cell as `row,col`, top-left corner by default.
    #[arg(long)]
    pub start: Option<Cell>,
    /// Goal cell as `row,col`, bottom-right corner by default.
    #[arg(long)]
    pub goal: Option<Cell>,

    /// Seed for the maze, a random one is drawn when absent.
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Skips the menu: bfs, dfs, astar, greedy or their menu number.
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,
    /// Runs every algorithm on the same maze.
    #[arg(long, conflicts_with = "algorithm")]
    pub all: bool,
    #[arg(long)]
    pub stats: bool,

    #[arg(long, env = "MAZE_SEARCH_LOG", default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Args {
    fn config(&self) -> GridConfig {
        let mut config = GridConfig::new(self.width, self.height)
            .with_wall_probability(self.wall_probability);
        if let Some(start) = self.start {
            config = config.with_start(start);
        }
        if let Some(goal) = self.goal {
            config = config.with_goal(goal);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, CliError> {
    logging::init(args.log_level)?;

    let config = args.config();
    config.validate()?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Generating {}x{} maze with seed {seed}", config.width, config.height);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid = generate(&config, &mut rng)?;

    println!("Maze:");
    print!("{}", GridView::new(&grid).colored(true));

    if args.all {
        compare_all(&grid, args.stats)?;
        return Ok(ExitCode::SUCCESS);
    }

    let algorithm = match args.algorithm {
        Some(a) => a,
        None => match prompt_algorithm()? {
            Some(a) => a,
            None => {
                println!("Invalid choice.");
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    let (path, stats) = algorithm.search_with_stats(&grid, grid.start(), grid.goal());
    match &path {
        Some(path) => {
            println!("\nPath to the treasure:");
            print!("{}", GridView::new(&grid).with_path(path).colored(true));
            log::info!("{algorithm}: {path}");
        }
        None => println!("\nNo path found to the treasure."),
    }

    if args.stats {
        println!();
        stats.write_stats(std::io::stdout().lock())?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Shows the menu and reads one line. `None` for anything that isn't a choice.
fn prompt_algorithm() -> std::io::Result<Option<Algorithm>> {
    println!("\nSelect a search method:");
    for a in Algorithm::ALL {
        println!("{}. {}", a.menu_number(), a.label());
    }
    print!("Enter the number of your choice: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    // Only menu numbers are valid here, names are for --algorithm.
    Ok(Algorithm::ALL
        .into_iter()
        .find(|a| a.menu_number().to_string() == line.trim()))
}

fn compare_all(grid: &Grid, stats: bool) -> Result<(), CliError> {
    println!("\nComparison:");
    let mut shortest = None;
    for a in Algorithm::ALL {
        let (path, s) = a.search_with_stats(grid, grid.start(), grid.goal());
        let steps = match &path {
            Some(p) => p.steps().separate_with_commas(),
            None => "-".to_string(),
        };
        println!(
            "  {:<28} steps: {:>6}  expanded: {:>8}",
            a.label(),
            steps,
            s.expanded.separate_with_commas()
        );
        if stats {
            s.write_stats(std::io::stdout().lock())?;
        }
        if a == Algorithm::Bfs {
            shortest = path;
        }
    }

    match shortest {
        Some(path) => {
            println!("\nPath to the treasure:");
            print!("{}", GridView::new(grid).with_path(&path).colored(true));
        }
        None => println!("\nNo path found to the treasure."),
    }
    Ok(())
}
