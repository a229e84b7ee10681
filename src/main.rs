use clap::{Parser, ValueEnum};
use grid_astar::grid_io::{read_grid, write_grid};
use grid_astar::render::{render_grid, render_search};
use grid_astar::{Path, PathError, PathFinder, Position, SearchStep};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    Silent,
    Normal,
    Verbose,
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Finds a shortest path through a grid file using A*")]
struct Cli {
    #[arg(help = "The grid to search", default_value = "grid.txt")]
    input: PathBuf,
    #[arg(
        help = "Where to write the grid with the path marked",
        short,
        long,
        default_value = "result.txt"
    )]
    output: PathBuf,
    #[arg(help = "Start cell as ROW,COL [default: top-left]", short, long)]
    start: Option<Position>,
    #[arg(help = "Goal cell as ROW,COL [default: bottom-right]", short, long)]
    goal: Option<Position>,
    #[arg(help = "Print a frame after every expansion", short, long)]
    animate: bool,
    #[arg(
        help = "Pause between animation frames in milliseconds",
        long,
        default_value_t = 50
    )]
    delay_ms: u64,
    #[arg(help = "Do not print the final grid", long)]
    no_render: bool,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ PathError::NoPathExists { .. }) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> grid_astar::Result<()> {
    let finder = PathFinder::new(read_grid(&cli.input)?);
    let start = cli.start.unwrap_or_else(|| finder.default_start());
    let goal = cli.goal.unwrap_or_else(|| finder.default_goal());

    let result = if cli.animate {
        animate(&finder, start, goal, Duration::from_millis(cli.delay_ms))
    } else {
        finder.find_path(start, goal)
    };

    let mut grid = finder.into_grid();
    // The grid is saved even without a path so the output always reflects the last run.
    let outcome = match result {
        Ok(path) => {
            grid.mark_path(&path)?;
            println!("Path of {} steps from {} to {}", path.steps(), start, goal);
            Ok(())
        }
        Err(err) => Err(err),
    };
    write_grid(&grid, &cli.output)?;
    if !cli.no_render {
        print!("{}", render_grid(&grid));
    }
    outcome
}

fn animate(
    finder: &PathFinder,
    start: Position,
    goal: Position,
    delay: Duration,
) -> grid_astar::Result<Path> {
    let mut search = finder.search(start, goal)?;
    loop {
        let step = search.step();
        println!("{}", render_search(finder.grid(), &search.view()));
        match step {
            SearchStep::Expanded(_) => thread::sleep(delay),
            SearchStep::Found(path) => return Ok(path),
            SearchStep::Exhausted => return Err(PathError::NoPathExists { start, goal }),
        }
    }
}
