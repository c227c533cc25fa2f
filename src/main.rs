// Monty Hall
//
// Play the game by hand, or let the computer play it a few hundred thousand
// times and see for yourself that switching really does win more often.

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use montyhall::prelude::*;
use montyhall::game::MIN_DOORS;
use montyhall::interactive::{self, Prompter};
use montyhall::metrics::logger::TableLogger;
use montyhall::metrics::report::render_table;

use clap::{Parser, Subcommand};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::time::Instant;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,

    /// Seed for the random source, random when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game by hand
    Play {
        #[arg(short, long)]
        doors: Option<usize>,
    },

    /// Play many games automatically with one strategy
    Auto {
        #[arg(short, long, default_value_t = 10_000)]
        games: u64,
        #[arg(short, long, default_value_t = 3)]
        doors: usize,
        #[arg(short, long, default_value = "switch")]
        strategy: String,
        /// Always pick this door first (1-based)
        #[arg(short, long)]
        pick: Option<usize>,
        #[arg(long)]
        show_progress: bool,
        #[arg(long)]
        parallel: bool,
    },

    /// Win frequency of switching vs staying over a range of door counts
    Table {
        #[arg(short, long, default_value_t = 10_000)]
        games: u64,
        #[arg(long, default_value_t = 3)]
        low: usize,
        #[arg(long, default_value_t = 10)]
        high: usize,
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        no_progress: bool,
        /// Export rows to a .csv or .json file
        #[arg(short, long)]
        output: Option<String>,
    },

    List,
}

fn main() -> Result<()> {
    let program_start = Instant::now();

    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Play { doors } => {
            play(doors, cli.seed)?;
        }

        Commands::Auto {
            games,
            doors,
            strategy,
            pick,
            show_progress,
            parallel,
        } => {
            automatic_game(games, doors, strategy, pick, show_progress, parallel, cli.seed)?;
        }

        Commands::Table {
            games,
            low,
            high,
            parallel,
            no_progress,
            output,
        } => {
            dependency_table(games, low, high, parallel, !no_progress, output, cli.seed)?;
        }

        Commands::List => {
            println!("\nAvailable Strategies");

            for strategy in StrategyRegistry::global().list() {
                println!("  - {}", strategy);
            }

            println!("\nUsage: cargo run -- auto --strategy <name>");
            println!("Example: cargo run -- auto --strategy stay --doors 5\n");
        }
    }

    let total_time = program_start.elapsed();
    info!("Total runtime: {:.2}s", total_time.as_secs_f64());

    Ok(())
}

fn play(doors: Option<usize>, seed: Option<u64>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    prompter.say("Welcome to the Monty Hall paradox game!")?;
    let doors = match doors {
        Some(d) if d >= MIN_DOORS => d,
        Some(d) => anyhow::bail!("A game needs at least {} doors, got {}", MIN_DOORS, d),
        None => prompter.ask_int("Enter the number of doors (at least 3): ", MIN_DOORS as u64, None)? as usize,
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    interactive::play_game(&mut prompter, doors, &mut rng)?;
    Ok(())
}

fn automatic_game(
    games: u64,
    doors: usize,
    strategy: String,
    pick: Option<usize>,
    show_progress: bool,
    parallel: bool,
    seed: Option<u64>,
) -> Result<()> {
    let initial_pick = match pick {
        Some(0) => anyhow::bail!("Doors are numbered from 1"),
        Some(p) => Some(p - 1),
        None => None,
    };

    let mut config = ExperimentConfig::default()
        .with_name(format!("{}_{}doors", strategy, doors))
        .with_strategy(strategy)
        .with_games(games)
        .with_doors(doors)
        .with_parallel(parallel)
        .with_show_progress(show_progress);
    if let Some(pick) = initial_pick {
        config = config.with_initial_pick(pick);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    info!("Monty Hall: Automatic Game");

    let report = Experiment::new(config).run()?;
    println!("The relative frequency of wins: {}", report.frequency);
    info!("Finished in {:.2}s", report.elapsed.as_secs_f64());

    Ok(())
}

fn dependency_table(
    games: u64,
    low: usize,
    high: usize,
    parallel: bool,
    progress: bool,
    output: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let config = TableConfig {
        num_games: games,
        min_doors: low,
        max_doors: high,
        seed,
        parallel,
        progress,
    };

    info!("Monty Hall: Dependency Table");

    let rows = Reporter::new(config).table()?;
    println!("\n{}", render_table(&rows, games));

    if let Some(output) = output {
        export_rows(&rows, &output)?;
    }

    Ok(())
}

fn export_rows(rows: &[TableRow], output: &str) -> Result<()> {
    let path = if Path::new(output).extension().is_some() {
        output.to_string()
    } else {
        std::fs::create_dir_all("results")?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("results/{}_{}.csv", output, timestamp)
    };

    match Path::new(&path).extension().and_then(|s| s.to_str()) {
        Some("csv") => {
            let mut logger = TableLogger::new(&path)?;
            logger.log_batch(rows)?;
        }
        _ => {
            std::fs::write(&path, serde_json::to_string_pretty(rows)?)?;
        }
    }
    info!("Table saved to: {}", path);

    Ok(())
}
