use std::io::{self, BufRead, Write};

use battleship_solver::ui::{coord_to_string, parse_coord, BeliefGrid, BoardGrid};
use battleship_solver::{
    init_logging, run_bench, BeliefEngine, BenchConfig, BoardSpace, CachePolicy, GuessResult,
    SpaceConfig, Strategy, DEFAULT_HEIGHT, DEFAULT_SHIPS, DEFAULT_WIDTH,
};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug records (overrides BSHIP_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct SpaceArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Ship lengths in placement order (e.g., --ships 2,3,4)
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SHIPS)]
    ships: Vec<usize>,
    #[arg(long, value_enum, default_value_t = CachePolicy::MissSet)]
    cache: CachePolicy,
    /// Give up if the candidate space grows past this many boards.
    #[arg(long)]
    board_limit: Option<usize>,
}

impl SpaceArgs {
    fn build(&self) -> anyhow::Result<BoardSpace> {
        let mut config =
            SpaceConfig::new(self.width, self.height, self.ships.clone()).with_cache(self.cache);
        if let Some(limit) = self.board_limit {
            config = config.with_board_limit(limit);
        }
        Ok(BoardSpace::new(config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Guess against a random hidden board, with heatmap hints.
    Play {
        #[command(flatten)]
        space: SpaceArgs,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Strategy used for the suggested cell in the heatmap.
        #[arg(long, value_enum, default_value_t = Strategy::Median)]
        strategy: Strategy,
    },
    /// Autoplay a strategy across the candidate space and report guess counts.
    Bench {
        #[command(flatten)]
        space: SpaceArgs,
        #[arg(long, value_enum, default_value_t = Strategy::Median)]
        strategy: Strategy,
        /// Percentage of boards to test.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
        coverage: u8,
        /// Draw hidden boards at random instead of walking the space.
        #[arg(long)]
        random: bool,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Play games one at a time on the current thread.
        #[arg(long)]
        serial: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the number of candidate boards and the opening heatmap.
    Count {
        #[command(flatten)]
        space: SpaceArgs,
    },
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.then_some(LevelFilter::Debug));

    match cli.command {
        Commands::Play {
            space,
            seed,
            strategy,
        } => {
            let space = space.build()?;
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = seeded_rng(seed);
            play(&space, strategy, &mut rng)?;
        }
        Commands::Bench {
            space,
            strategy,
            coverage,
            random,
            seed,
            serial,
            json,
        } => {
            let space = space.build()?;
            let config = BenchConfig {
                strategy,
                coverage,
                randomise: random,
                seed,
                parallel: !serial,
                verbose: cli.verbose,
            };
            let report = run_bench(&space, &config)?;
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("Number of tests = {}", report.boards_tested);
                println!("Average score   = {:.2}", report.mean_guesses);
                println!("Maximum score   = {}", report.max_guesses);
                println!("Minimum score   = {}", report.min_guesses);
                println!("Total time      = {} ms", report.elapsed_ms);
                println!(
                    "Cache           = {} entries, {} hits, {} misses",
                    report.cache.entries, report.cache.hits, report.cache.misses
                );
            }
        }
        Commands::Count { space } => {
            let space = space.build()?;
            println!("{} boards", space.len());
            let engine = BeliefEngine::for_board(&space, 0, Strategy::Median)?;
            print!("{}", engine.probability_map());
        }
    }
    Ok(())
}

fn play(space: &BoardSpace, strategy: Strategy, rng: &mut SmallRng) -> anyhow::Result<()> {
    let truth = space.random_board(rng).clone();
    let par = BeliefEngine::new(space, truth.clone(), Strategy::Median)?.autoplay(rng)?;
    let mut engine = BeliefEngine::new(space, truth, strategy)?;
    let (width, height) = (space.width(), space.height());

    println!("{} candidate boards. Par = {}", space.len(), par);
    println!("Enter a cell as B3 or row,col (e.g., 3,2), 'heat' for hints, or 'quit'.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "q" => {
                println!("Board was:");
                print!("{}", BoardGrid { board: engine.truth(), width });
                return Ok(());
            }
            "heat" | "h" => {
                let suggestion = engine.select_guess(rng);
                print!("{}", BeliefGrid { engine: &engine, suggestion });
                if let Some(cell) = suggestion {
                    println!("Best guess: {}", coord_to_string(cell, width));
                }
                continue;
            }
            input => {
                let Some(cell) = parse_coord(input, width, height) else {
                    println!("Invalid coordinate. Use a letter and number like B3, or row,col like 3,2.");
                    continue;
                };
                match engine.guess(cell) {
                    Ok(GuessResult::Hit) => println!("{}: hit", coord_to_string(cell, width)),
                    Ok(GuessResult::Miss) => println!("{}: miss", coord_to_string(cell, width)),
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                }
            }
        }
        println!("Score = {}", engine.guess_count());
        if engine.is_won() {
            println!(
                "All positions deducible. Score = {}, par = {}",
                engine.guess_count(),
                par
            );
            print!("{}", BoardGrid { board: engine.truth(), width });
            return Ok(());
        }
    }
}
