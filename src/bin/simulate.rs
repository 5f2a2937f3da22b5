//! Balance simulator CLI.
//!
//! Plays whole games headlessly through the combat core and prints
//! completion/win-rate statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                   # Default: 200 games
//!   cargo run --bin simulate -- -n 50 -s 42    # 50 games, fixed seed
//!   cargo run --bin simulate -- --quick        # Fast sanity pass

use minisaga::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("MINISAGA BALANCE SIMULATOR");
    println!();
    println!("Configuration:");
    println!("  Games:         {}", config.num_games);
    println!("  Max runs/game: {}", config.max_runs_per_game);
    if let Some(seed) = config.seed {
        println!("  Seed:          {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--games" => {
                if i + 1 < args.len() {
                    config.num_games = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-r" | "--max-runs" => {
                if i + 1 < args.len() {
                    config.max_runs_per_game = args[i + 1].parse().unwrap_or(400);
                    i += 1;
                }
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Minisaga Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --games <N>      Number of games to simulate (default: 200)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -r, --max-runs <R>   Max region runs per game (default: 400)");
    println!("    --quick              Fast sanity pass (20 games)");
    println!("    -v, --verbose        Per-game output");
    println!("    -h, --help           Show this help");
}
