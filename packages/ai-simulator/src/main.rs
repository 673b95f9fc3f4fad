//! AI Simulator CLI - headless Mus games between AI seats.
//!
//! Writes one JSONL line per game (optionally gzipped) and a CSV summary.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use metrics::build_game_metrics;
use mus_engine::ai::registry;
use mus_engine::ai::{create_ai, AiPlayer, HeuristicEngine, RandomPlayer};
use mus_engine::domain::state::Team;
use output::OutputWriter;
use rand::Rng;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Headless Mus simulator for comparing AI players")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// AI type for all seats (shortcut to set all 4 seats to the same AI)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3"])]
    seats: Option<AiType>,

    /// AI type for seat 0
    #[arg(long, default_value = "heuristic")]
    seat0: AiType,

    /// AI type for seat 1
    #[arg(long, default_value = "heuristic")]
    seat1: AiType,

    /// AI type for seat 2
    #[arg(long, default_value = "heuristic")]
    seat2: AiType,

    /// AI type for seat 3
    #[arg(long, default_value = "heuristic")]
    seat3: AiType,

    /// Base seed; game N uses seed + N - 1 and AI seeds derive from it
    #[arg(long)]
    seed: Option<u64>,

    /// Chance of calling a bet with a middling hand (heuristic only)
    #[arg(long)]
    bluff_rate: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,

    /// List registered AIs and exit
    #[arg(long)]
    list_ais: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum AiType {
    Heuristic,
    Random,
}

impl AiType {
    fn name(&self) -> &'static str {
        match self {
            AiType::Heuristic => HeuristicEngine::NAME,
            AiType::Random => RandomPlayer::NAME,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings/errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list_ais {
        for factory in registry::registered_ais() {
            println!("{} {}", factory.name, factory.version);
        }
        return Ok(());
    }

    let seat_types = match args.seats {
        Some(ai) => [ai.clone(), ai.clone(), ai.clone(), ai],
        None => [args.seat0, args.seat1, args.seat2, args.seat3],
    };
    let ai_types: [String; 4] = std::array::from_fn(|i| seat_types[i].name().to_string());

    if args.show_output {
        info!(games = args.games, ai_types = ?ai_types, "Starting AI simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_seed = base_seed.wrapping_add(u64::from(game_num) - 1);
        let ais = build_ais(&seat_types, game_seed, args.bluff_rate)?;
        let game_start = Instant::now();

        match Simulator::new(game_seed, (game_num % 4) as u8).simulate_game(&ais) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    ai_types.clone(),
                    args.games,
                    &args.metrics_level,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!(game_num, error = %e, "Failed to write metrics");
                }
                if args.verbose {
                    info!(
                        game_num,
                        team_a = result.final_scores.a,
                        team_b = result.final_scores.b,
                        "Game completed"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game_num, error = %e, "Game failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

fn build_ais(
    seat_types: &[AiType; 4],
    game_seed: u64,
    bluff_rate: Option<f64>,
) -> Result<[Box<dyn AiPlayer>; 4], Box<dyn std::error::Error>> {
    let mut ais = Vec::with_capacity(4);
    for (seat, ai_type) in seat_types.iter().enumerate() {
        let ai_seed = game_seed.wrapping_mul(31).wrapping_add(seat as u64);
        let mut config = serde_json::json!({ "seed": ai_seed });
        if let Some(rate) = bluff_rate {
            config["bluff_rate"] = serde_json::json!(rate);
        }
        let ai = create_ai(ai_type.name(), Some(&config))
            .ok_or_else(|| format!("Unknown AI type: {}", ai_type.name()))?;
        ais.push(ai);
    }
    ais.try_into()
        .map_err(|_| "expected exactly four AI seats".into())
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let n = results.len() as f64;
    for team in [Team::A, Team::B] {
        let wins = results.iter().filter(|r| r.winner == team).count();
        let points: u64 = results
            .iter()
            .map(|r| u64::from(r.final_scores.get(team)))
            .sum();
        println!(
            "Team {team:?}: wins={wins} ({:.1}%), avg final score={:.1}",
            wins as f64 / n * 100.0,
            points as f64 / n
        );
    }
    let rounds: u64 = results.iter().map(|r| u64::from(r.rounds_played())).sum();
    println!("Average rounds per game: {:.1}", rounds as f64 / n);
}
