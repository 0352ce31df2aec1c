use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use u_geotsp::ga::{GaConfig, GaRunner};
use u_geotsp::geo::read_locations;
use u_geotsp::report::RunLog;

/// Evolve a short round trip through the locations in a CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Location file with one `name,latitude,longitude` record (degrees) per line
    input: PathBuf,

    /// Number of tours per generation
    population: usize,

    /// Number of generations to run
    generations: usize,

    /// Chance of mutating each child, in percent (0-100)
    mutation: f64,

    /// Seed for the random generator
    seed: u64,

    /// Where to write the run log
    #[arg(long, default_value = "log.txt")]
    log: PathBuf,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    enable_tracing();
    let args = Args::parse();

    let locations = read_locations(&args.input)
        .with_context(|| format!("reading locations from {}", args.input.display()))?;

    let config = GaConfig::default()
        .with_population_size(args.population)
        .with_generations(args.generations)
        .with_mutation_percent(args.mutation)
        .with_seed(args.seed);

    let mut log = RunLog::create(&args.log)
        .with_context(|| format!("creating log file {}", args.log.display()))?;
    let result = GaRunner::run_with_observer(&locations, &config, &mut log)?;
    log.into_inner()?;

    println!("{:.2} miles", result.best_distance);
    Ok(())
}
