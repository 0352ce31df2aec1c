//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the complete process:
//! initialization → (evaluate → select → recombine) × generations → final
//! evaluation. All randomness comes from one generator seeded once per run.

use super::config::GaConfig;
use super::fitness::{best, evaluate};
use super::operators::{recombine, MIN_TOUR_LENGTH};
use super::selection::select;
use super::types::{FitnessRecord, Population, SelectionPair, Tour};
use crate::error::{GeoTspError, Result};
use crate::geo::Location;
use crate::random::create_rng;
use tracing::{debug, info, instrument};

/// Summary of one evaluated population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial population, `g` for the population bred in generation `g`.
    pub generation: usize,
    pub best_distance: f64,
    pub mean_distance: f64,
    pub worst_distance: f64,
}

impl GenerationStats {
    fn from_records(generation: usize, records: &[FitnessRecord]) -> Self {
        let (best, worst, sum) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), r| (lo.min(r.distance), hi.max(r.distance), sum + r.distance),
        );
        Self {
            generation,
            best_distance: best,
            mean_distance: sum / records.len().max(1) as f64,
            worst_distance: worst,
        }
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Fittest tour of the final population (first among equal distances).
    pub best: Tour,

    /// Round-trip distance of `best`, in miles.
    pub best_distance: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run's generator was created from.
    pub seed: u64,

    /// Best distance of every evaluated population, initial one first.
    pub fitness_history: Vec<f64>,

    /// Fitness records of the final population, in population order.
    pub final_fitness: Vec<FitnessRecord>,
}

/// Hooks invoked as a run progresses.
///
/// Every hook defaults to a no-op. Hooks return [`Result`] so an observer
/// backed by I/O can abort the run.
pub trait GenerationObserver {
    /// Called once with the randomly generated starting population.
    fn on_initial_population(&mut self, _population: &Population) -> Result<()> {
        Ok(())
    }

    /// Called after each evaluation, including the final one.
    fn on_fitness(&mut self, _stats: &GenerationStats, _records: &[FitnessRecord]) -> Result<()> {
        Ok(())
    }

    /// Called with the parent pairs drawn for the next generation.
    fn on_selection(&mut self, _generation: usize, _pairs: &[SelectionPair]) -> Result<()> {
        Ok(())
    }

    /// Called with each newly bred population.
    fn on_generation(&mut self, _generation: usize, _population: &Population) -> Result<()> {
        Ok(())
    }

    /// Called once with the winning tour.
    fn on_solution(&mut self, _result: &GaResult, _locations: &[Location]) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl GenerationObserver for NoObserver {}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_geotsp::ga::{GaConfig, GaRunner};
/// use u_geotsp::geo::Location;
///
/// let locations = vec![
///     Location::from_degrees("A", 0.0, 0.0),
///     Location::from_degrees("B", 0.0, 10.0),
///     Location::from_degrees("C", 10.0, 10.0),
///     Location::from_degrees("D", 10.0, 0.0),
/// ];
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
/// let result = GaRunner::run(&locations, &config).unwrap();
/// assert_eq!(result.best.len(), 4);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA without observing intermediate steps.
    pub fn run(locations: &[Location], config: &GaConfig) -> Result<GaResult> {
        Self::run_with_observer(locations, config, &mut NoObserver)
    }

    /// Runs the GA, reporting each step to `observer`.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            locations = locations.len(),
            population = config.population_size,
            generations = config.generations
        )
    )]
    pub fn run_with_observer<O: GenerationObserver + ?Sized>(
        locations: &[Location],
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult> {
        config.validate()?;
        if locations.len() < MIN_TOUR_LENGTH {
            return Err(GeoTspError::InvalidTourLength {
                tour: 0,
                length: locations.len(),
                minimum: MIN_TOUR_LENGTH,
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        info!(
            seed,
            locations = locations.len(),
            population = config.population_size,
            generations = config.generations,
            mutation_chance = config.mutation_chance,
            "starting GA run"
        );

        let mut population = Population::random(locations.len(), config.population_size, &mut rng);
        observer.on_initial_population(&population)?;

        let mut fitness_history = Vec::with_capacity(config.generations + 1);

        for generation in 1..=config.generations {
            let records = evaluate(&population, locations)?;
            let stats = GenerationStats::from_records(generation - 1, &records);
            fitness_history.push(stats.best_distance);
            observer.on_fitness(&stats, &records)?;
            debug!(
                generation = stats.generation,
                best = stats.best_distance,
                mean = stats.mean_distance,
                "evaluated population"
            );

            let pairs = select(&records, &mut rng)?;
            observer.on_selection(generation, &pairs)?;

            population = recombine(&pairs, &population, config.mutation_chance, &mut rng)?;
            observer.on_generation(generation, &population)?;
        }

        let final_fitness = evaluate(&population, locations)?;
        let stats = GenerationStats::from_records(config.generations, &final_fitness);
        fitness_history.push(stats.best_distance);
        observer.on_fitness(&stats, &final_fitness)?;

        let winner = best(&final_fitness).ok_or(GeoTspError::InvalidPopulationSize {
            size: 0,
            minimum: 2,
        })?;
        let tour = population
            .get(winner.index)
            .cloned()
            .ok_or(GeoTspError::IndexOutOfRange {
                context: "winning tour",
                index: winner.index,
                bound: population.len(),
            })?;

        let result = GaResult {
            best: tour,
            best_distance: winner.distance,
            generations: config.generations,
            seed,
            fitness_history,
            final_fitness,
        };
        info!(
            best_distance = result.best_distance,
            generations = result.generations,
            "GA run finished"
        );
        observer.on_solution(&result, locations)?;
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
