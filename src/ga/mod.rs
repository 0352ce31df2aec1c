//! Genetic algorithm for closed tours over geographic locations.
//!
//! Each generation is one atomic step:
//!
//! 1. [`evaluate`]: score every tour by round-trip great-circle distance
//! 2. [`select`]: rank-weight the tours and draw one parent pair per slot
//! 3. [`recombine`]: breed one child per pair by greedy-fill crossover,
//!    then maybe apply an anchored swap mutation
//!
//! [`GaRunner`] wires the steps into a full run and reports progress to a
//! [`GenerationObserver`].
//!
//! # Key Types
//!
//! - [`Tour`], [`Population`]: permutation-encoded candidate routes
//! - [`FitnessRecord`], [`SelectionPair`]: per-generation bookkeeping
//! - [`GaConfig`]: run parameters
//! - [`GaResult`]: winning tour and run history
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod fitness;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use fitness::{best, evaluate, sort_by_fitness, tour_distance};
pub use operators::recombine;
pub use runner::{GaResult, GaRunner, GenerationObserver, GenerationStats, NoObserver};
pub use selection::{choose_parents, probabilities, select};
pub use types::{is_permutation, FitnessRecord, Population, SelectionPair, Tour};
