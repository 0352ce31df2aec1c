//! Genetic-algorithm heuristic for the geographic Traveling Salesman Problem.
//!
//! Given named locations with latitude/longitude, the solver evolves a
//! population of closed tours to minimize total round-trip great-circle
//! distance.
//!
//! - [`geo`]: locations, haversine distance, location file parsing
//! - [`ga`]: fitness evaluation, rank-block selection, greedy-fill
//!   crossover with anchored swap mutation, and the [`ga::GaRunner`] loop
//! - [`report`]: human-readable run log
//! - [`random`]: the single seeded generator a run draws from
//!
//! # Example
//!
//! ```
//! use u_geotsp::ga::{GaConfig, GaRunner};
//! use u_geotsp::geo::parse_locations;
//!
//! let input = "\
//! Seattle,47.6062,-122.3321
//! Denver,39.7392,-104.9903
//! Chicago,41.8781,-87.6298
//! Atlanta,33.7490,-84.3880
//! Dallas,32.7767,-96.7970
//! ";
//! let locations = parse_locations(input.as_bytes()).unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_generations(30)
//!     .with_mutation_percent(10.0)
//!     .with_seed(42);
//! let result = GaRunner::run(&locations, &config).unwrap();
//! assert_eq!(result.best.len(), 5);
//! assert!(result.best_distance > 0.0);
//! ```

pub mod error;
pub mod ga;
pub mod geo;
pub mod random;
pub mod report;

pub use error::{GeoTspError, Result};
