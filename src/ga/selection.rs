//! Rank-block parent selection.
//!
//! Selection turns fitness records into a probability vector indexed by
//! population position, then draws parent pairs from it by cumulative scan.
//!
//! Weighting is by rank, not raw distance:
//!
//! | Rank (ascending distance) | Weight      |
//! |---------------------------|-------------|
//! | 0, 1                      | 6 / N       |
//! | 2 ..= N/2 - 1             | 3 / N       |
//! | N/2 ..                    | 1 / N       |
//!
//! followed by renormalization so the vector sums to 1.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::fitness::sort_by_fitness;
use super::types::{FitnessRecord, SelectionPair};
use crate::error::{GeoTspError, Result};
use rand::Rng;
use tracing::instrument;

/// Weight multiplier for the two best-ranked tours.
pub const ELITE_WEIGHT: f64 = 6.0;

/// Weight multiplier for ranks `2..=N/2 - 1`.
pub const UPPER_HALF_WEIGHT: f64 = 3.0;

/// Builds the normalized selection probability vector.
///
/// `probs[i]` is the probability of picking the tour at population index `i`.
/// Requires at least two records.
///
/// # Examples
///
/// ```
/// use u_geotsp::ga::{probabilities, FitnessRecord};
///
/// let records = vec![
///     FitnessRecord { index: 0, distance: 9.0 },
///     FitnessRecord { index: 1, distance: 1.0 },
///     FitnessRecord { index: 2, distance: 4.0 },
///     FitnessRecord { index: 3, distance: 7.0 },
/// ];
/// let probs = probabilities(&records).unwrap();
/// assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!(probs[1] > probs[3]);
/// ```
pub fn probabilities(records: &[FitnessRecord]) -> Result<Vec<f64>> {
    let n = records.len();
    if n < 2 {
        return Err(GeoTspError::InvalidPopulationSize { size: n, minimum: 2 });
    }

    let mut ranked = records.to_vec();
    sort_by_fitness(&mut ranked);

    let mut probs = vec![1.0 / n as f64; n];
    let mut seen = vec![false; n];
    for (rank, record) in ranked.iter().enumerate() {
        let weight = probs.get_mut(record.index).ok_or(GeoTspError::IndexOutOfRange {
            context: "fitness record index",
            index: record.index,
            bound: n,
        })?;
        if std::mem::replace(&mut seen[record.index], true) {
            return Err(GeoTspError::DuplicateFitnessIndex {
                index: record.index,
            });
        }
        if rank < 2 {
            *weight *= ELITE_WEIGHT;
        } else if rank < n / 2 {
            *weight *= UPPER_HALF_WEIGHT;
        }
    }

    let sum: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= sum;
    }
    Ok(probs)
}

/// Draws one parent pair from a probability vector.
///
/// The first parent is the first index whose cumulative probability is
/// strictly greater than its draw; the second is the first whose cumulative
/// probability reaches its draw. When rounding leaves the tail short of a
/// draw, the last index is used.
///
/// An empty probability vector has no index to pick and is an error; nothing
/// is drawn from `rng` in that case.
pub fn choose_parents<R: Rng>(probs: &[f64], rng: &mut R) -> Result<SelectionPair> {
    if probs.is_empty() {
        return Err(GeoTspError::InvalidPopulationSize { size: 0, minimum: 1 });
    }
    let p1: f64 = rng.random();
    let first = scan(probs, |cumulative| cumulative > p1);
    let p2: f64 = rng.random();
    let second = scan(probs, |cumulative| cumulative >= p2);
    Ok(SelectionPair { first, second })
}

fn scan(probs: &[f64], hit: impl Fn(f64) -> bool) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        if hit(cumulative) {
            return i;
        }
    }
    probs.len().saturating_sub(1)
}

/// Draws one parent pair per population slot.
///
/// Returns exactly `records.len()` pairs.
#[instrument(level = "debug", skip_all, fields(population = records.len()))]
pub fn select<R: Rng>(records: &[FitnessRecord], rng: &mut R) -> Result<Vec<SelectionPair>> {
    let probs = probabilities(records)?;
    (0..records.len())
        .map(|_| choose_parents(&probs, rng))
        .collect()
}
