//! Fitness evaluation: total closed-loop great-circle distance per tour.

use super::types::{FitnessRecord, Population};
use crate::error::{GeoTspError, Result};
use crate::geo::Location;
use tracing::instrument;

/// Scores every tour in `population` by its round-trip distance in miles.
///
/// Records are returned in population order, so `records[i].index == i`.
/// A single-location tour has distance 0; an empty tour is an error.
///
/// # Examples
///
/// ```
/// use u_geotsp::ga::{evaluate, Population};
/// use u_geotsp::geo::Location;
///
/// let locations = vec![
///     Location::from_degrees("A", 0.0, 0.0),
///     Location::from_degrees("B", 0.0, 90.0),
///     Location::from_degrees("C", 90.0, 0.0),
/// ];
/// let population = Population::new(vec![vec![0, 1, 2]]);
/// let records = evaluate(&population, &locations).unwrap();
/// assert!((records[0].distance - 18665.77).abs() < 0.01);
/// ```
#[instrument(level = "debug", skip_all, fields(population = population.len(), locations = locations.len()))]
pub fn evaluate(population: &Population, locations: &[Location]) -> Result<Vec<FitnessRecord>> {
    population
        .iter()
        .enumerate()
        .map(|(index, tour)| {
            tour_distance(tour, locations, index).map(|distance| FitnessRecord { index, distance })
        })
        .collect()
}

/// Closed-loop distance of a single tour.
///
/// `tour_index` is used only to label errors.
pub fn tour_distance(tour: &[usize], locations: &[Location], tour_index: usize) -> Result<f64> {
    let (&first, &last) = match (tour.first(), tour.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(GeoTspError::InvalidTourLength {
                tour: tour_index,
                length: 0,
                minimum: 1,
            })
        }
    };

    let lookup = |i: usize| {
        let location = locations.get(i).ok_or(GeoTspError::IndexOutOfRange {
            context: "tour location index",
            index: i,
            bound: locations.len(),
        })?;
        check_finite(location.latitude(), "location latitude")?;
        check_finite(location.longitude(), "location longitude")?;
        Ok::<_, GeoTspError>(location)
    };

    let mut total = 0.0;
    for edge in tour.windows(2) {
        total += lookup(edge[0])?.distance_to(lookup(edge[1])?);
    }
    // closing edge back to the start
    total += lookup(last)?.distance_to(lookup(first)?);
    check_finite(total, "tour distance")
}

fn check_finite(value: f64, context: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeoTspError::NumericDomain { context, value })
    }
}

/// Stable ascending sort by distance; equal distances keep their order.
pub fn sort_by_fitness(records: &mut [FitnessRecord]) {
    records.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// The fittest record: first after a stable ascending sort.
pub fn best(records: &[FitnessRecord]) -> Option<FitnessRecord> {
    // min_by keeps the first of equal minima
    records
        .iter()
        .copied()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
