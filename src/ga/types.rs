//! Core data model for the tour GA.
//!
//! A [`Tour`] is a permutation of location indices, a [`Population`] is an
//! ordered collection of tours, and [`FitnessRecord`] / [`SelectionPair`]
//! carry per-generation bookkeeping that always refers back to positions in
//! the population it was derived from.

use crate::error::{GeoTspError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// An ordered visiting sequence of location indices.
///
/// A valid tour of length `L` is a permutation of `0..L`. The route is
/// closed: the last location connects back to the first.
pub type Tour = Vec<usize>;

/// Returns `true` if `tour` contains every index in `0..tour.len()` exactly once.
pub fn is_permutation(tour: &[usize]) -> bool {
    let n = tour.len();
    let mut seen = vec![false; n];
    for &v in tour {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Ordered collection of tours.
///
/// Position is identity: fitness records and selection pairs refer to tours
/// by their index here, so order is preserved until the population is
/// replaced wholesale by the next generation.
///
/// # Examples
///
/// ```
/// use u_geotsp::ga::Population;
/// use u_geotsp::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let population = Population::random(6, 4, &mut rng);
/// assert_eq!(population.len(), 4);
/// assert!(population.iter().all(|tour| tour[0] == 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    members: Vec<Tour>,
}

impl Population {
    /// Wraps an existing list of tours.
    pub fn new(members: Vec<Tour>) -> Self {
        Self { members }
    }

    /// Generates `size` random tours over `num_locations` locations.
    ///
    /// Each tour starts as the identity ordering; positions `1..` are
    /// shuffled while position 0 stays fixed as the common start.
    pub fn random<R: Rng>(num_locations: usize, size: usize, rng: &mut R) -> Self {
        let members = (0..size)
            .map(|_| {
                let mut tour: Tour = (0..num_locations).collect();
                if num_locations > 1 {
                    tour[1..].shuffle(rng);
                }
                tour
            })
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tour> {
        self.members.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Tour] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Tour> {
        self.members
    }

    /// Checks that every tour is a permutation of `0..num_locations`.
    pub fn validate(&self, num_locations: usize) -> Result<()> {
        for (i, tour) in self.members.iter().enumerate() {
            if tour.len() != num_locations {
                return Err(GeoTspError::InvalidTourLength {
                    tour: i,
                    length: tour.len(),
                    minimum: num_locations,
                });
            }
            if !is_permutation(tour) {
                return Err(GeoTspError::InvalidTour { tour: i });
            }
        }
        Ok(())
    }
}

impl From<Vec<Tour>> for Population {
    fn from(members: Vec<Tour>) -> Self {
        Self::new(members)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Total round-trip distance of the tour at `index` in its population.
///
/// Lower distance is fitter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessRecord {
    pub index: usize,
    pub distance: f64,
}

/// Two parent indices into the current population.
///
/// Each pair yields exactly one child. `first == second` is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionPair {
    pub first: usize,
    pub second: usize,
}
