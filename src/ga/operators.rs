//! Permutation-preserving recombination for tours.
//!
//! # Crossover
//!
//! [`greedy_fill_crossover`] is a single-point, order-preserving crossover:
//! the head `0..=cross_index` is copied from one parent and the rest of the
//! child is filled with the other parent's locations in the order they
//! appear there, skipping any already placed. Two valid permutations of the
//! same index set always produce a valid permutation.
//!
//! # Mutation
//!
//! [`anchored_swap_mutation`] swaps two positions drawn from `1..L`.
//! Position 0 is the start of every tour and never moves.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::types::{Population, SelectionPair, Tour};
use crate::error::{GeoTspError, Result};
use rand::Rng;
use tracing::instrument;

/// Shortest tour for which the crossover point range `1..=L-2` is non-empty.
pub const MIN_TOUR_LENGTH: usize = 3;

/// `InvalidTour` label for the head argument of [`greedy_fill_crossover`].
pub const HEAD_PARENT: usize = 0;
/// `InvalidTour` label for the tail argument of [`greedy_fill_crossover`].
pub const TAIL_PARENT: usize = 1;

/// Builds one child from a head parent and a tail parent.
///
/// Parents that are not permutations of the same index set fail with
/// [`GeoTspError::InvalidTour`], where `tour` is [`HEAD_PARENT`] or
/// [`TAIL_PARENT`].
///
/// # Complexity
/// O(L) time, O(L) space
///
/// # Examples
///
/// ```
/// use u_geotsp::ga::operators::greedy_fill_crossover;
///
/// let head = vec![0, 1, 2, 3, 4];
/// let tail = vec![4, 3, 2, 1, 0];
/// let child = greedy_fill_crossover(&head, &tail, 1).unwrap();
/// assert_eq!(child, vec![0, 1, 4, 3, 2]);
/// ```
pub fn greedy_fill_crossover(head: &[usize], tail: &[usize], cross_index: usize) -> Result<Tour> {
    let n = head.len();
    if tail.len() != n {
        return Err(GeoTspError::IndexOutOfRange {
            context: "crossover tail parent length",
            index: tail.len(),
            bound: n,
        });
    }
    if cross_index >= n {
        return Err(GeoTspError::IndexOutOfRange {
            context: "crossover index",
            index: cross_index,
            bound: n,
        });
    }

    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    let out_of_range = |v: usize| GeoTspError::IndexOutOfRange {
        context: "crossover location index",
        index: v,
        bound: n,
    };

    for &v in &head[..=cross_index] {
        let seen = placed.get_mut(v).ok_or_else(|| out_of_range(v))?;
        if *seen {
            return Err(GeoTspError::InvalidTour { tour: HEAD_PARENT });
        }
        *seen = true;
        child.push(v);
    }

    for &v in tail {
        let seen = placed.get_mut(v).ok_or_else(|| out_of_range(v))?;
        if !*seen {
            *seen = true;
            child.push(v);
        }
    }

    // the tail missed some location the head left open
    if child.len() != n {
        return Err(GeoTspError::InvalidTour { tour: TAIL_PARENT });
    }
    Ok(child)
}

/// Swaps two positions drawn uniformly from `1..=L-1`.
///
/// The draws may coincide, leaving the tour unchanged. Tours shorter than
/// two locations have nothing to swap and consume no randomness.
pub fn anchored_swap_mutation<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(1..n);
    let j = rng.random_range(1..n);
    tour.swap(i, j);
}

/// Breeds the next population, one child per selection pair.
///
/// For each pair, in order, the generator is consumed as: crossover index in
/// `1..=L-2`, a coin deciding which parent supplies the head, a mutation
/// draw in `[0, 1)`, and (when mutating) the two swap positions. Child `i`
/// is bred from `pairs[i]`.
///
/// A child mutates when its draw is `<= mutation_chance`, except that a
/// chance of exactly 0 never mutates.
///
/// A parent that is not a permutation fails with
/// [`GeoTspError::InvalidTour`] carrying its population index.
#[instrument(
    level = "debug",
    skip(pairs, population, rng),
    fields(pairs = pairs.len(), population = population.len())
)]
pub fn recombine<R: Rng>(
    pairs: &[SelectionPair],
    population: &Population,
    mutation_chance: f64,
    rng: &mut R,
) -> Result<Population> {
    if !(0.0..=1.0).contains(&mutation_chance) {
        return Err(GeoTspError::InvalidProbabilityRange {
            value: mutation_chance,
        });
    }
    let length = check_tour_lengths(population)?;

    let parent = |index: usize| {
        population.get(index).ok_or(GeoTspError::IndexOutOfRange {
            context: "selection pair parent",
            index,
            bound: population.len(),
        })
    };

    let mut children = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let first = parent(pair.first)?;
        let second = parent(pair.second)?;

        let cross_index = rng.random_range(1..=length - 2);
        let ((head_index, head), (tail_index, tail)) = if rng.random_bool(0.5) {
            ((pair.first, first), (pair.second, second))
        } else {
            ((pair.second, second), (pair.first, first))
        };
        let mut child = greedy_fill_crossover(head, tail, cross_index).map_err(|e| match e {
            GeoTspError::InvalidTour { tour: HEAD_PARENT } => {
                GeoTspError::InvalidTour { tour: head_index }
            }
            GeoTspError::InvalidTour { tour: TAIL_PARENT } => {
                GeoTspError::InvalidTour { tour: tail_index }
            }
            other => other,
        })?;

        let draw: f64 = rng.random();
        if mutation_chance > 0.0 && draw <= mutation_chance {
            anchored_swap_mutation(&mut child, rng);
        }
        children.push(child);
    }

    Ok(Population::new(children))
}

/// Common tour length of `population`, which must be at least
/// [`MIN_TOUR_LENGTH`].
fn check_tour_lengths(population: &Population) -> Result<usize> {
    let length = match population.get(0) {
        Some(tour) => tour.len(),
        None => {
            return Err(GeoTspError::InvalidPopulationSize { size: 0, minimum: 1 });
        }
    };
    for (i, tour) in population.iter().enumerate() {
        if tour.len() < MIN_TOUR_LENGTH || tour.len() != length {
            return Err(GeoTspError::InvalidTourLength {
                tour: i,
                length: tour.len(),
                minimum: MIN_TOUR_LENGTH.max(length),
            });
        }
    }
    Ok(length)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::is_permutation;
    use crate::random::create_rng;
    use proptest::prelude::{prop, prop_assert, prop_assert_eq, proptest, Just, Strategy};

    fn pair(first: usize, second: usize) -> SelectionPair {
        SelectionPair { first, second }
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_copies_head_then_fills_in_tail_order() {
        let head = vec![0, 3, 1, 4, 2, 5];
        let tail = vec![0, 5, 4, 3, 2, 1];
        let child = greedy_fill_crossover(&head, &tail, 2).unwrap();
        assert_eq!(child, vec![0, 3, 1, 5, 4, 2]);
    }

    #[test]
    fn test_crossover_last_interior_point() {
        let head = vec![0, 1, 2, 3];
        let tail = vec![3, 2, 1, 0];
        // head covers all but one position
        assert_eq!(greedy_fill_crossover(&head, &tail, 2).unwrap(), vec![0, 1, 2, 3]);
        let child = greedy_fill_crossover(&tail, &head, 2).unwrap();
        assert_eq!(child, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_crossover_identical_parents_is_copy() {
        let p = vec![0, 4, 2, 3, 1];
        for cross in 1..=3 {
            assert_eq!(greedy_fill_crossover(&p, &p, cross).unwrap(), p);
        }
    }

    #[test]
    fn test_crossover_rejects_bad_index() {
        let p = vec![0, 1, 2];
        assert!(matches!(
            greedy_fill_crossover(&p, &p, 3),
            Err(GeoTspError::IndexOutOfRange { index: 3, bound: 3, .. })
        ));
    }

    #[test]
    fn test_crossover_rejects_mismatched_parents() {
        assert!(greedy_fill_crossover(&[0, 1, 2], &[0, 1], 1).is_err());
        // same length, foreign index
        assert!(greedy_fill_crossover(&[0, 1, 2], &[0, 1, 9], 1).is_err());
        // same length, different index sets: child cannot be completed
        assert!(matches!(
            greedy_fill_crossover(&[0, 1, 2], &[0, 1, 1], 1),
            Err(GeoTspError::InvalidTour { tour: TAIL_PARENT })
        ));
    }

    #[test]
    fn test_crossover_rejects_duplicate_in_head() {
        let bad = vec![1, 1, 0, 2];
        let good = vec![0, 1, 2, 3];
        for cross in 1..=2 {
            assert!(matches!(
                greedy_fill_crossover(&bad, &good, cross),
                Err(GeoTspError::InvalidTour { tour: HEAD_PARENT })
            ));
        }
    }

    // ---- Mutation ----

    #[test]
    fn test_mutation_never_moves_start() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut tour: Vec<usize> = (0..8).collect();
            anchored_swap_mutation(&mut tour, &mut rng);
            assert_eq!(tour[0], 0);
            assert!(is_permutation(&tour));
        }
    }

    #[test]
    fn test_mutation_tiny_tours() {
        let mut rng = create_rng(42);
        let mut one = vec![0];
        anchored_swap_mutation(&mut one, &mut rng);
        assert_eq!(one, vec![0]);

        // only position 1 is eligible, so the swap is a no-op
        let mut two = vec![1, 0];
        anchored_swap_mutation(&mut two, &mut rng);
        assert_eq!(two, vec![1, 0]);
    }

    // ---- Recombination ----

    fn sample_population() -> Population {
        Population::new(vec![
            vec![0, 1, 2, 3, 4, 5, 6],
            vec![0, 6, 5, 4, 3, 2, 1],
            vec![0, 3, 6, 2, 5, 1, 4],
        ])
    }

    #[test]
    fn test_recombine_one_child_per_pair() {
        let pop = sample_population();
        let pairs = vec![pair(0, 1), pair(2, 2), pair(1, 0), pair(2, 0), pair(0, 0)];
        let mut rng = create_rng(42);
        let next = recombine(&pairs, &pop, 0.5, &mut rng).unwrap();
        assert_eq!(next.len(), pairs.len());
        assert!(next.validate(7).is_ok());
    }

    #[test]
    fn test_self_pairing_copies_parent_without_mutation() {
        let pop = sample_population();
        let pairs = vec![pair(2, 2), pair(1, 1)];
        let next = recombine(&pairs, &pop, 0.0, &mut create_rng(5)).unwrap();
        assert_eq!(next.members()[0], pop.members()[2]);
        assert_eq!(next.members()[1], pop.members()[1]);
    }

    #[test]
    fn test_zero_mutation_matches_crossover_only() {
        let pop = sample_population();
        let pairs = vec![pair(0, 1), pair(1, 2), pair(2, 0), pair(0, 2)];
        let next = recombine(&pairs, &pop, 0.0, &mut create_rng(11)).unwrap();

        let mut replay = create_rng(11);
        for (child, p) in next.iter().zip(&pairs) {
            let cross = replay.random_range(1..=5);
            let first = &pop.members()[p.first];
            let second = &pop.members()[p.second];
            let expected = if replay.random_bool(0.5) {
                greedy_fill_crossover(first, second, cross).unwrap()
            } else {
                greedy_fill_crossover(second, first, cross).unwrap()
            };
            let _mutation_draw: f64 = replay.random();
            assert_eq!(child, &expected);
        }
    }

    #[test]
    fn test_full_mutation_swaps_seeded_positions() {
        let pop = sample_population();
        let pairs = vec![pair(0, 1), pair(2, 1), pair(1, 1)];
        let next = recombine(&pairs, &pop, 1.0, &mut create_rng(2024)).unwrap();

        let mut replay = create_rng(2024);
        for (child, p) in next.iter().zip(&pairs) {
            let cross = replay.random_range(1..=5);
            let first = &pop.members()[p.first];
            let second = &pop.members()[p.second];
            let mut expected = if replay.random_bool(0.5) {
                greedy_fill_crossover(first, second, cross).unwrap()
            } else {
                greedy_fill_crossover(second, first, cross).unwrap()
            };
            let draw: f64 = replay.random();
            assert!(draw <= 1.0);
            let i = replay.random_range(1..7);
            let j = replay.random_range(1..7);
            expected.swap(i, j);
            assert_eq!(child, &expected, "swap positions ({i}, {j})");
        }
    }

    #[test]
    fn test_recombine_is_reproducible() {
        let pop = sample_population();
        let pairs = vec![pair(0, 1), pair(1, 2), pair(2, 0)];
        let a = recombine(&pairs, &pop, 0.3, &mut create_rng(8)).unwrap();
        let b = recombine(&pairs, &pop, 0.3, &mut create_rng(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recombine_rejects_probability_out_of_range() {
        let pop = sample_population();
        let mut rng = create_rng(1);
        for bad in [-0.01, 1.01, f64::NAN] {
            assert!(matches!(
                recombine(&[pair(0, 1)], &pop, bad, &mut rng),
                Err(GeoTspError::InvalidProbabilityRange { .. })
            ));
        }
    }

    #[test]
    fn test_recombine_rejects_short_tours() {
        let pop = Population::new(vec![vec![0, 1], vec![1, 0]]);
        let err = recombine(&[pair(0, 1)], &pop, 0.1, &mut create_rng(1)).unwrap_err();
        assert!(matches!(err, GeoTspError::InvalidTourLength { tour: 0, length: 2, .. }));
    }

    #[test]
    fn test_recombine_rejects_ragged_population() {
        let pop = Population::new(vec![vec![0, 1, 2, 3], vec![0, 2, 1]]);
        let err = recombine(&[pair(0, 1)], &pop, 0.1, &mut create_rng(1)).unwrap_err();
        assert!(matches!(err, GeoTspError::InvalidTourLength { tour: 1, .. }));
    }

    #[test]
    fn test_recombine_rejects_empty_population() {
        let err = recombine(&[], &Population::default(), 0.1, &mut create_rng(1)).unwrap_err();
        assert!(matches!(err, GeoTspError::InvalidPopulationSize { size: 0, .. }));
    }

    #[test]
    fn test_recombine_names_non_permutation_parent() {
        let pop = Population::new(vec![vec![0, 1, 2, 3], vec![1, 1, 0, 2]]);
        // self-pair: the duplicate parent is always the head
        for seed in 0..8 {
            let err = recombine(&[pair(1, 1)], &pop, 0.1, &mut create_rng(seed)).unwrap_err();
            assert!(matches!(err, GeoTspError::InvalidTour { tour: 1 }), "seed {seed}: {err:?}");
        }
    }

    #[test]
    fn test_recombine_rejects_foreign_parent_index() {
        let pop = sample_population();
        let err = recombine(&[pair(0, 3)], &pop, 0.1, &mut create_rng(1)).unwrap_err();
        assert!(matches!(
            err,
            GeoTspError::IndexOutOfRange { index: 3, bound: 3, .. }
        ));
    }

    // ---- Properties ----

    fn permutation(len: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..len).collect::<Vec<usize>>()).prop_shuffle()
    }

    fn parents_and_cut() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize)> {
        (3usize..40).prop_flat_map(|len| (permutation(len), permutation(len), 1..=len - 2))
    }

    proptest! {
        #[test]
        fn prop_crossover_yields_permutation((head, tail, cut) in parents_and_cut()) {
            let child = greedy_fill_crossover(&head, &tail, cut).unwrap();
            prop_assert_eq!(child.len(), head.len());
            prop_assert!(is_permutation(&child));
            prop_assert_eq!(&child[..=cut], &head[..=cut]);
        }

        #[test]
        fn prop_recombine_yields_permutations(
            tours in (3usize..20).prop_flat_map(|len| prop::collection::vec(permutation(len), 2..12)),
            seed in 0u64..1_000,
            chance in 0.0f64..=1.0,
        ) {
            let pop = Population::new(tours);
            let n = pop.len();
            let pairs: Vec<SelectionPair> = (0..n).map(|i| pair(i, (i * 7 + 3) % n)).collect();
            let next = recombine(&pairs, &pop, chance, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(next.len(), n);
            for tour in &next {
                prop_assert!(is_permutation(tour));
            }
        }
    }
}
