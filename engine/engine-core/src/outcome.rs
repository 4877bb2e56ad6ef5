//! Helpers for working with outcome distributions.
//!
//! An outcome distribution is the ordered list of `(resulting state,
//! probability)` pairs an [`OutcomeModel`](crate::typed::OutcomeModel)
//! returns for one action.

use rand::distributions::{Distribution, WeightedIndex};
use rand_chacha::ChaCha20Rng;

use crate::error::GameError;

/// Maximum allowed deviation of a distribution's total from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Check that a distribution's probabilities are finite, non-negative and
/// sum to 1.0 within [`PROBABILITY_TOLERANCE`].
///
/// An empty distribution is accepted: it is kept as a childless action by
/// the search.
pub fn validate_distribution<S>(outcomes: &[(S, f64)]) -> Result<(), GameError> {
    if outcomes.is_empty() {
        return Ok(());
    }

    for &(_, probability) in outcomes {
        if !probability.is_finite() || probability < 0.0 {
            return Err(GameError::InvalidProbability { probability });
        }
    }

    let total = probability_mass(outcomes);
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(GameError::InvalidDistribution { total });
    }

    Ok(())
}

/// Sum of the probabilities of a distribution.
#[inline]
pub fn probability_mass<S>(outcomes: &[(S, f64)]) -> f64 {
    outcomes.iter().map(|(_, p)| p).sum()
}

/// Draw one index from a weighted list, using the weights as sampling
/// probabilities.
///
/// Returns `None` for an empty list or one whose weights cannot form a
/// distribution (all zero, negative or non-finite).
pub fn sample_weighted<I>(weights: I, rng: &mut ChaCha20Rng) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    WeightedIndex::<f64>::new(weights)
        .ok()
        .map(|dist| dist.sample(rng))
}

/// Draw the index of one outcome of a distribution.
pub fn sample_outcome<S>(outcomes: &[(S, f64)], rng: &mut ChaCha20Rng) -> Option<usize> {
    sample_weighted(outcomes.iter().map(|(_, p)| *p), rng)
}
