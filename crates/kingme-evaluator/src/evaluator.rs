//! Board evaluation.
//!
//! An [`Evaluator`] maps a board to a signed score from one side's perspective; larger is
//! better for that side. Evaluation is a pure function of the board and the evaluator's
//! coefficients, so repeated calls on the same board return the same value.
//!
//! - [`MaterialEvaluator`] - the static material balance ([`Board::evaluate`])
//! - [`FeatureEvaluator`] - weighted sum of [`BoardFeature`]s:
//!   `score = Σ(wᵢ × featureᵢ)`
//!
//! With [`WeightVector::default`] the feature evaluator scores every board exactly like the
//! material evaluator.

use std::{fmt, iter};

use kingme_engine::{Board, Color};

use crate::{board_feature::BoardFeature, weights::WeightVector};

/// Scores boards for search.
pub trait Evaluator: fmt::Debug + Send + Sync {
    /// Returns the score of `board` from `perspective`'s point of view.
    fn evaluate(&self, board: &Board, perspective: Color) -> f32;
}

/// Static material balance: pieces count 1, kings an extra half.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board, perspective: Color) -> f32 {
        match perspective {
            Color::White => board.evaluate(),
            Color::Red => -board.evaluate(),
        }
    }
}

/// Weighted sum of board features.
///
/// # Example
///
/// ```
/// use kingme_engine::{Board, Color};
/// use kingme_evaluator::evaluator::{Evaluator, FeatureEvaluator};
///
/// let evaluator = FeatureEvaluator::default();
/// assert_eq!(evaluator.evaluate(&Board::initial(), Color::White), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureEvaluator {
    features: Vec<BoardFeature>,
    weights: WeightVector,
}

impl Default for FeatureEvaluator {
    fn default() -> Self {
        Self::new(WeightVector::default())
    }
}

impl FeatureEvaluator {
    /// Creates an evaluator over [`BoardFeature::ALL`].
    ///
    /// # Panics
    ///
    /// Panics if `weights` does not have one coefficient per feature.
    #[must_use]
    pub fn new(weights: WeightVector) -> Self {
        Self::with_features(BoardFeature::ALL.to_vec(), weights)
    }

    /// Creates an evaluator over an explicit feature list.
    ///
    /// # Panics
    ///
    /// Panics if `features.len() != weights.len()`.
    #[must_use]
    pub fn with_features(features: Vec<BoardFeature>, weights: WeightVector) -> Self {
        assert_eq!(features.len(), weights.len());
        Self { features, weights }
    }

    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }
}

impl Evaluator for FeatureEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board, perspective: Color) -> f32 {
        iter::zip(&self.features, self.weights.as_slice())
            .filter(|(_, w)| **w != 0.0)
            .map(|(f, w)| f.compute(board, perspective) * w)
            .sum()
    }
}
