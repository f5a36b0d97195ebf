//! Alpha-beta search driven by genetically tuned weights.
//!
//! The hybrid strategy has no algorithm of its own: it is [`Search::alpha_beta`] with a
//! [`FeatureEvaluator`] built from a tuned [`WeightVector`]. With
//! [`WeightVector::default`] it returns exactly what alpha-beta returns with the static
//! material evaluator.

use kingme_engine::{Board, Color};

use crate::{
    evaluator::FeatureEvaluator,
    search::{Search, SearchResult},
    weights::WeightVector,
};

/// Runs one alpha-beta search whose leaves are scored with `weights`.
///
/// # Panics
///
/// Panics if `weights` does not hold one coefficient per board feature.
#[must_use]
pub fn search(
    board: &Board,
    depth: u32,
    alpha: f32,
    beta: f32,
    maximizing: bool,
    player: Color,
    weights: &WeightVector,
) -> SearchResult {
    HybridSearch::new(weights.clone()).search(board, depth, alpha, beta, maximizing, player)
}

/// A tuned evaluator held for a whole game session.
#[derive(Debug, Clone)]
pub struct HybridSearch {
    evaluator: FeatureEvaluator,
}

impl HybridSearch {
    /// # Panics
    ///
    /// Panics if `weights` does not hold one coefficient per board feature.
    #[must_use]
    pub fn new(weights: WeightVector) -> Self {
        Self {
            evaluator: FeatureEvaluator::new(weights),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        self.evaluator.weights()
    }

    #[must_use]
    pub fn search(
        &self,
        board: &Board,
        depth: u32,
        alpha: f32,
        beta: f32,
        maximizing: bool,
        player: Color,
    ) -> SearchResult {
        let search = Search::new(&self.evaluator, player);
        let result = search.alpha_beta(board, depth, alpha, beta, maximizing);
        tracing::debug!(depth, nodes = search.nodes(), score = result.score, "hybrid search");
        result
    }
}
