//! Evaluator coefficients.
//!
//! A [`WeightVector`] holds one real coefficient per
//! [`BoardFeature`](crate::board_feature::BoardFeature), in
//! [`BoardFeature::ALL`](crate::board_feature::BoardFeature::ALL) order. It is produced by the
//! genetic optimizer (`kingme-training`) and handed, immutable, to the hybrid strategy for a game
//! session.
//!
//! Weight vectors serialize as a plain list of numbers, so a saved vector reads back with
//! bit-identical coefficients.

use serde::{Deserialize, Serialize};

/// Coefficients reproducing the static material balance: a man is worth 1, a king 1.5,
/// positional terms are ignored.
pub const DEFAULT_COEFFICIENTS: [f32; 6] = [1.0, 1.5, 0.0, 0.0, 0.0, 0.0];

/// Ordered list of evaluator coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f32>);

impl Default for WeightVector {
    fn default() -> Self {
        Self(DEFAULT_COEFFICIENTS.to_vec())
    }
}

impl From<Vec<f32>> for WeightVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl WeightVector {
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every coefficient has the same bit pattern as in `other`.
    #[must_use]
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}
