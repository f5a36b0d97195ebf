use std::path::Path;

use chrono::{DateTime, Utc};
use kingme_evaluator::{board_feature::BoardFeature, weights::WeightVector};
use serde::{Deserialize, Serialize};

use crate::util;

/// Trained hybrid weights as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub weights: Vec<FeatureWeight>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureWeight {
    pub id: String,
    pub weight: f32,
}

/// A model whose weights do not line up with the evaluator's features.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelError {
    #[display("model has {found} weights, evaluator expects {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[display("weight #{index} is for feature {found:?}, evaluator expects {expected:?}")]
    FeatureMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

impl AiModel {
    pub fn new(name: String, final_fitness: f32, weights: &WeightVector) -> Self {
        Self {
            name,
            trained_at: Utc::now(),
            final_fitness,
            weights: BoardFeature::ALL
                .iter()
                .zip(weights.as_slice())
                .map(|(feature, weight)| FeatureWeight {
                    id: feature.id().to_owned(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("AI model", path)
    }

    /// Weights in evaluator feature order.
    pub fn to_weight_vector(&self) -> Result<WeightVector, ModelError> {
        if self.weights.len() != BoardFeature::ALL.len() {
            return Err(ModelError::FeatureCount {
                expected: BoardFeature::ALL.len(),
                found: self.weights.len(),
            });
        }
        BoardFeature::ALL
            .iter()
            .zip(&self.weights)
            .enumerate()
            .map(|(index, (feature, fw))| {
                if fw.id == feature.id() {
                    Ok(fw.weight)
                } else {
                    Err(ModelError::FeatureMismatch {
                        index,
                        expected: feature.id(),
                        found: fw.id.clone(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(WeightVector::new)
    }
}
