//! Weight vector operators for the genetic algorithm.
//!
//! Every operator keeps coefficients inside `[0.0, max_weight]`. Vectors are L1-normalized
//! after each genetic operation, since the search only compares evaluations and a weight
//! vector scaled by a positive constant selects the same moves.
//!
//! - **Initialization**: [`random`]
//! - **Crossover**: [`blx_alpha`]
//! - **Mutation**: [`mutate`]
//! - **Normalization**: [`normalize_l1`]

use rand::Rng;
use rand_distr::Normal;

/// Gaussian perturbations are cut off at this many standard deviations.
const MAX_SIGMAS: f32 = 3.0;

/// Creates a weight vector by applying a function to each index.
///
/// ```
/// use kingme_training::weights;
///
/// let weights = weights::from_fn(|i| 1.0 / (i as f32 + 1.0), 4);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0, 0.25]);
/// ```
pub fn from_fn<F>(f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    (0..len).map(f).collect()
}

/// Samples each coefficient uniformly from `[0.0, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(0.0..=max_weight), len)
}

/// BLX-α crossover.
///
/// For each coefficient pair `x1`, `x2` the child is sampled uniformly from
/// `[min - α·d, max + α·d]` where `d = |x1 - x2|`, then clamped to `[0.0, max_weight]`.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let min = f32::min(p1[i], p2[i]);
            let max = f32::max(p1[i], p2[i]);
            let d = max - min;
            rng.random_range((min - alpha * d)..=(max + alpha * d))
                .clamp(0.0, max_weight)
        },
        p1.len(),
    )
}

/// Gaussian mutation in place.
///
/// Each coefficient is perturbed with probability `rate` by a sample of `N(0, sigma)`
/// bounded to `±3·sigma`, then clamped to `[0.0, max_weight]`.
///
/// # Panics
///
/// Panics if `sigma` is negative or not finite.
pub fn mutate<R>(weights: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).expect("sigma must be finite and non-negative");
    let bound = MAX_SIGMAS * sigma;
    for w in weights {
        if rng.random_bool(rate.clamp(0.0, 1.0).into()) {
            let delta = rng.sample(normal).clamp(-bound, bound);
            *w = (*w + delta).clamp(0.0, max_weight);
        }
    }
}

/// Scales the vector so its coefficients sum to 1.0.
///
/// A vector whose sum is not positive is left unchanged.
pub fn normalize_l1(weights: &mut [f32]) {
    let sum: f32 = weights.iter().copied().sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}
