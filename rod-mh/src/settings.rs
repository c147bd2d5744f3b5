#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The settings for a Metropolis-Hastings run.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MhSettings {
    /// The number of iterations, including the initial draw from the prior
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_iterations"))]
    pub iterations: usize,
    /// The mean of the prior on both endpoints at the first iteration
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_prior_mean"))]
    pub prior_mean: [f64; 3],
    /// The variance along each axis of the endpoint prior and of the random-walk step
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_prior_variance")
    )]
    pub prior_variance: f64,
    /// The variance along each axis of the pixel noise
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_observation_variance")
    )]
    pub observation_variance: f64,
    /// The seed of the pseudo-random generator shared by proposals and acceptance tests
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_seed"))]
    pub seed: u64,
}

impl Default for MhSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            prior_mean: default_prior_mean(),
            prior_variance: default_prior_variance(),
            observation_variance: default_observation_variance(),
            seed: default_seed(),
        }
    }
}

fn default_iterations() -> usize {
    50000
}

fn default_prior_mean() -> [f64; 3] {
    [0.0, 0.0, 4.0]
}

fn default_prior_variance() -> f64 {
    0.1
}

fn default_observation_variance() -> f64 {
    0.05 * 0.05
}

fn default_seed() -> u64 {
    500
}
