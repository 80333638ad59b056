//! Adaptive one-dimensional clustering.
//!
//! [`optimal_cluster`] groups numeric samples without being told how many
//! groups exist: samples are min-max scaled, the cluster count is picked by
//! the elbow heuristic ([`choose_k`]) and k-means ([`cluster`]) produces the
//! final grouping. Results are returned in the original units.
//!
//! Seeding is randomized, so results depend on the random source. Pass a
//! seeded generator (or use [`AdaptiveClusterer::seeded`]) for reproducible
//! output.
//!
//! ```
//! use ocrlayout::cluster::AdaptiveClusterer;
//!
//! let mut clusterer = AdaptiveClusterer::seeded(7);
//! let clusters = clusterer.optimal_cluster(&[12.0, 12.5, 11.8, 30.0, 31.0]);
//! assert_eq!(clusters.iter().map(Vec::len).sum::<usize>(), 5);
//! ```

mod elbow;
mod kmeans;
mod scale;

pub use elbow::{choose_k, MIN_K};
pub use kmeans::{cluster, cluster_indices, total_wcss, wcss, MAX_ITERATIONS};
pub use scale::{denormalize, normalize, Scale};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default ceiling for the elbow search.
pub const DEFAULT_MAX_K: usize = 20;

/// Cluster `samples` with an automatically chosen cluster count.
///
/// Every sample appears in exactly one returned cluster and no cluster is
/// empty. An empty input yields no clusters.
pub fn optimal_cluster<R: Rng>(samples: &[f64], rng: &mut R) -> Vec<Vec<f64>> {
    optimal_cluster_with_max_k(samples, DEFAULT_MAX_K, rng)
}

/// [`optimal_cluster`] with a custom elbow ceiling.
pub fn optimal_cluster_with_max_k<R: Rng>(
    samples: &[f64],
    max_k: usize,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    if samples.is_empty() {
        return Vec::new();
    }

    let (normalized, _) = normalize(samples);
    let k = choose_k(&normalized, max_k, rng);

    // Clustering by index hands back the original values untouched, which is
    // what denormalizing each member would produce up to rounding.
    cluster_indices(&normalized, k, rng)
        .into_iter()
        .map(|group| group.into_iter().map(|i| samples[i]).collect())
        .collect()
}

/// Clustering primitive bound to a random source and an elbow ceiling.
#[derive(Debug, Clone)]
pub struct AdaptiveClusterer<R = StdRng> {
    rng: R,
    max_k: usize,
}

impl AdaptiveClusterer<StdRng> {
    /// Create a clusterer seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a deterministic clusterer.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for AdaptiveClusterer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> AdaptiveClusterer<R> {
    /// Create a clusterer drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_k: DEFAULT_MAX_K,
        }
    }

    /// Set the elbow search ceiling (clamped to at least [`MIN_K`]).
    pub fn with_max_k(mut self, max_k: usize) -> Self {
        self.max_k = max_k.max(MIN_K);
        self
    }

    /// The elbow search ceiling.
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    /// Run k-means with a fixed `k`.
    pub fn cluster(&mut self, samples: &[f64], k: usize) -> Vec<Vec<f64>> {
        cluster(samples, k, &mut self.rng)
    }

    /// Pick a cluster count with the elbow heuristic.
    pub fn choose_k(&mut self, samples: &[f64]) -> usize {
        choose_k(samples, self.max_k, &mut self.rng)
    }

    /// Cluster with an automatically chosen count, in original units.
    pub fn optimal_cluster(&mut self, samples: &[f64]) -> Vec<Vec<f64>> {
        optimal_cluster_with_max_k(samples, self.max_k, &mut self.rng)
    }
}
