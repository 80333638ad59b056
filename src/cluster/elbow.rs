//! Cluster-count selection by largest WCSS drop.

use rand::Rng;

use super::kmeans::{cluster, total_wcss};

/// Smallest `max_k` accepted by [`choose_k`].
pub const MIN_K: usize = 2;

/// Choose a cluster count for `samples` by the elbow heuristic.
///
/// Runs k-means for every `k` in `1..=max_k`, computes the drop in total WCSS
/// between successive `k`, and returns the `k` that ended the single largest
/// drop. Ties resolve to the smallest such `k`. `max_k` below [`MIN_K`] is
/// clamped, so the result is always at least 2.
pub fn choose_k<R: Rng>(samples: &[f64], max_k: usize, rng: &mut R) -> usize {
    let max_k = max_k.max(MIN_K);

    let wcss: Vec<f64> = (1..=max_k)
        .map(|k| total_wcss(&cluster(samples, k, rng)))
        .collect();

    let mut best_index = 0;
    let mut best_drop = f64::NEG_INFINITY;
    for (i, pair) in wcss.windows(2).enumerate() {
        let drop = pair[0] - pair[1];
        if drop > best_drop {
            best_drop = drop;
            best_index = i;
        }
    }

    best_index + MIN_K
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_two_groups_choose_two() {
        let samples = [0.0, 0.01, 0.02, 1.0, 0.99, 0.98];
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_k(&samples, 20, &mut rng), 2);
    }

    #[test]
    fn test_max_k_is_clamped() {
        let samples = [0.0, 0.5, 1.0];
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_k(&samples, 0, &mut rng), 2);
        assert_eq!(choose_k(&samples, 1, &mut rng), 2);
    }

    #[test]
    fn test_flat_data_picks_first_drop() {
        // Every WCSS is zero, so all drops tie and the first one wins.
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(choose_k(&[0.0; 6], 20, &mut rng), 2);
        assert_eq!(choose_k(&[0.0], 20, &mut rng), 2);
    }
}
