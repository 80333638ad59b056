//! One-dimensional k-means with k-means++ style seeding.

use rand::Rng;

/// Upper bound on Lloyd iterations. Convergence is normally reached long
/// before this; it only stops floating-point oscillation.
pub const MAX_ITERATIONS: usize = 300;

/// Run k-means on `samples` and return the non-empty clusters as values.
///
/// Samples must be finite. `k == 0` or an empty input yields no clusters.
pub fn cluster<R: Rng>(samples: &[f64], k: usize, rng: &mut R) -> Vec<Vec<f64>> {
    cluster_indices(samples, k, rng)
        .into_iter()
        .map(|group| group.into_iter().map(|i| samples[i]).collect())
        .collect()
}

/// Run k-means on `samples` and return the non-empty clusters as indices
/// into `samples`.
pub fn cluster_indices<R: Rng>(samples: &[f64], k: usize, rng: &mut R) -> Vec<Vec<usize>> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = initialize_centroids(samples, k, rng);
    let mut groups = assign(samples, &centroids);
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let next = recalculate(samples, &groups, &centroids);
        if next == centroids {
            converged = true;
            break;
        }
        centroids = next;
        groups = assign(samples, &centroids);
    }

    if !converged {
        log::debug!(
            "k-means stopped after {} iterations without a fixed point (k = {})",
            MAX_ITERATIONS,
            k
        );
    }

    groups.retain(|g| !g.is_empty());
    groups
}

/// Within-cluster sum of squares of a single cluster.
pub fn wcss(cluster: &[f64]) -> f64 {
    if cluster.is_empty() {
        return 0.0;
    }
    let centroid = mean(cluster.iter().copied(), cluster.len());
    cluster.iter().map(|v| (v - centroid).powi(2)).sum()
}

/// Total within-cluster sum of squares over all clusters.
pub fn total_wcss(clusters: &[Vec<f64>]) -> f64 {
    clusters.iter().map(|c| wcss(c)).sum()
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    values.sum::<f64>() / len as f64
}

/// Pick `k` starting centroids: the first uniformly, the rest with
/// probability proportional to squared distance to the nearest centroid.
fn initialize_centroids<R: Rng>(samples: &[f64], k: usize, rng: &mut R) -> Vec<f64> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(samples[rng.random_range(0..samples.len())]);

    while centroids.len() < k {
        let distances: Vec<f64> = samples
            .iter()
            .map(|&point| {
                centroids
                    .iter()
                    .map(|&c| (c - point).powi(2))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let total: f64 = distances.iter().sum();
        let threshold = rng.random::<f64>() * total;

        // With total == 0 every sample already is a centroid; index 0 wins.
        let mut cumsum = 0.0;
        let chosen = distances
            .iter()
            .position(|&d| {
                cumsum += d;
                threshold <= cumsum
            })
            .unwrap_or(samples.len() - 1);
        centroids.push(samples[chosen]);
    }

    centroids
}

/// Assign every sample to its nearest centroid. Ties go to the lower index.
fn assign(samples: &[f64], centroids: &[f64]) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); centroids.len()];

    for (i, &point) in samples.iter().enumerate() {
        let mut closest = 0;
        let mut min_distance = f64::INFINITY;
        for (j, &centroid) in centroids.iter().enumerate() {
            let distance = (centroid - point).abs();
            if distance < min_distance {
                closest = j;
                min_distance = distance;
            }
        }
        groups[closest].push(i);
    }

    groups
}

/// New centroid for each group; an empty group keeps its old centroid.
fn recalculate(samples: &[f64], groups: &[Vec<usize>], previous: &[f64]) -> Vec<f64> {
    groups
        .iter()
        .zip(previous)
        .map(|(group, &old)| {
            if group.is_empty() {
                old
            } else {
                mean(group.iter().map(|&i| samples[i]), group.len())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(mut clusters: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        for c in clusters.iter_mut() {
            c.sort_by(f64::total_cmp);
        }
        clusters.sort_by(|a, b| a[0].total_cmp(&b[0]));
        clusters
    }

    #[test]
    fn test_two_well_separated_groups() {
        let samples = [1.0, 1.1, 0.9, 10.0, 10.2, 9.8];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let clusters = sorted(cluster(&samples, 2, &mut rng));
            assert_eq!(clusters, vec![vec![0.9, 1.0, 1.1], vec![9.8, 10.0, 10.2]]);
        }
    }

    #[test]
    fn test_single_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(cluster(&[4.2], 3, &mut rng), vec![vec![4.2]]);
    }

    #[test]
    fn test_identical_samples_collapse_to_one_cluster() {
        let mut rng = StdRng::seed_from_u64(1);
        let clusters = cluster(&[0.0; 5], 4, &mut rng);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 5);
    }

    #[test]
    fn test_empty_and_zero_k() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(cluster(&[], 3, &mut rng).is_empty());
        assert!(cluster(&[1.0, 2.0], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_indices_cover_every_sample_once() {
        let samples = [0.3, 0.31, 0.7, 0.72, 0.1, 0.95, 0.5];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: Vec<usize> = cluster_indices(&samples, 3, &mut rng)
            .into_iter()
            .flatten()
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..samples.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_wcss() {
        assert_eq!(wcss(&[]), 0.0);
        assert_eq!(wcss(&[2.0, 2.0]), 0.0);
        assert_eq!(wcss(&[1.0, 3.0]), 2.0);
        assert_eq!(total_wcss(&[vec![1.0, 3.0], vec![5.0]]), 2.0);
    }

    #[test]
    fn test_assign_ties_go_to_first_centroid() {
        let groups = assign(&[1.0], &[0.0, 2.0]);
        assert_eq!(groups, vec![vec![0], vec![]]);
    }
}
