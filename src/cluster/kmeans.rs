use crate::Matrix;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct KMeans {
    pub cluster_centers: Option<Matrix>,
    pub labels: Option<Vec<usize>>,
    pub inertia: Option<f64>,
    n_clusters: usize,
    max_iter: usize,
    random_state: Option<u64>,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        if n_clusters == 0 {
            panic!("n_clusters must be > 0, got {}", n_clusters);
        }

        Self {
            cluster_centers: None,
            labels: None,
            inertia: None,
            n_clusters,
            max_iter: 100,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed for centroid initialization; omit for entropy-based randomness.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// The number of clusters actually used. May be lower than requested
    /// when the data holds fewer distinct vectors than `n_clusters`.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<(), String> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err("Input matrix must have at least one sample and one feature".to_string());
        }

        let mut centroids = self.initialize_centroids(x);
        let k = centroids.nrows();
        let mut labels = vec![0usize; x.nrows()];

        for _ in 0..self.max_iter {
            let mut changed = false;

            // Assign each point to the nearest centroid; ties break toward
            // the lowest centroid index.
            for i in 0..x.nrows() {
                let mut min_distance = f64::INFINITY;
                let mut closest_cluster = 0;

                for c in 0..k {
                    let distance = euclidean_distance(&x.row(i), &centroids.row(c));
                    if distance < min_distance {
                        min_distance = distance;
                        closest_cluster = c;
                    }
                }

                if labels[i] != closest_cluster {
                    labels[i] = closest_cluster;
                    changed = true;
                }
            }

            // Recompute each centroid as the mean of its members. An empty
            // cluster keeps its previous position.
            for c in 0..k {
                let members: Vec<usize> = labels
                    .iter()
                    .enumerate()
                    .filter(|&(_, &label)| label == c)
                    .map(|(i, _)| i)
                    .collect();

                if !members.is_empty() {
                    for j in 0..x.ncols() {
                        let sum: f64 = members.iter().map(|&i| x[[i, j]]).sum();
                        centroids[[c, j]] = sum / members.len() as f64;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        // Within-cluster sum of squares.
        let mut inertia = 0.0;
        for i in 0..x.nrows() {
            let distance = euclidean_distance(&x.row(i), &centroids.row(labels[i]));
            inertia += distance * distance;
        }

        self.n_clusters = k;
        self.cluster_centers = Some(centroids);
        self.labels = Some(labels);
        self.inertia = Some(inertia);

        Ok(())
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Vec<usize>, String> {
        self.fit(x)?;
        Ok(self.labels.clone().unwrap())
    }

    /// Record indices grouped by cluster id, preserving input order within
    /// each group. `None` until fitted.
    pub fn groups(&self) -> Option<Vec<Vec<usize>>> {
        let labels = self.labels.as_ref()?;
        let mut groups = vec![Vec::new(); self.n_clusters];
        for (i, &label) in labels.iter().enumerate() {
            groups[label].push(i);
        }
        Some(groups)
    }

    /// Samples k distinct feature vectors uniformly without replacement.
    /// When the data holds fewer distinct vectors than k, k is capped at
    /// the distinct-vector count.
    fn initialize_centroids(&self, x: &Matrix) -> Matrix {
        let mut seen = HashSet::new();
        let mut distinct_rows = Vec::new();
        for i in 0..x.nrows() {
            let key: Vec<u64> = x.row(i).iter().map(|v| v.to_bits()).collect();
            if seen.insert(key) {
                distinct_rows.push(i);
            }
        }

        let k = self.n_clusters.min(distinct_rows.len());
        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let chosen = sample(&mut rng, distinct_rows.len(), k);

        let mut centroids = Matrix::zeros((k, x.ncols()));
        for (c, idx) in chosen.into_iter().enumerate() {
            centroids.row_mut(c).assign(&x.row(distinct_rows[idx]));
        }

        centroids
    }
}

fn euclidean_distance(a: &ndarray::ArrayView1<f64>, b: &ndarray::ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_blobs() -> Matrix {
        // 50 points around (0, 0) and 50 around (10, 10), tiny spread.
        let mut x = Matrix::zeros((100, 2));
        for i in 0..50 {
            let offset = (i % 5) as f64 * 0.01;
            x[[i, 0]] = offset;
            x[[i, 1]] = -offset;
            x[[i + 50, 0]] = 10.0 + offset;
            x[[i + 50, 1]] = 10.0 - offset;
        }
        x
    }

    #[test]
    fn test_kmeans_basic() {
        let x = array![
            [1.0, 1.0],
            [1.5, 2.0],
            [3.0, 4.0],
            [5.0, 7.0],
            [3.5, 5.0],
            [4.5, 5.0],
            [3.5, 4.5]
        ];

        let mut kmeans = KMeans::new(2).random_state(1);
        let labels = kmeans.fit_predict(&x).unwrap();

        assert_eq!(labels.len(), x.nrows());
        assert!(kmeans.cluster_centers.is_some());
        assert!(kmeans.inertia.is_some());
        assert!(labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn test_partition_invariant() {
        let x = two_blobs();
        let mut kmeans = KMeans::new(4).random_state(7);
        let labels = kmeans.fit_predict(&x).unwrap();

        let k = kmeans.n_clusters();
        assert!(labels.iter().all(|&l| l < k));

        // Groups are a partition: no duplicates, no omissions, input order
        // preserved within each group.
        let groups = kmeans.groups().unwrap();
        let mut seen: Vec<usize> = groups.iter().flatten().copied().collect();
        assert_eq!(seen.len(), x.nrows());
        seen.sort_unstable();
        assert!(seen.iter().enumerate().all(|(i, &v)| i == v));
        for group in &groups {
            assert!(group.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_well_separated_blobs_split_cleanly() {
        let x = two_blobs();
        let mut kmeans = KMeans::new(2).random_state(42);
        let labels = kmeans.fit_predict(&x).unwrap();

        let first = labels[0];
        let second = labels[50];
        assert_ne!(first, second);
        assert!(labels[..50].iter().all(|&l| l == first));
        assert!(labels[50..].iter().all(|&l| l == second));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let x = two_blobs();

        let labels_a = KMeans::new(3).random_state(99).fit_predict(&x).unwrap();
        let labels_b = KMeans::new(3).random_state(99).fit_predict(&x).unwrap();
        assert_eq!(labels_a, labels_b);
    }

    #[test]
    fn test_k_capped_at_distinct_vectors() {
        // 6 records but only 2 distinct vectors; k=5 must degrade, not loop.
        let x = array![
            [1.0, 1.0],
            [1.0, 1.0],
            [1.0, 1.0],
            [9.0, 9.0],
            [9.0, 9.0],
            [9.0, 9.0]
        ];

        let mut kmeans = KMeans::new(5).random_state(3);
        let labels = kmeans.fit_predict(&x).unwrap();

        assert_eq!(kmeans.n_clusters(), 2);
        assert!(labels.iter().all(|&l| l < 2));
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_terminates_within_max_iter() {
        let x = two_blobs();
        let mut kmeans = KMeans::new(3).max_iter(1).random_state(5);
        // One bounded pass; must return rather than iterate to convergence.
        assert!(kmeans.fit(&x).is_ok());
        assert_eq!(kmeans.labels.as_ref().unwrap().len(), x.nrows());
    }

    #[test]
    fn test_empty_input() {
        let x = Matrix::zeros((0, 3));
        let mut kmeans = KMeans::new(2);
        assert!(kmeans.fit(&x).is_err());
    }

    #[test]
    fn test_kmeans_invalid_clusters() {
        std::panic::catch_unwind(|| {
            KMeans::new(0);
        })
        .expect_err("Should panic on zero clusters");
    }
}
