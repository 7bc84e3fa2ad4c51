use crate::error::KMeansError;
use crate::params::KMeansConfig;
use ndarray::{s, Array2, ArrayView1, ArrayView2};
use tracing::{debug, info};

/// Result of one Lloyd run
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Final centroids, one row per cluster (k x dim)
    pub centroids: Array2<f64>,
    /// Cluster index of every input point from the last assignment step
    pub assignments: Vec<usize>,
    /// Number of iterations executed
    pub iterations: usize,
    /// Whether the run stopped on the movement threshold rather than the cap
    pub converged: bool,
}

impl Clustering {
    /// Assign new points to the nearest of the fitted centroids.
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Vec<usize>, KMeansError> {
        if data.ncols() != self.centroids.ncols() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} coordinates, got {}",
                self.centroids.ncols(),
                data.ncols()
            )));
        }
        let centroids = self.centroids.view();
        Ok(data
            .outer_iter()
            .map(|point| nearest_centroid(&point, &centroids).0)
            .collect())
    }
}

/// Euclidean distance between two points of equal dimension
#[inline]
pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Index of and distance to the closest centroid.
///
/// Only a strictly smaller distance replaces the current best, so ties go to
/// the lowest centroid index.
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_cluster = 0;
    let mut best_dist = euclidean_distance(point, &centroids.row(0));

    for (ci, c_row) in centroids.outer_iter().enumerate().skip(1) {
        let dist = euclidean_distance(point, &c_row);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = ci;
        }
    }
    (best_cluster, best_dist)
}

/// Lloyd's k-means with first-k seeding.
#[derive(Debug, Clone)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Cluster the rows of `points`.
    ///
    /// Centroid `i` starts at point `i`. Each pass assigns every point to its
    /// nearest centroid and replaces each centroid by the mean of its points;
    /// a cluster that received no points keeps its position.
    ///
    /// Convergence compares the centroids that entered this pass with the
    /// ones that entered the previous pass, so it trails the update by one
    /// iteration and can never fire during the first pass. The update of the
    /// converging pass is still committed.
    pub fn fit(&self, points: &ArrayView2<f64>) -> Result<Clustering, KMeansError> {
        let (n, dim) = points.dim();
        let k = self.config.k;
        let max_iter = self.config.max_iter;
        let epsilon = self.config.epsilon;

        if n == 0 {
            return Err(KMeansError::EmptyData);
        }
        if dim == 0 {
            return Err(KMeansError::InvalidDimensions(
                "points have no coordinates".to_string(),
            ));
        }
        if k <= 1 {
            return Err(KMeansError::InvalidClusterCount(format!(
                "k must be greater than 1, got {}",
                k
            )));
        }
        if k >= n {
            return Err(KMeansError::InsufficientData { k, n });
        }
        if max_iter == 0 {
            return Err(KMeansError::InvalidIterations(
                "at least one iteration is required".to_string(),
            ));
        }

        let mut centroids = points.slice(s![..k, ..]).to_owned();
        // Centroids that entered the previous pass; none before the first commit.
        let mut previous: Option<Array2<f64>> = None;

        let mut assignments = vec![0usize; n];
        let mut sums = Array2::<f64>::zeros((k, dim));
        let mut counts = vec![0usize; k];

        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iter {
            iterations += 1;
            sums.fill(0.0);
            counts.iter_mut().for_each(|c| *c = 0);

            // Step 1: assign points to nearest centroid
            let current = centroids.view();
            for (i, point) in points.outer_iter().enumerate() {
                let (c, _) = nearest_centroid(&point, &current);
                assignments[i] = c;
                let mut acc = sums.row_mut(c);
                acc += &point;
                counts[c] += 1;
            }

            // Step 2: update centroids as mean of assigned points
            let mut empty = 0;
            for (ci, &count) in counts.iter().enumerate() {
                if count > 0 {
                    sums.row_mut(ci).mapv_inplace(|x| x / count as f64);
                } else {
                    sums.row_mut(ci).assign(&centroids.row(ci));
                    empty += 1;
                }
            }

            // Step 3: lagged convergence check on the pre-update centroids
            converged = match previous.as_ref() {
                Some(prev) => centroids
                    .outer_iter()
                    .zip(prev.outer_iter())
                    .all(|(c, p)| euclidean_distance(&c, &p) < epsilon),
                None => false,
            };

            debug!(
                iteration = iterations,
                shift = max_shift(&centroids.view(), &sums.view()),
                empty_clusters = empty,
                "lloyd pass"
            );

            // Step 4: previous <- current, current <- new means
            let prev = previous.get_or_insert_with(|| Array2::zeros((k, dim)));
            std::mem::swap(prev, &mut centroids);
            std::mem::swap(&mut centroids, &mut sums);

            if converged {
                info!(iterations, "converged");
                break;
            }
        }

        if !converged {
            info!(iterations, "stopped at the iteration cap without converging");
        }

        Ok(Clustering {
            centroids,
            assignments,
            iterations,
            converged,
        })
    }
}

/// Cluster `points` into `k` groups with at most `max_iter` passes and the
/// default convergence threshold.
pub fn cluster(
    points: &ArrayView2<f64>,
    k: usize,
    max_iter: usize,
) -> Result<Clustering, KMeansError> {
    KMeans::new(KMeansConfig::new(k).with_max_iter(max_iter)).fit(points)
}

/// Largest Euclidean movement between matching rows
fn max_shift(before: &ArrayView2<f64>, after: &ArrayView2<f64>) -> f64 {
    before
        .outer_iter()
        .zip(after.outer_iter())
        .map(|(b, a)| euclidean_distance(&b, &a))
        .fold(0.0, f64::max)
}
