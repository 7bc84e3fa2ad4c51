use crate::error::KMeansError;

/// Iteration bound used when none is given on the command line
pub const DEFAULT_MAX_ITER: usize = 400;

/// Exclusive upper bound accepted for the iteration count
pub const MAX_ITER_LIMIT: usize = 1000;

/// Centroid movement below which the run is considered converged
pub const EPSILON: f64 = 1e-3;

/// Parameters of one clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of Lloyd iterations
    pub max_iter: usize,

    /// Convergence threshold on per-centroid Euclidean movement
    pub epsilon: f64,
}

impl KMeansConfig {
    /// Create a config for `k` clusters with the default bound and threshold.
    /// No range checks happen here; see [`KMeansConfig::validated`].
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            epsilon: EPSILON,
        }
    }

    /// Build a config from user supplied values, enforcing `k > 1` and
    /// `1 < max_iter < 1000`.
    pub fn validated(k: usize, max_iter: usize) -> Result<Self, KMeansError> {
        if k <= 1 {
            return Err(KMeansError::InvalidClusterCount(format!(
                "k must be greater than 1, got {}",
                k
            )));
        }
        if max_iter <= 1 || max_iter >= MAX_ITER_LIMIT {
            return Err(KMeansError::InvalidIterations(format!(
                "must be between 2 and {}, got {}",
                MAX_ITER_LIMIT - 1,
                max_iter
            )));
        }
        Ok(Self::new(k).with_max_iter(max_iter))
    }

    /// Reject datasets that cannot hold `k` clusters.
    pub fn check_points(&self, n_points: usize) -> Result<(), KMeansError> {
        if self.k >= n_points {
            return Err(KMeansError::InsufficientData {
                k: self.k,
                n: n_points,
            });
        }
        Ok(())
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}
