use thiserror::Error;

/// Error types for the clustering library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// The number of clusters is out of range (must be > 1)
    #[error("Invalid number of clusters: {0}")]
    InvalidClusterCount(String),

    /// The iteration bound is out of range
    #[error("Invalid maximum iteration: {0}")]
    InvalidIterations(String),

    /// Not enough points for the requested number of clusters (k must be < n)
    #[error("Insufficient data: {k} clusters requested for {n} points")]
    InsufficientData { k: usize, n: usize },

    /// Points and centroids disagree on the number of coordinates
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// No points at all
    #[error("No data points to cluster")]
    EmptyData,
}

impl KMeansError {
    /// The one-line message shown to the user on stderr.
    pub fn user_message(&self) -> &'static str {
        match self {
            KMeansError::InvalidClusterCount(_)
            | KMeansError::InsufficientData { .. }
            | KMeansError::EmptyData => "Invalid number of clusters!",
            KMeansError::InvalidIterations(_) => "Invalid maximum iteration!",
            KMeansError::InvalidDimensions(_) => "An Error Has Occurred",
        }
    }
}
