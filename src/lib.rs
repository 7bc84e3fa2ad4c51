//! Lloyd's k-means over comma separated points.
//!
//! [`DataSet`] reads headerless numeric rows, [`KMeans`] clusters them with
//! first-k seeding, and the [`output`] helpers print the centroids.
//!
//! ```
//! use lloyd_kmeans::{cluster, DataSet};
//!
//! let ds = DataSet::from_reader("0,0\n10,0\n0,1\n10,1\n".as_bytes()).unwrap();
//! let result = cluster(&ds.data.view(), 2, 400).unwrap();
//! assert_eq!(result.assignments, vec![0, 1, 0, 1]);
//! ```

mod dataset;
mod error;
mod kmeans;
pub mod output;
mod params;

pub use dataset::DataSet;
pub use error::KMeansError;
pub use kmeans::{cluster, euclidean_distance, nearest_centroid, Clustering, KMeans};
pub use params::{KMeansConfig, DEFAULT_MAX_ITER, EPSILON, MAX_ITER_LIMIT};
