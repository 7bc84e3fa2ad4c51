use approx::assert_abs_diff_eq;
use lloyd_kmeans::output::write_centroids;
use lloyd_kmeans::{cluster, DataSet, KMeans, KMeansConfig, KMeansError};
use ndarray::{array, Array2};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Seeded random points in [-10, 10)^dim
fn random_points(n: usize, dim: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n, dim), |_| rng.gen_range(-10.0..10.0))
}

fn render(centroids: &Array2<f64>) -> String {
    let mut buf = Vec::new();
    write_centroids(&mut buf, &centroids.view()).unwrap();
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_separated_groups() {
    // Seeds are the first two rows, one from each group.
    let points = array![[0.0, 0.0], [10.0, 0.0], [0.0, 1.0], [10.0, 1.0]];
    let result = cluster(&points.view(), 2, 10).unwrap();

    assert_eq!(render(&result.centroids), "0.0000,0.5000\n10.0000,0.5000\n");
    assert_eq!(result.assignments, vec![0, 1, 0, 1]);
}

#[test]
fn test_first_k_seeding_follows_input_order() {
    // With both seeds in the left group the run settles on a split by y.
    let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
    let result = cluster(&points.view(), 2, 10).unwrap();

    assert_eq!(render(&result.centroids), "5.0000,0.0000\n5.0000,1.0000\n");
    assert!(result.converged);
}

#[test]
fn test_too_many_clusters_rejected() {
    let points = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
    assert_eq!(
        cluster(&points.view(), 3, 10),
        Err(KMeansError::InsufficientData { k: 3, n: 3 })
    );
    assert_eq!(
        cluster(&points.view(), 5, 10),
        Err(KMeansError::InsufficientData { k: 5, n: 3 })
    );
}

#[test]
fn test_short_row_does_not_count() {
    let input = "0,0\n10,0\n5\n0,1\n10,1\n";
    let ds = DataSet::from_reader(input.as_bytes()).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.skipped, 1);

    let clean = DataSet::from_reader("0,0\n10,0\n0,1\n10,1\n".as_bytes()).unwrap();
    let a = cluster(&ds.data.view(), 2, 50).unwrap();
    let b = cluster(&clean.data.view(), 2, 50).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_lone_outlier_is_its_own_centroid() {
    let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [50.0, 50.0]];
    let result = cluster(&points.view(), 2, 100).unwrap();

    assert_eq!(result.assignments, vec![0, 0, 0, 0, 1]);
    assert_eq!(result.centroids.row(1), array![50.0, 50.0]);
    assert_abs_diff_eq!(result.centroids[[0, 0]], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(result.centroids[[0, 1]], 0.5, epsilon = 1e-12);
    assert!(result.converged);
    assert_eq!(result.iterations, 4);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_output_shape() {
    for (k, dim) in [(2, 1), (3, 2), (5, 7)] {
        let points = random_points(60, dim, 7);
        let result = cluster(&points.view(), k, 50).unwrap();
        assert_eq!(result.centroids.dim(), (k, dim));
        assert_eq!(result.assignments.len(), 60);
        assert!(result.assignments.iter().all(|&c| c < k));

        let text = render(&result.centroids);
        assert_eq!(text.lines().count(), k);
        assert!(text.lines().all(|line| line.split(',').count() == dim));
    }
}

#[test]
fn test_deterministic() {
    let points = random_points(500, 4, 42);
    let first = cluster(&points.view(), 6, 300).unwrap();
    let second = cluster(&points.view(), 6, 300).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_respects_iteration_cap() {
    let points = random_points(400, 3, 3);
    for max_iter in [1, 2, 5] {
        let result = cluster(&points.view(), 8, max_iter).unwrap();
        assert!(result.iterations <= max_iter);
        assert!(result.centroids.iter().all(|x| x.is_finite()));
    }
}

#[test]
fn test_tighter_epsilon_never_stops_earlier() {
    let points = random_points(300, 2, 11);
    let loose = KMeans::new(KMeansConfig::new(4).with_epsilon(1e-1))
        .fit(&points.view())
        .unwrap();
    let tight = KMeans::new(KMeansConfig::new(4).with_epsilon(1e-9))
        .fit(&points.view())
        .unwrap();
    assert!(tight.iterations >= loose.iterations);
    assert!(loose.iterations >= 2);
}

#[test]
fn test_assignments_match_predict_on_converged_run() {
    let points = random_points(200, 2, 5);
    let result = cluster(&points.view(), 3, 999).unwrap();
    assert!(result.converged);
    assert_eq!(result.predict(&points.view()).unwrap(), result.assignments);
}
