use ndarray::{ArrayView1, ArrayView2};
use std::io::{self, Write};

/// Render one centroid as comma separated values with four decimals
pub fn format_centroid(centroid: &ArrayView1<f64>) -> String {
    centroid
        .iter()
        .map(|x| format!("{:.4}", x))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write one line per centroid, in cluster index order
pub fn write_centroids<W: Write>(mut out: W, centroids: &ArrayView2<f64>) -> io::Result<()> {
    for row in centroids.outer_iter() {
        writeln!(out, "{}", format_centroid(&row))?;
    }
    Ok(())
}

/// Write the cluster index of every point, one per line
pub fn write_assignments<W: Write>(mut out: W, assignments: &[usize]) -> io::Result<()> {
    for c in assignments {
        writeln!(out, "{}", c)?;
    }
    Ok(())
}
