//! Mahalanobis-distance strategy.
//!
//! Distances are computed against a diagonal-only pseudo-inverse of the
//! covariance matrix: off-diagonal covariance terms are dropped when
//! inverting, so correlated features are treated as independent. This is
//! an approximation inherited from the dashboard, not a true inverse.

use super::{column_means, covariance_matrix, most_deviant_feature, OutlierReport};
use crate::{Feature, Matrix, Vector};

pub(super) fn detect(x: &Matrix, labels: &[Feature]) -> Vec<OutlierReport> {
    let means = column_means(x);
    let cov = covariance_matrix(x);

    // Diagonal pseudo-inverse: 1/c_ii where nonzero, 0 elsewhere. A
    // zero-variance feature simply drops out of the distance.
    let inv_diag: Vector = cov
        .diag()
        .mapv(|c| if c != 0.0 { 1.0 / c } else { 0.0 });

    let distances: Vec<f64> = x
        .axis_iter(ndarray::Axis(0))
        .map(|row| {
            let mut sum = 0.0;
            for (j, &value) in row.iter().enumerate() {
                let diff = value - means[j];
                sum += diff * inv_diag[j] * diff;
            }
            sum.sqrt()
        })
        .collect();

    let n = distances.len() as f64;
    let mean_dist = distances.iter().sum::<f64>() / n;
    let std_dist = if distances.len() < 2 {
        0.0
    } else {
        (distances
            .iter()
            .map(|d| (d - mean_dist) * (d - mean_dist))
            .sum::<f64>()
            / (n - 1.0))
            .sqrt()
    };
    let threshold = mean_dist + 3.0 * std_dist;

    x.axis_iter(ndarray::Axis(0))
        .enumerate()
        .filter(|(i, _)| distances[*i] > threshold)
        .map(|(i, row)| {
            let (feature, deviation) = most_deviant_feature(&row, &means, labels);
            OutlierReport {
                index: i,
                score: distances[i],
                is_outlier: true,
                reason: format!(
                    "large deviation on {} (deviation: {:.2})",
                    feature.name(),
                    deviation
                ),
            }
        })
        .collect()
}
