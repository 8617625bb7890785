//! Combined z-score strategy.
//!
//! Each record's score is its maximum absolute per-feature z-score; a
//! record clears the bar when that maximum exceeds 3.

use super::{column_means, column_stds, OutlierReport};
use crate::{Feature, Matrix};

const Z_THRESHOLD: f64 = 3.0;

pub(super) fn detect(x: &Matrix, labels: &[Feature]) -> Vec<OutlierReport> {
    let means = column_means(x);
    let stds = column_stds(x);

    x.axis_iter(ndarray::Axis(0))
        .enumerate()
        .filter_map(|(i, row)| {
            let mut max_z = f64::NEG_INFINITY;
            let mut max_feature = 0;
            for (j, &value) in row.iter().enumerate() {
                let z = ((value - means[j]) / stds[j]).abs();
                if z > max_z {
                    max_z = z;
                    max_feature = j;
                }
            }

            if max_z <= Z_THRESHOLD {
                return None;
            }
            Some(OutlierReport {
                index: i,
                score: max_z,
                is_outlier: true,
                reason: format!(
                    "extreme z-score on {} (z = {:.2})",
                    labels[max_feature].name(),
                    max_z
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::{OutlierDetector, OutlierMethod};
    use crate::{Feature, Matrix, CLUSTER_FEATURES};

    fn detect(x: &Matrix, labels: &[Feature]) -> Vec<super::OutlierReport> {
        OutlierDetector::new()
            .method(OutlierMethod::ZScore)
            .detect(x, labels)
            .unwrap()
    }

    #[test]
    fn test_extreme_academic_pressure_is_cited() {
        // 12 records over the 7 survey dimensions, all zeros except one
        // record with academic_pressure=100.
        let mut x = Matrix::zeros((12, 7));
        x[[5, 0]] = 100.0;

        let reports = detect(&x, &CLUSTER_FEATURES);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].index, 5);
        assert!(reports[0].score > 3.0);
        assert!(reports[0].reason.contains("academic_pressure"));
    }

    #[test]
    fn test_no_false_negatives_above_threshold() {
        // Every record whose max |z| exceeds 3 must be in the flagged set.
        let mut x = Matrix::zeros((40, 2));
        for i in 0..40 {
            x[[i, 1]] = (i % 4) as f64;
        }
        x[[13, 0]] = 250.0;

        let means = super::column_means(&x);
        let stds = super::column_stds(&x);
        let reports = detect(&x, &[Feature::AcademicPressure, Feature::Cgpa]);

        for i in 0..40 {
            let max_z = (0..2)
                .map(|j| ((x[[i, j]] - means[j]) / stds[j]).abs())
                .fold(f64::NEG_INFINITY, f64::max);
            if max_z > 3.0 {
                assert!(
                    reports.iter().any(|r| r.index == i),
                    "record {} with z={} was not flagged",
                    i,
                    max_z
                );
            }
        }
        assert!(!reports.is_empty());
    }

    #[test]
    fn test_constant_columns_flag_nothing() {
        let mut x = Matrix::zeros((12, 7));
        for i in 0..12 {
            x[[i, 2]] = 3.0;
        }
        assert!(detect(&x, &CLUSTER_FEATURES).is_empty());
    }

    #[test]
    fn test_moderate_spread_is_not_flagged() {
        let mut x = Matrix::zeros((20, 2));
        for i in 0..20 {
            x[[i, 0]] = (i % 5) as f64;
            x[[i, 1]] = (i % 2) as f64;
        }
        assert!(detect(&x, &[Feature::SleepDuration, Feature::Cgpa]).is_empty());
    }
}
