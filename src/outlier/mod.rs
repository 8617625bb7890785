//! Outlier detection over raw survey feature vectors.
//!
//! Three interchangeable strategies score how anomalous each record is
//! relative to its cohort: a covariance-aware Mahalanobis distance, a
//! variance-based isolation-score approximation, and a per-feature
//! z-score. Detection is best-effort: fewer than 10 records yields an
//! empty report list, never an error.
//!
//! # Examples
//!
//! ```rust
//! use mindmetrics::{Feature, OutlierDetector, OutlierMethod};
//! use mindmetrics::Matrix;
//!
//! let mut x = Matrix::zeros((12, 2));
//! x[[3, 0]] = 100.0;
//!
//! let detector = OutlierDetector::new().method(OutlierMethod::ZScore);
//! let labels = [Feature::AcademicPressure, Feature::Cgpa];
//! let reports = detector.detect(&x, &labels).unwrap();
//!
//! assert_eq!(reports[0].index, 3);
//! assert!(reports[0].reason.contains("academic_pressure"));
//! ```

use crate::{Feature, Matrix, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;

mod isolation;
mod mahalanobis;
mod zscore;

/// Detection is skipped entirely below this many records.
pub const MIN_RECORDS: usize = 10;
/// At most this many reports come back, highest scores first.
pub const MAX_REPORTED: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutlierMethod {
    #[default]
    Mahalanobis,
    Isolation,
    ZScore,
}

/// One flagged record: its row index in the input matrix, a
/// method-dependent score, and a reason naming the most deviant feature.
#[derive(Clone, Debug)]
pub struct OutlierReport {
    pub index: usize,
    pub score: f64,
    pub is_outlier: bool,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct OutlierDetector {
    method: OutlierMethod,
    random_state: Option<u64>,
}

impl OutlierDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: OutlierMethod) -> Self {
        self.method = method;
        self
    }

    /// Seed for the isolation strategy's subsampling; the other two
    /// strategies are deterministic.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Scores every row of `x` and returns the flagged records, at most
    /// [`MAX_REPORTED`], sorted by descending score. `labels` must name
    /// the columns of `x` in order. Fewer than [`MIN_RECORDS`] rows
    /// yields an empty list.
    pub fn detect(&self, x: &Matrix, labels: &[Feature]) -> Result<Vec<OutlierReport>, String> {
        if labels.len() != x.ncols() {
            return Err(format!(
                "Number of labels ({}) doesn't match number of columns ({})",
                labels.len(),
                x.ncols()
            ));
        }

        if x.nrows() < MIN_RECORDS {
            return Ok(Vec::new());
        }

        let reports = match self.method {
            OutlierMethod::Mahalanobis => mahalanobis::detect(x, labels),
            OutlierMethod::Isolation => {
                let mut rng = match self.random_state {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                isolation::detect(x, labels, &mut rng)
            }
            OutlierMethod::ZScore => zscore::detect(x, labels),
        };

        Ok(rank_and_truncate(reports))
    }
}

fn rank_and_truncate(mut reports: Vec<OutlierReport>) -> Vec<OutlierReport> {
    reports.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    reports.truncate(MAX_REPORTED);
    reports
}

pub(crate) fn column_means(x: &Matrix) -> Vector {
    x.mean_axis(ndarray::Axis(0))
        .unwrap_or_else(|| Vector::zeros(x.ncols()))
}

/// Sample standard deviation per column, with zero replaced by 1.
pub(crate) fn column_stds(x: &Matrix) -> Vector {
    if x.nrows() < 2 {
        return Vector::ones(x.ncols());
    }
    x.std_axis(ndarray::Axis(0), 1.0)
        .mapv(|s| if s == 0.0 { 1.0 } else { s })
}

/// Sample covariance matrix of the columns of `x`.
pub(crate) fn covariance_matrix(x: &Matrix) -> Matrix {
    let n = x.nrows();
    let m = x.ncols();
    let mut cov = Matrix::zeros((m, m));
    if n < 2 {
        return cov;
    }

    let means = column_means(x);
    for i in 0..m {
        for j in i..m {
            let mut sum = 0.0;
            for r in 0..n {
                sum += (x[[r, i]] - means[i]) * (x[[r, j]] - means[j]);
            }
            let value = sum / (n - 1) as f64;
            cov[[i, j]] = value;
            cov[[j, i]] = value;
        }
    }

    cov
}

/// The feature whose raw value sits farthest from its column mean,
/// with that deviation's magnitude.
pub(crate) fn most_deviant_feature(
    row: &ndarray::ArrayView1<f64>,
    means: &Vector,
    labels: &[Feature],
) -> (Feature, f64) {
    let mut best = 0;
    let mut best_dev = f64::NEG_INFINITY;
    for (j, &value) in row.iter().enumerate() {
        let dev = (value - means[j]).abs();
        if dev > best_dev {
            best_dev = dev;
            best = j;
        }
    }
    (labels[best], best_dev)
}
