//! Pairwise Pearson correlation over the survey feature columns.
//!
//! ```rust
//! use mindmetrics::{CorrelationMatrix, Feature};
//! use ndarray::array;
//!
//! let x = array![[1.0, -1.0], [2.0, -2.0], [3.0, -3.0]];
//! let features = [Feature::AcademicPressure, Feature::StudySatisfaction];
//! let matrix = CorrelationMatrix::compute(&x, &features).unwrap();
//!
//! assert!((matrix.get(0, 1) + 1.0).abs() < 1e-12);
//! ```

use crate::{Feature, Matrix};
use std::cmp::Ordering;

/// Pearson correlation coefficient between two equal-length series.
/// Returns 0 when either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;

    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    if den_x == 0.0 || den_y == 0.0 {
        0.0
    } else {
        num / (den_x * den_y).sqrt()
    }
}

/// Symmetric matrix of pairwise Pearson coefficients, with the ordered
/// feature-label list it was computed over.
#[derive(Clone, Debug)]
pub struct CorrelationMatrix {
    values: Matrix,
    labels: Vec<Feature>,
}

impl CorrelationMatrix {
    /// Computes the M x M coefficient matrix for an N x M feature matrix.
    /// `labels` must name the columns of `x` in order.
    pub fn compute(x: &Matrix, labels: &[Feature]) -> Result<Self, String> {
        if labels.len() != x.ncols() {
            return Err(format!(
                "Number of labels ({}) doesn't match number of columns ({})",
                labels.len(),
                x.ncols()
            ));
        }

        let m = x.ncols();
        let mut values = Matrix::zeros((m, m));

        for i in 0..m {
            values[[i, i]] = 1.0;
            let col_i: Vec<f64> = x.column(i).to_vec();
            for j in (i + 1)..m {
                let col_j: Vec<f64> = x.column(j).to_vec();
                let r = pearson(&col_i, &col_j);
                values[[i, j]] = r;
                values[[j, i]] = r;
            }
        }

        Ok(Self {
            values,
            labels: labels.to_vec(),
        })
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    pub fn labels(&self) -> &[Feature] {
        &self.labels
    }

    pub fn values(&self) -> &Matrix {
        &self.values
    }

    /// Off-diagonal feature pairs ordered by descending absolute
    /// coefficient; feeds the "key correlations" insight panel.
    pub fn strongest_pairs(&self) -> Vec<(Feature, Feature, f64)> {
        let m = self.labels.len();
        let mut pairs = Vec::new();

        for i in 0..m {
            for j in (i + 1)..m {
                pairs.push((self.labels[i], self.labels[j], self.values[[i, j]]));
            }
        }

        pairs.sort_by(|a, b| {
            b.2.abs()
                .partial_cmp(&a.2.abs())
                .unwrap_or(Ordering::Equal)
        });
        pairs
    }
}
