//! Feature standardization.
//!
//! ```rust
//! use mindmetrics::StandardScaler;
//! use ndarray::array;
//!
//! let data = array![[1.0, 2.0], [3.0, 2.0], [5.0, 2.0]];
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).unwrap();
//!
//! // The constant column comes out all-zero rather than NaN.
//! assert!(scaled.column(1).iter().all(|&v| v == 0.0));
//! ```

use crate::{Matrix, Vector};

/// Z-score normalizer: rescales each feature column to mean 0, std 1.
///
/// A column with zero standard deviation divides by 1 instead, so constant
/// features standardize to all-zero rather than NaN/Inf.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<(), String> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err("Input matrix must have at least one sample and one feature".to_string());
        }

        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or("Failed to compute mean")?;

        // Sample std (ddof = 1); undefined for a single row.
        let std = if data.nrows() < 2 {
            Vector::ones(data.ncols())
        } else {
            data.std_axis(ndarray::Axis(0), 1.0)
                .mapv(|s| if s == 0.0 { 1.0 } else { s })
        };

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix, String> {
        let mean = self
            .mean
            .as_ref()
            .ok_or("Scaler not fitted. Call fit() first.")?;
        let std = self
            .std
            .as_ref()
            .ok_or("Scaler not fitted. Call fit() first.")?;

        if data.ncols() != mean.len() {
            return Err(format!(
                "Number of features in X ({}) doesn't match fitted data ({})",
                data.ncols(),
                mean.len()
            ));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix, String> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Standardizes a single unseen vector with the fitted column stats.
    pub fn transform_vector(&self, vector: &Vector) -> Result<Vector, String> {
        let mean = self
            .mean
            .as_ref()
            .ok_or("Scaler not fitted. Call fit() first.")?;
        let std = self
            .std
            .as_ref()
            .ok_or("Scaler not fitted. Call fit() first.")?;

        if vector.len() != mean.len() {
            return Err(format!(
                "Vector length ({}) doesn't match fitted data ({})",
                vector.len(),
                mean.len()
            ));
        }

        Ok((vector - mean) / std)
    }

    /// Per-column means of the fitted data.
    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    /// Per-column standard deviations, with zero replaced by 1.
    pub fn std(&self) -> Option<&Vector> {
        self.std.as_ref()
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
