//! Cheap 2D embedding for cluster scatter plots.
//!
//! Each axis is a fixed linear combination of the feature values with
//! trigonometric weights indexed by feature position. This is a plotting
//! aid, not PCA: it carries no accuracy contract beyond visually
//! separating clusters, and it never feeds cluster assignment.

use crate::Matrix;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct Projector {
    jitter: f64,
    random_state: Option<u64>,
}

impl Projector {
    pub fn new() -> Self {
        Self {
            jitter: 0.0,
            random_state: None,
        }
    }

    /// Uniform jitter amplitude for visual declumping; a point moves by at
    /// most half the amplitude on each axis. 0 disables jitter.
    pub fn jitter(mut self, jitter: f64) -> Self {
        if jitter < 0.0 {
            panic!("jitter must be >= 0, got {}", jitter);
        }
        self.jitter = jitter;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Maps each row of `x` to a 2D point: x-weights `cos(i*pi/M)`,
    /// y-weights `sin(i*pi/M)` for feature position i of M.
    pub fn project(&self, x: &Matrix) -> Result<Matrix, String> {
        if x.ncols() == 0 {
            return Err("Input matrix must have at least one feature".to_string());
        }

        let m = x.ncols() as f64;
        let mut projected = Matrix::zeros((x.nrows(), 2));

        for (i, row) in x.axis_iter(ndarray::Axis(0)).enumerate() {
            let mut px = 0.0;
            let mut py = 0.0;
            for (j, &value) in row.iter().enumerate() {
                let angle = j as f64 * std::f64::consts::PI / m;
                px += value * angle.cos();
                py += value * angle.sin();
            }
            projected[[i, 0]] = px;
            projected[[i, 1]] = py;
        }

        if self.jitter > 0.0 {
            let mut rng = match self.random_state {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let half = self.jitter / 2.0;
            let noise = Matrix::random_using((x.nrows(), 2), Uniform::new(-half, half), &mut rng);
            projected += &noise;
        }

        Ok(projected)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}
