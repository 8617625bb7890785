//! Clustering for student segmentation.
//!
//! `KMeans` partitions standardized survey vectors into k segments using
//! iterative centroid assignment/update. Clustering is best-effort and
//! heuristic: it never errors on degenerate data, and result quality
//! depends on the random initialization unless a seed is supplied.
//!
//! # Examples
//!
//! ```rust
//! use mindmetrics::KMeans;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.5, 2.0],
//!     [1.2, 1.1],
//!     [8.0, 8.0],
//!     [8.5, 8.2],
//!     [7.9, 8.4]
//! ];
//!
//! let mut kmeans = KMeans::new(2).max_iter(100).random_state(42);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), x.nrows());
//!
//! // Records grouped by cluster, in input order.
//! let groups = kmeans.groups().unwrap();
//! assert_eq!(groups.len(), 2);
//! ```

mod kmeans;

pub use kmeans::KMeans;
