//! Analytics core for a student mental-health survey dataset.
//!
//! The crate takes flat survey records and produces cluster assignments,
//! a 2D embedding for plotting, outlier reports, and pairwise feature
//! correlations. All heavy lifting runs synchronously on the calling
//! thread; rendering and data loading live outside this crate.
//!
//! ```rust
//! use mindmetrics::{AnalysisSession, StudentRecord};
//!
//! let records: Vec<StudentRecord> = (0..20)
//!     .map(|i| StudentRecord {
//!         id: i,
//!         academic_pressure: Some((i % 5) as f64),
//!         cgpa: Some(6.0 + (i % 4) as f64),
//!         ..Default::default()
//!     })
//!     .collect();
//!
//! let mut session = AnalysisSession::new(records).random_state(7);
//! session.run().unwrap();
//! assert!(session.records().iter().all(|r| r.cluster_id.is_some()));
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod correlation;
pub mod outlier;
pub mod preprocessing;
pub mod projection;
pub mod record;
pub mod session;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use cluster::KMeans;
pub use correlation::CorrelationMatrix;
pub use outlier::{OutlierDetector, OutlierMethod, OutlierReport};
pub use preprocessing::StandardScaler;
pub use projection::Projector;
pub use record::{extract_features, Feature, StudentRecord, CLUSTER_FEATURES};
pub use session::{AnalysisConfig, AnalysisSession, ClusterSummary};
