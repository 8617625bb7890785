//! Owned analysis pipeline over the current dataset.
//!
//! The dashboard this core serves once kept `studentData` and `clusters`
//! in shared module globals; here the dataset, configuration, and all
//! derived results live in one `AnalysisSession` passed explicitly to
//! callers. A `run()` re-derives everything and replaces each record's
//! `cluster_id`/`outlier_score` atomically per run.

use crate::cluster::KMeans;
use crate::correlation::CorrelationMatrix;
use crate::outlier::{OutlierDetector, OutlierMethod, OutlierReport};
use crate::preprocessing::StandardScaler;
use crate::projection::Projector;
use crate::record::{extract_features, Feature, StudentRecord, CLUSTER_FEATURES};
use crate::Matrix;

/// Pipeline-level configuration surface.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub n_clusters: usize,
    pub max_iter: usize,
    pub method: OutlierMethod,
    pub features: Vec<Feature>,
    /// Jitter amplitude for the 2D projection.
    pub jitter: f64,
    /// Seed for clustering, projection jitter, and isolation subsampling;
    /// omit for true randomness.
    pub random_state: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            max_iter: 100,
            method: OutlierMethod::Mahalanobis,
            features: CLUSTER_FEATURES.to_vec(),
            jitter: 0.5,
            random_state: None,
        }
    }
}

/// 2D plot coordinates keyed by record id.
#[derive(Clone, Copy, Debug)]
pub struct ProjectedPoint {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// Per-cluster headline stats for the dashboard KPI strip.
#[derive(Clone, Debug)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub size: usize,
    /// Share of members with depression, in percent.
    pub depression_rate: f64,
    pub mean_cgpa: f64,
    pub mean_study_satisfaction: f64,
}

#[derive(Clone, Debug)]
pub struct AnalysisSession {
    records: Vec<StudentRecord>,
    config: AnalysisConfig,
    scaler: Option<StandardScaler>,
    groups: Option<Vec<Vec<usize>>>,
    projection: Option<Vec<ProjectedPoint>>,
    outliers: Option<Vec<OutlierReport>>,
}

impl AnalysisSession {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self::with_config(records, AnalysisConfig::default())
    }

    pub fn with_config(records: Vec<StudentRecord>, config: AnalysisConfig) -> Self {
        Self {
            records,
            config,
            scaler: None,
            groups: None,
            projection: None,
            outliers: None,
        }
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.config.random_state = Some(random_state);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Runs the full pipeline: extract, standardize, cluster, project,
    /// then per-cluster outlier detection. Derived record fields are
    /// cleared up front so a re-run replaces them, never merges.
    pub fn run(&mut self) -> Result<(), String> {
        if self.config.n_clusters == 0 {
            return Err("n_clusters must be > 0".to_string());
        }

        for record in &mut self.records {
            record.cluster_id = None;
            record.outlier_score = None;
        }

        if self.records.is_empty() {
            self.scaler = None;
            self.groups = Some(Vec::new());
            self.projection = Some(Vec::new());
            self.outliers = Some(Vec::new());
            return Ok(());
        }

        let raw = extract_features(&self.records, &self.config.features);
        let mut scaler = StandardScaler::new();
        let standardized = scaler.fit_transform(&raw)?;

        let mut kmeans = KMeans::new(self.config.n_clusters).max_iter(self.config.max_iter);
        if let Some(seed) = self.config.random_state {
            kmeans = kmeans.random_state(seed);
        }
        let labels = kmeans.fit_predict(&standardized)?;
        for (record, &label) in self.records.iter_mut().zip(labels.iter()) {
            record.cluster_id = Some(label);
        }
        let groups = kmeans.groups().ok_or("KMeans produced no partition")?;

        let mut projector = Projector::new().jitter(self.config.jitter);
        if let Some(seed) = self.config.random_state {
            projector = projector.random_state(seed);
        }
        let coords = projector.project(&standardized)?;
        let projection = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| ProjectedPoint {
                id: record.id,
                x: coords[[i, 0]],
                y: coords[[i, 1]],
            })
            .collect();

        let mut outliers = Vec::new();
        for members in &groups {
            let reports = self.detect_in_cluster(&raw, members)?;
            for mut report in reports {
                // Remap from the cluster submatrix back to the dataset.
                let record_index = members[report.index];
                report.index = record_index;
                self.records[record_index].outlier_score = Some(report.score);
                outliers.push(report);
            }
        }

        self.scaler = Some(scaler);
        self.groups = Some(groups);
        self.projection = Some(projection);
        self.outliers = Some(outliers);
        Ok(())
    }

    fn detect_in_cluster(
        &self,
        raw: &Matrix,
        members: &[usize],
    ) -> Result<Vec<OutlierReport>, String> {
        let sub = Matrix::from_shape_fn((members.len(), raw.ncols()), |(i, j)| {
            raw[[members[i], j]]
        });

        let mut detector = OutlierDetector::new().method(self.config.method);
        if let Some(seed) = self.config.random_state {
            detector = detector.random_state(seed);
        }
        detector.detect(&sub, &self.config.features)
    }

    /// Record indices per cluster, in input order. `None` until run.
    pub fn clusters(&self) -> Option<&[Vec<usize>]> {
        self.groups.as_deref()
    }

    /// 2D points keyed by record id. `None` until run.
    pub fn projection(&self) -> Option<&[ProjectedPoint]> {
        self.projection.as_deref()
    }

    /// Flagged records across all clusters; `index` is the record's
    /// position in the dataset. `None` until run.
    pub fn outliers(&self) -> Option<&[OutlierReport]> {
        self.outliers.as_deref()
    }

    /// The scaler fitted on the current dataset, for standardizing
    /// unseen vectors consistently. `None` until run.
    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    /// Pairwise Pearson correlations over the configured features of the
    /// current dataset.
    pub fn correlation(&self) -> Result<CorrelationMatrix, String> {
        let raw = extract_features(&self.records, &self.config.features);
        CorrelationMatrix::compute(&raw, &self.config.features)
    }

    /// Headline stats per cluster. `None` until run.
    pub fn cluster_summaries(&self) -> Option<Vec<ClusterSummary>> {
        let groups = self.groups.as_ref()?;

        let summaries = groups
            .iter()
            .enumerate()
            .map(|(cluster_id, members)| {
                let size = members.len();
                let depressed = members
                    .iter()
                    .filter(|&&i| self.records[i].depression)
                    .count();
                let depression_rate = if size > 0 {
                    depressed as f64 / size as f64 * 100.0
                } else {
                    0.0
                };

                ClusterSummary {
                    cluster_id,
                    size,
                    depression_rate,
                    mean_cgpa: mean_present(members.iter().map(|&i| self.records[i].cgpa)),
                    mean_study_satisfaction: mean_present(
                        members.iter().map(|&i| self.records[i].study_satisfaction),
                    ),
                }
            })
            .collect();

        Some(summaries)
    }
}

/// Mean over present values only, 0.0 when none are present.
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.flatten() {
        sum += value;
        count += 1;
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
