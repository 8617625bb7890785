//! Survey record data model and feature extraction.
//!
//! A `StudentRecord` is created once at load time from a parsed survey row
//! and lives until the dataset is replaced. The pipeline writes exactly two
//! derived fields back onto it: `cluster_id` and `outlier_score`.

use crate::Matrix;

/// Ordered numeric survey dimensions the pipeline can read from a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    AcademicPressure,
    StudySatisfaction,
    SleepDuration,
    FinancialStress,
    DietaryHabits,
    WorkStudyHours,
    Cgpa,
}

impl Feature {
    /// The snake_case key this dimension carries in the survey CSV.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::AcademicPressure => "academic_pressure",
            Feature::StudySatisfaction => "study_satisfaction",
            Feature::SleepDuration => "sleep_duration",
            Feature::FinancialStress => "financial_stress",
            Feature::DietaryHabits => "dietary_habits",
            Feature::WorkStudyHours => "work_study_hours",
            Feature::Cgpa => "cgpa",
        }
    }
}

/// The fixed 7-dimension list used for clustering and correlation.
pub const CLUSTER_FEATURES: [Feature; 7] = [
    Feature::AcademicPressure,
    Feature::StudySatisfaction,
    Feature::SleepDuration,
    Feature::FinancialStress,
    Feature::DietaryHabits,
    Feature::WorkStudyHours,
    Feature::Cgpa,
];

/// One student's survey response.
///
/// Numeric fields are `Option` because survey rows routinely come in with
/// gaps; a missing value reads as 0.0 at the feature-extraction boundary.
#[derive(Clone, Debug, Default)]
pub struct StudentRecord {
    pub id: usize,
    pub age: Option<f64>,
    pub academic_pressure: Option<f64>,
    pub study_satisfaction: Option<f64>,
    pub sleep_duration: Option<f64>,
    pub financial_stress: Option<f64>,
    pub dietary_habits: Option<f64>,
    pub work_study_hours: Option<f64>,
    pub cgpa: Option<f64>,
    pub depression: bool,
    pub has_suicidal_thoughts: bool,
    pub family_history: bool,
    pub city: String,
    pub gender: String,
    pub degree: String,
    /// Set by the clustering stage; `None` until a pipeline run completes.
    pub cluster_id: Option<usize>,
    /// Set by the outlier stage for flagged records only.
    pub outlier_score: Option<f64>,
}

impl StudentRecord {
    /// Reads a numeric dimension, defaulting missing values to 0.0.
    pub fn feature(&self, feature: Feature) -> f64 {
        let value = match feature {
            Feature::Age => self.age,
            Feature::AcademicPressure => self.academic_pressure,
            Feature::StudySatisfaction => self.study_satisfaction,
            Feature::SleepDuration => self.sleep_duration,
            Feature::FinancialStress => self.financial_stress,
            Feature::DietaryHabits => self.dietary_habits,
            Feature::WorkStudyHours => self.work_study_hours,
            Feature::Cgpa => self.cgpa,
        };
        value.unwrap_or(0.0)
    }

    /// Weighted 0-100 risk factor score used by the profile view.
    pub fn risk_score(&self) -> u32 {
        let mut score = 0;

        if self.depression {
            score += 30;
        }
        if self.has_suicidal_thoughts {
            score += 25;
        }
        if self.feature(Feature::AcademicPressure) >= 4.0 {
            score += 15;
        }
        if self.sleep_duration.is_some_and(|h| h <= 2.0) {
            score += 15;
        }
        if self.feature(Feature::FinancialStress) >= 4.0 {
            score += 10;
        }
        if self.family_history {
            score += 5;
        }

        score.min(100)
    }
}

/// Projects each record onto the given ordered feature list.
///
/// Returns an N x M raw feature matrix. Always succeeds; missing values
/// become 0.0.
pub fn extract_features(records: &[StudentRecord], features: &[Feature]) -> Matrix {
    Matrix::from_shape_fn((records.len(), features.len()), |(i, j)| {
        records[i].feature(features[j])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_default_to_zero() {
        let record = StudentRecord::default();
        assert_eq!(record.feature(Feature::Cgpa), 0.0);
        assert_eq!(record.feature(Feature::AcademicPressure), 0.0);
    }

    #[test]
    fn test_extract_features_shape_and_order() {
        let records = vec![
            StudentRecord {
                academic_pressure: Some(3.0),
                cgpa: Some(8.5),
                ..Default::default()
            },
            StudentRecord {
                academic_pressure: Some(1.0),
                ..Default::default()
            },
        ];

        let matrix = extract_features(&records, &CLUSTER_FEATURES);
        assert_eq!(matrix.shape(), &[2, 7]);
        assert_eq!(matrix[[0, 0]], 3.0); // academic_pressure
        assert_eq!(matrix[[0, 6]], 8.5); // cgpa
        assert_eq!(matrix[[1, 6]], 0.0); // missing cgpa
    }

    #[test]
    fn test_risk_score_weights() {
        let record = StudentRecord {
            depression: true,
            has_suicidal_thoughts: true,
            academic_pressure: Some(5.0),
            sleep_duration: Some(2.0),
            financial_stress: Some(4.0),
            family_history: true,
            ..Default::default()
        };
        assert_eq!(record.risk_score(), 100);

        let calm = StudentRecord {
            academic_pressure: Some(2.0),
            sleep_duration: Some(7.0),
            ..Default::default()
        };
        assert_eq!(calm.risk_score(), 0);
    }

    #[test]
    fn test_risk_score_caps_at_100() {
        // All factors together sum to exactly 100, so the cap only matters
        // if weights change; still assert the bound holds.
        let record = StudentRecord {
            depression: true,
            has_suicidal_thoughts: true,
            academic_pressure: Some(4.0),
            sleep_duration: Some(1.0),
            financial_stress: Some(5.0),
            family_history: true,
            ..Default::default()
        };
        assert!(record.risk_score() <= 100);
    }

    #[test]
    fn test_missing_sleep_is_not_low_sleep() {
        // A missing sleep_duration reads as 0.0 for clustering, but must not
        // count as the <= 2h risk factor.
        let record = StudentRecord::default();
        assert_eq!(record.risk_score(), 0);
    }
}
