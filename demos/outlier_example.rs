use mindmetrics::{extract_features, OutlierDetector, OutlierMethod, StudentRecord, CLUSTER_FEATURES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Outlier Detection Strategy Comparison ===\n");

    let mut records: Vec<StudentRecord> = (0..40)
        .map(|i| StudentRecord {
            id: i,
            academic_pressure: Some((i % 5) as f64),
            study_satisfaction: Some(((i + 1) % 5) as f64),
            sleep_duration: Some(6.0 + (i % 3) as f64),
            financial_stress: Some((i % 4) as f64),
            dietary_habits: Some((i % 3) as f64),
            work_study_hours: Some(2.0 + (i % 6) as f64),
            cgpa: Some(5.5 + (i % 5) as f64 * 0.5),
            ..Default::default()
        })
        .collect();

    // Two anomalies: absurd study hours, and a wildly spread profile.
    records[12].work_study_hours = Some(90.0);
    records[27].academic_pressure = Some(60.0);
    records[27].cgpa = Some(-30.0);

    let x = extract_features(&records, &CLUSTER_FEATURES);

    for method in [
        OutlierMethod::Mahalanobis,
        OutlierMethod::Isolation,
        OutlierMethod::ZScore,
    ] {
        println!("--- {:?} ---", method);
        let detector = OutlierDetector::new().method(method).random_state(7);
        let reports = detector.detect(&x, &CLUSTER_FEATURES)?;
        if reports.is_empty() {
            println!("no outliers flagged");
        }
        for report in reports {
            println!(
                "record {} (score {:.3}): {}",
                report.index, report.score, report.reason
            );
        }
        println!();
    }

    Ok(())
}
