use mindmetrics::{AnalysisConfig, AnalysisSession, OutlierMethod, StudentRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Student Survey Analysis Pipeline ===\n");

    // Two synthetic student profiles: a high-pressure cohort and a
    // balanced cohort, plus one extreme record.
    let mut records = Vec::new();
    for i in 0..30 {
        records.push(StudentRecord {
            id: i,
            academic_pressure: Some(4.0 + (i % 2) as f64),
            study_satisfaction: Some(1.0 + (i % 2) as f64),
            sleep_duration: Some(4.0 + (i % 3) as f64 * 0.5),
            financial_stress: Some(4.0),
            dietary_habits: Some(1.0),
            work_study_hours: Some(9.0 + (i % 3) as f64),
            cgpa: Some(6.0 + (i % 4) as f64 * 0.25),
            depression: i % 2 == 0,
            ..Default::default()
        });
    }
    for i in 30..60 {
        records.push(StudentRecord {
            id: i,
            academic_pressure: Some(1.0 + (i % 2) as f64),
            study_satisfaction: Some(4.0),
            sleep_duration: Some(7.0 + (i % 3) as f64 * 0.5),
            financial_stress: Some(1.0 + (i % 2) as f64),
            dietary_habits: Some(4.0),
            work_study_hours: Some(3.0 + (i % 3) as f64),
            cgpa: Some(8.0 + (i % 4) as f64 * 0.25),
            depression: i % 10 == 0,
            ..Default::default()
        });
    }
    records[45].work_study_hours = Some(80.0); // data-entry glitch

    let config = AnalysisConfig {
        n_clusters: 2,
        method: OutlierMethod::ZScore,
        random_state: Some(42),
        ..Default::default()
    };
    let mut session = AnalysisSession::with_config(records, config);
    session.run()?;

    println!("--- Cluster summaries ---");
    for summary in session.cluster_summaries().unwrap() {
        println!(
            "cluster {}: {} students, {:.1}% depression, mean CGPA {:.2}, mean satisfaction {:.1}",
            summary.cluster_id,
            summary.size,
            summary.depression_rate,
            summary.mean_cgpa,
            summary.mean_study_satisfaction
        );
    }

    println!("\n--- Outliers ---");
    for report in session.outliers().unwrap() {
        println!(
            "record {} (score {:.2}): {}",
            report.index, report.score, report.reason
        );
    }

    println!("\n--- Strongest correlations ---");
    let matrix = session.correlation()?;
    for (a, b, r) in matrix.strongest_pairs().into_iter().take(3) {
        println!("{} vs {}: {:+.2}", a.name(), b.name(), r);
    }

    println!("\n--- 2D projection (first 5 points) ---");
    for point in session.projection().unwrap().iter().take(5) {
        println!("record {}: ({:.2}, {:.2})", point.id, point.x, point.y);
    }

    Ok(())
}
