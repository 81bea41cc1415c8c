use risk_register::register::{
    aggregate, classify, Classification, RiskId, RiskLevel, RiskRecord,
};

#[test]
fn boundary_scores_classify_exactly() {
    let table = [
        (1, 1, 1.0, RiskLevel::Low),
        (1, 4, 4.0, RiskLevel::Low),
        (1, 5, 5.0, RiskLevel::Medium),
        (2, 5, 10.0, RiskLevel::Medium),
        (3, 4, 12.0, RiskLevel::High),
        (4, 5, 20.0, RiskLevel::High),
        (5, 5, 25.0, RiskLevel::Critical),
    ];

    for (probability, impact, score, level) in table {
        let result = Classification::for_record(probability, impact);
        assert_eq!((result.score, result.level), (score, level));
    }
}

#[test]
fn full_scale_grid_aggregates_consistently() {
    let records: Vec<RiskRecord> = (1..=5u8)
        .flat_map(|probability| (1..=5u8).map(move |impact| (probability, impact)))
        .enumerate()
        .map(|(idx, (probability, impact))| {
            RiskRecord::new(RiskId(idx as u64 + 1), None, probability, impact)
        })
        .collect();

    let counts = aggregate(&records);

    assert_eq!(counts.total, 25);
    assert_eq!(
        counts.critical + counts.high + counts.medium + counts.low,
        counts.total
    );
    assert_eq!(counts.critical, 1);
    assert_eq!(counts.high, 7);
    assert!(records.iter().all(RiskRecord::is_consistent));
}

#[test]
fn classifier_is_total_over_floats() {
    for value in [f64::NAN, f64::INFINITY, -1.0, 0.0, 1e9] {
        let _ = classify(value, value);
    }
    assert_eq!(classify(f64::INFINITY, 1.0).level, RiskLevel::Critical);
}
