mod common;

use common::linspace;
use liftgraph_core::compare::{dtw_distance, extract_features, feature_error, pearson, rmse};
use liftgraph_core::{LiftProfile, PipelineConfig, RepAnalyzer};

#[test]
fn test_reference_shaped_rep_scores_near_perfect() {
    for (label, profile) in [
        ("bench", LiftProfile::Bench),
        ("back squat", LiftProfile::Squat),
        ("conventional deadlift", LiftProfile::Deadlift),
    ] {
        let mut a = RepAnalyzer::new(PipelineConfig::default()).unwrap();
        let t = linspace(0.0, 2.0, 200);
        let v: Vec<f64> = profile.curve(200).iter().map(|x| 0.6 * x).collect();
        // positiv akselerasjon → positiv forflytning og ROM-treff
        let acc = vec![1.0; 200];

        let ev = a.analyze_rep("rep-1".into(), label, &t, &acc, &v);
        let ext = ev.ext.as_ref().expect("ext");
        let c = &ext.comparison;
        assert!(c.rmse < 1e-6, "{}: rmse={}", label, c.rmse);
        assert!(c.correlation > 0.999_999, "{}: r={}", label, c.correlation);
        assert!(c.dtw < 1e-6, "{}: dtw={}", label, c.dtw);
        assert_eq!(c.shift_samples, 0);
        assert!(ext.accuracy_score >= 99.0, "{}: score={}", label, ext.accuracy_score);

        assert!((ev.metrics.tut - 2.0).abs() < 1e-12);
        assert!(ev.metrics.speed > 0.0);
        assert!(ev.metrics.rom_hit);
    }
}

#[test]
fn test_wrong_profile_scores_lower() {
    let mut a = RepAnalyzer::new(PipelineConfig::default()).unwrap();
    let t = linspace(0.0, 2.0, 200);
    // tidlig topp, lang hale: ligner ingen av referansene
    let v: Vec<f64> = t.iter().map(|x| (x / 0.3) * (-(x / 0.3)).exp()).collect();
    let acc = vec![0.0; 200];
    let ev = a.analyze_rep("rep-1".into(), "bench", &t, &acc, &v);
    let score = ev.accuracy_score().unwrap();
    assert!(score < 99.0, "score={}", score);
    assert!((0.0..=100.0).contains(&score));
}

#[test]
fn test_rmse_and_correlation_basics() {
    let a = [0.0, 1.0, 0.0, 1.0];
    let b = [1.0, 0.0, 1.0, 0.0];
    assert!((rmse(&a, &b) - 1.0).abs() < 1e-12);
    assert!((pearson(&a, &b) + 1.0).abs() < 1e-12);
    assert_eq!(rmse(&[], &[]), 0.0);
}

#[test]
fn test_dtw_absorbs_time_shift_better_than_rmse() {
    let r = LiftProfile::Bench.curve(200);
    let mut shifted = vec![0.0; 10];
    shifted.extend_from_slice(&r[..190]);
    assert!(dtw_distance(&shifted, &r) < rmse(&shifted, &r));
    assert_eq!(dtw_distance(&r, &[]), 0.0);
}

#[test]
fn test_features_of_reference() {
    let r = LiftProfile::Bench.curve(200);
    let f = extract_features(&r);
    assert!((f.t_peak - 74.0 / 199.0).abs() < 1e-12);
    assert_eq!(feature_error(&f, &f), 0.0);
    assert!(f.dip_depth > 0.0);
}
