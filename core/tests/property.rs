mod common;

use common::linspace;
use liftgraph_core::compare::dtw_distance;
use liftgraph_core::{PipelineConfig, RepAnalyzer};
use proptest::prelude::*;

prop_compose! {
    fn curve_pair()(n in 2usize..40)(
        a in prop::collection::vec(0.0f64..1.0, n),
        b in prop::collection::vec(0.0f64..1.0, n),
    ) -> (Vec<f64>, Vec<f64>) {
        (a, b)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dtw_is_symmetric((a, b) in curve_pair()) {
        let ab = dtw_distance(&a, &b);
        let ba = dtw_distance(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12, "ab={} ba={}", ab, ba);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn score_and_rom_stay_in_range(
        v in prop::collection::vec(-3.0f64..3.0, 8..120),
        acc in prop::collection::vec(-20.0f64..20.0, 120),
        lift in prop::sample::select(vec!["bench", "back squat", "deadlift", "curl"]),
    ) {
        let mut a = RepAnalyzer::new(PipelineConfig { include_series: false, ..Default::default() }).unwrap();
        let t = linspace(0.0, 0.02 * (v.len() - 1) as f64, v.len());
        let acc = &acc[..v.len()];
        // to reps: andre rep bruker baseline fra første
        for _ in 0..2 {
            let ev = a.analyze_rep("rep-1".into(), lift, &t, acc, &v);
            let ext = ev.ext.expect("ext");
            prop_assert!((0.0..=100.0).contains(&ext.accuracy_score), "score={}", ext.accuracy_score);
            prop_assert!((0.0..=1.2).contains(&ext.effort.rom_pct), "rom={}", ext.effort.rom_pct);
            prop_assert!(ev.metrics.speed >= 0.0 && ev.metrics.tut >= 0.0);
        }
    }
}
