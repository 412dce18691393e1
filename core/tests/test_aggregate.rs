use liftgraph_core::aggregate::{accuracy_note, NO_REPS_TIP};
use liftgraph_core::{aggregate_set, coaching_tip, live_update, RepEvent, RepMetrics};

fn rep(i: usize, speed: f64, rom_hit: bool) -> RepEvent {
    RepEvent {
        id: format!("rep-{}", i),
        valid: true,
        metrics: RepMetrics { tut: 1.234, speed, vl: 0.0, rom_hit },
        ts: 0,
        ext: None,
    }
}

#[test]
fn test_empty_set() {
    let s = aggregate_set(&[]);
    assert_eq!(s.reps, 0);
    assert_eq!(s.tut, 0.0);
    assert_eq!(s.avg_speed, 0.0);
    assert_eq!(s.vl, 0.0);
    assert_eq!(s.rom_hit_rate, 0.0);
    assert_eq!(s.rom_variability, Some(0.0));
    assert_eq!(s.tip, NO_REPS_TIP);
    assert_eq!(s.velocity_trend.trend, "insufficient_data");
}

#[test]
fn test_single_rep_has_zero_vl() {
    let s = aggregate_set(&[rep(1, 0.55, true)]);
    assert_eq!(s.vl, 0.0);
    assert_eq!(s.reps, 1);
    assert_eq!(s.rom_variability, None);
    assert_eq!(
        s.tip,
        "Excellent speed consistency. You likely had 1 more reps in the tank. Consider adding load."
    );
}

#[test]
fn test_totals_and_rounding() {
    let reps = vec![rep(1, 0.8, true), rep(2, 0.7, true), rep(3, 0.6, false), rep(4, 0.5, true)];
    let s = aggregate_set(&reps);
    assert_eq!(s.tut, 4.94); // 4 × 1.234 = 4.936
    assert_eq!(s.avg_speed, 0.65);
    assert_eq!(s.vl, 37.5);
    assert_eq!(s.rom_hit_rate, 75.0);
    assert_eq!(s.fatigue_index, 37.5);
    assert_eq!(s.velocity_trend.trend, "declining");
    assert!((s.velocity_trend.slope + 0.1).abs() < 1e-9);
    assert!(s.tip.starts_with("High velocity loss detected."));
}

#[test]
fn test_tip_rule_order() {
    assert_eq!(
        coaching_tip(5, 5.0, 50.0, 0.1),
        "Excellent speed consistency. You likely had 3 more reps in the tank. Consider adding load."
    );
    assert_eq!(
        coaching_tip(5, 35.0, 50.0, 0.1),
        "High velocity loss detected. Great work pushing hard, but watch for form breakdown on future sets."
    );
    assert_eq!(
        coaching_tip(5, 20.0, 66.7, 0.5),
        "ROM hit rate was 66%. Focus on depth consistency next set. Quality over quantity."
    );
    assert_eq!(
        coaching_tip(5, 20.0, 100.0, 0.1),
        "Perfect ROM consistency! Your movement quality is excellent. Keep this up."
    );
    assert_eq!(
        coaching_tip(5, 20.0, 90.0, 0.25),
        "Bar speed is slowing down. Consider reducing load or increasing rest between sets."
    );
    assert_eq!(
        coaching_tip(5, 20.0, 90.0, 0.7),
        "Fast bar speed indicates room for load progression. Add 2.5-5% next session."
    );
    assert_eq!(
        coaching_tip(5, 20.9, 90.0, 0.45),
        "Solid set! VL at 20% with 90% ROM hits. Stay consistent."
    );
}

#[test]
fn test_zero_first_speed_gives_zero_vl() {
    let s = aggregate_set(&[rep(1, 0.0, true), rep(2, 0.3, true)]);
    assert_eq!(s.vl, 0.0);
}

#[test]
fn test_accuracy_note_buckets() {
    assert!(accuracy_note(91.0).contains("91% match"));
    assert!(accuracy_note(91.0).starts_with("Bar path matched"));
    assert!(accuracy_note(75.0).starts_with("Bar path mostly followed"));
    assert!(accuracy_note(40.0).starts_with("Bar path drifted"));
}

#[test]
fn test_live_update_snapshot() {
    let reps = vec![rep(1, 0.8, true), rep(2, 0.6, false)];
    let u = live_update(&reps);
    assert_eq!(u.reps_completed, 2);
    assert_eq!(u.avg_speed, 0.7);
    assert_eq!(u.vl, 25.0);
    assert_eq!(u.rom_hit_rate, 50.0);

    let json = serde_json::to_value(u).unwrap();
    assert_eq!(json["repsCompleted"], 2);
    assert!(json.get("romHitRate").is_some());
}
