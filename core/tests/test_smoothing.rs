use liftgraph_core::smoothing::{ema_alpha, lowpass_ema, median, moving_average};

#[test]
fn test_moving_average_keeps_length_and_pads_edges() {
    let xs = [0.0, 0.0, 9.0, 0.0, 0.0];
    let out = moving_average(&xs, 3);
    assert_eq!(out.len(), xs.len());
    assert_eq!(out, vec![0.0, 3.0, 3.0, 3.0, 0.0]);

    // kant-padding: konstant serie forblir konstant helt ut i kantene
    let flat = moving_average(&[2.0; 7], 9);
    assert!(flat.iter().all(|x| (x - 2.0).abs() < 1e-12));
}

#[test]
fn test_spike_is_damped() {
    let mut xs = vec![1.0; 21];
    xs[10] = 50.0; // outlier
    let out = moving_average(&xs, 9);
    assert!(out[10] < 7.0);
}

#[test]
fn test_lowpass_tracks_constant_and_lags_step() {
    let alpha = ema_alpha(0.7, 50.0);
    assert!(alpha > 0.0 && alpha < 0.1);

    let out = lowpass_ema(&[9.81; 10], alpha);
    assert!(out.iter().all(|g| *g == 9.81));

    let mut step = vec![0.0; 5];
    step.extend(vec![1.0; 5]);
    let out = lowpass_ema(&step, alpha);
    assert!(out[9] > 0.0 && out[9] < 0.5, "lavpass skal henge etter: {}", out[9]);
    assert!(lowpass_ema(&[], alpha).is_empty());
}

#[test]
fn test_median_odd_even_empty() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&[]), None);
}
