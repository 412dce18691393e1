use crate::types::{RepEvent, VelocityTrend};

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() { return None; }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Populasjons-standardavvik.
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    Some(var.sqrt())
}

/// VL% = (første − laveste) / første · 100. 0 hvis første ≤ 0.
pub fn velocity_loss_pct(speeds: &[f64]) -> Option<f64> {
    let first = *speeds.first()?;
    if first <= 0.0 { return Some(0.0); }
    let min = speeds.iter().copied().fold(f64::INFINITY, f64::min);
    Some(((first - min) / first * 100.0).max(0.0))
}

/// Fatigue index = (maks − min) / maks · 100.
pub fn fatigue_index(speeds: &[f64]) -> f64 {
    if speeds.is_empty() { return 0.0; }
    let max = speeds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = speeds.iter().copied().fold(f64::INFINITY, f64::min);
    if max <= 0.0 { return 0.0; }
    (max - min) / max * 100.0
}

/// Minste-kvadraters stigning av fart mot rep-indeks.
pub fn speed_slope(speeds: &[f64]) -> Option<f64> {
    if speeds.len() < 2 { return None; }
    let n = speeds.len() as f64;
    let mx = (n - 1.0) / 2.0;
    let my = mean(speeds)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in speeds.iter().enumerate() {
        let dx = i as f64 - mx;
        sxy += dx * (y - my);
        sxx += dx * dx;
    }
    if sxx <= 0.0 { return None; }
    Some(sxy / sxx)
}

/// Trend over settet: declining / stable / increasing (±0.01 m/s per rep).
pub fn velocity_trend(speeds: &[f64]) -> VelocityTrend {
    let Some(slope) = speed_slope(speeds).filter(|s| s.is_finite()) else {
        return VelocityTrend {
            trend: "insufficient_data".to_string(),
            ..Default::default()
        };
    };
    let trend = if slope < -0.01 {
        "declining"
    } else if slope < 0.01 {
        "stable"
    } else {
        "increasing"
    };
    // første mot siste (ikke min) – skiller seg fra settets VL%
    let first = speeds[0];
    let last = speeds[speeds.len() - 1];
    let loss = if first > 0.0 { (first - last) / first * 100.0 } else { 0.0 };

    VelocityTrend {
        trend: trend.to_string(),
        slope,
        velocity_loss_pct: loss,
        mean_velocity: mean(speeds).unwrap_or(0.0),
        std_velocity: std_dev(speeds).unwrap_or(0.0),
    }
}

/// Andel reps (%) med ROM-treff.
pub fn rom_hit_rate(reps: &[RepEvent]) -> Option<f64> {
    if reps.is_empty() { return None; }
    let hits = reps.iter().filter(|r| r.metrics.rom_hit).count();
    Some(hits as f64 / reps.len() as f64 * 100.0)
}

/// Standardavvik av forflytning (cm) over reps med effort-blokk; krever minst to.
pub fn rom_variability_cm(reps: &[RepEvent]) -> Option<f64> {
    let disp: Vec<f64> = reps
        .iter()
        .filter_map(|r| r.effort().map(|e| e.displacement_m * 100.0))
        .collect();
    if disp.len() < 2 { return None; }
    std_dev(&disp)
}

pub fn mean_accuracy(reps: &[RepEvent]) -> Option<f64> {
    let scores: Vec<f64> = reps.iter().filter_map(|r| r.accuracy_score()).collect();
    mean(&scores)
}
