use ordered_float::OrderedFloat;

/// Sentrert glidende snitt med kant-padding.
/// Indekser utenfor serien klemmes til første/siste sample, og vi deler alltid
/// på full vinduslengde slik at lengden bevares.
pub fn moving_average(xs: &[f64], window: usize) -> Vec<f64> {
    if xs.is_empty() {
        return Vec::new();
    }
    if window <= 1 {
        return xs.to_vec();
    }
    let n = xs.len() as isize;
    let k = (window / 2) as isize;
    let w = (2 * k + 1) as f64;

    (0..n)
        .map(|i| {
            let mut sum = 0.0;
            for j in (i - k)..=(i + k) {
                sum += xs[j.clamp(0, n - 1) as usize];
            }
            sum / w
        })
        .collect()
}

/// alpha = dt / (RC + dt), RC = 1 / (2π fc).
pub fn ema_alpha(cutoff_hz: f64, sample_rate_hz: f64) -> f64 {
    if !(cutoff_hz > 0.0 && sample_rate_hz > 0.0) {
        return 1.0;
    }
    let dt = 1.0 / sample_rate_hz;
    let rc = 1.0 / (2.0 * std::f64::consts::PI * cutoff_hz);
    dt / (rc + dt)
}

/// Eksponentielt lavpassfilter, seedet med første sample.
pub fn lowpass_ema(xs: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(xs.len());
    let mut prev = match xs.first() {
        Some(&x0) => x0,
        None => return out,
    };
    out.push(prev);
    for &x in &xs[1..] {
        prev += alpha * (x - prev);
        out.push(prev);
    }
    out
}

/// Median (snitt av de to midterste ved partall). None for tom serie.
pub fn median(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted: Vec<OrderedFloat<f64>> = xs.iter().copied().map(OrderedFloat).collect();
    sorted.sort();
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2].0)
    } else {
        Some(0.5 * (sorted[n / 2 - 1].0 + sorted[n / 2].0))
    }
}
