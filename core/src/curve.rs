//! Kanonisk kurve-rutenett og normalisering av en reps hastighetskurve.

use crate::physics::{EPS, PEAK_FLOOR};

/// Uniformt rutenett på [0,1] med `n` punkter.
pub fn unit_grid(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Lineær interpolasjon i en stigende `xs`. Klemmes i endene.
pub fn interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // binærsøk: xs[lo] <= x < xs[hi]
    let (mut lo, mut hi) = (0usize, n - 1);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let span = xs[hi] - xs[lo];
    if span < EPS {
        return ys[lo];
    }
    let f = (x - xs[lo]) / span;
    ys[lo] + f * (ys[hi] - ys[lo])
}

/// Indeks til første maksimum (0 for tom serie).
pub fn argmax(xs: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in xs.iter().enumerate() {
        if x > xs[best] {
            best = i;
        }
    }
    best
}

/// Indeks til første minimum fra og med `start`.
pub fn argmin_from(xs: &[f64], start: usize) -> usize {
    if start >= xs.len() {
        return xs.len().saturating_sub(1);
    }
    let mut best = start;
    for (i, &x) in xs.iter().enumerate().skip(start) {
        if x < xs[best] {
            best = i;
        }
    }
    best
}

/// Hastighet → kanonisk kurve: negative verdier klippes, resamples til
/// `grid_len` punkter uniformt i tid og deles på toppen.
pub fn normalize_rep(ts: &[f64], velocity: &[f64], grid_len: usize) -> Vec<f64> {
    let n = ts.len().min(velocity.len());
    if n == 0 {
        return vec![0.0; grid_len];
    }
    let clipped: Vec<f64> = velocity[..n].iter().map(|v| v.max(0.0)).collect();
    let (t0, t1) = (ts[0], ts[n - 1]);

    let resampled: Vec<f64> = unit_grid(grid_len)
        .into_iter()
        .map(|g| interp(&ts[..n], &clipped, t0 + (t1 - t0) * g))
        .collect();

    let peak = resampled.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(PEAK_FLOOR);
    resampled.into_iter().map(|x| x / peak).collect()
}
