// core/src/physics.rs
use crate::smoothing::{median, moving_average};

pub const EPS: f64 = 1e-9;          // numerisk null for spenn/varians
pub const PEAK_FLOOR: f64 = 1e-6;   // gulv for toppverdier vi deler på

// --- RoundTo trait (offentlig, brukt av aggregate) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Kumulativ trapesintegrasjon. out[0] = 0, samme lengde som inngangen.
pub fn cumulative_trapezoid(ys: &[f64], ts: &[f64]) -> Vec<f64> {
    let n = ys.len().min(ts.len());
    let mut out = vec![0.0; n];
    for i in 1..n {
        let dt = ts[i] - ts[i - 1];
        out[i] = out[i - 1] + 0.5 * (ys[i] + ys[i - 1]) * dt;
    }
    out
}

/// Totalt trapesareal (0 for færre enn to punkter).
pub fn trapezoid_area(ys: &[f64], ts: &[f64]) -> f64 {
    cumulative_trapezoid(ys, ts).last().copied().unwrap_or(0.0)
}

/// Trekker fra minste-kvadraters rett linje (mot tid).
/// Degenerert tidsakse → bare middelverdien trekkes fra.
pub fn remove_linear_drift(ys: &[f64], ts: &[f64]) -> Vec<f64> {
    let n = ys.len().min(ts.len());
    if n < 2 {
        return ys[..n].to_vec();
    }
    let nf = n as f64;
    let mt = ts[..n].iter().sum::<f64>() / nf;
    let my = ys[..n].iter().sum::<f64>() / nf;
    let sxx: f64 = ts[..n].iter().map(|t| (t - mt).powi(2)).sum();
    if sxx < EPS {
        return ys[..n].iter().map(|y| y - my).collect();
    }
    let sxy: f64 = (0..n).map(|i| (ts[i] - mt) * (ys[i] - my)).sum();
    let b = sxy / sxx;
    let a = my - b * mt;
    (0..n).map(|i| ys[i] - (a + b * ts[i])).collect()
}

/// Akselerasjon → hastighet.
/// 1) trapesintegrasjon 2) fjern lineær drift 3) glatt 4) null-ankring mot
/// medianen av de første 10 % 5) snu fortegn slik at konsentrisk fase er positiv.
pub fn integrate_velocity(acc: &[f64], ts: &[f64], smoothing_window: usize) -> Vec<f64> {
    if acc.is_empty() || ts.is_empty() {
        return Vec::new();
    }
    let raw = cumulative_trapezoid(acc, ts);
    let detrended = remove_linear_drift(&raw, ts);
    let mut v = moving_average(&detrended, smoothing_window);

    let head = (v.len() / 10).max(1);
    let base = median(&v[..head]).unwrap_or(0.0);
    for x in v.iter_mut() {
        *x -= base;
    }

    let mean = v.iter().sum::<f64>() / v.len() as f64;
    if mean < 0.0 {
        for x in v.iter_mut() {
            *x = -*x;
        }
    }
    v
}

/// Rå hastighet for ett rep-vindu: integral av vinduets egen akselerasjon,
/// null i første sample. Ingen detrend, glatting eller fortegnsvending.
pub fn raw_rep_velocity(acc: &[f64], ts: &[f64]) -> Vec<f64> {
    cumulative_trapezoid(acc, ts)
}

/// Posisjon fra (ikke-detrendet) hastighet, første sample = 0.
#[inline]
pub fn displacement_series(velocity: &[f64], ts: &[f64]) -> Vec<f64> {
    cumulative_trapezoid(velocity, ts)
}

/// Største positive forflytning i repen (m), aldri negativ.
pub fn peak_displacement(velocity: &[f64], ts: &[f64]) -> f64 {
    let d = displacement_series(velocity, ts)
        .into_iter()
        .fold(0.0_f64, f64::max);
    if d.is_finite() { d } else { 0.0 }
}
