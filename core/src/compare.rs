use crate::align::ncc;
use crate::config::ScoreWeights;
use crate::curve::{argmax, argmin_from, unit_grid};
use crate::types::CurveFeatures;

// Normaliseringsskalaer for scoren
const RMSE_SCALE: f64 = 0.30;
const DTW_SCALE: f64 = 0.30;
const FEATURE_SCALE: f64 = 0.50;
// Sen/tidlig topp: straff starter ved 0.20 og er full (10 %) ved 0.50
const PEAK_SHIFT_START: f64 = 0.20;
const PEAK_SHIFT_SPAN: f64 = 0.30;
const PEAK_SHIFT_MAX_PENALTY: f64 = 0.10;

#[inline]
fn clip01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

pub fn rmse(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let ss: f64 = (0..n).map(|i| (a[i] - b[i]).powi(2)).sum();
    (ss / n as f64).sqrt()
}

/// Pearson-korrelasjon klippet til [−1, 1]. Flate kurver gir 0.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    ncc(a, b).clamp(-1.0, 1.0)
}

/// DTW-avstand med |a_i − b_j| som kostnad, normalisert med (n + m).
/// To rullende rader; O(n·m) tid, O(m) minne.
pub fn dtw_distance(a: &[f64], b: &[f64]) -> f64 {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return 0.0;
    }
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut cur = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;
    for i in 1..=n {
        cur[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = (a[i - 1] - b[j - 1]).abs();
            cur[j] = cost + prev[j].min(cur[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[m] / (n + m) as f64
}

/// Toppens tid, sticking-minimum (søkt etter første 10 %) og dippdybde.
pub fn extract_features(curve: &[f64]) -> CurveFeatures {
    let n = curve.len();
    if n == 0 {
        return CurveFeatures::default();
    }
    let grid = unit_grid(n);
    let p = argmax(curve);
    let mn = argmin_from(curve, n / 10);
    CurveFeatures {
        t_peak: grid[p],
        t_min: grid[mn],
        dip_depth: curve[p] - curve[mn],
    }
}

/// Gjennomsnittlig absolutt avvik over de tre trekkene.
pub fn feature_error(user: &CurveFeatures, reference: &CurveFeatures) -> f64 {
    ((user.t_peak - reference.t_peak).abs()
        + (user.t_min - reference.t_min).abs()
        + (user.dip_depth - reference.dip_depth).abs())
        / 3.0
}

/// Delkomponentene scoren bygger på.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreInputs {
    pub rmse: f64,
    pub correlation: f64,
    pub dtw: f64,
    pub feature_error: f64,
    pub peak_shift: f64,
}

/// Nøyaktighet 0–100 fra formstraff, feature-straff og topp-forskyvning.
pub fn accuracy_score(inputs: &ScoreInputs, weights: &ScoreWeights) -> f64 {
    let (wr, wc, wd) = weights.shape_blend();
    let (ws, wf) = weights.total_blend();

    let shape = wr * clip01(inputs.rmse / RMSE_SCALE)
        + wc * (1.0 - clip01((inputs.correlation + 1.0) / 2.0))
        + wd * clip01(inputs.dtw / DTW_SCALE);
    let mut score = 100.0 * (1.0 - (ws * shape + wf * clip01(inputs.feature_error / FEATURE_SCALE)));

    if inputs.peak_shift > PEAK_SHIFT_START {
        let ramp = clip01((inputs.peak_shift - PEAK_SHIFT_START) / PEAK_SHIFT_SPAN);
        score *= 1.0 - PEAK_SHIFT_MAX_PENALTY * ramp;
    }

    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
