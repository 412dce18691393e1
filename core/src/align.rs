use crate::curve::{argmax, interp, unit_grid};
use crate::physics::EPS;

const TIE_TOL: f64 = 1e-12;

/// Resultat av topp-ankret justering.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignResult {
    pub aligned: Vec<f64>,
    pub t_peak_user: f64,
    pub t_peak_ref: f64,
    /// |t_peak_user − t_peak_ref| på [0,1]-skalaen.
    pub peak_shift: f64,
    /// Valgt forskyvning i samples (positiv = kurven flyttet mot høyre).
    pub shift_samples: i64,
}

/// Normalisert krysskorrelasjon (Pearson). 0 hvis en av kurvene er flat.
pub fn ncc(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let ma = a[..n].iter().sum::<f64>() / nf;
    let mb = b[..n].iter().sum::<f64>() / nf;
    let mut num = 0.0;
    let mut da = 0.0;
    let mut db = 0.0;
    for i in 0..n {
        let (x, y) = (a[i] - ma, b[i] - mb);
        num += x * y;
        da += x * x;
        db += y * y;
    }
    let (da, db) = (da.sqrt(), db.sqrt());
    if da < EPS || db < EPS {
        return 0.0;
    }
    num / (da * db)
}

/// Forskyv med kant-padding: out[i] = xs[clamp(i − s)].
pub fn shift_edge_padded(xs: &[f64], s: i64) -> Vec<f64> {
    let n = xs.len() as i64;
    if n == 0 {
        return Vec::new();
    }
    (0..n).map(|i| xs[(i - s).clamp(0, n - 1) as usize]).collect()
}

/// To-segments stykkevis lineær tidsavbildning som legger brukerens topp
/// (tpu) oppå referansens (tpr), og resampler på rutenettet.
pub fn warp_to_peak(user: &[f64], tpu: f64, tpr: f64) -> Vec<f64> {
    let grid = unit_grid(user.len());
    let warped_time: Vec<f64> = grid
        .iter()
        .map(|&x| {
            if x <= tpu && tpu > EPS {
                x / tpu * tpr
            } else if 1.0 - tpu > EPS {
                tpr + (x - tpu) * (1.0 - tpr) / (1.0 - tpu)
            } else {
                tpr
            }
        })
        .collect();
    grid.iter().map(|&x| interp(&warped_time, user, x)).collect()
}

/// Søker forskyvning i [−max_shift, max_shift] som maksimerer NCC mot referansen.
/// Likt resultat → minste |s| vinner, og s = 0 er startpunktet.
pub fn refine_shift(warped: &[f64], reference: &[f64], max_shift: usize) -> i64 {
    let ms = max_shift as i64;
    let mut best = 0i64;
    let mut best_score = ncc(warped, reference);
    for s in -ms..=ms {
        let c = ncc(&shift_edge_padded(warped, s), reference);
        let better = c > best_score + TIE_TOL;
        let tie_closer = (c - best_score).abs() <= TIE_TOL && s.abs() < best.abs();
        if better || tie_closer {
            best_score = c;
            best = s;
        }
    }
    best
}

/// Topp-ankret justering av brukerkurven mot referansen (samme lengde).
pub fn align_to_reference(user: &[f64], reference: &[f64], max_shift: usize) -> AlignResult {
    let n = reference.len();
    if n == 0 || user.len() != n {
        return AlignResult {
            aligned: user.to_vec(),
            t_peak_user: 0.0,
            t_peak_ref: 0.0,
            peak_shift: 0.0,
            shift_samples: 0,
        };
    }
    let grid = unit_grid(n);
    let tpu = grid[argmax(user)];
    let tpr = grid[argmax(reference)];

    let warped = warp_to_peak(user, tpu, tpr);
    let shift = refine_shift(&warped, reference, max_shift);

    AlignResult {
        aligned: shift_edge_padded(&warped, shift),
        t_peak_user: tpu,
        t_peak_ref: tpr,
        peak_shift: (tpu - tpr).abs(),
        shift_samples: shift,
    }
}
