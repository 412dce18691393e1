use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::curve::unit_grid;

pub const DEFAULT_GRID_LEN: usize = 200;

/// Løftkategori for referansekurven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiftProfile {
    Bench,
    Squat,
    Deadlift,
}

impl LiftProfile {
    /// Nøkkelord-match på fritekst ("Back Squat", "sumo deadlift", ...).
    /// Alt som ikke gjenkjennes faller tilbake til benk.
    pub fn from_label(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("squat") {
            LiftProfile::Squat
        } else if l.contains("dead") {
            LiftProfile::Deadlift
        } else {
            LiftProfile::Bench
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiftProfile::Bench => "bench",
            LiftProfile::Squat => "squat",
            LiftProfile::Deadlift => "deadlift",
        }
    }

    /// Rå (unormalisert) profilverdi ved t ∈ [0,1].
    fn shape_at(&self, t: f64) -> f64 {
        let base = (std::f64::consts::PI * t).sin();
        match self {
            // startsprett + sticking-dipp
            LiftProfile::Squat => base + 0.10 * gauss(t, 0.10, 0.04) - 0.22 * gauss(t, 0.42, 0.07),
            // dipp rundt kneet
            LiftProfile::Deadlift => base - 0.18 * gauss(t, 0.62, 0.08),
            LiftProfile::Bench => base - 0.25 * gauss(t, 0.50, 0.07),
        }
    }

    /// Referansekurven på et `grid_len`-punkters rutenett, klippet ≥ 0 og
    /// normalisert til topp 1.0. Default-lengden hentes fra cache.
    pub fn curve(&self, grid_len: usize) -> Vec<f64> {
        if grid_len == DEFAULT_GRID_LEN {
            return DEFAULT_CURVES[self.index()].clone();
        }
        build_curve(*self, grid_len)
    }

    fn index(&self) -> usize {
        match self {
            LiftProfile::Bench => 0,
            LiftProfile::Squat => 1,
            LiftProfile::Deadlift => 2,
        }
    }
}

#[inline]
fn gauss(t: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((t - mu) / sigma).powi(2)).exp()
}

fn build_curve(profile: LiftProfile, grid_len: usize) -> Vec<f64> {
    let raw: Vec<f64> = unit_grid(grid_len)
        .into_iter()
        .map(|t| profile.shape_at(t).max(0.0))
        .collect();
    let peak = raw.iter().copied().fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|x| x / peak).collect()
}

static DEFAULT_CURVES: Lazy<[Vec<f64>; 3]> = Lazy::new(|| {
    [
        build_curve(LiftProfile::Bench, DEFAULT_GRID_LEN),
        build_curve(LiftProfile::Squat, DEFAULT_GRID_LEN),
        build_curve(LiftProfile::Deadlift, DEFAULT_GRID_LEN),
    ]
});

/// Referansekurve direkte fra løftnavn.
pub fn reference_curve(lift_label: &str, grid_len: usize) -> Vec<f64> {
    LiftProfile::from_label(lift_label).curve(grid_len)
}
