use crate::smoothing::{ema_alpha, lowpass_ema, moving_average};

/// Tre akser i m/s², like lange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Axes {
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len()).min(self.z.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Euklidsk norm per sample.
    pub fn magnitude(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| (self.x[i].powi(2) + self.y[i].powi(2) + self.z[i].powi(2)).sqrt())
            .collect()
    }
}

/// Strategi for tyngdekraft-fjerning: rå akser → dynamiske akser.
/// Kan byttes ut (f.eks. med ekte orienteringsestimat) uten å røre resten av pipelinen.
pub trait GravityModel {
    fn remove_gravity(&self, raw: &Axes, sample_rate_hz: f64) -> Axes;
}

/// Kvasi-statisk tyngdekraft via eksponentielt lavpass per akse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassGravity {
    pub cutoff_hz: f64,
}

impl Default for LowPassGravity {
    fn default() -> Self {
        Self { cutoff_hz: 0.7 }
    }
}

impl GravityModel for LowPassGravity {
    fn remove_gravity(&self, raw: &Axes, sample_rate_hz: f64) -> Axes {
        let alpha = ema_alpha(self.cutoff_hz, sample_rate_hz);
        let residual = |xs: &[f64]| -> Vec<f64> {
            let g = lowpass_ema(xs, alpha);
            xs.iter().zip(g).map(|(x, gi)| x - gi).collect()
        };
        Axes {
            x: residual(&raw.x),
            y: residual(&raw.y),
            z: residual(&raw.z),
        }
    }
}

/// Ingen fjerning, for strømmer som allerede er tyngdekraft-kompensert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGravity;

impl GravityModel for NoGravity {
    fn remove_gravity(&self, raw: &Axes, _sample_rate_hz: f64) -> Axes {
        raw.clone()
    }
}

/// Rå akser → glattet dynamisk akselerasjonsmagnitude.
/// Tom inngang gir tom utgang.
pub fn conditioned_magnitude(
    gravity: &dyn GravityModel,
    raw: &Axes,
    sample_rate_hz: f64,
    smoothing_window: usize,
) -> Vec<f64> {
    if raw.is_empty() {
        return Vec::new();
    }
    let dynamic = gravity.remove_gravity(raw, sample_rate_hz);
    moving_average(&dynamic.magnitude(), smoothing_window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_gravity_is_removed() {
        let n = 50;
        let raw = Axes { x: vec![0.0; n], y: vec![0.0; n], z: vec![9.81; n] };
        let mag = conditioned_magnitude(&LowPassGravity::default(), &raw, 50.0, 9);
        assert_eq!(mag.len(), n);
        assert!(mag.iter().all(|m| m.abs() < 1e-12));
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(conditioned_magnitude(&NoGravity, &Axes::default(), 50.0, 9).is_empty());
    }
}
