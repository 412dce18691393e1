use serde::{Deserialize, Serialize};

/// Vekter for nøyaktighets-scoren.
/// Formdelen (rmse/korrelasjon/dtw) og totalen (form/feature) re-normaliseres hver for seg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    #[serde(alias = "RMSE")]
    pub rmse: f64,
    #[serde(alias = "corr")]
    pub correlation: f64,
    #[serde(alias = "DTW")]
    pub dtw: f64,
    pub shape: f64,
    #[serde(alias = "features")]
    pub feature: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rmse: 0.4,
            correlation: 0.3,
            dtw: 0.3,
            shape: 0.8,
            feature: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Formvekter (rmse, korrelasjon, dtw) normalisert til sum 1.
    /// Faller tilbake til 0.4/0.3/0.3 hvis summen ikke er positiv.
    pub fn shape_blend(&self) -> (f64, f64, f64) {
        let (mut wr, mut wc, mut wd) = (
            self.rmse.max(0.0),
            self.correlation.max(0.0),
            self.dtw.max(0.0),
        );
        let sum = wr + wc + wd;
        if sum > 0.0 && sum.is_finite() {
            wr /= sum;
            wc /= sum;
            wd /= sum;
        } else {
            wr = 0.4;
            wc = 0.3;
            wd = 0.3;
        }
        (wr, wc, wd)
    }

    /// (form, feature) normalisert til sum 1, fallback 0.8/0.2.
    pub fn total_blend(&self) -> (f64, f64) {
        let (ws, wf) = (self.shape.max(0.0), self.feature.max(0.0));
        let sum = ws + wf;
        if sum > 0.0 && sum.is_finite() {
            (ws / sum, wf / sum)
        } else {
            (0.8, 0.2)
        }
    }
}

/// Parametre for hele pipelinen. Alle felt har default, så en delvis
/// JSON-konfig (`{"grid_len": 100}`) er gyldig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(alias = "gravityCutoffHz")]
    pub gravity_cutoff_hz: f64,
    #[serde(alias = "smoothingWindow")]
    pub smoothing_window: usize,
    #[serde(alias = "gridLen")]
    pub grid_len: usize,
    #[serde(alias = "activityThresholdFrac")]
    pub activity_threshold_frac: f64,
    #[serde(alias = "activityEpsilon")]
    pub activity_epsilon: f64,
    #[serde(alias = "minRepDurationS")]
    pub min_rep_duration_s: f64,
    #[serde(alias = "shiftSearchFrac")]
    pub shift_search_frac: f64,
    #[serde(alias = "romHitThreshold")]
    pub rom_hit_threshold: f64,
    #[serde(alias = "defaultSampleRateHz")]
    pub default_sample_rate_hz: f64,
    /// Ta med rå- og normaliserte kurver i `RepEvent.ext`.
    #[serde(alias = "includeSeries")]
    pub include_series: bool,
    #[serde(alias = "scoreWeights")]
    pub score_weights: ScoreWeights,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gravity_cutoff_hz: 0.7,
            smoothing_window: 9,
            grid_len: 200,
            activity_threshold_frac: 0.02,
            activity_epsilon: 1e-6,
            min_rep_duration_s: 0.4,
            shift_search_frac: 0.02,
            rom_hit_threshold: 0.95,
            default_sample_rate_hz: 50.0,
            include_series: true,
            score_weights: ScoreWeights::default(),
        }
    }
}

fn clamp_or(x: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x.clamp(lo, hi)
    } else {
        fallback
    }
}

impl PipelineConfig {
    /// Klemmer alle felt til trygge intervaller (ikke-endelige verdier → default).
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            gravity_cutoff_hz: clamp_or(self.gravity_cutoff_hz, 0.05, 5.0, d.gravity_cutoff_hz),
            smoothing_window: self.smoothing_window.clamp(1, 51),
            grid_len: self.grid_len.clamp(16, 2000),
            activity_threshold_frac: clamp_or(self.activity_threshold_frac, 0.0, 0.5, d.activity_threshold_frac),
            activity_epsilon: clamp_or(self.activity_epsilon, 0.0, 1e-2, d.activity_epsilon),
            min_rep_duration_s: clamp_or(self.min_rep_duration_s, 0.0, 10.0, d.min_rep_duration_s),
            shift_search_frac: clamp_or(self.shift_search_frac, 0.0, 0.2, d.shift_search_frac),
            rom_hit_threshold: clamp_or(self.rom_hit_threshold, 0.0, 1.2, d.rom_hit_threshold),
            default_sample_rate_hz: clamp_or(self.default_sample_rate_hz, 1.0, 10_000.0, d.default_sample_rate_hz),
            include_series: self.include_series,
            score_weights: self.score_weights,
        }
    }

    /// Maks antall samples i skift-søket: ceil(frac · grid), minst 1.
    pub fn max_shift_samples(&self) -> usize {
        ((self.shift_search_frac * self.grid_len as f64).ceil() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shift_bound_is_four_samples() {
        assert_eq!(PipelineConfig::default().max_shift_samples(), 4);
    }

    #[test]
    fn sanitized_clamps_out_of_range() {
        let cfg = PipelineConfig {
            grid_len: 3,
            gravity_cutoff_hz: f64::NAN,
            shift_search_frac: 0.9,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.grid_len, 16);
        assert_eq!(cfg.gravity_cutoff_hz, 0.7);
        assert_eq!(cfg.shift_search_frac, 0.2);
    }

    #[test]
    fn zero_weights_fall_back() {
        let w = ScoreWeights { rmse: 0.0, correlation: 0.0, dtw: 0.0, shape: 0.0, feature: 0.0 };
        assert_eq!(w.shape_blend(), (0.4, 0.3, 0.3));
        assert_eq!(w.total_blend(), (0.8, 0.2));
    }
}
