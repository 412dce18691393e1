use serde::{Deserialize, Serialize};

/// Kjernemetrikker per rep (det transport-laget viser i HUD-en).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepMetrics {
    pub tut: f64,   // sek
    pub speed: f64, // m/s, snitt av positiv hastighet
    pub vl: f64,    // % hastighetstap mot første rep i strømmen
    pub rom_hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepLabel {
    Completed,
    Aborted,
    TrueFailure,
}

impl RepLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepLabel::Completed => "completed",
            RepLabel::Aborted => "aborted",
            RepLabel::TrueFailure => "true_failure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortBlock {
    pub rom_pct: f64,
    pub rom_baseline_m: f64,
    pub displacement_m: f64,
    pub posr_impulse: f64,
    pub posr_impulse_norm: f64,
    pub lpvr: f64,
    pub plateau_frac: f64,
    pub post_sr_gain: f64,
    pub label: RepLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CurveFeatures {
    pub t_peak: f64,
    pub t_min: f64,
    pub dip_depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub rmse: f64,
    pub correlation: f64,
    pub dtw: f64,
    pub feature_error: f64,
    pub user_features: CurveFeatures,
    pub ref_features: CurveFeatures,
    pub t_peak_user: f64,
    pub t_peak_ref: f64,
    pub peak_shift: f64,
    pub shift_samples: i64,
}

/// Rå serier i repens tidsvindu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSeries {
    pub time: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub position: Vec<f64>,
}

/// Kurver på det kanoniske rutenettet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CurveSeries {
    pub grid: Vec<f64>,
    pub user: Vec<f64>,
    pub aligned: Vec<f64>,
    pub reference: Vec<f64>,
    pub error: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepExtras {
    pub lift: String,
    pub accuracy_score: f64,
    pub comparison: Comparison,
    pub effort: EffortBlock,
    pub t_start: f64,
    pub t_end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<CurveSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepEvent {
    pub id: String,
    pub valid: bool,
    pub metrics: RepMetrics,
    pub ts: i64, // epoch ms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<RepExtras>,
}

impl RepEvent {
    pub fn accuracy_score(&self) -> Option<f64> {
        self.ext.as_ref().map(|e| e.accuracy_score)
    }

    pub fn effort(&self) -> Option<&EffortBlock> {
        self.ext.as_ref().map(|e| &e.effort)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VelocityTrend {
    pub trend: String, // "declining" | "stable" | "increasing" | "insufficient_data"
    pub slope: f64,
    pub velocity_loss_pct: f64,
    pub mean_velocity: f64,
    pub std_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    pub reps: usize,
    pub tut: f64,
    pub avg_speed: f64,
    pub vl: f64,
    pub rom_hit_rate: f64,
    pub rom_variability: Option<f64>, // cm
    pub mean_accuracy: Option<f64>,
    pub fatigue_index: f64,
    pub velocity_trend: VelocityTrend,
    pub tip: String,
}

/// Løpende snapshot under settet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetUpdate {
    pub reps_completed: usize,
    pub avg_speed: f64,
    pub vl: f64,
    pub rom_hit_rate: f64,
}
