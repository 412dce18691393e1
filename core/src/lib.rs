pub mod aggregate;
pub mod align;
pub mod analyzer;
pub mod baseline;
pub mod cli;
pub mod compare;
pub mod conditioning;
pub mod config;
pub mod counters;
pub mod curve;
pub mod effort;
pub mod error;
pub mod metrics;
pub mod models;
pub mod physics;
pub mod profiles;
pub mod segmenter;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod types;

#[cfg(feature = "python")]
mod py;

// --- Offentlig API ---
pub use aggregate::{aggregate_set, coaching_tip, live_update};
pub use analyzer::RepAnalyzer;
pub use baseline::{BaselineUpdate, RomBaselineStore};
pub use conditioning::{Axes, GravityModel, LowPassGravity, NoGravity};
pub use config::{PipelineConfig, ScoreWeights};
pub use error::{LiftError, Result};
pub use models::{RawSample, RawStream};
pub use physics::RoundTo;
pub use profiles::LiftProfile;
pub use session::{aggregate_set_json, compute_single_rep_json, live_update_json, segment_reps_json};
pub use storage::{load_baselines, load_config, save_baselines};
pub use types::{
    Comparison, CurveFeatures, CurveSeries, EffortBlock, RawSeries, RepEvent, RepExtras, RepLabel,
    RepMetrics, SetSummary, SetUpdate, VelocityTrend,
};
