use chrono::Utc;
use log::{debug, info};

use crate::align::align_to_reference;
use crate::baseline::RomBaselineStore;
use crate::compare::{accuracy_score, dtw_distance, extract_features, feature_error, pearson, rmse, ScoreInputs};
use crate::conditioning::{conditioned_magnitude, GravityModel, LowPassGravity};
use crate::config::PipelineConfig;
use crate::counters::PipelineCounters;
use crate::curve::{normalize_rep, unit_grid};
use crate::effort::{analyze_effort, EffortInput};
use crate::error::Result;
use crate::models::RawStream;
use crate::physics::{displacement_series, integrate_velocity, raw_rep_velocity};
use crate::profiles::LiftProfile;
use crate::segmenter::find_active_regions;
use crate::types::{Comparison, CurveSeries, RawSeries, RepEvent, RepExtras, RepMetrics};

/// Hvor mye av den voksende bufferen tellerne allerede har sett.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StreamCursor {
    samples: usize,
    reps: usize,
    dropped: usize,
}

/// Kondisjonert strøm: tider, akselerasjonsmagnitude og hastighet.
#[derive(Debug, Clone, Default)]
pub struct Conditioned {
    pub time: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
}

/// Én analysator per økt. Eier ROM-baseline-lageret og tellerne.
pub struct RepAnalyzer {
    config: PipelineConfig,
    gravity: Box<dyn GravityModel + Send + Sync>,
    baselines: RomBaselineStore,
    counters: PipelineCounters,
    cursor: StreamCursor,
    single_seq: usize,
}

impl std::fmt::Debug for RepAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepAnalyzer")
            .field("config", &self.config)
            .field("baselines", &self.baselines)
            .field("counters", &self.counters)
            .finish()
    }
}

impl RepAnalyzer {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let config = config.sanitized();
        Ok(Self {
            gravity: Box::new(LowPassGravity { cutoff_hz: config.gravity_cutoff_hz }),
            config,
            baselines: RomBaselineStore::new(),
            counters: PipelineCounters::new()?,
            cursor: StreamCursor::default(),
            single_seq: 0,
        })
    }

    /// Bytt tyngdekraft-strategi.
    pub fn with_gravity_model(mut self, model: Box<dyn GravityModel + Send + Sync>) -> Self {
        self.gravity = model;
        self
    }

    /// Start økten med et tidligere lagret baseline-lager.
    pub fn with_baselines(mut self, store: RomBaselineStore) -> Self {
        self.baselines = store;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn baselines(&self) -> &RomBaselineStore {
        &self.baselines
    }

    pub fn counters(&self) -> &PipelineCounters {
        &self.counters
    }

    pub fn reset_baselines(&mut self) {
        self.baselines.reset();
        self.cursor = StreamCursor::default();
        self.single_seq = 0;
    }

    fn count_rep(&self, ev: &RepEvent) {
        if let Some(effort) = ev.effort() {
            self.counters.reps_detected.inc();
            self.counters.record_label(effort.label);
        }
    }

    /// Rå strøm → tider, kondisjonert akselerasjon og hastighet.
    pub fn condition(&self, stream: &RawStream) -> Conditioned {
        if stream.is_empty() {
            return Conditioned::default();
        }
        let rate = stream.effective_rate(self.config.default_sample_rate_hz);
        let time = stream.sample_times(rate);
        let acceleration = conditioned_magnitude(
            self.gravity.as_ref(),
            &stream.axes(),
            rate,
            self.config.smoothing_window,
        );
        let velocity = integrate_velocity(&acceleration, &time, self.config.smoothing_window);
        Conditioned { time, acceleration, velocity }
    }

    /// Finner alle reps i en (voksende) strøm. Id-ene er posisjonelle
    /// ("rep-1", "rep-2", ...), så kallere kan diffe på antall.
    /// Tellerne øker bare for reps og droppede områder som ikke er sett før;
    /// en buffer som er kortere enn forrige kall regnes som en ny strøm.
    pub fn segment_reps(&mut self, stream: &RawStream) -> Vec<RepEvent> {
        if stream.len() < self.cursor.samples {
            self.cursor = StreamCursor::default();
        }
        self.cursor.samples = stream.len();

        let c = self.condition(stream);
        if c.velocity.is_empty() {
            return Vec::new();
        }

        let seg = find_active_regions(
            &c.time,
            &c.velocity,
            self.config.activity_threshold_frac,
            self.config.activity_epsilon,
            self.config.min_rep_duration_s,
        );
        let new_dropped = seg.dropped.saturating_sub(self.cursor.dropped);
        if new_dropped > 0 {
            debug!("segment: {} for korte område(r) droppet (terskel {:.4})", new_dropped, seg.threshold);
            self.counters.short_regions_dropped.inc_by(new_dropped as u64);
        }
        self.cursor.dropped = self.cursor.dropped.max(seg.dropped);

        let mut events: Vec<RepEvent> = Vec::with_capacity(seg.regions.len());
        for (k, region) in seg.regions.iter().enumerate() {
            let r = region.start..region.end + 1;
            let ev = self.analyze_rep(
                format!("rep-{}", k + 1),
                &stream.lift_category,
                &c.time[r.clone()],
                &c.acceleration[r.clone()],
                &c.velocity[r],
            );
            events.push(ev);
        }

        for ev in events.iter().skip(self.cursor.reps) {
            self.count_rep(ev);
        }
        self.cursor.reps = self.cursor.reps.max(events.len());

        // VL per rep: fall mot første rep i strømmen
        if let Some(first) = events.first().map(|e| e.metrics.speed) {
            for ev in events.iter_mut() {
                ev.metrics.vl = if first > 0.0 {
                    ((first - ev.metrics.speed) / first * 100.0).max(0.0)
                } else {
                    0.0
                };
            }
        }
        events
    }

    /// Analyserer en pakke som allerede er avgrenset til én rep.
    /// For kort pakke → ugyldig event med nullede metrikker.
    pub fn compute_single_rep(&mut self, packet: &RawStream) -> RepEvent {
        self.single_seq += 1;
        let id = format!("single-{}", self.single_seq);
        let c = self.condition(packet);

        let n = c.time.len();
        let too_short = n < 2 || c.time[n - 1] - c.time[0] < self.config.min_rep_duration_s;
        if too_short {
            debug!("{}: pakke for kort ({} samples), markeres ugyldig", id, n);
            return RepEvent {
                id,
                valid: false,
                metrics: RepMetrics::default(),
                ts: Utc::now().timestamp_millis(),
                ext: None,
            };
        }
        let ev = self.analyze_rep(id, &packet.lift_category, &c.time, &c.acceleration, &c.velocity);
        self.count_rep(&ev);
        ev
    }

    /// Kurve, sammenligning og effort for ett rep-vindu.
    /// Baseline-forslaget skrives først når eventet er ferdig bygget.
    /// Tellerne for reps og etiketter røres ikke her; det gjør kalleren.
    pub fn analyze_rep(
        &mut self,
        id: String,
        lift: &str,
        time: &[f64],
        acceleration: &[f64],
        velocity: &[f64],
    ) -> RepEvent {
        let cfg = &self.config;
        let grid_len = cfg.grid_len;

        let user = normalize_rep(time, velocity, grid_len);
        let reference = LiftProfile::from_label(lift).curve(grid_len);
        let al = align_to_reference(&user, &reference, cfg.max_shift_samples());

        let user_features = extract_features(&al.aligned);
        let ref_features = extract_features(&reference);
        let comparison = Comparison {
            rmse: rmse(&al.aligned, &reference),
            correlation: pearson(&al.aligned, &reference),
            dtw: dtw_distance(&al.aligned, &reference),
            feature_error: feature_error(&user_features, &ref_features),
            user_features,
            ref_features,
            t_peak_user: al.t_peak_user,
            t_peak_ref: al.t_peak_ref,
            peak_shift: al.peak_shift,
            shift_samples: al.shift_samples,
        };
        let score = accuracy_score(
            &ScoreInputs {
                rmse: comparison.rmse,
                correlation: comparison.correlation,
                dtw: comparison.dtw,
                feature_error: comparison.feature_error,
                peak_shift: comparison.peak_shift,
            },
            &cfg.score_weights,
        );

        let raw_velocity = raw_rep_velocity(acceleration, time);
        let (effort, update) = analyze_effort(
            &EffortInput {
                lift,
                time,
                acceleration,
                velocity,
                raw_velocity: &raw_velocity,
                aligned: &al.aligned,
            },
            &self.baselines,
        );

        let tut = match (time.first(), time.last()) {
            (Some(a), Some(b)) => (b - a).max(0.0),
            _ => 0.0,
        };
        let speed = if velocity.is_empty() {
            0.0
        } else {
            velocity.iter().map(|v| v.max(0.0)).sum::<f64>() / velocity.len() as f64
        };
        let metrics = RepMetrics {
            tut,
            speed,
            vl: 0.0,
            rom_hit: effort.rom_pct >= cfg.rom_hit_threshold,
        };

        let (raw, normalized) = if cfg.include_series {
            let error = al.aligned.iter().zip(&reference).map(|(a, r)| a - r).collect();
            (
                Some(RawSeries {
                    time: time.to_vec(),
                    acceleration: acceleration.to_vec(),
                    velocity: velocity.to_vec(),
                    position: displacement_series(&raw_velocity, time),
                }),
                Some(CurveSeries {
                    grid: unit_grid(grid_len),
                    user,
                    aligned: al.aligned.clone(),
                    reference,
                    error,
                }),
            )
        } else {
            (None, None)
        };

        debug!(
            "{} [{}]: tut={:.2}s speed={:.3} score={:.1} rom={:.2} label={}",
            id,
            lift,
            tut,
            speed,
            score,
            effort.rom_pct,
            effort.label.as_str()
        );

        let event = RepEvent {
            id,
            valid: true,
            metrics,
            ts: Utc::now().timestamp_millis(),
            ext: Some(RepExtras {
                lift: lift.to_string(),
                accuracy_score: score,
                comparison,
                effort,
                t_start: time.first().copied().unwrap_or(0.0),
                t_end: time.last().copied().unwrap_or(0.0),
                raw,
                normalized,
            }),
        };

        // commit etter at eventet er ferdig
        if update.raises() && self.baselines.commit(&update) {
            info!("ROM-baseline for '{}' hevet til {:.3} m", update.key, update.value);
            self.counters.baseline_raises.inc();
        }
        event
    }
}
