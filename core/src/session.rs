//! JSON-grenseflate for transport-laget (WebSocket/REST/Python).
//! Tolerant parsing: camelCase og eldre feltnavn aksepteres, og feil
//! rapporteres med JSON-sti.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::aggregate::{aggregate_set, live_update};
use crate::analyzer::RepAnalyzer;
use crate::config::PipelineConfig;
use crate::error::{LiftError, Result};
use crate::models::{RawSample, RawStream};
use crate::types::{RepEvent, RepExtras, RepMetrics};

fn from_value_tracked<T: DeserializeOwned>(v: Value) -> Result<T> {
    serde_path_to_error::deserialize(v).map_err(LiftError::from_path_error)
}

fn parse_value(json_in: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    let v = serde_path_to_error::deserialize(&mut de).map_err(LiftError::from_path_error)?;
    // kun whitespace etter dokumentet
    de.end()?;
    Ok(v)
}

// Kolonneform: { ax:[..], ay:[..], az:[..], t?:[..], fs?, lift? }
#[derive(Debug, Deserialize)]
struct ColumnStreamIn {
    ax: Vec<f64>,
    ay: Vec<f64>,
    az: Vec<f64>,
    #[serde(default, alias = "time", alias = "timestamps")]
    t: Vec<f64>,
    #[serde(default, alias = "sampleRate", alias = "sampleRateHz", alias = "fs")]
    sample_rate_hz: f64,
    #[serde(default, alias = "lift", alias = "exercise", alias = "liftCategory")]
    lift_category: String,
}

impl From<ColumnStreamIn> for RawStream {
    fn from(c: ColumnStreamIn) -> Self {
        let n = c.ax.len().min(c.ay.len()).min(c.az.len());
        let has_time = c.t.len() >= n;
        let samples = (0..n)
            .map(|i| RawSample {
                ax: c.ax[i],
                ay: c.ay[i],
                az: c.az[i],
                // uten tider lar vi sample_times() syntetisere i/fs
                t: if has_time { c.t[i] } else { 0.0 },
            })
            .collect();
        RawStream::new(samples, c.sample_rate_hz, c.lift_category)
    }
}

/// Strøm fra JSON: objektform (`samples`) eller kolonneform (`ax`/`ay`/`az`).
pub fn parse_stream(json_in: &str) -> Result<RawStream> {
    let v = parse_value(json_in)?;
    let is_columns = v.get("samples").is_none() && v.get("ax").map(Value::is_array).unwrap_or(false);
    if is_columns {
        let cols: ColumnStreamIn = from_value_tracked(v)?;
        Ok(cols.into())
    } else {
        from_value_tracked(v)
    }
}

pub fn parse_config(json_in: &str) -> Result<PipelineConfig> {
    let cfg: PipelineConfig = from_value_tracked(parse_value(json_in)?)?;
    Ok(cfg.sanitized())
}

// Tolerant rep-inngang: klienten sender ofte bare metrikkene tilbake.
#[derive(Debug, Deserialize)]
struct RepIn {
    #[serde(default)]
    id: String,
    #[serde(default = "default_valid")]
    valid: bool,
    metrics: RepMetricsIn,
    #[serde(default)]
    ts: i64,
    #[serde(default, alias = "extras")]
    ext: Option<RepExtras>,
}

fn default_valid() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RepMetricsIn {
    #[serde(default)]
    tut: f64,
    #[serde(default, alias = "avgSpeed", alias = "velocity")]
    speed: f64,
    #[serde(default)]
    vl: f64,
    #[serde(default, alias = "romHit")]
    rom_hit: bool,
}

impl From<RepIn> for RepEvent {
    fn from(r: RepIn) -> Self {
        RepEvent {
            id: r.id,
            valid: r.valid,
            metrics: RepMetrics {
                tut: r.metrics.tut,
                speed: r.metrics.speed,
                vl: r.metrics.vl,
                rom_hit: r.metrics.rom_hit,
            },
            ts: r.ts,
            ext: r.ext,
        }
    }
}

/// Rep-liste fra JSON: enten en liste eller `{ "reps": [...] }`.
pub fn parse_reps(json_in: &str) -> Result<Vec<RepEvent>> {
    let v = match parse_value(json_in)? {
        Value::Object(mut map) if map.contains_key("reps") => map.remove("reps").unwrap_or(Value::Null),
        other => other,
    };
    let reps: Vec<RepIn> = from_value_tracked(v)?;
    Ok(reps.into_iter().map(RepEvent::from).collect())
}

/// Strøm-JSON → liste av RepEvents (JSON).
pub fn segment_reps_json(analyzer: &mut RepAnalyzer, json_in: &str) -> Result<String> {
    let stream = parse_stream(json_in)?;
    let reps = analyzer.segment_reps(&stream);
    Ok(serde_json::to_string(&reps)?)
}

/// Én-reps-pakke → RepEvent (JSON).
pub fn compute_single_rep_json(analyzer: &mut RepAnalyzer, json_in: &str) -> Result<String> {
    let packet = parse_stream(json_in)?;
    let rep = analyzer.compute_single_rep(&packet);
    Ok(serde_json::to_string(&rep)?)
}

/// Rep-liste → SetSummary (JSON).
pub fn aggregate_set_json(json_in: &str) -> Result<String> {
    let reps = parse_reps(json_in)?;
    Ok(serde_json::to_string(&aggregate_set(&reps))?)
}

/// Rep-liste → løpende SetUpdate (JSON).
pub fn live_update_json(json_in: &str) -> Result<String> {
    let reps = parse_reps(json_in)?;
    Ok(serde_json::to_string(&live_update(&reps))?)
}
