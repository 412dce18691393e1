use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::Result;
use crate::types::RepLabel;

/// Prometheus-tellere for én analysator (eget register per økt).
#[derive(Clone)]
pub struct PipelineCounters {
    registry: Registry,
    pub reps_detected: IntCounter,
    pub short_regions_dropped: IntCounter,
    pub baseline_raises: IntCounter,
    pub rep_labels: IntCounterVec,
}

impl std::fmt::Debug for PipelineCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCounters")
            .field("reps_detected", &self.reps_detected.get())
            .field("short_regions_dropped", &self.short_regions_dropped.get())
            .field("baseline_raises", &self.baseline_raises.get())
            .finish()
    }
}

impl PipelineCounters {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let reps_detected = IntCounter::new(
            "liftgraph_reps_detected_total",
            "Reps emitted by the analyzer",
        )?;
        let short_regions_dropped = IntCounter::new(
            "liftgraph_short_regions_dropped_total",
            "Active regions dropped for being shorter than the minimum rep duration",
        )?;
        let baseline_raises = IntCounter::new(
            "liftgraph_rom_baseline_raises_total",
            "Times a lift's ROM baseline was raised",
        )?;
        let rep_labels = IntCounterVec::new(
            Opts::new("liftgraph_rep_labels_total", "Effort labels assigned to reps"),
            &["label"],
        )?;

        registry.register(Box::new(reps_detected.clone()))?;
        registry.register(Box::new(short_regions_dropped.clone()))?;
        registry.register(Box::new(baseline_raises.clone()))?;
        registry.register(Box::new(rep_labels.clone()))?;

        Ok(Self {
            registry,
            reps_detected,
            short_regions_dropped,
            baseline_raises,
            rep_labels,
        })
    }

    pub fn record_label(&self, label: RepLabel) {
        self.rep_labels.with_label_values(&[label.as_str()]).inc();
    }

    pub fn label_count(&self, label: RepLabel) -> u64 {
        self.rep_labels.with_label_values(&[label.as_str()]).get()
    }

    /// Tekstformat for /metrics.
    pub fn gather_text(&self) -> Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
