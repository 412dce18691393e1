use std::io::Read;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::aggregate::aggregate_set;
use crate::analyzer::RepAnalyzer;
use crate::error::Result;
use crate::models::{RawSample, RawStream};
use crate::types::{RepEvent, SetSummary};

/// Samlet rapport for én CSV-fil.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetReport {
    pub lift: String,
    pub sample_rate_hz: f64,
    pub samples: usize,
    pub reps: Vec<RepEvent>,
    pub summary: SetSummary,
}

/// Leser `t,ax,ay,az`-rader (header påkrevd) fra en leser.
pub fn read_csv_samples<R: Read>(reader: R) -> Result<Vec<RawSample>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        let s: RawSample = row?;
        out.push(s);
    }
    Ok(out)
}

pub fn read_csv_stream(path: impl AsRef<Path>, sample_rate_hz: f64, lift: &str) -> Result<RawStream> {
    let file = std::fs::File::open(path.as_ref())?;
    let samples = read_csv_samples(file)?;
    info!("leste {} samples fra {}", samples.len(), path.as_ref().display());
    Ok(RawStream::new(samples, sample_rate_hz, lift))
}

/// Segmenterer hele strømmen og bygger settsammendraget.
pub fn analyze_stream(analyzer: &mut RepAnalyzer, stream: &RawStream) -> SetReport {
    let reps = analyzer.segment_reps(stream);
    let summary = aggregate_set(&reps);
    SetReport {
        lift: stream.lift_category.clone(),
        sample_rate_hz: stream.effective_rate(analyzer.config().default_sample_rate_hz),
        samples: stream.len(),
        reps,
        summary,
    }
}

/// Kort menneskelesbar linje per rep (brukes av CLI-en i tekstmodus).
pub fn format_rep_line(rep: &RepEvent) -> String {
    match &rep.ext {
        Some(ext) => format!(
            "{:>6}  tut={:.2}s  speed={:.3} m/s  vl={:.1}%  rom={:.0}%  score={:.1}  {}",
            rep.id,
            rep.metrics.tut,
            rep.metrics.speed,
            rep.metrics.vl,
            ext.effort.rom_pct * 100.0,
            ext.accuracy_score,
            ext.effort.label.as_str()
        ),
        None => format!("{:>6}  (ugyldig)", rep.id),
    }
}
