mod common;

use common::fatigue_squat_set;
use liftgraph_core::cli::{analyze_stream, format_rep_line, read_csv_samples};
use liftgraph_core::{PipelineConfig, RawStream, RepAnalyzer};

fn to_csv(stream: &RawStream) -> String {
    let mut out = String::from("t,ax,ay,az\n");
    for s in &stream.samples {
        out.push_str(&format!("{},{},{},{}\n", s.t, s.ax, s.ay, s.az));
    }
    out
}

#[test]
fn test_csv_roundtrip_and_report() {
    let stream = fatigue_squat_set();
    let csv_text = to_csv(&stream);
    let samples = read_csv_samples(csv_text.as_bytes()).expect("csv");
    assert_eq!(samples, stream.samples);

    let mut a = RepAnalyzer::new(PipelineConfig::default()).unwrap();
    let parsed = RawStream::new(samples, 0.0, "back squat"); // samplerate utledes fra tidsstempler
    let report = analyze_stream(&mut a, &parsed);
    assert!((report.sample_rate_hz - 50.0).abs() < 1e-6);
    assert_eq!(report.reps.len(), 5);
    assert_eq!(report.summary.reps, 5);

    let line = format_rep_line(&report.reps[0]);
    assert!(line.contains("rep-1"));
    assert!(line.contains("rom=100%"));
}

#[test]
fn test_csv_accepts_timestamp_alias_and_spaces() {
    let text = "timestamp, ax, ay, az\n0.0, 0.1, 0.2, 9.8\n0.02, 0.0, 0.0, 9.9\n";
    let samples = read_csv_samples(text.as_bytes()).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].t, 0.02);
    assert_eq!(samples[1].az, 9.9);
}

#[test]
fn test_csv_bad_row_is_an_error() {
    let text = "t,ax,ay,az\n0.0,abc,0.0,9.8\n";
    assert!(read_csv_samples(text.as_bytes()).is_err());
}
