#![allow(dead_code)]

use liftgraph_core::{RawSample, RawStream};

pub const FS: f64 = 50.0;

/// Liten sideveis støy på x/y, tyngdekraft + signal på z.
fn push(samples: &mut Vec<RawSample>, z: f64) {
    let i = samples.len() as f64;
    samples.push(RawSample {
        ax: 0.05 * (0.9 * i).sin(),
        ay: 0.05 * (1.3 * i).cos(),
        az: 9.81 + z,
        t: i / FS,
    });
}

/// Syntetisk knebøy-sett: 5 reps (40 samples sinus-burst hver), amplituden
/// faller 9 % per rep og pausene krymper i takt med den.
pub fn fatigue_squat_set() -> RawStream {
    let gaps = [160usize, 142, 123, 106, 75];
    let mut samples = Vec::new();
    for _ in 0..25 {
        push(&mut samples, 0.0);
    }
    for (k, gap) in gaps.iter().enumerate() {
        let amp = 6.0 * (1.0 - 0.09 * k as f64);
        for i in 0..40 {
            push(&mut samples, amp * (2.0 * std::f64::consts::PI * i as f64 / 40.0).sin());
        }
        for _ in 0..*gap {
            push(&mut samples, 0.0);
        }
    }
    RawStream::new(samples, FS, "back squat")
}

/// Stang i ro: kun konstant tyngdekraft, ingen dynamikk.
pub fn still_stream(n: usize) -> RawStream {
    let samples = (0..n)
        .map(|i| RawSample { ax: 0.0, ay: 0.0, az: 9.81, t: i as f64 / FS })
        .collect();
    RawStream::new(samples, FS, "bench")
}

pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| a + (b - a) * i as f64 / (n - 1) as f64).collect()
}
