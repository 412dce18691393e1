use log::warn;
use serde::{Deserialize, Serialize};

use crate::conditioning::Axes;
use crate::smoothing::median;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RawSample {
    pub ax: f64, // m/s²
    pub ay: f64,
    pub az: f64,
    #[serde(default, alias = "timestamp", alias = "ts")]
    pub t: f64, // sek
}

/// Rå akselerometerstrøm (eller én allerede avgrenset rep).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawStream {
    #[serde(default)]
    pub samples: Vec<RawSample>,
    #[serde(default, alias = "sampleRate", alias = "sampleRateHz", alias = "fs")]
    pub sample_rate_hz: f64,
    #[serde(default, alias = "lift", alias = "exercise", alias = "liftCategory")]
    pub lift_category: String,
}

impl RawStream {
    pub fn new(samples: Vec<RawSample>, sample_rate_hz: f64, lift_category: impl Into<String>) -> Self {
        Self {
            samples,
            sample_rate_hz,
            lift_category: lift_category.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn axes(&self) -> Axes {
        Axes {
            x: self.samples.iter().map(|s| s.ax).collect(),
            y: self.samples.iter().map(|s| s.ay).collect(),
            z: self.samples.iter().map(|s| s.az).collect(),
        }
    }

    /// Effektiv samplerate: oppgitt verdi hvis gyldig, ellers median tidssteg,
    /// ellers `fallback_hz`.
    pub fn effective_rate(&self, fallback_hz: f64) -> f64 {
        if self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0 {
            return self.sample_rate_hz;
        }
        let steps: Vec<f64> = self
            .samples
            .windows(2)
            .map(|w| w[1].t - w[0].t)
            .filter(|d| d.is_finite() && *d > 0.0)
            .collect();
        match median(&steps) {
            Some(dt) if dt > 0.0 => {
                warn!("ugyldig samplerate {}, bruker median dt → {:.2} Hz", self.sample_rate_hz, 1.0 / dt);
                1.0 / dt
            }
            _ => {
                warn!("ugyldig samplerate {}, faller tilbake til {} Hz", self.sample_rate_hz, fallback_hz);
                fallback_hz
            }
        }
    }

    /// Sample-tider. Hvis tidsstemplene ikke er strengt stigende og endelige
    /// syntetiseres de som i / fs.
    pub fn sample_times(&self, rate_hz: f64) -> Vec<f64> {
        let monotone = self
            .samples
            .windows(2)
            .all(|w| w[0].t.is_finite() && w[1].t.is_finite() && w[1].t > w[0].t);
        if monotone {
            return self.samples.iter().map(|s| s.t).collect();
        }
        warn!("tidsstempler er ikke strengt stigende, bruker i/fs (fs={:.2})", rate_hz);
        (0..self.samples.len()).map(|i| i as f64 / rate_hz).collect()
    }
}
