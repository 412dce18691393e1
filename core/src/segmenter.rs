/// Et aktivt (konsentrisk) område, inkluderende indekser i strømmen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRegion {
    pub start: usize,
    pub end: usize,
}

impl ActiveRegion {
    pub fn duration(&self, ts: &[f64]) -> f64 {
        ts[self.end] - ts[self.start]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub threshold: f64,
    pub regions: Vec<ActiveRegion>,
    /// Områder over terskel som var for korte.
    pub dropped: usize,
}

/// Terskel = frac · maks |v| + eps. Et område er en maksimal sammenhengende
/// rekke samples over terskelen, og beholdes hvis varigheten ≥ `min_duration_s`.
pub fn find_active_regions(
    ts: &[f64],
    velocity: &[f64],
    threshold_frac: f64,
    epsilon: f64,
    min_duration_s: f64,
) -> Segmentation {
    let n = ts.len().min(velocity.len());
    let peak = velocity[..n].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let threshold = threshold_frac * peak + epsilon;

    let mut out = Segmentation { threshold, ..Default::default() };
    let mut i = 0;
    while i < n {
        if velocity[i] > threshold {
            let mut j = i;
            while j + 1 < n && velocity[j + 1] > threshold {
                j += 1;
            }
            let region = ActiveRegion { start: i, end: j };
            if region.duration(ts) >= min_duration_s {
                out.regions.push(region);
            } else {
                out.dropped += 1;
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_burst_is_dropped() {
        let ts: Vec<f64> = (0..100).map(|i| i as f64 * 0.02).collect();
        let mut v = vec![0.0; 100];
        // 0.1 s burst
        for x in v.iter_mut().skip(10).take(6) {
            *x = 1.0;
        }
        // 0.6 s burst
        for x in v.iter_mut().skip(40).take(31) {
            *x = 1.0;
        }
        let seg = find_active_regions(&ts, &v, 0.02, 1e-6, 0.4);
        assert_eq!(seg.dropped, 1);
        assert_eq!(seg.regions, vec![ActiveRegion { start: 40, end: 70 }]);
    }
}
