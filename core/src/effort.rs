use crate::baseline::{BaselineUpdate, RomBaselineStore};
use crate::curve::argmin_from;
use crate::physics::{peak_displacement, trapezoid_area, EPS, PEAK_FLOOR};
use crate::types::{EffortBlock, RepLabel};

pub const ROM_PCT_MAX: f64 = 1.2;
pub const ROM_FULL: f64 = 0.95;
pub const PLATEAU_BAND: f64 = 0.05;

const GAIN_MIN: f64 = 0.10;
const IMPULSE_LOW: f64 = 0.10;
const PLATEAU_LOW: f64 = 0.35;
const PLATEAU_HIGH: f64 = 0.45;
const LPVR_ALIVE: f64 = 0.12;
const LPVR_DEAD: f64 = 0.08;

/// Signalene etikettreglene ser på.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EffortSignals {
    pub rom_pct: f64,
    pub impulse_norm: f64,
    pub lpvr: f64,
    pub plateau_frac: f64,
    pub post_sr_gain: f64,
}

/// Ordnet regelkjede; første treff vinner.
pub fn classify_rep(s: &EffortSignals) -> RepLabel {
    let full = s.rom_pct >= ROM_FULL;
    if full && s.post_sr_gain >= GAIN_MIN && s.plateau_frac <= PLATEAU_LOW {
        return RepLabel::Completed;
    }
    if !full && s.impulse_norm <= IMPULSE_LOW && s.plateau_frac >= PLATEAU_HIGH {
        return RepLabel::TrueFailure;
    }
    if !full && (s.impulse_norm > IMPULSE_LOW || s.lpvr >= LPVR_ALIVE) && s.plateau_frac < PLATEAU_LOW {
        return RepLabel::Aborted;
    }
    if s.impulse_norm <= IMPULSE_LOW && s.lpvr < LPVR_DEAD {
        RepLabel::TrueFailure
    } else {
        RepLabel::Aborted
    }
}

/// Inndata for én rep: rå tidsserier og den justerte kurven.
/// `velocity` er den kondisjonerte hastigheten (topp-normering av impulsen),
/// `raw_velocity` er repens egen, ikke-detrenderte hastighet (forflytning/ROM).
#[derive(Debug, Clone, Copy)]
pub struct EffortInput<'a> {
    pub lift: &'a str,
    pub time: &'a [f64],
    pub acceleration: &'a [f64],
    pub velocity: &'a [f64],
    pub raw_velocity: &'a [f64],
    pub aligned: &'a [f64],
}

/// ROM%, sticking-region og etikett. Returnerer også baseline-forslaget;
/// lageret endres ikke her.
pub fn analyze_effort(input: &EffortInput<'_>, store: &RomBaselineStore) -> (EffortBlock, BaselineUpdate) {
    let displacement = peak_displacement(input.raw_velocity, input.time);
    let update = store.propose(input.lift, displacement);
    let baseline = update.value;
    let rom_pct = if baseline > EPS {
        (displacement / baseline).clamp(0.0, ROM_PCT_MAX)
    } else {
        0.0
    };

    let aligned = input.aligned;
    let n = aligned.len();
    let len = input.time.len().min(input.acceleration.len());

    let (posr_impulse, posr_impulse_norm, lpvr, plateau_frac, post_sr_gain) = if n == 0 || len == 0 {
        (0.0, 0.0, 0.0, 0.0, 0.0)
    } else {
        let mi = argmin_from(aligned, n / 10);
        let frac = if n > 1 { mi as f64 / (n - 1) as f64 } else { 0.0 };
        let ri = ((frac * (len - 1) as f64).round() as usize).min(len - 1);

        // positiv del av akselerasjonen etter sticking-punktet
        let pos_acc: Vec<f64> = input.acceleration[ri..len].iter().map(|a| a.max(0.0)).collect();
        let impulse = trapezoid_area(&pos_acc, &input.time[ri..len]);
        let peak_v = input.velocity.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(PEAK_FLOOR);
        let impulse_norm = impulse / peak_v;

        let tail = (n / 5).max(1);
        let lpvr = aligned[n - tail..].iter().sum::<f64>() / tail as f64;

        let post = &aligned[mi + 1..];
        let plateau = if post.is_empty() {
            0.0
        } else {
            post.iter().filter(|x| x.abs() < PLATEAU_BAND).count() as f64 / post.len() as f64
        };
        let gain = aligned[n - 1] - aligned[mi];
        (impulse, impulse_norm, lpvr, plateau, gain)
    };

    let label = classify_rep(&EffortSignals {
        rom_pct,
        impulse_norm: posr_impulse_norm,
        lpvr,
        plateau_frac,
        post_sr_gain,
    });

    let block = EffortBlock {
        rom_pct,
        rom_baseline_m: baseline,
        displacement_m: displacement,
        posr_impulse,
        posr_impulse_norm,
        lpvr,
        plateau_frac,
        post_sr_gain,
        label,
    };
    (block, update)
}
