use crate::metrics::{
    fatigue_index, mean, mean_accuracy, rom_hit_rate, rom_variability_cm, velocity_loss_pct,
    velocity_trend,
};
use crate::physics::RoundTo;
use crate::types::{RepEvent, SetSummary, SetUpdate};

pub const NO_REPS_TIP: &str = "No reps recorded.";

/// Settsammendrag fra en endelig sekvens RepEvents.
/// Tom inngang gir nullet sammendrag med "No reps recorded.".
pub fn aggregate_set(reps: &[RepEvent]) -> SetSummary {
    if reps.is_empty() {
        return SetSummary {
            tip: NO_REPS_TIP.to_string(),
            rom_variability: Some(0.0),
            velocity_trend: velocity_trend(&[]),
            ..Default::default()
        };
    }

    let speeds: Vec<f64> = reps.iter().map(|r| r.metrics.speed).collect();
    let total_tut: f64 = reps.iter().map(|r| r.metrics.tut).sum();
    let avg_speed = mean(&speeds).unwrap_or(0.0);
    let vl = velocity_loss_pct(&speeds).unwrap_or(0.0);
    let hit_rate = rom_hit_rate(reps).unwrap_or(0.0);
    let accuracy = mean_accuracy(reps);

    // regelkjeden bruker u-avrundede verdier
    let mut tip = coaching_tip(reps.len(), vl, hit_rate, avg_speed);
    if let Some(acc) = accuracy {
        tip.push(' ');
        tip.push_str(&accuracy_note(acc));
    }

    SetSummary {
        reps: reps.len(),
        tut: total_tut.round_to(2),
        avg_speed: avg_speed.round_to(2),
        vl: vl.round_to(1),
        rom_hit_rate: hit_rate.round_to(1),
        rom_variability: rom_variability_cm(reps).map(|v| v.round_to(1)),
        mean_accuracy: accuracy.map(|a| a.round_to(1)),
        fatigue_index: fatigue_index(&speeds).round_to(1),
        velocity_trend: velocity_trend(&speeds),
        tip,
    }
}

/// Coaching-tips: VL først, så ROM, så fart, ellers standardmelding.
pub fn coaching_tip(reps: usize, vl: f64, rom_hit_rate: f64, avg_speed: f64) -> String {
    if vl < 10.0 {
        let extra = (reps as f64 * 0.5).ceil() as i64;
        return format!(
            "Excellent speed consistency. You likely had {} more reps in the tank. Consider adding load.",
            extra
        );
    } else if vl > 30.0 {
        return "High velocity loss detected. Great work pushing hard, but watch for form breakdown on future sets."
            .to_string();
    }

    if rom_hit_rate < 80.0 {
        return format!(
            "ROM hit rate was {}%. Focus on depth consistency next set. Quality over quantity.",
            rom_hit_rate.trunc() as i64
        );
    } else if rom_hit_rate == 100.0 {
        return "Perfect ROM consistency! Your movement quality is excellent. Keep this up.".to_string();
    }

    if avg_speed < 0.3 {
        return "Bar speed is slowing down. Consider reducing load or increasing rest between sets.".to_string();
    } else if avg_speed > 0.6 {
        return "Fast bar speed indicates room for load progression. Add 2.5-5% next session.".to_string();
    }

    format!(
        "Solid set! VL at {}% with {}% ROM hits. Stay consistent.",
        vl.trunc() as i64,
        rom_hit_rate.trunc() as i64
    )
}

/// Tilleggsnotat ut fra snitt-nøyaktighet mot referansekurven.
pub fn accuracy_note(mean_accuracy: f64) -> String {
    let pct = mean_accuracy.round() as i64;
    if mean_accuracy >= 85.0 {
        format!("Bar path matched the reference profile well ({}% match).", pct)
    } else if mean_accuracy >= 70.0 {
        format!("Bar path mostly followed the reference ({}% match); keep driving through the sticking point.", pct)
    } else {
        format!("Bar path drifted from the reference ({}% match); slow the eccentric and groove the pattern.", pct)
    }
}

/// Løpende HUD-snapshot mens settet pågår.
pub fn live_update(reps: &[RepEvent]) -> SetUpdate {
    let speeds: Vec<f64> = reps.iter().map(|r| r.metrics.speed).collect();
    SetUpdate {
        reps_completed: reps.len(),
        avg_speed: mean(&speeds).unwrap_or(0.0).round_to(2),
        vl: velocity_loss_pct(&speeds).unwrap_or(0.0).round_to(1),
        rom_hit_rate: rom_hit_rate(reps).unwrap_or(0.0).round_to(1),
    }
}
