use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Foreslått ny baseline for en løftkategori. Beregnes rent, og skrives
/// først til lageret når repen er ferdig analysert.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineUpdate {
    pub key: String,
    pub previous: Option<f64>,
    pub value: f64,
}

impl BaselineUpdate {
    pub fn raises(&self) -> bool {
        match self.previous {
            Some(p) => self.value > p,
            None => self.value > 0.0,
        }
    }
}

/// Per-løft løpende maksimum av konsentrisk forflytning (m).
/// Verdiene synker aldri i løpet av en økt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RomBaselineStore {
    #[serde(default)]
    baselines: BTreeMap<String, f64>,
}

impl RomBaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalisert nøkkel: trimmet og små bokstaver.
    pub fn key_for(lift: &str) -> String {
        lift.trim().to_lowercase()
    }

    pub fn get(&self, lift: &str) -> Option<f64> {
        self.baselines.get(&Self::key_for(lift)).copied()
    }

    /// max(lagret, displacement) uten å endre lageret.
    pub fn propose(&self, lift: &str, displacement_m: f64) -> BaselineUpdate {
        let key = Self::key_for(lift);
        let previous = self.baselines.get(&key).copied();
        let d = if displacement_m.is_finite() { displacement_m.max(0.0) } else { 0.0 };
        BaselineUpdate {
            value: previous.unwrap_or(0.0).max(d),
            key,
            previous,
        }
    }

    /// Skriver forslaget. Monoton: en lavere (eller ikke-endelig) verdi ignoreres.
    pub fn commit(&mut self, update: &BaselineUpdate) -> bool {
        if !update.value.is_finite() {
            return false;
        }
        let slot = self.baselines.entry(update.key.clone()).or_insert(0.0);
        if update.value > *slot {
            *slot = update.value;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.baselines.clear();
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.baselines.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propose_is_pure_and_commit_is_monotone() {
        let mut store = RomBaselineStore::new();
        let up = store.propose(" Back Squat ", 0.5);
        assert!(store.is_empty());
        assert!(store.commit(&up));
        assert_eq!(store.get("back squat"), Some(0.5));

        let lower = store.propose("back squat", 0.3);
        assert_eq!(lower.value, 0.5);
        assert!(!store.commit(&lower));
        assert!(!store.commit(&BaselineUpdate { key: "back squat".into(), previous: None, value: 0.1 }));
        assert_eq!(store.get("BACK SQUAT"), Some(0.5));
    }
}
