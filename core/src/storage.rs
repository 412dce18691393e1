use std::path::Path;

use log::{info, warn};

use crate::baseline::RomBaselineStore;
use crate::config::PipelineConfig;
use crate::error::Result;

/// Leser inn ROM-baselines fra disk (JSON).
/// Hvis filen ikke finnes, returneres et tomt lager.
pub fn load_baselines(path: impl AsRef<Path>) -> Result<RomBaselineStore> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let store: RomBaselineStore = serde_json::from_str(&contents)?;
        info!("📂 ROM-baselines lastet fra {} ({} løft)", path.display(), store.len());
        Ok(store)
    } else {
        warn!("⚠️ Fant ikke baselines på {}, starter med tomt lager", path.display());
        Ok(RomBaselineStore::new())
    }
}

/// Lagrer baselines til disk som JSON (pretty-print).
pub fn save_baselines(store: &RomBaselineStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(store)?;
    std::fs::write(path, json)?;
    info!("✅ ROM-baselines lagret til {} ({} løft)", path.display(), store.len());
    Ok(())
}

/// Pipeline-konfig fra JSON. Manglende fil → default. Verdiene klemmes.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("⚠️ Fant ikke konfig på {}, bruker default", path.display());
        return Ok(PipelineConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    let cfg = crate::session::parse_config(&contents)?;
    info!("📂 Konfig lastet fra {}", path.display());
    Ok(cfg)
}
