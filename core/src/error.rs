use thiserror::Error;

/// Feil som kan oppstå i grenseflaten (JSON, fil, CSV, metrikk-registrering).
/// Selve signal-pipelinen returnerer aldri feil.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl LiftError {
    /// Pakker inn en serde_path_to_error-feil og beholder JSON-stien.
    pub fn from_path_error(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        LiftError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LiftError>;
