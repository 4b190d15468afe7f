// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────
//! Scoring formulas are total and never return these. Errors are limited
//! to configuration problems and precondition failures where no safe
//! default exists.

use thiserror::Error;

/// Root error type for engine failures.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration value or unparsable config document.
    #[error("config error: {0}")]
    Config(String),

    /// Caller-supplied input could not be interpreted (e.g. a malformed date).
    #[error("validation error: {0}")]
    Validation(String),

    /// A calibration blend was requested without a calibration baseline.
    #[error("missing calibration: {0}")]
    MissingCalibration(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
