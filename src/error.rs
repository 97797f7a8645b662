//! Configuration errors
//!
//! The simulation itself never fails; only loading preferences and balance
//! data from outside can.

use thiserror::Error;

/// Errors raised while building configuration from external data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown skin '{0}' (expected default, ninja or robot)")]
    UnknownSkin(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
}
