//! Error types for capy-icons

/// Errors from loading tray icon configuration.
///
/// Resolution itself never fails; a missing icon is an empty result.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
