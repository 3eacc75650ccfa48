//! Error type for the crate's edges: loading step lists and configuration,
//! file I/O in the CLI, and optional rasterization.
//!
//! Layout, hit-testing and rendering never fail; they degrade to drawing
//! nothing instead.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("step list JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid step list: {message}")]
    InvalidStepList { message: String },
    #[error("invalid canvas config: {message}")]
    InvalidConfig { message: String },
    #[cfg(feature = "raster")]
    #[error("raster rendering failed: {message}")]
    Raster { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_step_list(message: impl Into<String>) -> Self {
        Self::InvalidStepList {
            message: message.into(),
        }
    }
}
