use thiserror::Error;

/// Fatal initialization failures of the video subsystem.
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("invalid design size {width}x{height}: both axes must be > 0")]
    InvalidDesignSize { width: u32, height: u32 },

    #[error("no rendering backend could be constructed")]
    NoBackend(#[source] anyhow::Error),
}
