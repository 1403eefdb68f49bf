//! Error types for engine construction and audio frame validation.

use thiserror::Error;

/// Rejected [`crate::SphereConfig`] values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("particle count must be at least 1")]
    NoParticles,

    #[error("stripe count must be at least 1")]
    NoStripes,

    /// Every stripe needs at least one particle to draw a contour.
    #[error("{stripes} stripes requested for only {particles} particles")]
    TooManyStripes { stripes: usize, particles: usize },
}

/// Rejected analyser buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioFrameError {
    #[error("time-domain buffer is empty")]
    EmptyTimeDomain,

    /// An analyser exposes half as many frequency bins as time-domain samples.
    #[error("expected {expected} frequency bins for {samples} samples, got {bins}")]
    BinCountMismatch {
        samples: usize,
        expected: usize,
        bins: usize,
    },
}

#[derive(Debug, Error)]
pub enum SphereError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid audio frame: {0}")]
    AudioFrame(#[from] AudioFrameError),
}
