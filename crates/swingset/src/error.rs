//! # Simulation Error Types
//!
//! All errors that can occur while building or running the simulation.

use std::path::PathBuf;

use swingset_ui::WidgetError;
use thiserror::Error;

/// Errors raised by the chain model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// `cos(angle)` vanished, so the tension formula has no value.
    #[error("undefined tension at body {index}: angle {angle} rad is too close to ±90°")]
    UndefinedTension {
        /// Body whose angle broke the formula.
        index: usize,
        /// The offending angle.
        angle: f64,
    },

    /// A body could not be built.
    #[error("invalid body {index}: {reason}")]
    InvalidBody {
        /// Body index (0 is the root).
        index: usize,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level simulation error.
#[derive(Error, Debug)]
pub enum SimError {
    /// Widget construction failed.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// Chain construction failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for simulation setup.
pub type SimResult<T> = Result<T, SimError>;
