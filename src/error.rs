//! Error types for configuration and host-environment failures.
//!
//! The simulation itself never fails: every per-frame operation is plain
//! arithmetic against an already-validated configuration.  Everything that
//! can go wrong is caught once, at startup, and surfaces here.

use std::path::PathBuf;

/// Top-level error for the fireworks crate.
#[derive(thiserror::Error, Debug)]
pub enum FireworksError {
    /// A configuration value would produce degenerate behaviour.
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field, as spelled in the TOML file.
        field: &'static str,
        /// What the value must satisfy.
        reason: String,
    },

    /// The configuration file exists but is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The drawing surface or frame source cannot be used.
    ///
    /// Raised when stdout is not a terminal or the terminal reports a
    /// zero-sized window.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// I/O error while talking to the terminal or reading files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias: a `Result` using [`FireworksError`].
pub type Result<T> = std::result::Result<T, FireworksError>;

impl FireworksError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
