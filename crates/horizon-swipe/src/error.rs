//! Error types for Horizon Swipe.
//!
//! Interaction paths (gestures, animation, button activation) never fail:
//! anything unexpected there degrades to "panel stays closed". Errors are
//! reserved for configuration and for host calls that name a row the table
//! does not know.

use std::path::PathBuf;

use thiserror::Error;

use crate::swipe::RowId;

/// Result type alias for swipe operations.
pub type SwipeResult<T> = std::result::Result<T, SwipeError>;

/// Errors that can occur in Horizon Swipe.
#[derive(Error, Debug)]
pub enum SwipeError {
    /// A setting has a value the controller cannot work with.
    #[error("invalid value for setting '{name}': {message}")]
    InvalidSetting {
        name: &'static str,
        message: &'static str,
    },

    /// Failed to parse a TOML configuration.
    #[error("failed to parse swipe configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to serialize a configuration to TOML.
    #[error("failed to serialize swipe configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Failed to read a configuration file.
    #[error("failed to read swipe configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table has no row with this ID (removed or never inserted).
    #[error("unknown row {0:?}")]
    UnknownRow(RowId),

    /// An action sheet answer named a request that is no longer pending.
    #[error("action sheet ticket is no longer pending")]
    StaleTicket,

    /// An action sheet answer named an option that does not exist.
    #[error("action sheet has no option {0}")]
    InvalidChoice(usize),
}

impl SwipeError {
    /// Create an invalid setting error.
    pub fn invalid(name: &'static str, message: &'static str) -> Self {
        Self::InvalidSetting { name, message }
    }
}
