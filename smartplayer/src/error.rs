//! Error types for the NFSmartPlayer bindings

use std::ffi::NulError;
use thiserror::Error;

/// Error type for player operations
#[derive(Debug, Error)]
pub enum Error {
    /// The engine returned a null handle at open
    #[error("failed to open player")]
    Open,

    /// The player has been closed
    #[error("player is closed")]
    Closed,

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A string destined for the engine contains an interior nul byte
    #[error("interior nul byte: {0}")]
    Nul(#[from] NulError),
}

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;
