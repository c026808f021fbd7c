//! Error types for voxdump
//!
//! All modules use `VoxdumpResult<T>` as their return type. Fatal errors
//! end the run; per-file copy and classification failures are counted,
//! never raised.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for voxdump operations
pub type VoxdumpResult<T> = Result<T, VoxdumpError>;

/// All errors that can occur in voxdump
#[derive(Error, Debug)]
pub enum VoxdumpError {
    // Environment errors
    #[error("Unsupported platform: {0}. Voxdump supports Linux, macOS and Windows.")]
    UnsupportedPlatform(String),

    #[error("Unable to determine the home directory")]
    HomeDirUnavailable,

    #[error("Unable to determine the current working directory")]
    CurrentDirUnavailable(#[source] std::io::Error),

    #[error("Unable to parse SUDO_UID value: {value}")]
    SudoUidInvalid { value: String },

    #[error("Reading cache files on macOS requires elevated privileges")]
    ElevationRequired,

    // Scan errors
    #[error("Unable to list cache directory for Vox {variant}: {path}")]
    CacheDirUnreadable {
        variant: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Storage errors
    #[error("Insufficient storage on the destination volume: {shortfall} more bytes needed")]
    InsufficientStorage { shortfall: u64 },

    // Dump errors
    #[error("Failed to create dump directory {path}: {source}")]
    DumpDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl VoxdumpError {
    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ElevationRequired => Some("Re-run with: sudo voxdump dump"),
            Self::InsufficientStorage { .. } => {
                Some("Free up space or pass --output pointing at a larger volume")
            }
            Self::SudoUidInvalid { .. } => Some("Unset SUDO_UID or re-run through sudo"),
            _ => None,
        }
    }
}
