//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Filesystem    │  │  Layout file    │  │   Configuration         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Layout         │  │  ConfigLoadFailed       │ │
//! │  │                 │  │  (bad document) │  │  ConfigSaveFailed       │ │
//! │  │                 │  │                 │  │  InvalidConfig          │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tableside_core::LayoutError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Filesystem Errors
    // =========================================================================
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Layout Errors
    // =========================================================================
    /// The layout file exists but its document is unusable.
    #[error("Layout file {path} is invalid: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config values that parse but make no sense.
    #[error("Invalid floor configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}
