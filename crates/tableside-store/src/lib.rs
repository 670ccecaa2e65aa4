//! # tableside-store: Files and Configuration
//!
//! The only crate in the workspace that reads or writes files.
//!
//! ## Modules
//!
//! - [`layout_file`] - Layout document load (with recovery) and atomic save
//! - [`config`] - `FloorConfig` from TOML, environment and defaults
//! - [`error`] - Store error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tableside_store::{load_layout, FloorConfig};
//!
//! let config = FloorConfig::load_or_default(None);
//! let loaded = load_layout(config.layout_file(), config.scheme());
//! if let Some(warning) = &loaded.warning {
//!     eprintln!("{}", warning);
//! }
//! ```

pub mod config;
pub mod error;
pub mod layout_file;

pub use config::{BillingSettings, FloorConfig, LayoutSettings};
pub use error::{StoreError, StoreResult};
pub use layout_file::{load_layout, read_layout, save_layout, LayoutSource, LoadedLayout};
