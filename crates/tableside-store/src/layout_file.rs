//! # Layout File
//!
//! Reading and writing the floor layout document.
//!
//! ## Load Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_layout(path, scheme)                                              │
//! │                                                                         │
//! │  file missing ───────────────► built-in default     source: Default    │
//! │  file readable + valid ──────► decoded layout       source: File       │
//! │  unreadable / malformed ─────► EMPTY layout         source: Empty      │
//! │                                + warning text for the operator          │
//! │                                                                         │
//! │  Never an error: a broken layout file must not stop service.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tableside_core::{Layout, PlacementScheme};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Where a loaded layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSource {
    File,
    Default,
    Empty,
}

/// Result of [`load_layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLayout {
    pub layout: Layout,
    pub source: LayoutSource,
    /// Set when the file existed but could not be used.
    pub warning: Option<String>,
}

/// Reads and decodes a layout file.
pub fn read_layout(path: &Path) -> StoreResult<Layout> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Layout::from_json(&text).map_err(|source| StoreError::Layout {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the layout at `path`, falling back instead of failing.
pub fn load_layout(path: &Path, scheme: PlacementScheme) -> LoadedLayout {
    if !path.exists() {
        info!(?path, %scheme, "No layout file, installing default layout");
        return LoadedLayout {
            layout: Layout::default_for(scheme),
            source: LayoutSource::Default,
            warning: None,
        };
    }

    match read_layout(path) {
        Ok(layout) => {
            info!(?path, tables = layout.len(), "Layout loaded");
            LoadedLayout {
                layout,
                source: LayoutSource::File,
                warning: None,
            }
        }
        Err(e) => {
            warn!(?path, error = %e, "Layout load failed, continuing with an empty layout");
            LoadedLayout {
                layout: Layout::new(),
                source: LayoutSource::Empty,
                warning: Some(format!("Loading the layout failed: {}", e)),
            }
        }
    }
}

/// Writes the layout as pretty JSON.
///
/// The document goes to a sibling temp file first and is renamed over the
/// target, so a failed write never leaves a truncated layout behind.
pub fn save_layout(path: &Path, layout: &Layout) -> StoreResult<()> {
    let json = layout.to_json().map_err(|source| StoreError::Layout {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })?;

    debug!(?path, tables = layout.len(), "Layout saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
