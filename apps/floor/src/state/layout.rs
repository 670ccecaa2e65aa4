//! # Layout State
//!
//! The floor layout currently on screen and the file it is saved to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_table / select_table_at ──► layout.place(..)        (write)     │
//! │  floor_plan / hit-test ──────────► layout.iter(), at(..)   (read)      │
//! │  save_layout(path?) ─────────────► write file, then path = path?       │
//! │  load_layout(path?) ─────────────► path = path?, replace layout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tableside_core::Layout;

/// Layout plus the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorLayout {
    pub layout: Layout,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct LayoutState {
    inner: Mutex<FloorLayout>,
}

impl LayoutState {
    pub fn new(layout: Layout, path: impl Into<PathBuf>) -> Self {
        LayoutState {
            inner: Mutex::new(FloorLayout {
                layout,
                path: path.into(),
            }),
        }
    }

    /// Executes a function with read access to the layout.
    pub fn with_layout<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FloorLayout) -> R,
    {
        let floor = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&floor)
    }

    /// Executes a function with write access to the layout.
    pub fn with_layout_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FloorLayout) -> R,
    {
        let mut floor = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut floor)
    }

    pub fn path(&self) -> PathBuf {
        self.with_layout(|floor| floor.path.clone())
    }

    /// Installs a freshly loaded layout and remembers where it came from.
    pub fn replace(&self, layout: Layout, path: &Path) {
        self.with_layout_mut(|floor| {
            floor.layout = layout;
            floor.path = path.to_path_buf();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableside_core::PlacementScheme;

    #[test]
    fn test_replace_updates_path() {
        let state = LayoutState::new(Layout::new(), "a.json");
        state.replace(Layout::default_for(PlacementScheme::Sided), Path::new("b.json"));

        assert_eq!(state.path(), PathBuf::from("b.json"));
        assert_eq!(state.with_layout(|f| f.layout.len()), 2);
    }
}
