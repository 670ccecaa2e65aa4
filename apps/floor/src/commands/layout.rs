//! # Layout Commands
//!
//! Putting tables on the map, clicking the map, and persisting the layout.
//!
//! ## Placing a Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two-step (placement dialog)          Direct                            │
//! │                                                                         │
//! │  begin_table_placement(7, sides)      place_table(7, x, y, sides)       │
//! │     │ validate, create ledger,           │ validate, place,             │
//! │     │ arm pending                        │ create ledger                │
//! │     ▼                                    ▼                              │
//! │  select_table_at(x, y)                table 7 on the map                │
//! │     │ place 7 at (x, y),                                                │
//! │     │ select 7, clear pending                                           │
//! │     ▼                                                                   │
//! │  table 7 on the map, selected                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{ConfigState, LayoutState, LedgerState, PendingPlacement, SelectionState};
use tableside_core::validation::validate_table_number;
use tableside_core::{
    Bounds, Geometry, Layout, Placement, PlacementScheme, Point, Seat, Sides, TableNumber,
};
use tableside_store::LayoutSource;

// =============================================================================
// Response Types
// =============================================================================

/// One table as drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TableView {
    pub number: TableNumber,
    pub placement: Placement,
    pub bounds: Bounds,
    /// Clockwise from the top-left seat; empty for anchored tables
    pub seats: Vec<Seat>,
    pub selected: bool,
}

impl TableView {
    fn build(geometry: &Geometry, number: TableNumber, placement: &Placement, selected: bool) -> Self {
        TableView {
            number,
            placement: *placement,
            bounds: geometry.placement_bounds(placement),
            seats: geometry.seats(placement),
            selected,
        }
    }
}

/// Everything the map needs to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FloorPlan {
    pub tables: Vec<TableView>,
    pub selected: Option<TableNumber>,
    /// Table waiting for a map click, if any
    pub pending: Option<TableNumber>,
    pub geometry: Geometry,
}

/// Outcome of a layout load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoadLayoutResponse {
    #[ts(type = "string")]
    pub path: PathBuf,
    #[ts(type = "\"file\" | \"default\" | \"empty\"")]
    pub source: LayoutSource,
    pub tables: usize,
    /// Shown to the operator when the file could not be used
    pub warning: Option<String>,
}

// =============================================================================
// Commands
// =============================================================================

/// Places (or moves) a table in one step.
///
/// Under the anchored scheme `(x, y)` is the top-left anchor and `sides` is
/// ignored.
#[allow(clippy::too_many_arguments)]
pub fn place_table(
    layout: &LayoutState,
    ledgers: &LedgerState,
    selection: &SelectionState,
    config: &ConfigState,
    number: i64,
    x: i32,
    y: i32,
    sides: Sides,
) -> Result<TableView, ApiError> {
    debug!(number, x, y, ?sides, "place_table command");

    let number = validate_table_number(number)?;
    let point = Point::new(x, y);

    let placement = layout.with_layout_mut(|floor| {
        put_table(&mut floor.layout, config.scheme, number, point, sides)
    })?;
    ledgers.get_or_create(number);

    info!(table = %number, x, y, scheme = %config.scheme, "Table placed");
    let selected = selection.selected() == Some(number);
    Ok(TableView::build(&config.geometry, number, &placement, selected))
}

/// Arms a placement: the next map click drops table `number` there.
pub fn begin_table_placement(
    ledgers: &LedgerState,
    selection: &SelectionState,
    config: &ConfigState,
    number: i64,
    sides: Sides,
) -> Result<PendingPlacement, ApiError> {
    debug!(number, ?sides, "begin_table_placement command");

    let number = validate_table_number(number)?;
    if config.scheme == PlacementScheme::Sided {
        sides.validate()?;
    }

    ledgers.get_or_create(number);
    let pending = PendingPlacement { number, sides };
    selection.arm_placement(pending);

    info!(table = %number, "Waiting for a map click to place table");
    Ok(pending)
}

/// Handles a click on the map.
///
/// Places the pending table at the click if one is armed; otherwise selects
/// the table under the click. A click on empty floor keeps the current
/// selection. Returns the selection after the click.
pub fn select_table_at(
    layout: &LayoutState,
    ledgers: &LedgerState,
    selection: &SelectionState,
    config: &ConfigState,
    x: i32,
    y: i32,
) -> Result<Option<TableNumber>, ApiError> {
    debug!(x, y, "select_table_at command");
    let point = Point::new(x, y);

    if let Some(pending) = selection.snapshot().pending {
        layout.with_layout_mut(|floor| {
            put_table(&mut floor.layout, config.scheme, pending.number, point, pending.sides)
        })?;
        ledgers.get_or_create(pending.number);
        selection.with_selection_mut(|s| {
            s.pending = None;
            s.selected = Some(pending.number);
        });

        info!(table = %pending.number, x, y, "Pending table placed");
        return Ok(Some(pending.number));
    }

    let hit = layout.with_layout(|floor| floor.layout.at(&config.geometry, point));
    match hit {
        Some(table) => {
            ledgers.get_or_create(table);
            selection.select(table);
            info!(table = %table, "Table selected");
            Ok(Some(table))
        }
        None => {
            debug!(x, y, "Click hit no table");
            Ok(selection.selected())
        }
    }
}

/// Current map contents, in ascending table order.
pub fn floor_plan(layout: &LayoutState, selection: &SelectionState, config: &ConfigState) -> FloorPlan {
    debug!("floor_plan command");

    let current = selection.snapshot();
    let tables = layout.with_layout(|floor| {
        floor
            .layout
            .iter()
            .map(|(number, placement)| {
                TableView::build(&config.geometry, number, placement, current.selected == Some(number))
            })
            .collect()
    });

    FloorPlan {
        tables,
        selected: current.selected,
        pending: current.pending.map(|p| p.number),
        geometry: config.geometry,
    }
}

/// Writes the layout to `path`, or to the current layout file.
///
/// A given path becomes the layout file for later saves once the write
/// succeeded; a failed save keeps the previous layout file.
pub fn save_layout(layout: &LayoutState, path: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    debug!(?path, "save_layout command");

    let target = layout.with_layout_mut(|floor| -> Result<PathBuf, ApiError> {
        let target = path.unwrap_or_else(|| floor.path.clone());
        tableside_store::save_layout(&target, &floor.layout)?;
        floor.path = target.clone();
        Ok(target)
    })?;

    info!(path = ?target, "Layout saved");
    Ok(target)
}

/// Replaces the layout with the one stored at `path` (or the current file).
///
/// Never fails: a missing file installs the default layout and a broken one
/// installs an empty layout with a warning. Every loaded table gets a ledger.
pub fn load_layout(
    layout: &LayoutState,
    ledgers: &LedgerState,
    config: &ConfigState,
    path: Option<PathBuf>,
) -> LoadLayoutResponse {
    debug!(?path, "load_layout command");

    let path = path.unwrap_or_else(|| layout.path());
    let loaded = tableside_store::load_layout(&path, config.scheme);

    ledgers.ensure_all(loaded.layout.table_numbers());
    let tables = loaded.layout.len();
    layout.replace(loaded.layout, &path);

    if let Some(warning) = &loaded.warning {
        warn!(path = ?path, %warning, "Layout replaced by an empty one");
    } else {
        info!(path = ?path, tables, source = ?loaded.source, "Layout installed");
    }

    LoadLayoutResponse {
        path,
        source: loaded.source,
        tables,
        warning: loaded.warning,
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn put_table(
    layout: &mut Layout,
    scheme: PlacementScheme,
    number: TableNumber,
    point: Point,
    sides: Sides,
) -> Result<Placement, ApiError> {
    match scheme {
        PlacementScheme::Sided => layout.place(number, point, sides)?,
        PlacementScheme::Anchored => layout.place_anchored(number, point),
    }
    layout
        .get(number)
        .copied()
        .ok_or_else(|| ApiError::internal(format!("Table {} vanished after placement", number)))
}
