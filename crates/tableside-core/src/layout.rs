//! # Layout Module
//!
//! The set of placed tables and its document form.
//!
//! ## Document Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Side-based placement                Anchored placement (simplified)   │
//! │                                                                         │
//! │  { "tables": {                       { "tables": {                      │
//! │      "1": {                              "1": { "x": 70, "y": 70 }      │
//! │        "center": {"x":100,"y":100},  } }                                │
//! │        "sides": {"up":2,"right":2,                                      │
//! │                  "down":2,"left":2}                                     │
//! │      } } }                                                              │
//! │                                                                         │
//! │  Keys are strings in the document and table numbers in memory.          │
//! │  Unknown or missing fields fail the whole document.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Older layout files use the anchored form, so both shapes decode into the
//! one [`Placement`] type; geometry code never has to look at raw fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::error::{LayoutError, ValidationError};
use crate::geometry::Geometry;
use crate::types::{Point, Sides, TableNumber};
use crate::validation::{parse_table_number, ValidationResult};

// =============================================================================
// Placement
// =============================================================================

/// Center point plus seat counts per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct SidedPlacement {
    pub center: Point,
    pub sides: Sides,
}

/// Where a table stands on the floor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Placement {
    /// Rectangle sized by its side counts.
    Sided(SidedPlacement),
    /// Fixed-diameter circle anchored at its top-left point.
    Anchored(Point),
}

impl Placement {
    /// Seat capacity, when the placement records one.
    pub fn sides(&self) -> Option<Sides> {
        match self {
            Placement::Sided(sided) => Some(sided.sides),
            Placement::Anchored(_) => None,
        }
    }
}

/// Which placement form a deployment creates for new tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlacementScheme {
    #[default]
    Sided,
    Anchored,
}

impl fmt::Display for PlacementScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementScheme::Sided => write!(f, "sided"),
            PlacementScheme::Anchored => write!(f, "anchored"),
        }
    }
}

impl std::str::FromStr for PlacementScheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sided" | "rectangle" => Ok(PlacementScheme::Sided),
            "anchored" | "circle" => Ok(PlacementScheme::Anchored),
            other => Err(ValidationError::InvalidFormat {
                field: "placement scheme".to_string(),
                reason: format!("unknown scheme '{}', expected sided or anchored", other),
            }),
        }
    }
}

// =============================================================================
// Layout Document
// =============================================================================

/// The persisted form of a layout, keyed by table number as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    pub tables: BTreeMap<String, Placement>,
}

// =============================================================================
// Layout
// =============================================================================

/// Table number → placement. Overlapping tables are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    tables: BTreeMap<TableNumber, Placement>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or overwrites a side-based table.
    ///
    /// Rejects a table with no seats at all.
    pub fn place(&mut self, number: TableNumber, center: Point, sides: Sides) -> ValidationResult<()> {
        sides.validate()?;
        self.tables
            .insert(number, Placement::Sided(SidedPlacement { center, sides }));
        Ok(())
    }

    /// Registers or overwrites an anchored table.
    pub fn place_anchored(&mut self, number: TableNumber, anchor: Point) {
        self.tables.insert(number, Placement::Anchored(anchor));
    }

    pub fn get(&self, number: TableNumber) -> Option<&Placement> {
        self.tables.get(&number)
    }

    /// Tables in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (TableNumber, &Placement)> {
        self.tables.iter().map(|(n, p)| (*n, p))
    }

    pub fn table_numbers(&self) -> impl Iterator<Item = TableNumber> + '_ {
        self.tables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Resolves a map click to a table.
    ///
    /// With overlapping tables the lowest table number wins.
    pub fn at(&self, geometry: &Geometry, point: Point) -> Option<TableNumber> {
        self.iter()
            .find(|(_, placement)| geometry.contains(placement, point))
            .map(|(number, _)| number)
    }

    /// Produces the persisted document.
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            tables: self
                .tables
                .iter()
                .map(|(number, placement)| (number.to_string(), *placement))
                .collect(),
        }
    }

    /// Rebuilds a layout from its document.
    ///
    /// The whole document fails if any key is not a positive integer, two
    /// keys name the same table (`"1"` and `"01"`), or a side-based table
    /// has no seats. Stored side counts are not capped; the per-side limit
    /// only applies to newly placed tables.
    pub fn from_document(document: LayoutDocument) -> Result<Self, LayoutError> {
        let mut tables = BTreeMap::new();

        for (key, placement) in document.tables {
            let number = parse_table_number(&key)
                .map_err(|_| LayoutError::InvalidTableNumber { key: key.clone() })?;

            if let Placement::Sided(sided) = &placement {
                if sided.sides.total() == 0 {
                    return Err(LayoutError::NoSeats {
                        table: number.get(),
                    });
                }
            }

            if tables.insert(number, placement).is_some() {
                return Err(LayoutError::DuplicateTable {
                    table: number.get(),
                });
            }
        }

        Ok(Layout { tables })
    }

    /// Pretty-printed JSON text of [`Layout::to_document`].
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Parses JSON text and decodes it with [`Layout::from_document`].
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let document: LayoutDocument = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    /// Bootstrap layout installed when no layout file exists yet.
    pub fn default_for(scheme: PlacementScheme) -> Self {
        let one = TableNumber::new_unchecked(1);
        let two = TableNumber::new_unchecked(2);

        let mut tables = BTreeMap::new();
        match scheme {
            PlacementScheme::Sided => {
                tables.insert(
                    one,
                    Placement::Sided(SidedPlacement {
                        center: Point::new(100, 100),
                        sides: Sides::new(2, 2, 2, 2),
                    }),
                );
                tables.insert(
                    two,
                    Placement::Sided(SidedPlacement {
                        center: Point::new(260, 120),
                        sides: Sides::new(1, 3, 1, 3),
                    }),
                );
            }
            PlacementScheme::Anchored => {
                tables.insert(one, Placement::Anchored(Point::new(70, 70)));
                tables.insert(two, Placement::Anchored(Point::new(230, 90)));
            }
        }
        Layout { tables }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
