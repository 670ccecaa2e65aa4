//! # Geometry Module
//!
//! Turns a table placement into a footprint, bounds and numbered seats.
//!
//! ## Seat Layout
//! ```text
//!                  1        2                    up:    left → right
//!               ┌───────────────┐
//!            8  │               │  3             right: top → bottom
//!               │    Table 4    │
//!            7  │               │  4             down:  right → left
//!               └───────────────┘
//!                  6        5                    left:  bottom → top
//! ```
//!
//! Seats are numbered clockwise starting at the top-left. Bottom and left
//! sides are reversed before numbering so that walking around the table
//! always reads 1, 2, 3, ... Empty sides add no seats and leave no gap.
//!
//! Seats sit on evenly spaced points that exclude the corners: `n` seats on
//! an edge of length `L` are placed at `start + L/(n+1) · (i+1)`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::layout::Placement;
use crate::types::{Point, Side, Sides};

/// Footprint length contributed by each seat along a side.
pub const BASE_UNIT: u32 = 36;

/// Minimum footprint edge, so one-seat sides stay usable.
pub const MIN_TABLE_SIDE: u32 = 80;

/// Distance from the table edge to a seat's center.
pub const SEAT_OFFSET: u32 = 24;

/// Seat marker radius used by renderers.
pub const SEAT_RADIUS: u32 = 12;

/// Footprint diameter of anchored (circular) tables.
pub const TABLE_DIAMETER: u32 = 60;

// =============================================================================
// Geometry Settings
// =============================================================================

/// Geometry constants for one deployment.
///
/// Every field defaults to the module constant of the same name, so a
/// config file only has to mention what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Geometry {
    pub unit: u32,
    pub min_side: u32,
    pub seat_offset: u32,
    pub seat_radius: u32,
    pub table_diameter: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            unit: BASE_UNIT,
            min_side: MIN_TABLE_SIDE,
            seat_offset: SEAT_OFFSET,
            seat_radius: SEAT_RADIUS,
            table_diameter: TABLE_DIAMETER,
        }
    }
}

/// Width and height of a table footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned box, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Bounds {
    /// Returns true if the point lies inside or on the edge.
    pub fn contains(&self, point: Point) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        self.left <= x && x <= self.right && self.top <= y && y <= self.bottom
    }
}

/// A derived seat: position plus its clockwise sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Seat {
    pub number: u32,
    pub x: f64,
    pub y: f64,
    pub side: Side,
}

impl Geometry {
    /// Footprint of a side-based table.
    ///
    /// `width = max(min_side, max(up, down) × unit)`, likewise for height
    /// with left/right.
    ///
    /// ## Example
    /// ```rust
    /// use tableside_core::geometry::Geometry;
    /// use tableside_core::Sides;
    ///
    /// let geometry = Geometry::default();
    /// let footprint = geometry.footprint(Sides::new(3, 1, 2, 1));
    /// assert_eq!((footprint.width, footprint.height), (108, 80));
    /// ```
    pub fn footprint(&self, sides: Sides) -> Footprint {
        let across = sides.up.max(sides.down).saturating_mul(self.unit);
        let along = sides.left.max(sides.right).saturating_mul(self.unit);
        Footprint {
            width: across.max(self.min_side),
            height: along.max(self.min_side),
        }
    }

    /// Footprint of a side-based table centered on `center`.
    ///
    /// Half extents use integer division, matching how placements are
    /// stored in whole map pixels.
    pub fn bounds(&self, center: Point, sides: Sides) -> Bounds {
        let footprint = self.footprint(sides);
        let half_w = i64::from(footprint.width / 2);
        let half_h = i64::from(footprint.height / 2);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        Bounds {
            left: cx - half_w,
            top: cy - half_h,
            right: cx + half_w,
            bottom: cy + half_h,
        }
    }

    /// Bounds of any placement: the rectangle for side-based tables, the
    /// circle's bounding square for anchored ones.
    pub fn placement_bounds(&self, placement: &Placement) -> Bounds {
        match placement {
            Placement::Sided(sided) => self.bounds(sided.center, sided.sides),
            Placement::Anchored(anchor) => {
                let d = i64::from(self.table_diameter);
                let (x, y) = (i64::from(anchor.x), i64::from(anchor.y));
                Bounds {
                    left: x,
                    top: y,
                    right: x + d,
                    bottom: y + d,
                }
            }
        }
    }

    /// Hit-test used to resolve a map click to a table.
    #[inline]
    pub fn contains(&self, placement: &Placement, point: Point) -> bool {
        self.placement_bounds(placement).contains(point)
    }

    /// Seats of a placement. Anchored tables carry no side counts and
    /// therefore no derived seats.
    pub fn seats(&self, placement: &Placement) -> Vec<Seat> {
        match placement {
            Placement::Sided(sided) => self.seats_around(sided.center, sided.sides),
            Placement::Anchored(_) => Vec::new(),
        }
    }

    /// Seats around a side-based table, numbered clockwise from the top.
    pub fn seats_around(&self, center: Point, sides: Sides) -> Vec<Seat> {
        let b = self.bounds(center, sides);
        let (left, top, right, bottom) = (b.left as f64, b.top as f64, b.right as f64, b.bottom as f64);
        let offset = f64::from(self.seat_offset);

        let up = spread(left, right, sides.up).map(|x| (x, top - offset, Side::Up));
        let right_side = spread(top, bottom, sides.right).map(|y| (right + offset, y, Side::Right));
        let down = spread(left, right, sides.down)
            .rev()
            .map(|x| (x, bottom + offset, Side::Down));
        let left_side = spread(top, bottom, sides.left)
            .rev()
            .map(|y| (left - offset, y, Side::Left));

        up.chain(right_side)
            .chain(down)
            .chain(left_side)
            .zip(1..)
            .map(|((x, y, side), number)| Seat { number, x, y, side })
            .collect()
    }
}

/// `count` evenly spaced points strictly between `start` and `end`.
fn spread(start: f64, end: f64, count: u32) -> impl DoubleEndedIterator<Item = f64> {
    let step = (end - start) / (f64::from(count) + 1.0);
    (0..count).map(move |i| start + step * f64::from(i + 1))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SidedPlacement;

    fn sided(center: Point, sides: Sides) -> Placement {
        Placement::Sided(SidedPlacement { center, sides })
    }

    #[test]
    fn test_footprint_minimum() {
        let g = Geometry::default();
        let fp = g.footprint(Sides::new(1, 1, 1, 1));
        assert_eq!((fp.width, fp.height), (80, 80));
    }

    #[test]
    fn test_footprint_scales_with_busiest_side() {
        let g = Geometry::default();
        // 4 up, 2 down → 4 × 36 wide; 3 left → 3 × 36 tall
        let fp = g.footprint(Sides::new(4, 0, 2, 3));
        assert_eq!((fp.width, fp.height), (144, 108));
    }

    #[test]
    fn test_bounds_centered() {
        let g = Geometry::default();
        let b = g.bounds(Point::new(100, 100), Sides::new(2, 2, 2, 2));
        assert_eq!(
            b,
            Bounds {
                left: 60,
                top: 60,
                right: 140,
                bottom: 140
            }
        );
    }

    #[test]
    fn test_two_seats_on_top() {
        let g = Geometry::default();
        let seats = g.seats_around(Point::new(100, 100), Sides::new(2, 0, 0, 0));

        assert_eq!(seats.len(), 2);
        // Bounds 60..140 wide, step 80/3
        let step = 80.0 / 3.0;
        assert_eq!(seats[0].number, 1);
        assert!((seats[0].x - (60.0 + step)).abs() < 1e-9);
        assert_eq!(seats[1].number, 2);
        assert!((seats[1].x - (60.0 + 2.0 * step)).abs() < 1e-9);
        assert!(seats[0].x < seats[1].x);

        for seat in &seats {
            assert_eq!(seat.side, Side::Up);
            assert_eq!(seat.y, 60.0 - 24.0);
        }
    }

    #[test]
    fn test_clockwise_numbering_reverses_bottom_and_left() {
        let g = Geometry::default();
        let seats = g.seats_around(Point::new(200, 200), Sides::new(2, 2, 2, 2));
        assert_eq!(seats.len(), 8);

        let numbers: Vec<u32> = seats.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());

        // Top: left → right
        assert!(seats[0].x < seats[1].x);
        // Right: top → bottom
        assert!(seats[2].y < seats[3].y);
        assert!(seats[2].x > 200.0);
        // Bottom: right → left
        assert_eq!(seats[4].side, Side::Down);
        assert!(seats[4].x > seats[5].x);
        // Left: bottom → top
        assert_eq!(seats[6].side, Side::Left);
        assert!(seats[6].y > seats[7].y);
    }

    #[test]
    fn test_clockwise_angles_strictly_increase() {
        let g = Geometry::default();
        let center = Point::new(0, 0);
        for sides in [
            Sides::new(3, 1, 2, 0),
            Sides::new(0, 2, 0, 3),
            Sides::new(1, 1, 1, 1),
            Sides::new(5, 4, 5, 4),
            Sides::new(0, 0, 3, 0),
        ] {
            let seats = g.seats_around(center, sides);
            assert_eq!(seats.len() as u32, sides.total());

            // Angle measured clockwise from the table's top-left corner
            // direction (screen y grows downward).
            let b = g.bounds(center, sides);
            let start = (b.top as f64).atan2(b.left as f64);
            let angles: Vec<f64> = seats
                .iter()
                .map(|s| {
                    let a = s.y.atan2(s.x) - start;
                    a.rem_euclid(std::f64::consts::TAU)
                })
                .collect();
            assert!(
                angles.windows(2).all(|w| w[0] < w[1]),
                "not clockwise for {:?}: {:?}",
                sides,
                angles
            );
        }
    }

    #[test]
    fn test_empty_sides_leave_no_gaps() {
        let g = Geometry::default();
        let seats = g.seats_around(Point::new(0, 0), Sides::new(0, 1, 0, 2));
        let numbers: Vec<u32> = seats.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(seats[0].side, Side::Right);
        assert_eq!(seats[1].side, Side::Left);
    }

    #[test]
    fn test_hit_testing() {
        let g = Geometry::default();
        let table = sided(Point::new(100, 100), Sides::new(2, 2, 2, 2));
        assert!(g.contains(&table, Point::new(100, 100)));
        assert!(g.contains(&table, Point::new(60, 140))); // corner is inside
        assert!(!g.contains(&table, Point::new(59, 100)));
        assert!(!g.contains(&table, Point::new(100, 141)));
    }

    #[test]
    fn test_anchored_table() {
        let g = Geometry::default();
        let table = Placement::Anchored(Point::new(10, 20));
        assert_eq!(
            g.placement_bounds(&table),
            Bounds {
                left: 10,
                top: 20,
                right: 70,
                bottom: 80
            }
        );
        assert!(g.seats(&table).is_empty());
        assert!(g.contains(&table, Point::new(40, 50)));
        assert!(!g.contains(&table, Point::new(9, 50)));
    }
}
