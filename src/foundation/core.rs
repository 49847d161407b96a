pub use kurbo::Point;

/// A cell position in the output area.
///
/// `row` counts up from the bottom line (row 1 is the last input line) and `column` counts from
/// the left edge starting at 1. Coordinates outside the output area are legal; motion may start
/// above the top row or pass below the bottom one.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Coord {
    /// Distance from the bottom of the output area.
    pub row: i32,
    /// Distance from the left edge of the output area.
    pub column: i32,
}

impl Coord {
    /// Coordinate at `row`, `column`.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Shift by whole cells using saturating arithmetic.
    pub fn offset(self, rows: i32, columns: i32) -> Self {
        Self {
            row: self.row.saturating_add(rows),
            column: self.column.saturating_add(columns),
        }
    }

    /// Continuous position with `x = column`, `y = row`.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.column), f64::from(self.row))
    }

    /// Snap a continuous position to the nearest cell.
    pub fn from_point(p: Point) -> Self {
        fn snap(v: f64) -> i32 {
            v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }

        Self {
            row: snap(p.y),
            column: snap(p.x),
        }
    }

    /// Euclidean distance in cells.
    pub fn distance(self, other: Self) -> f64 {
        self.to_point().distance(other.to_point())
    }

    /// Interpolate toward `other` and snap to a cell. `t` may leave `[0, 1]` for overshooting
    /// easing curves.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::from_point(self.to_point().lerp(other.to_point(), t))
    }
}

/// Bounds of the output area, derived once from the input extents.
///
/// The bottom-left cell is `(1, 1)`; `top` is the number of input lines and `right` the widest
/// line in graphemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputArea {
    /// Highest row of the input text.
    pub top: i32,
    /// Highest column of the input text.
    pub right: i32,
}

impl OutputArea {
    /// Row of the bottom line.
    pub const BOTTOM: i32 = 1;
    /// Column of the left edge.
    pub const LEFT: i32 = 1;

    /// Area spanning `top` lines and `right` columns; negative extents clamp to 0.
    pub fn new(top: i32, right: i32) -> Self {
        Self {
            top: top.max(0),
            right: right.max(0),
        }
    }

    /// `true` when the area holds no cells.
    pub fn is_empty(self) -> bool {
        self.top == 0 || self.right == 0
    }

    /// Return `true` when `coord` lies inside the nominal bounds.
    pub fn contains(self, coord: Coord) -> bool {
        (Self::BOTTOM..=self.top).contains(&coord.row)
            && (Self::LEFT..=self.right).contains(&coord.column)
    }

    /// Cell nearest the middle of the area.
    pub fn center(self) -> Coord {
        Coord::new(
            ((self.top + Self::BOTTOM) as f64 / 2.0).round() as i32,
            ((self.right + Self::LEFT) as f64 / 2.0).round() as i32,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
