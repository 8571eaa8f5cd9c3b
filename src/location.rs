//! Board coordinates.

use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;
use serde_json::Number;

use crate::error::GeometryError;
use crate::shape::{Axis, SquareStep, Step};

/// A single board coordinate.
pub type Coord = usize;
/// A board extent, never zero.
pub type Dimension = NonZero<Coord>;

/// A cell of a board, as `(x, y)` with `x` counting columns and `y` counting rows.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Point(pub Coord, pub Coord);

impl Point {
    /// Decode a point from raw JSON numbers, rejecting negative and non-integer coordinates.
    pub fn from_raw(x: &Number, y: &Number) -> Result<Self, GeometryError> {
        Ok(Self(coordinate(Axis::X, x)?, coordinate(Axis::Y, y)?))
    }

    /// Column of this point.
    pub fn x(&self) -> Coord {
        self.0
    }

    /// Row of this point.
    pub fn y(&self) -> Coord {
        self.1
    }

    // ndarray indexes row-major
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Move by `rhs`, or [`None`] if either coordinate would leave the `usize` range.
    pub fn offset_by(self, rhs: (isize, isize)) -> Option<Self> {
        Some(Self(self.0.checked_add_signed(rhs.0)?, self.1.checked_add_signed(rhs.1)?))
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        SquareStep::direction_to(*self, *other).is_some()
    }

    /// Sum of the absolute coordinate differences.
    pub fn manhattan_distance(&self, other: &Self) -> Coord {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Whether this point lies within `[0, columns)` × `[0, rows)`.
    pub fn within(&self, columns: Coord, rows: Coord) -> bool {
        self.0 < columns && self.1 < rows
    }
}

impl From<(Ix, Ix)> for Point {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

fn coordinate(axis: Axis, raw: &Number) -> Result<Coord, GeometryError> {
    if let Some(value) = raw.as_u64() {
        Coord::try_from(value).map_err(|_| GeometryError::Overflow { axis, value })
    } else if let Some(value) = raw.as_i64() {
        // as_u64 already took every non-negative integer
        Err(GeometryError::Negative { axis, value })
    } else {
        Err(GeometryError::NonInteger { axis, value: raw.to_string() })
    }
}
