//! Step directions and axes of the rectangular grid.

use std::hash::Hash;

use strum::{Display, VariantArray};

use crate::location::Point;

/// Functionality of the step directions between neighboring cells.
///
/// [`SquareStep`] is the built-in implementation for rectangular boards.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash {
    /// Attempt the step from `point` in the direction specified by `self` and return the resultant [`Point`].
    ///
    /// Returns [`None`] for a step past either end of the coordinate range.
    fn attempt_from(&self, point: Point) -> Option<Point>;
    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// Returns [`None`] if `b` is not a neighbor of `a`.
    fn direction_to(a: Point, b: Point) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == Some(b)).copied()
    }
}

/// The square cell type and rectangular board shape used by every board.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, point: Point) -> Option<Point> {
        match self {
            Self::Up => point.offset_by((0, -1)),
            Self::Down => point.offset_by((0, 1)),
            Self::Left => point.offset_by((-1, 0)),
            Self::Right => point.offset_by((1, 0)),
        }
    }
}

/// Orientation of a segment between two cells.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Same row.
    Horizontal,
    /// Same column.
    Vertical,
}

/// A coordinate axis, named in error messages.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Column coordinate.
    X,
    /// Row coordinate.
    Y,
}

/// A board dimension, named in error messages and as a payload field.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum GridAxis {
    /// Width.
    Columns,
    /// Height.
    Rows,
}
