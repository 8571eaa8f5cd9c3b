//! Every way a board or solution can be rejected.

use serde::Serialize;
use strum::{Display, IntoStaticStr, VariantArray};
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::location::Point;
use crate::shape::{Axis, GridAxis};

/// Machine-readable code of every validation failure, rendered in `snake_case`.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IntoStaticStr, PartialEq, Serialize, VariantArray)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A coordinate is negative, fractional or out of range.
    InvalidGeometry,
    /// A color has a malformed hex value or an overlong name.
    InvalidColor,
    /// The board name is too long.
    InvalidName,
    /// `columns` or `rows` is not an integer in range.
    InvalidDimensions,
    /// A board point lies outside the grid.
    PointOutOfBounds,
    /// A color has other than two board points.
    InvalidColorPointCount,
    /// Consecutive path cells are not orthogonal neighbours.
    DiscontinuousPath,
    /// A path endpoint does not fit the board or the path.
    PathEndpointMismatch,
    /// A color has other than one path.
    InvalidPathCount,
    /// Two paths of different colors cross.
    PathsCross,
    /// Two paths of different colors visit the same cell.
    SharedCell,
}

/// A raw coordinate which cannot be a [`Point`] coordinate.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeometryError {
    /// Fractional or otherwise not an integer.
    #[error("coordinate {axis} must be an integer, got {value}")]
    NonInteger { axis: Axis, value: String },
    /// Below zero.
    #[error("coordinate {axis} must be non-negative, got {value}")]
    Negative { axis: Axis, value: i64 },
    /// Beyond the platform's coordinate range.
    #[error("coordinate {axis} is too large, got {value}")]
    Overflow { axis: Axis, value: u64 },
}

/// A color whose hex value is not of the form `#RRGGBB`, or whose name is too long.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ColorError {
    /// The name has more than `max` characters.
    #[error("color name must have at most {max} characters, got {length}")]
    NameTooLong { length: usize, max: usize },
    /// No leading `#`.
    #[error("hex value {hex:?} must start with '#' (e.g. #RRGGBB)")]
    MissingHash { hex: String },
    /// Not 7 characters.
    #[error("hex value {hex:?} must be exactly 7 characters long (e.g. #RRGGBB)")]
    WrongLength { hex: String },
    /// Something other than hex digits after the `#`.
    #[error("hex value {hex:?} must contain only hex digits after '#'")]
    NotHexDigits { hex: String },
}

/// Reasons a board layout is rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BoardError {
    /// The board name has more than `max` characters.
    #[error("name must have at most {max} characters, got {length}")]
    InvalidName { length: usize, max: usize },
    /// Point `index` has a bad coordinate.
    #[error("point {index}: {source}")]
    InvalidGeometry { index: usize, source: GeometryError },
    /// Point `index` has a bad color.
    #[error("point {index}: {source}")]
    InvalidColor { index: usize, source: ColorError },
    /// A grid extent is not an integer in `1..=max`.
    #[error("{axis} must be an integer between 1 and {max}, got {value}")]
    InvalidDimensions { axis: GridAxis, value: String, max: usize },
    /// A point lies outside the grid.
    #[error("point {point} is out of bounds for the grid dimensions ({columns}x{rows})")]
    PointOutOfBounds { point: Point, columns: usize, rows: usize },
    /// A color has other than `expected` points.
    #[error("color {color} has {count} points; each color must have exactly {expected} points")]
    InvalidColorPointCount { color: String, count: usize, expected: usize },
}

impl BoardError {
    /// Machine-readable code of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            Self::InvalidColor { .. } => ErrorKind::InvalidColor,
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::PointOutOfBounds { .. } => ErrorKind::PointOutOfBounds,
            Self::InvalidColorPointCount { .. } => ErrorKind::InvalidColorPointCount,
        }
    }
}

/// Why a path is not a 4-connected chain of cells.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Discontinuity {
    /// Fewer than two cells.
    #[error("a path needs at least 2 points, got {length}")]
    TooShort { length: usize },
    /// Cells `position` and `position + 1` are not neighbours.
    #[error("{from} and {to} at position {position} are not adjacent")]
    NotAdjacent { from: Point, to: Point, position: usize },
}

/// Which declared end of a path an endpoint error is about.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    /// The declared `start`.
    Start,
    /// The declared `end`.
    End,
}

/// Why a declared path endpoint does not fit the board or the path.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EndpointMismatch {
    /// No board point sits there.
    #[error("is not a point of the board")]
    NotOnBoard,
    /// The path never visits it.
    #[error("is not part of the path")]
    NotInPath,
    /// The board point there has another color.
    #[error("belongs to a point of a different color")]
    ColorMismatch,
    /// Start and end are the same cell.
    #[error("connects a point to itself")]
    SelfConnection,
}

/// Reasons a proposed solution is rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SolutionError {
    /// Path `index` has a bad coordinate.
    #[error("path {index}: {source}")]
    InvalidGeometry { index: usize, source: GeometryError },
    /// Path `index` has a bad color.
    #[error("path {index}: {source}")]
    InvalidColor { index: usize, source: ColorError },
    /// Path `index` is not a chain of neighbouring cells.
    #[error("path {index} ({color}) is discontinuous: {reason}")]
    DiscontinuousPath { index: usize, color: String, reason: Discontinuity },
    /// An endpoint of path `index` does not fit.
    #[error("path {index} ({color}): {endpoint} {point} {reason}")]
    PathEndpointMismatch { index: usize, color: String, endpoint: Endpoint, point: Point, reason: EndpointMismatch },
    /// A color has other than one path.
    #[error("color {color} has {count} paths; each color must have exactly one path")]
    InvalidPathCount { color: String, count: usize },
    /// Two paths cross at `at`.
    #[error("paths of colors {} and {} cross at {at}", .colors.0, .colors.1)]
    PathsCross { colors: UnorderedPair<String>, at: Point },
    /// Two paths visit `point`.
    #[error("cell {point} is used by paths of colors {} and {}", .colors.0, .colors.1)]
    SharedCell { colors: UnorderedPair<String>, point: Point },
}

impl SolutionError {
    /// Machine-readable code of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            Self::InvalidColor { .. } => ErrorKind::InvalidColor,
            Self::DiscontinuousPath { .. } => ErrorKind::DiscontinuousPath,
            Self::PathEndpointMismatch { .. } => ErrorKind::PathEndpointMismatch,
            Self::InvalidPathCount { .. } => ErrorKind::InvalidPathCount,
            Self::PathsCross { .. } => ErrorKind::PathsCross,
            Self::SharedCell { .. } => ErrorKind::SharedCell,
        }
    }
}
