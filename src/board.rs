use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use tracing::debug;

use crate::color::{Color, ColoredPoint};
use crate::error::BoardError;
use crate::location::{Coord, Dimension, Point};
use crate::path::Path;
use crate::shape::GridAxis;

/// Every color on a board appears on exactly this many points: one start, one end.
pub const POINTS_PER_COLOR: usize = 2;

/// A rectangular board with colored endpoint pairs to be connected.
///
/// [`Board`]s are validated on construction; build them with [`Board::new`] or a [`BoardBuilder`](crate::builder::BoardBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    // columns, rows
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) points: Vec<ColoredPoint>,
}

impl Board {
    /// Validate `points` against `dims` with [`validate_board`] and wrap them in a board.
    pub fn new(dims: (Dimension, Dimension), points: Vec<ColoredPoint>) -> Result<Self, BoardError> {
        validate_board(&points, dims.0.get(), dims.1.get())?;
        Ok(Self { dims, points })
    }

    /// Width of the grid.
    pub fn columns(&self) -> Coord {
        self.dims.0.get()
    }

    /// Height of the grid.
    pub fn rows(&self) -> Coord {
        self.dims.1.get()
    }

    /// Colored endpoints, in insertion order.
    pub fn points(&self) -> &[ColoredPoint] {
        &self.points
    }

    /// Distinct colors in order of first appearance.
    pub fn colors(&self) -> impl Iterator<Item = &Color> + '_ {
        self.points.iter().map(|p| &p.color).unique()
    }

    /// Board points located at `point`, of any color.
    pub fn points_at(&self, point: Point) -> impl Iterator<Item = &ColoredPoint> + '_ {
        self.points.iter().filter(move |p| p.point == point)
    }

    /// Render this board with `paths` drawn over it.
    ///
    /// Each color gets a letter by first appearance on the board. Endpoints print uppercase, path cells lowercase,
    /// empty cells as `.`. Path cells of a color missing from the board print as `?`.
    pub fn render_with(&self, paths: &[Path]) -> String {
        let letters = self.colors().cloned().collect_vec();
        let letter_of = |color: &Color| {
            letters.iter().position(|c| c == color)
                .and_then(|index| u8::try_from(index % 26).ok())
                .map(|offset| char::from(b'a' + offset))
                .unwrap_or('?')
        };

        let mut cells = Array2::from_elem((self.rows(), self.columns()), '.');
        for path in paths {
            for cell in &path.cells {
                if let Some(ptr) = cells.get_mut(cell.as_index()) {
                    *ptr = letter_of(&path.color);
                }
            }
        }
        for colored in &self.points {
            if let Some(ptr) = cells.get_mut(colored.point.as_index()) {
                *ptr = letter_of(&colored.color).to_ascii_uppercase();
            }
        }

        print(cells)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_with(&[]))
    }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

/// Check one point against the grid: it must lie within `[0, columns)` × `[0, rows)`.
pub fn check_bounds(point: Point, columns: Coord, rows: Coord) -> Result<(), BoardError> {
    if point.within(columns, rows) {
        Ok(())
    } else {
        Err(BoardError::PointOutOfBounds { point, columns, rows })
    }
}

/// Check grid dimensions: each must lie in `1..=max`.
pub fn validate_dimensions(columns: Coord, rows: Coord, max: Coord) -> Result<(Dimension, Dimension), BoardError> {
    let dimension = |axis: GridAxis, value: Coord| {
        Dimension::new(value)
            .filter(|d| d.get() <= max)
            .ok_or_else(|| BoardError::InvalidDimensions { axis, value: value.to_string(), max })
    };

    Ok((dimension(GridAxis::Columns, columns)?, dimension(GridAxis::Rows, rows)?))
}

/// Validate a board layout, returning the first problem found.
///
/// Every point must be in bounds, checked in order, and then every color must appear on exactly
/// [`POINTS_PER_COLOR`] points, checked in order of each color's first appearance.
pub fn validate_board(points: &[ColoredPoint], columns: Coord, rows: Coord) -> Result<(), BoardError> {
    debug!(points = points.len(), columns, rows, "validating board");

    let result = points.iter()
        .try_for_each(|p| check_bounds(p.point, columns, rows))
        .and_then(|_| {
            let counts = points.iter().map(|p| &p.color).counts();
            let miscounted = points.iter()
                .map(|p| &p.color)
                .unique()
                .map(|color| (color, counts.get(color).copied().unwrap_or_default()))
                .find(|(_, count)| *count != POINTS_PER_COLOR);

            match miscounted {
                None => Ok(()),
                Some((color, count)) => Err(BoardError::InvalidColorPointCount {
                    color: color.to_string(),
                    count,
                    expected: POINTS_PER_COLOR,
                }),
            }
        });

    if let Err(error) = &result {
        debug!(kind = %error.kind(), %error, "board rejected");
    }
    result
}
