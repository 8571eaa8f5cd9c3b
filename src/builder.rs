//! Incremental construction of boards.

use crate::board::{check_bounds, Board};
use crate::color::{Color, ColoredPoint};
use crate::error::BoardError;
use crate::location::{Dimension, Point};

/// A builder for rectangular boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first invalid feature puts the builder into an invalid state, after which further calls do nothing.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // columns, rows
    dims: (Dimension, Dimension),
    points: Vec<ColoredPoint>,
    // number of points added by each call, to undo them
    additions: Vec<usize>,
    invalid_reasons: Vec<BoardError>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((Dimension::MIN.saturating_add(4), Dimension::MIN.saturating_add(4)))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(columns, rows)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            points: Default::default(),
            additions: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add termini or "flow endpoints" of `color`. The order in which `locations` are specified does not matter.
    ///
    /// May cause the builder to enter a [`PointOutOfBounds`](BoardError::PointOutOfBounds) invalid state if either location is out of bounds.
    pub fn add_termini(&mut self, color: Color, locations: (Point, Point)) -> &mut Self {
        self.add_points(vec![
            ColoredPoint::new(locations.0, color.clone()),
            ColoredPoint::new(locations.1, color),
        ])
    }

    /// Add a single colored point, for example to lay out a color which is not a pair.
    ///
    /// Same conditions as [`Self::add_termini`].
    pub fn add_point(&mut self, color: Color, location: Point) -> &mut Self {
        self.add_points(vec![ColoredPoint::new(location, color)])
    }

    fn add_points(&mut self, points: Vec<ColoredPoint>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for point in &points {
            if let Err(reason) = check_bounds(point.point, self.dims.0.get(), self.dims.1.get()) {
                self.invalid_reasons.push(reason);
                return self;
            }
        }

        self.additions.push(points.len());
        self.points.extend(points);
        self
    }

    /// Remove the most recently added termini or point.
    ///
    /// If the builder is in an invalid state or nothing was added, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some(count) = self.additions.pop() {
            self.points.truncate(self.points.len().saturating_sub(count));
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BoardError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BoardError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`], validating the full layout.
    pub fn build(&self) -> Result<Board, BoardError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        Board::new(self.dims, self.points.clone())
    }
}
