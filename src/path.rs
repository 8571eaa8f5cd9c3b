use itertools::Itertools;

use crate::color::Color;
use crate::location::Point;
use crate::segment::Segment;

/// A proposed flow of one color, connecting `start` to `end` through `cells`.
///
/// `cells` is expected to include both endpoints; nothing is checked on construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    /// Color of the flow.
    pub color: Color,
    /// Declared first endpoint.
    pub start: Point,
    /// Declared last endpoint.
    pub end: Point,
    /// Cells visited, in order.
    pub cells: Vec<Point>,
}

impl Path {
    /// A path with explicitly declared endpoints.
    pub fn new(color: Color, start: Point, end: Point, cells: Vec<Point>) -> Self {
        Self { color, start, end, cells }
    }

    /// A path whose declared endpoints are the first and last of `cells`.
    ///
    /// Returns [`None`] if `cells` is empty.
    pub fn through(color: Color, cells: Vec<Point>) -> Option<Self> {
        let start = *cells.first()?;
        let end = *cells.last()?;
        Some(Self::new(color, start, end, cells))
    }

    /// Unit segments between consecutive cells, in path order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + Clone + '_ {
        self.cells.iter().copied().tuple_windows::<(Point, Point)>().map(Segment::from)
    }
}
