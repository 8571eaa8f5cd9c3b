//! Unit segments between path cells and how they intersect.

use std::cmp::{max, min};
use std::ops::RangeInclusive;

use crate::location::{Coord, Point};
use crate::shape::Orientation;

/// The straight piece of a path between two consecutive cells.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Segment {
    /// Earlier cell of the pair.
    pub from: Point,
    /// Later cell of the pair.
    pub to: Point,
}

impl From<(Point, Point)> for Segment {
    fn from(value: (Point, Point)) -> Self {
        Self { from: value.0, to: value.1 }
    }
}

impl Segment {
    /// A segment is vertical if both ends share a column, otherwise it is horizontal.
    ///
    /// Degenerate segments (both ends equal) are therefore vertical and diagonal ones horizontal.
    pub fn orientation(&self) -> Orientation {
        if self.from.0 == self.to.0 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    fn x_span(&self) -> RangeInclusive<Coord> {
        min(self.from.0, self.to.0)..=max(self.from.0, self.to.0)
    }

    fn y_span(&self) -> RangeInclusive<Coord> {
        min(self.from.1, self.to.1)..=max(self.from.1, self.to.1)
    }

    /// The point where this segment and `other` cross, if one is vertical, the other horizontal, and each
    /// passes through the other's line within its span. Both spans are closed.
    pub fn crossing(&self, other: &Self) -> Option<Point> {
        let (vertical, horizontal) = match (self.orientation(), other.orientation()) {
            (Orientation::Vertical, Orientation::Horizontal) => (self, other),
            (Orientation::Horizontal, Orientation::Vertical) => (other, self),
            _ => return None,
        };

        let at = Point(vertical.from.0, horizontal.from.1);
        (horizontal.x_span().contains(&at.0) && vertical.y_span().contains(&at.1)).then_some(at)
    }

    /// The first point of a shared sub-span of positive length, if this segment and `other` lie on the same
    /// row or column. Touching at a single point is not an overlap.
    pub fn overlap(&self, other: &Self) -> Option<Point> {
        let on_column = |s: &Self| s.from.0 == s.to.0;
        let on_row = |s: &Self| s.from.1 == s.to.1;

        if on_row(self) && on_row(other) && self.from.1 == other.from.1 {
            shared_span(self.x_span(), other.x_span()).map(|x| Point(x, self.from.1))
        } else if on_column(self) && on_column(other) && self.from.0 == other.from.0 {
            shared_span(self.y_span(), other.y_span()).map(|y| Point(self.from.0, y))
        } else {
            None
        }
    }
}

fn shared_span(a: RangeInclusive<Coord>, b: RangeInclusive<Coord>) -> Option<Coord> {
    let start = max(*a.start(), *b.start());
    let end = min(*a.end(), *b.end());
    (start < end).then_some(start)
}
