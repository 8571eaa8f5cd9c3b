use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::config::MAX_COLOR_NAME_LENGTH;
use crate::error::ColorError;
use crate::location::Point;

/// A named color, identified by its hex value.
///
/// Two colors are the same color if and only if their hex values are equal; the name is only a label.
#[derive(Clone, Debug)]
pub struct Color {
    name: String,
    hex: String,
}

impl Color {
    /// Construct a color, checking only the name length and that `hex` is a `#` followed by 6 characters.
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Result<Self, ColorError> {
        Self::parse(name, hex, false)
    }

    /// Construct a color, additionally checking that the 6 characters are hex digits if `verify_digits` is set.
    pub fn parse(name: impl Into<String>, hex: impl Into<String>, verify_digits: bool) -> Result<Self, ColorError> {
        let name = name.into();
        let hex = hex.into();

        let length = name.chars().count();
        if length > MAX_COLOR_NAME_LENGTH {
            return Err(ColorError::NameTooLong { length, max: MAX_COLOR_NAME_LENGTH });
        }
        if !hex.starts_with('#') {
            return Err(ColorError::MissingHash { hex });
        }
        if hex.chars().count() != 7 {
            return Err(ColorError::WrongLength { hex });
        }
        if verify_digits && !hex.chars().skip(1).all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::NotHexDigits { hex });
        }

        Ok(Self { name, hex })
    }

    /// Human-readable label of this color.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `#RRGGBB` value identifying this color.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hex.hash(state);
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}

/// A board cell tagged with the color of the flow that starts or ends there.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ColoredPoint {
    /// Where the endpoint sits.
    pub point: Point,
    /// Which flow it belongs to.
    pub color: Color,
}

impl ColoredPoint {
    /// Tag `point` with `color`.
    pub fn new(point: Point, color: Color) -> Self {
        Self { point, color }
    }
}
