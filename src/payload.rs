//! Wire shapes of boards and solutions, and their decoding into validated values.
//!
//! Coordinates and dimensions are kept as raw JSON numbers so that negative and non-integer values
//! surface as validation errors instead of deserialization failures.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

use crate::board::{check_bounds, validate_dimensions, Board};
use crate::color::{Color, ColoredPoint};
use crate::config::{ValidationConfig, MAX_BOARD_NAME_LENGTH};
use crate::error::{BoardError, GeometryError, SolutionError};
use crate::location::{Coord, Point};
use crate::path::Path;
use crate::shape::GridAxis;
use crate::solution::{PathValidator, Solution};

/// A bare cell of a path.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PointPayload {
    /// Column, as sent.
    pub x: Number,
    /// Row, as sent.
    pub y: Number,
}

impl PointPayload {
    /// Check the coordinates.
    pub fn decode(&self) -> Result<Point, GeometryError> {
        Point::from_raw(&self.x, &self.y)
    }
}

impl From<Point> for PointPayload {
    fn from(value: Point) -> Self {
        Self { x: Number::from(value.0), y: Number::from(value.1) }
    }
}

/// A color object.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ColorPayload {
    /// Label, empty when left out.
    #[serde(default)]
    pub name: String,
    /// `#RRGGBB`.
    pub hex_value: String,
}

impl From<&Color> for ColorPayload {
    fn from(value: &Color) -> Self {
        Self { name: value.name().to_owned(), hex_value: value.hex().to_owned() }
    }
}

/// A path color, either as a full color object or as a bare hex string.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorField {
    /// `"#RRGGBB"`.
    Hex(String),
    /// `{ "name": .., "hex_value": .. }`.
    Object(ColorPayload),
}

impl ColorField {
    fn parts(&self) -> (&str, &str) {
        match self {
            Self::Hex(hex) => ("", hex),
            Self::Object(ColorPayload { name, hex_value }) => (name, hex_value),
        }
    }
}

/// A colored endpoint of a board.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ColoredPointPayload {
    /// Column, as sent.
    pub x: Number,
    /// Row, as sent.
    pub y: Number,
    /// Color of the flow ending here.
    pub color: ColorPayload,
}

impl ColoredPointPayload {
    /// Check the coordinates, then the color, of the point at `index`.
    pub fn decode(&self, index: usize, config: &ValidationConfig) -> Result<ColoredPoint, BoardError> {
        let point = Point::from_raw(&self.x, &self.y)
            .map_err(|source| BoardError::InvalidGeometry { index, source })?;
        let color = Color::parse(self.color.name.as_str(), self.color.hex_value.as_str(), config.verify_hex_digits)
            .map_err(|source| BoardError::InvalidColor { index, source })?;

        Ok(ColoredPoint::new(point, color))
    }
}

impl From<&ColoredPoint> for ColoredPointPayload {
    fn from(value: &ColoredPoint) -> Self {
        Self {
            x: Number::from(value.point.0),
            y: Number::from(value.point.1),
            color: ColorPayload::from(&value.color),
        }
    }
}

/// Body of a board create or update request.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoardPayload {
    /// Display name, at most [`MAX_BOARD_NAME_LENGTH`] characters.
    pub name: String,
    /// Width, as sent.
    pub columns: Number,
    /// Height, as sent.
    pub rows: Number,
    /// Colored endpoints, two per color.
    #[serde(default)]
    pub points: Vec<ColoredPointPayload>,
}

impl BoardPayload {
    /// Decode into a validated [`Board`].
    ///
    /// The name length is checked first, then the dimensions, then each point in order for geometry,
    /// color and bounds, then the per-color point counts.
    pub fn decode(&self, config: &ValidationConfig) -> Result<Board, BoardError> {
        let length = self.name.chars().count();
        if length > MAX_BOARD_NAME_LENGTH {
            return Err(BoardError::InvalidName { length, max: MAX_BOARD_NAME_LENGTH });
        }

        let columns = dimension(GridAxis::Columns, &self.columns, config.max_dimension)?;
        let rows = dimension(GridAxis::Rows, &self.rows, config.max_dimension)?;
        let dims = validate_dimensions(columns, rows, config.max_dimension)?;

        let points = self.points.iter()
            .enumerate()
            .map(|(index, raw)| {
                let colored = raw.decode(index, config)?;
                check_bounds(colored.point, columns, rows)?;
                Ok(colored)
            })
            .collect::<Result<Vec<_>, BoardError>>()?;

        Board::new(dims, points)
    }
}

fn dimension(axis: GridAxis, raw: &Number, max: Coord) -> Result<Coord, BoardError> {
    raw.as_u64()
        .and_then(|value| Coord::try_from(value).ok())
        .ok_or_else(|| BoardError::InvalidDimensions { axis, value: raw.to_string(), max })
}

/// One flow of a solution.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PathPayload {
    /// Declared first endpoint.
    pub start: PointPayload,
    /// Declared last endpoint.
    pub end: PointPayload,
    /// Color of the flow.
    pub color: ColorField,
    /// Cells visited, in order.
    pub path: Vec<PointPayload>,
}

impl PathPayload {
    fn decode(&self, index: usize, config: &ValidationConfig) -> Result<Path, SolutionError> {
        let geometry = |source| SolutionError::InvalidGeometry { index, source };
        let (name, hex) = self.color.parts();

        let color = Color::parse(name, hex, config.verify_hex_digits)
            .map_err(|source| SolutionError::InvalidColor { index, source })?;
        let start = self.start.decode().map_err(geometry)?;
        let end = self.end.decode().map_err(geometry)?;
        let cells = self.path.iter()
            .map(|p| p.decode().map_err(geometry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Path::new(color, start, end, cells))
    }
}

impl From<&Path> for PathPayload {
    fn from(value: &Path) -> Self {
        Self {
            start: value.start.into(),
            end: value.end.into(),
            color: ColorField::Object(ColorPayload::from(&value.color)),
            path: value.cells.iter().copied().map(PointPayload::from).collect(),
        }
    }
}

/// Body of a solution create or update request.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SolutionPayload {
    /// Display name, empty when left out.
    #[serde(default)]
    pub name: String,
    /// One path per color.
    pub paths: Vec<PathPayload>,
}

impl SolutionPayload {
    /// Decode every path, without checking them against a board.
    pub fn decode(&self, config: &ValidationConfig) -> Result<Solution, SolutionError> {
        let paths = self.paths.iter()
            .enumerate()
            .map(|(index, path)| path.decode(index, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Solution { name: self.name.clone(), paths })
    }

    /// Decode and check the paths against `board`, reporting as [`ValidationConfig::report`] asks.
    pub fn decode_for(&self, board: &Board, config: &ValidationConfig) -> Result<Solution, Vec<SolutionError>> {
        let solution = self.decode(config).map_err(|error| vec![error])?;
        PathValidator::new(board, &solution.paths, config).report()?;
        Ok(solution)
    }
}

/// Failure of one of the JSON entry points.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Not JSON, or not the expected shape.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The board was rejected.
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    /// The solution was rejected.
    #[error("invalid solution: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Solution(Vec<SolutionError>),
}

impl From<Vec<SolutionError>> for CheckError {
    fn from(value: Vec<SolutionError>) -> Self {
        Self::Solution(value)
    }
}

/// Parse and validate a board payload.
pub fn check_board_json(board: &str, config: &ValidationConfig) -> Result<Board, CheckError> {
    let payload: BoardPayload = serde_json::from_str(board)?;
    Ok(payload.decode(config)?)
}

/// Parse and validate a board payload, then a solution payload against it.
pub fn check_solution_json(board: &str, solution: &str, config: &ValidationConfig) -> Result<Solution, CheckError> {
    let board = check_board_json(board, config)?;
    let payload: SolutionPayload = serde_json::from_str(solution)?;
    Ok(payload.decode_for(&board, config)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::config::ReportMode;
    use crate::error::{ColorError, ErrorKind, GeometryError};
    use crate::shape::Axis;

    const BOARD: &str = r##"{
        "name": "starter",
        "columns": 3,
        "rows": 1,
        "points": [
            {"x": 0, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}},
            {"x": 2, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}}
        ]
    }"##;

    fn board_payload(value: serde_json::Value) -> BoardPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_board() {
        let board = check_board_json(BOARD, &ValidationConfig::default()).unwrap();

        assert_eq!((board.columns(), board.rows()), (3, 1));
        assert_eq!(board.points().len(), 2);
        assert_eq!(board.points()[0].color.name(), "red");
    }

    #[rstest]
    #[case::negative_x(json!(-1), json!(0), BoardError::InvalidGeometry { index: 0, source: GeometryError::Negative { axis: Axis::X, value: -1 } })]
    #[case::fractional_y(json!(0), json!(0.5), BoardError::InvalidGeometry { index: 0, source: GeometryError::NonInteger { axis: Axis::Y, value: "0.5".to_owned() } })]
    #[case::out_of_columns(json!(3), json!(0), BoardError::PointOutOfBounds { point: Point(3, 0), columns: 3, rows: 1 })]
    fn rejects_bad_point(#[case] x: serde_json::Value, #[case] y: serde_json::Value, #[case] expected: BoardError) {
        let payload = board_payload(json!({
            "name": "bad",
            "columns": 3,
            "rows": 1,
            "points": [
                {"x": x, "y": y, "color": {"name": "red", "hex_value": "#FF0000"}},
                {"x": 2, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}}
            ]
        }));

        assert_eq!(payload.decode(&ValidationConfig::default()), Err(expected));
    }

    #[test]
    fn checks_each_point_fully_before_the_next() {
        // the first point is out of bounds, the second has a bad color
        let payload = board_payload(json!({
            "name": "bad",
            "columns": 2,
            "rows": 2,
            "points": [
                {"x": 5, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}},
                {"x": 0, "y": 0, "color": {"name": "red", "hex_value": "FF0000"}}
            ]
        }));

        assert_eq!(payload.decode(&ValidationConfig::default()).unwrap_err().kind(), ErrorKind::PointOutOfBounds);
    }

    #[test]
    fn rejects_bad_hex_with_point_index() {
        let payload = board_payload(json!({
            "name": "bad",
            "columns": 2,
            "rows": 2,
            "points": [
                {"x": 0, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}},
                {"x": 1, "y": 1, "color": {"name": "red", "hex_value": "#F00"}}
            ]
        }));

        assert_eq!(
            payload.decode(&ValidationConfig::default()),
            Err(BoardError::InvalidColor { index: 1, source: ColorError::WrongLength { hex: "#F00".to_owned() } }),
        );
    }

    #[rstest]
    #[case::zero(json!(0), json!(3), GridAxis::Columns)]
    #[case::negative(json!(-2), json!(3), GridAxis::Columns)]
    #[case::fractional(json!(3), json!(1.5), GridAxis::Rows)]
    #[case::above_bound(json!(3), json!(1001), GridAxis::Rows)]
    fn rejects_bad_dimensions(#[case] columns: serde_json::Value, #[case] rows: serde_json::Value, #[case] axis: GridAxis) {
        let payload = board_payload(json!({"name": "bad", "columns": columns, "rows": rows, "points": []}));

        assert!(matches!(
            payload.decode(&ValidationConfig::default()),
            Err(BoardError::InvalidDimensions { axis: a, max: 1000, .. }) if a == axis
        ));
    }

    #[test]
    fn honours_configured_bound() {
        let payload = board_payload(json!({"name": "big", "columns": 1500, "rows": 1500, "points": []}));

        assert!(payload.decode(&ValidationConfig::default()).is_err());
        assert!(payload.decode(&ValidationConfig { max_dimension: 2000, ..ValidationConfig::default() }).is_ok());
    }

    #[test]
    fn caps_board_name_before_dimensions() {
        let long = "n".repeat(MAX_BOARD_NAME_LENGTH + 1);
        let payload = board_payload(json!({"name": long, "columns": 0, "rows": 3, "points": []}));
        assert_eq!(
            payload.decode(&ValidationConfig::default()),
            Err(BoardError::InvalidName { length: 256, max: 255 }),
        );

        let exact = board_payload(json!({"name": "n".repeat(MAX_BOARD_NAME_LENGTH), "columns": 1, "rows": 1, "points": []}));
        assert!(exact.decode(&ValidationConfig::default()).is_ok());
    }

    #[test]
    fn caps_point_color_name() {
        let payload = board_payload(json!({
            "name": "long colors",
            "columns": 3,
            "rows": 1,
            "points": [
                {"x": 0, "y": 0, "color": {"name": "r".repeat(101), "hex_value": "#FF0000"}},
                {"x": 2, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}}
            ]
        }));

        assert_eq!(
            payload.decode(&ValidationConfig::default()),
            Err(BoardError::InvalidColor { index: 0, source: ColorError::NameTooLong { length: 101, max: 100 } }),
        );
    }

    #[test]
    fn accepts_object_and_bare_hex_colors() {
        let solution = r##"{
            "name": "mine",
            "paths": [{
                "start": {"x": 0, "y": 0},
                "end": {"x": 2, "y": 0},
                "color": {"hex_value": "#FF0000"},
                "path": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}]
            }]
        }"##;
        let bare = solution.replace(r##"{"hex_value": "#FF0000"}"##, r##""#FF0000""##);

        for json in [solution, bare.as_str()] {
            let solution = check_solution_json(BOARD, json, &ValidationConfig::default()).unwrap();
            assert_eq!(solution.paths[0].color.hex(), "#FF0000");
            assert_eq!(solution.paths[0].cells.len(), 3);
        }
    }

    #[test]
    fn reports_path_geometry_with_index() {
        let payload: SolutionPayload = serde_json::from_value(json!({
            "paths": [{
                "start": {"x": 0, "y": 0},
                "end": {"x": 2, "y": 0},
                "color": "#FF0000",
                "path": [{"x": 0, "y": 0}, {"x": -1, "y": 0}]
            }]
        })).unwrap();

        assert_eq!(
            payload.decode(&ValidationConfig::default()),
            Err(SolutionError::InvalidGeometry { index: 0, source: GeometryError::Negative { axis: Axis::X, value: -1 } }),
        );
    }

    #[test]
    fn collects_every_violation_when_asked() {
        let solution = r##"{
            "paths": [
                {"start": {"x": 0, "y": 0}, "end": {"x": 2, "y": 0}, "color": "#FF0000", "path": [{"x": 0, "y": 0}]},
                {"start": {"x": 0, "y": 0}, "end": {"x": 2, "y": 0}, "color": "#FF0000", "path": [{"x": 0, "y": 0}, {"x": 2, "y": 0}]}
            ]
        }"##;
        let config = ValidationConfig::default().with_report(ReportMode::CollectAll);

        match check_solution_json(BOARD, solution, &config) {
            Err(CheckError::Solution(errors)) => assert_eq!(
                errors.iter().map(SolutionError::kind).collect::<Vec<_>>(),
                vec![
                    ErrorKind::DiscontinuousPath,
                    ErrorKind::DiscontinuousPath,
                    // (2, 0) is missing from the single-cell path
                    ErrorKind::PathEndpointMismatch,
                    ErrorKind::InvalidPathCount,
                ],
            ),
            other => panic!("expected solution errors, got {other:?}"),
        }
    }

    #[test]
    fn path_cannot_step_off_the_coordinate_range() {
        let solution = r##"{
            "paths": [{
                "start": {"x": 0, "y": 0},
                "end": {"x": 2, "y": 0},
                "color": "#FF0000",
                "path": [{"x": 0, "y": 0}, {"x": 18446744073709551615, "y": 0}, {"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}]
            }]
        }"##;

        match check_solution_json(BOARD, solution, &ValidationConfig::default()) {
            Err(CheckError::Solution(errors)) => assert_eq!(
                errors.iter().map(SolutionError::kind).collect::<Vec<_>>(),
                vec![ErrorKind::DiscontinuousPath],
            ),
            other => panic!("expected a discontinuous path, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(check_board_json("{", &ValidationConfig::default()), Err(CheckError::Parse(_))));
    }

    #[test]
    fn encodes_points_back_to_wire_shape() {
        let board = check_board_json(BOARD, &ValidationConfig::default()).unwrap();
        let encoded = serde_json::to_value(ColoredPointPayload::from(&board.points()[1])).unwrap();

        assert_eq!(encoded, json!({"x": 2, "y": 0, "color": {"name": "red", "hex_value": "#FF0000"}}));
    }
}
