use itertools::Itertools;
use ndarray::Array2;
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::config::{ReportMode, ValidationConfig};
use crate::error::{Discontinuity, Endpoint, EndpointMismatch, SolutionError};
use crate::location::Point;
use crate::path::Path;

/// A user's proposed set of connecting paths for a board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Display name.
    pub name: String,
    /// One path per color, in submission order.
    pub paths: Vec<Path>,
}

/// Validate `paths` against `board` with the default rules, returning the first violation.
pub fn validate_solution(paths: &[Path], board: &Board) -> Result<(), SolutionError> {
    PathValidator::new(board, paths, &ValidationConfig::default()).validate()
}

/// Checks a candidate set of paths against a board.
///
/// Four checks run in a fixed order, each over every path before the next starts:
/// 1. continuity: at least 2 cells, consecutive cells orthogonally adjacent;
/// 2. endpoints: start and end sit on board points and appear in the path itself;
/// 3. cardinality: every color with a path has exactly one;
/// 4. crossing: no two paths have perpendicular segments that intersect.
///
/// A fifth check for cells shared between paths runs last if [`ValidationConfig::reject_shared_cells`] is set.
/// Violations are produced lazily, so failing fast does not pay for the later checks.
#[derive(Clone, Copy)]
pub struct PathValidator<'a> {
    board: &'a Board,
    paths: &'a [Path],
    config: &'a ValidationConfig,
}

impl<'a> PathValidator<'a> {
    /// Check `paths` on `board` under the rules enabled in `config`.
    pub fn new(board: &'a Board, paths: &'a [Path], config: &'a ValidationConfig) -> Self {
        Self { board, paths, config }
    }

    /// Every violation, in check order.
    pub fn violations(self) -> impl Iterator<Item = SolutionError> + 'a {
        self.continuity()
            .chain(self.endpoints())
            .chain(self.cardinality())
            .chain(self.crossings())
            .chain(self.shared_cells())
    }

    /// The first violation, if any.
    pub fn validate(self) -> Result<(), SolutionError> {
        debug!(paths = self.paths.len(), "validating solution");

        match self.violations().next() {
            None => Ok(()),
            Some(error) => {
                debug!(kind = %error.kind(), %error, "solution rejected");
                Err(error)
            }
        }
    }

    /// The violations to report under [`ValidationConfig::report`]: at most one when failing fast, all otherwise.
    pub fn report(self) -> Result<(), Vec<SolutionError>> {
        let violations = match self.config.report {
            ReportMode::FailFast => self.violations().take(1).collect_vec(),
            ReportMode::CollectAll => self.violations().collect_vec(),
        };

        if violations.is_empty() {
            Ok(())
        } else {
            debug!(count = violations.len(), "solution rejected");
            Err(violations)
        }
    }

    fn continuity(self) -> impl Iterator<Item = SolutionError> + 'a {
        self.paths.iter().enumerate().filter_map(|(index, path)| {
            let reason = if path.cells.len() < 2 {
                Discontinuity::TooShort { length: path.cells.len() }
            } else {
                let (position, (from, to)) = path.cells.iter()
                    .tuple_windows::<(&Point, &Point)>()
                    .find_position(|(a, b)| !a.is_adjacent(b))?;
                Discontinuity::NotAdjacent { from: *from, to: *to, position }
            };

            Some(SolutionError::DiscontinuousPath { index, color: path.color.to_string(), reason })
        })
    }

    fn endpoints(self) -> impl Iterator<Item = SolutionError> + 'a {
        self.paths.iter().enumerate().flat_map(move |(index, path)| {
            let mismatch = |endpoint: Endpoint, point: Point, reason: EndpointMismatch| SolutionError::PathEndpointMismatch {
                index,
                color: path.color.to_string(),
                endpoint,
                point,
                reason,
            };

            let mut found = Vec::new();
            for (endpoint, point) in [(Endpoint::Start, path.start), (Endpoint::End, path.end)] {
                let mut on_board = self.board.points_at(point).peekable();
                if on_board.peek().is_none() {
                    found.push(mismatch(endpoint, point, EndpointMismatch::NotOnBoard));
                } else if self.config.require_matching_endpoint_color && !on_board.any(|p| p.color == path.color) {
                    found.push(mismatch(endpoint, point, EndpointMismatch::ColorMismatch));
                }
            }
            for (endpoint, point) in [(Endpoint::Start, path.start), (Endpoint::End, path.end)] {
                if !path.cells.contains(&point) {
                    found.push(mismatch(endpoint, point, EndpointMismatch::NotInPath));
                }
            }
            if self.config.reject_self_connection && path.start == path.end {
                found.push(mismatch(Endpoint::End, path.end, EndpointMismatch::SelfConnection));
            }

            found
        })
    }

    fn cardinality(self) -> impl Iterator<Item = SolutionError> + 'a {
        let counts = self.paths.iter().map(|p| &p.color).counts();

        let miscounted = self.paths.iter()
            .map(|p| &p.color)
            .unique()
            .filter_map(|color| {
                let count = counts.get(color).copied().unwrap_or_default();
                (count != 1).then(|| SolutionError::InvalidPathCount { color: color.to_string(), count })
            })
            .collect_vec();

        let missing = self.board.colors()
            .filter(|_| self.config.require_every_color)
            .filter(|color| !counts.contains_key(color))
            .map(|color| SolutionError::InvalidPathCount { color: color.to_string(), count: 0 })
            .collect_vec();

        miscounted.into_iter().chain(missing)
    }

    fn crossings(self) -> impl Iterator<Item = SolutionError> + 'a {
        let detect_overlap = self.config.detect_collinear_overlap;

        self.paths.iter().tuple_combinations().filter_map(move |(a, b)| {
            a.segments()
                .cartesian_product(b.segments())
                .find_map(|(s, t)| s.crossing(&t).or_else(|| detect_overlap.then(|| s.overlap(&t)).flatten()))
                .map(|at| SolutionError::PathsCross {
                    colors: UnorderedPair(a.color.to_string(), b.color.to_string()),
                    at,
                })
        })
    }

    fn shared_cells(self) -> impl Iterator<Item = SolutionError> + 'a {
        let paths = self.paths;
        let occupancy = self.config.reject_shared_cells
            .then(|| Array2::<Option<usize>>::from_elem((self.board.rows(), self.board.columns()), None));

        occupancy.into_iter().flat_map(move |mut occupancy| {
            paths.iter()
                .enumerate()
                .flat_map(|(index, path)| path.cells.iter().map(move |cell| (index, path, *cell)))
                .filter_map(move |(index, path, cell)| {
                    // cells off the board have no slot and were never claimed
                    let previous = occupancy.get_mut(cell.as_index())?.replace(index)?;
                    Some(SolutionError::SharedCell {
                        colors: UnorderedPair(paths[previous].color.to_string(), path.color.to_string()),
                        point: cell,
                    })
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::builder::BoardBuilder;
    use crate::color::Color;
    use crate::error::ErrorKind;

    fn color(hex: &str) -> Color {
        Color::new("", hex).unwrap()
    }

    fn path(hex: &str, cells: &[(usize, usize)]) -> Path {
        Path::through(color(hex), cells.iter().map(|(x, y)| Point(*x, *y)).collect()).unwrap()
    }

    /// Red pair on the middle row, blue pair on the middle column of a 3x3 board.
    #[fixture]
    fn plus() -> Board {
        BoardBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .add_termini(color("#FF0000"), (Point(0, 1), Point(2, 1)))
            .add_termini(color("#0000FF"), (Point(1, 0), Point(1, 2)))
            .build()
            .unwrap()
    }

    /// Red pair on the top row, blue pair on the bottom row of a 3x3 board.
    #[fixture]
    fn stripes() -> Board {
        BoardBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .add_termini(color("#FF0000"), (Point(0, 0), Point(2, 0)))
            .add_termini(color("#0000FF"), (Point(0, 2), Point(2, 2)))
            .build()
            .unwrap()
    }

    fn kinds(board: &Board, paths: &[Path], config: &ValidationConfig) -> Vec<ErrorKind> {
        PathValidator::new(board, paths, config).violations().map(|e| e.kind()).collect()
    }

    #[test]
    fn accepts_straight_pair() {
        let board = BoardBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()))
            .add_termini(color("#FF0000"), (Point(0, 0), Point(2, 0)))
            .build()
            .unwrap();

        assert_eq!(validate_solution(&[path("#FF0000", &[(0, 0), (1, 0), (2, 0)])], &board), Ok(()));
    }

    #[rstest]
    fn accepts_disjoint_stripes(stripes: Board) {
        let paths = [
            path("#FF0000", &[(0, 0), (1, 0), (2, 0)]),
            path("#0000FF", &[(0, 2), (1, 2), (2, 2)]),
        ];

        assert_eq!(validate_solution(&paths, &stripes), Ok(()));
        assert_eq!(PathValidator::new(&stripes, &paths, &ValidationConfig::strict()).validate(), Ok(()));
    }

    #[rstest]
    fn validation_is_repeatable(plus: Board) {
        let paths = [
            path("#FF0000", &[(0, 1), (1, 1), (2, 1)]),
            path("#0000FF", &[(1, 0), (1, 1), (1, 2)]),
        ];

        let first = validate_solution(&paths, &plus);
        assert_eq!(first, validate_solution(&paths, &plus));
        assert!(first.is_err());
    }

    #[rstest]
    #[case::empty(&[], Discontinuity::TooShort { length: 0 })]
    #[case::single(&[(0, 0)], Discontinuity::TooShort { length: 1 })]
    #[case::jump(&[(0, 0), (2, 0)], Discontinuity::NotAdjacent { from: Point(0, 0), to: Point(2, 0), position: 0 })]
    #[case::diagonal(&[(0, 0), (1, 0), (2, 1), (2, 0)], Discontinuity::NotAdjacent { from: Point(1, 0), to: Point(2, 1), position: 1 })]
    #[case::repeated(&[(0, 0), (0, 0), (1, 0), (2, 0)], Discontinuity::NotAdjacent { from: Point(0, 0), to: Point(0, 0), position: 0 })]
    #[case::wraps_low_edge(&[(0, 0), (usize::MAX, 0), (0, 0), (1, 0), (2, 0)], Discontinuity::NotAdjacent { from: Point(0, 0), to: Point(usize::MAX, 0), position: 0 })]
    fn rejects_discontinuous_paths(stripes: Board, #[case] cells: &[(usize, usize)], #[case] reason: Discontinuity) {
        let paths = [Path::new(
            color("#FF0000"),
            Point(0, 0),
            Point(2, 0),
            cells.iter().map(|(x, y)| Point(*x, *y)).collect(),
        )];

        assert_eq!(
            validate_solution(&paths, &stripes),
            Err(SolutionError::DiscontinuousPath { index: 0, color: "#FF0000".to_owned(), reason }),
        );
    }

    #[rstest]
    fn continuity_is_checked_for_every_path_first(stripes: Board) {
        let paths = [
            // endpoint (1, 1) is not on the board
            path("#FF0000", &[(0, 0), (0, 1), (1, 1)]),
            path("#0000FF", &[(0, 2), (2, 2)]),
        ];

        assert_eq!(validate_solution(&paths, &stripes).unwrap_err().kind(), ErrorKind::DiscontinuousPath);
    }

    #[rstest]
    fn rejects_endpoint_off_the_board(stripes: Board) {
        let paths = [path("#FF0000", &[(0, 0), (1, 0)])];

        assert_eq!(
            validate_solution(&paths, &stripes),
            Err(SolutionError::PathEndpointMismatch {
                index: 0,
                color: "#FF0000".to_owned(),
                endpoint: Endpoint::End,
                point: Point(1, 0),
                reason: EndpointMismatch::NotOnBoard,
            }),
        );
    }

    #[rstest]
    fn rejects_declared_endpoint_missing_from_cells(stripes: Board) {
        let paths = [Path::new(color("#FF0000"), Point(0, 0), Point(2, 2), vec![Point(0, 0), Point(1, 0), Point(2, 0)])];

        assert_eq!(
            validate_solution(&paths, &stripes),
            Err(SolutionError::PathEndpointMismatch {
                index: 0,
                color: "#FF0000".to_owned(),
                endpoint: Endpoint::End,
                point: Point(2, 2),
                reason: EndpointMismatch::NotInPath,
            }),
        );
    }

    #[rstest]
    fn endpoint_color_is_only_checked_when_asked(stripes: Board) {
        // a red path between the blue points
        let paths = [path("#FF0000", &[(0, 2), (1, 2), (2, 2)])];

        assert_eq!(validate_solution(&paths, &stripes), Ok(()));

        let config = ValidationConfig { require_matching_endpoint_color: true, ..ValidationConfig::default() };
        assert_eq!(
            PathValidator::new(&stripes, &paths, &config).validate(),
            Err(SolutionError::PathEndpointMismatch {
                index: 0,
                color: "#FF0000".to_owned(),
                endpoint: Endpoint::Start,
                point: Point(0, 2),
                reason: EndpointMismatch::ColorMismatch,
            }),
        );
    }

    #[rstest]
    fn self_connection_is_only_rejected_when_asked(stripes: Board) {
        let paths = [path("#FF0000", &[(0, 0), (0, 1), (0, 0)])];

        assert_eq!(validate_solution(&paths, &stripes), Ok(()));

        let config = ValidationConfig { reject_self_connection: true, ..ValidationConfig::default() };
        assert_eq!(kinds(&stripes, &paths, &config), vec![ErrorKind::PathEndpointMismatch]);
    }

    #[rstest]
    fn rejects_duplicated_color_not_on_board(stripes: Board) {
        let paths = [
            path("#FF0000", &[(0, 0), (1, 0), (2, 0)]),
            path("#0000FF", &[(0, 2), (1, 2), (2, 2)]),
            path("#00FF00", &[(0, 0), (1, 0), (2, 0)]),
            path("#00FF00", &[(0, 2), (1, 2), (2, 2)]),
        ];

        assert_eq!(
            validate_solution(&paths, &stripes),
            Err(SolutionError::InvalidPathCount { color: "#00FF00".to_owned(), count: 2 }),
        );
    }

    #[rstest]
    fn missing_color_is_only_rejected_when_asked(stripes: Board) {
        let paths = [path("#FF0000", &[(0, 0), (1, 0), (2, 0)])];

        assert_eq!(validate_solution(&paths, &stripes), Ok(()));

        let config = ValidationConfig { require_every_color: true, ..ValidationConfig::default() };
        assert_eq!(
            PathValidator::new(&stripes, &paths, &config).validate(),
            Err(SolutionError::InvalidPathCount { color: "#0000FF".to_owned(), count: 0 }),
        );
    }

    #[rstest]
    fn detects_perpendicular_crossing(plus: Board) {
        let paths = [
            path("#FF0000", &[(0, 1), (1, 1), (2, 1)]),
            path("#0000FF", &[(1, 0), (1, 1), (1, 2)]),
        ];

        assert_eq!(
            validate_solution(&paths, &plus),
            Err(SolutionError::PathsCross {
                colors: UnorderedPair("#FF0000".to_owned(), "#0000FF".to_owned()),
                at: Point(1, 1),
            }),
        );
    }

    #[test]
    fn collinear_overlap_is_only_detected_when_asked() {
        let board = BoardBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(1).unwrap()))
            .add_termini(color("#FF0000"), (Point(0, 0), Point(3, 0)))
            .add_termini(color("#0000FF"), (Point(1, 0), Point(2, 0)))
            .build()
            .unwrap();
        // blue runs inside red along the only row, never perpendicular to it
        let paths = [
            path("#FF0000", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
            path("#0000FF", &[(1, 0), (2, 0)]),
        ];

        assert_eq!(validate_solution(&paths, &board), Ok(()));

        let config = ValidationConfig { detect_collinear_overlap: true, ..ValidationConfig::default() };
        assert_eq!(
            PathValidator::new(&board, &paths, &config).validate(),
            Err(SolutionError::PathsCross {
                colors: UnorderedPair("#FF0000".to_owned(), "#0000FF".to_owned()),
                at: Point(1, 0),
            }),
        );
    }

    #[rstest]
    fn shared_cells_are_only_rejected_when_asked(stripes: Board) {
        // red doubles back over (1, 0)
        let paths = [
            path("#FF0000", &[(0, 0), (1, 0), (1, 1), (1, 0), (2, 0)]),
            path("#0000FF", &[(0, 2), (1, 2), (2, 2)]),
        ];

        assert_eq!(validate_solution(&paths, &stripes), Ok(()));

        let config = ValidationConfig { reject_shared_cells: true, ..ValidationConfig::default() };
        assert_eq!(
            PathValidator::new(&stripes, &paths, &config).validate(),
            Err(SolutionError::SharedCell {
                colors: UnorderedPair("#FF0000".to_owned(), "#FF0000".to_owned()),
                point: Point(1, 0),
            }),
        );
    }

    #[rstest]
    fn fail_fast_reports_only_the_first(plus: Board) {
        let paths = [
            path("#FF0000", &[(0, 1)]),
            path("#0000FF", &[(1, 0), (1, 1), (1, 2)]),
            path("#0000FF", &[(1, 0), (1, 1), (1, 2)]),
        ];

        assert_eq!(PathValidator::new(&plus, &paths, &ValidationConfig::default()).report().unwrap_err().len(), 1);
    }

    #[rstest]
    fn collect_all_reports_in_check_order(plus: Board) {
        let paths = [
            path("#FF0000", &[(0, 1), (1, 1), (2, 1)]),
            path("#0000FF", &[(1, 0), (1, 1), (1, 2)]),
            path("#0000FF", &[(1, 0), (1, 1), (2, 1)]),
            path("#00FF00", &[(0, 0), (0, 1)]),
        ];
        let config = ValidationConfig::default().with_report(ReportMode::CollectAll);

        assert_eq!(
            PathValidator::new(&plus, &paths, &config).report().unwrap_err().iter().map(SolutionError::kind).collect_vec(),
            vec![
                // green starts on (0, 0), which is no board point
                ErrorKind::PathEndpointMismatch,
                ErrorKind::InvalidPathCount,
                // red touches every other path, the blue paths cross each other
                ErrorKind::PathsCross,
                ErrorKind::PathsCross,
                ErrorKind::PathsCross,
                ErrorKind::PathsCross,
            ],
        );
    }
}
