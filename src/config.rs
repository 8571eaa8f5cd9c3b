//! Policy knobs shared by every validation entry point.

use serde::{Deserialize, Serialize};

/// Largest number of columns or rows a board may have.
pub const MAX_BOARD_DIMENSION: usize = 1000;

/// Longest board name, in characters.
pub const MAX_BOARD_NAME_LENGTH: usize = 255;

/// Longest color name, in characters.
pub const MAX_COLOR_NAME_LENGTH: usize = 100;

/// How many violations a validation run reports.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Stop at the first violated rule.
    #[default]
    FailFast,
    /// Report every violation, in check order.
    CollectAll,
}

/// Policy knobs for board and solution validation.
///
/// The default is the lenient rule set: every opt-in check is off and validation stops at the first failure.
/// Any field left out of a deserialized config takes its default.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Upper bound on `columns` and `rows`.
    pub max_dimension: usize,
    /// Whether to stop at the first violation.
    pub report: ReportMode,
    /// Reject solutions leaving a board color without any path.
    pub require_every_color: bool,
    /// Require path endpoints to sit on board points of the path's own color.
    pub require_matching_endpoint_color: bool,
    /// Treat two collinear segments sharing a sub-span as crossing.
    pub detect_collinear_overlap: bool,
    /// Reject cells visited more than once across all paths.
    pub reject_shared_cells: bool,
    /// Reject paths starting and ending on the same cell.
    pub reject_self_connection: bool,
    /// Require the 6 characters of a hex value to be hex digits.
    pub verify_hex_digits: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_dimension: MAX_BOARD_DIMENSION,
            report: ReportMode::FailFast,
            require_every_color: false,
            require_matching_endpoint_color: false,
            detect_collinear_overlap: false,
            reject_shared_cells: false,
            reject_self_connection: false,
            verify_hex_digits: false,
        }
    }
}

impl ValidationConfig {
    /// Every opt-in check enabled, still failing fast.
    pub fn strict() -> Self {
        Self {
            require_every_color: true,
            require_matching_endpoint_color: true,
            detect_collinear_overlap: true,
            reject_shared_cells: true,
            reject_self_connection: true,
            verify_hex_digits: true,
            ..Self::default()
        }
    }

    /// Read settings from JSON, defaulting every missing field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// These settings with the report mode replaced.
    pub fn with_report(mut self, report: ReportMode) -> Self {
        self.report = report;
        self
    }
}
