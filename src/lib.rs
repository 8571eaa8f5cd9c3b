#![warn(missing_docs)]

//! # `flowcheck`
//!
//! Validation for [Numberlink](https://en.wikipedia.org/wiki/Numberlink)-style boards, as drawn in the board editor, and for the
//! solutions players submit against them.
//! Begin by building a board with a [`BoardBuilder`](builder::BoardBuilder) or by decoding a [`BoardPayload`](payload::BoardPayload).
//! A [`Board`] only exists once it is valid: every point lies on the grid and every color marks exactly two points.
//!
//! Solutions are lists of [`Path`]s, each an ordered run of orthogonally adjacent cells of one color.
//! [`validate_solution`] checks them against a board and reports the first violation it finds:
//! 1. every path is continuous;
//! 2. its declared start and end are board points and appear in the path;
//! 3. each color is drawn by exactly one path;
//! 4. no two paths cross.
//!
//! Stricter rules, and reporting every violation instead of the first, are enabled through [`ValidationConfig`].
//! Every error carries an [`ErrorKind`] whose `snake_case` name is a stable machine-readable code.
//!
//! The [`api`] module exposes the same checks as web endpoint operations over a [`Store`](store::Store),
//! and with the `wasm` feature the browser editor calls `validateBoard` and `validateSolution`.

pub use board::{validate_board, Board};
pub use builder::BoardBuilder;
pub use color::{Color, ColoredPoint};
pub use config::{ReportMode, ValidationConfig, MAX_BOARD_DIMENSION, MAX_BOARD_NAME_LENGTH, MAX_COLOR_NAME_LENGTH};
pub use error::{BoardError, ErrorKind, SolutionError};
pub use location::Point;
pub use path::Path;
pub use solution::{validate_solution, PathValidator, Solution};

pub mod api;
pub(crate) mod board;
pub mod builder;
pub(crate) mod color;
pub mod config;
pub mod error;
pub mod location;
pub(crate) mod path;
pub mod payload;
pub mod segment;
pub mod shape;
pub(crate) mod solution;
pub mod store;
#[cfg(feature = "wasm")]
pub mod wasm;
