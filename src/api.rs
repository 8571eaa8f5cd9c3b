//! Board and solution operations as the web endpoints expose them.
//!
//! Each operation takes the caller, if signed in, and answers with a [`Reply`] or a [`Rejection`]
//! carrying the status code and JSON body to send back.

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::ValidationConfig;
use crate::error::{BoardError, SolutionError};
use crate::location::Coord;
use crate::payload::{BoardPayload, ColoredPointPayload, PathPayload, SolutionPayload};
use crate::store::{BoardRecord, SolutionRecord, Store, StoreError, UserId};

/// HTTP status of a [`Reply`] or [`Rejection`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// 200, a record was read or updated.
    Ok,
    /// 201, a record was created.
    Created,
    /// 204, a record was deleted.
    NoContent,
    /// 400, the payload failed validation.
    BadRequest,
    /// 403, the caller is signed out or does not own the record.
    Forbidden,
    /// 404, the record does not exist or is hidden from the caller.
    NotFound,
    /// 409, a record with the same id already exists.
    Conflict,
}

impl Status {
    /// The numeric HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
        }
    }
}

/// A successful answer: the status to send and the body to serialize.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply<T> {
    /// Status to send.
    pub status: Status,
    /// Response body.
    pub body: T,
}

impl<T> Reply<T> {
    fn new(status: Status, body: T) -> Self {
        Self { status, body }
    }
}

/// A refused request.
///
/// Validation failures answer 400 with `{ field: [message, ..] }`; everything else answers `{ "error": message }`.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{} {}", .status.code(), .body)]
pub struct Rejection {
    /// Status to send.
    pub status: Status,
    /// JSON body to send.
    pub body: Value,
}

impl Rejection {
    fn error(status: Status, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": message.into() }) }
    }

    fn invalid(field: impl Into<String>, messages: Vec<String>) -> Self {
        let mut body = Map::new();
        body.insert(field.into(), Value::from(messages));
        Self { status: Status::BadRequest, body: Value::Object(body) }
    }

    fn signed_out() -> Self {
        Self::error(Status::Forbidden, "Authentication credentials were not provided.")
    }

    fn board_not_found() -> Self {
        Self::error(Status::NotFound, "Game board not found")
    }

    fn solution_not_found() -> Self {
        Self::error(Status::NotFound, "Solution not found")
    }

    fn not_your_solution() -> Self {
        Self::error(Status::Forbidden, "You do not have permission to modify this solution")
    }
}

impl From<BoardError> for Rejection {
    fn from(value: BoardError) -> Self {
        debug!(kind = %value.kind(), error = %value, "board payload rejected");

        let field = match &value {
            BoardError::InvalidName { .. } => "name".to_owned(),
            BoardError::InvalidDimensions { axis, .. } => axis.to_string(),
            _ => "points".to_owned(),
        };
        Self::invalid(field, vec![value.to_string()])
    }
}

impl From<SolutionError> for Rejection {
    fn from(value: SolutionError) -> Self {
        Self::from(vec![value])
    }
}

impl From<Vec<SolutionError>> for Rejection {
    fn from(value: Vec<SolutionError>) -> Self {
        debug!(count = value.len(), first = ?value.first().map(SolutionError::kind), "solution payload rejected");
        Self::invalid("paths", value.iter().map(ToString::to_string).collect())
    }
}

impl From<StoreError> for Rejection {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::BoardNotFound(_) => Self::board_not_found(),
            StoreError::SolutionNotFound(_) => Self::solution_not_found(),
            StoreError::Duplicate(_) => Self::error(Status::Conflict, value.to_string()),
        }
    }
}

/// A stored board as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardResponse {
    /// Generated id of the board.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Number of columns.
    pub columns: Coord,
    /// Number of rows.
    pub rows: Coord,
    /// Colored endpoints, in the order they were submitted.
    pub points: Vec<ColoredPointPayload>,
}

impl From<&BoardRecord> for BoardResponse {
    fn from(value: &BoardRecord) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            columns: value.board.columns(),
            rows: value.board.rows(),
            points: value.board.points().iter().map(ColoredPointPayload::from).collect(),
        }
    }
}

/// A stored solution as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolutionResponse {
    /// Generated id of the solution.
    pub id: Uuid,
    /// Board the solution was drawn on.
    pub board_id: Uuid,
    /// Display name.
    pub name: String,
    /// The validated paths.
    pub paths: Vec<PathPayload>,
}

impl From<&SolutionRecord> for SolutionResponse {
    fn from(value: &SolutionRecord) -> Self {
        Self {
            id: value.id,
            board_id: value.board_id,
            name: value.name.clone(),
            paths: value.paths.iter().map(PathPayload::from).collect(),
        }
    }
}

fn signed_in(caller: Option<&UserId>) -> Result<&UserId, Rejection> {
    caller.ok_or_else(Rejection::signed_out)
}

/// The board `id` if `caller` owns it. Boards owned by someone else are reported missing.
fn owned_board<'s, S: Store>(store: &'s S, id: Uuid, caller: Option<&UserId>) -> Result<&'s BoardRecord, Rejection> {
    store.board(id)
        .ok()
        .filter(|record| Some(&record.owner) == caller)
        .ok_or_else(Rejection::board_not_found)
}

/// Validate `payload` and store it as a new board owned by the caller.
pub fn create_board<S: Store>(
    store: &mut S,
    caller: Option<&UserId>,
    payload: &BoardPayload,
    config: &ValidationConfig,
) -> Result<Reply<BoardResponse>, Rejection> {
    let owner = signed_in(caller)?;
    let record = BoardRecord {
        id: Uuid::new_v4(),
        name: payload.name.clone(),
        owner: owner.clone(),
        board: payload.decode(config)?,
    };

    let response = BoardResponse::from(&record);
    store.insert_board(record)?;
    Ok(Reply::new(Status::Created, response))
}

/// Replace the caller's board `id` with a validated `payload`.
pub fn update_board<S: Store>(
    store: &mut S,
    caller: Option<&UserId>,
    id: Uuid,
    payload: &BoardPayload,
    config: &ValidationConfig,
) -> Result<Reply<BoardResponse>, Rejection> {
    let owner = signed_in(caller)?;
    owned_board(store, id, caller)?;

    let record = BoardRecord {
        id,
        name: payload.name.clone(),
        owner: owner.clone(),
        board: payload.decode(config)?,
    };

    let response = BoardResponse::from(&record);
    store.replace_board(record)?;
    Ok(Reply::new(Status::Ok, response))
}

/// Read the caller's board `id`.
pub fn get_board<S: Store>(store: &S, caller: Option<&UserId>, id: Uuid) -> Result<Reply<BoardResponse>, Rejection> {
    let record = owned_board(store, id, caller)?;
    Ok(Reply::new(Status::Ok, record.into()))
}

/// Delete the caller's board `id` along with its solutions.
pub fn delete_board<S: Store>(store: &mut S, caller: Option<&UserId>, id: Uuid) -> Result<Reply<()>, Rejection> {
    signed_in(caller)?;
    owned_board(store, id, caller)?;

    store.remove_board(id)?;
    Ok(Reply::new(Status::NoContent, ()))
}

/// Every board, newest first.
pub fn list_boards<S: Store>(store: &S) -> Reply<Vec<BoardResponse>> {
    Reply::new(Status::Ok, store.boards().into_iter().map(BoardResponse::from).collect())
}

/// The caller's boards, newest first.
pub fn list_my_boards<S: Store>(store: &S, caller: Option<&UserId>) -> Result<Reply<Vec<BoardResponse>>, Rejection> {
    let owner = signed_in(caller)?;
    let boards = store.boards()
        .into_iter()
        .filter(|record| &record.owner == owner)
        .map(BoardResponse::from)
        .collect();

    Ok(Reply::new(Status::Ok, boards))
}

/// Validate `payload` against board `board_id`, owned by the caller, and store it.
pub fn create_solution<S: Store>(
    store: &mut S,
    caller: Option<&UserId>,
    board_id: Uuid,
    payload: &SolutionPayload,
    config: &ValidationConfig,
) -> Result<Reply<SolutionResponse>, Rejection> {
    let owner = signed_in(caller)?;
    let board = owned_board(store, board_id, caller)?;
    let solution = payload.decode_for(&board.board, config)?;

    let record = SolutionRecord {
        id: Uuid::new_v4(),
        board_id,
        owner: owner.clone(),
        name: solution.name,
        paths: solution.paths,
    };

    let response = SolutionResponse::from(&record);
    store.insert_solution(record)?;
    Ok(Reply::new(Status::Created, response))
}

/// Replace the paths of the caller's own solution, validated against its board.
pub fn update_solution<S: Store>(
    store: &mut S,
    caller: Option<&UserId>,
    id: Uuid,
    payload: &SolutionPayload,
    config: &ValidationConfig,
) -> Result<Reply<SolutionResponse>, Rejection> {
    let owner = signed_in(caller)?;
    let existing = store.solution(id)?;
    if &existing.owner != owner {
        return Err(Rejection::not_your_solution());
    }

    let board_id = existing.board_id;
    let solution = payload.decode_for(&store.board(board_id)?.board, config)?;
    let record = SolutionRecord {
        id,
        board_id,
        owner: owner.clone(),
        name: solution.name,
        paths: solution.paths,
    };

    let response = SolutionResponse::from(&record);
    store.replace_solution(record)?;
    Ok(Reply::new(Status::Ok, response))
}

/// Read solution `id`, whoever owns it.
pub fn get_solution<S: Store>(store: &S, id: Uuid) -> Result<Reply<SolutionResponse>, Rejection> {
    Ok(Reply::new(Status::Ok, store.solution(id)?.into()))
}

/// Solutions drawn on board `board_id`, newest first.
pub fn list_solutions<S: Store>(store: &S, board_id: Uuid) -> Result<Reply<Vec<SolutionResponse>>, Rejection> {
    store.board(board_id)?;
    Ok(Reply::new(Status::Ok, store.solutions(board_id).into_iter().map(SolutionResponse::from).collect()))
}
