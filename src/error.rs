//! Engine error type

use thiserror::Error;

use crate::geom::GridPoint;
use crate::sim::ObjectId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the entry point can not be equal to the exit point {0}")]
    SameEntryAndExit(GridPoint),
    #[error("invalid board dimensions {columns}x{rows}")]
    InvalidDimensions { columns: i32, rows: i32 },
    #[error("cell {0} is off the board")]
    OffBoard(GridPoint),
    #[error("direction can not be None")]
    NoneDirection,
    #[error("ball {0} is not moving")]
    NotMoving(ObjectId),
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),
    #[error("object {0} is not a ball")]
    NotABall(ObjectId),
    #[error("passability mask is {found_columns}x{found_rows}, expected {columns}x{rows}")]
    MaskMismatch {
        columns: i32,
        rows: i32,
        found_columns: usize,
        found_rows: usize,
    },
    #[error("unsupported level file version {0}")]
    UnsupportedVersion(u32),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
