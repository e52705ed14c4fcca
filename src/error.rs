//! Error types shared by the puzzle library.

use thiserror::Error;

/// Things that can go wrong before or around a solve.
///
/// The search itself never fails: a board without any tiling simply
/// produces an empty solution list.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("day {0} is outside 1..=31")]
    InvalidDay(u8),
    #[error("unknown month '{0}'")]
    UnknownMonth(String),
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),
    #[error("date cell {index} is not a free board cell")]
    BlockedCellOccupied { index: usize },
    #[error("malformed board: {reason}")]
    MalformedBoard { reason: String },
    #[error("malformed shape: {reason}")]
    MalformedShape { reason: String },
    #[error("corrupt solution archive: {reason}")]
    CorruptArchive { reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
