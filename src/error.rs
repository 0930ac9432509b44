use std::fmt;

use thiserror::Error;

use crate::utils::axis_name;
use crate::Direction;

/// Failures raised while fitting or querying a correspondence analysis.
///
/// Every variant is fatal: no partial result accompanies an error.
#[derive(Error)]
pub enum CaError {
    /// Malformed input: wrong shape, duplicate or unknown keys, non-finite values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("negative entry {value} at row {row:?}, column {column:?}")]
    NegativeEntry {
        row: String,
        column: String,
        value: f64,
    },

    /// A row or column whose marginal sum is zero, so no profile or mass exists for it.
    #[error("{} {key:?} has a zero marginal sum", axis_name(.direction))]
    ZeroMass { direction: Direction, key: String },

    #[error("correspondence analysis has not been fitted yet")]
    NotFitted,

    #[error("SVD computation failed: {0}")]
    Decomposition(#[from] anyhow::Error),
}

// `Direction` from single-utilities implements no `Debug`, so the impl is written
// out by hand; it matches what `#[derive(Debug)]` would print.
impl fmt::Debug for CaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => f.debug_tuple("InvalidInput").field(message).finish(),
            Self::NegativeEntry { row, column, value } => f
                .debug_struct("NegativeEntry")
                .field("row", row)
                .field("column", column)
                .field("value", value)
                .finish(),
            Self::ZeroMass { direction, key } => f
                .debug_struct("ZeroMass")
                .field(
                    "direction",
                    &format_args!(
                        "{}",
                        match direction {
                            Direction::ROW => "ROW",
                            Direction::COLUMN => "COLUMN",
                        }
                    ),
                )
                .field("key", key)
                .finish(),
            Self::NotFitted => f.write_str("NotFitted"),
            Self::Decomposition(source) => f.debug_tuple("Decomposition").field(source).finish(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CaError>;
