pub mod ca;
pub mod dense;
mod error;
pub mod sparse;
#[cfg(feature = "statistics")]
pub mod statistics;
pub mod svd;
pub mod table;
mod utils;

pub use ca::{
    CorrespondenceAnalysis, CorrespondenceAnalysisBuilder, EigenSummary, FittedCa, KeyedMatrix,
    KeyedVector, SharedCorrespondence,
};
pub use error::{CaError, Result};
pub use svd::{PowerIterationNormalizer, SvdMethod, SvdTriplet};
pub use table::ContingencyTable;
pub use utils::Direction;
pub use utils::Normalize;
