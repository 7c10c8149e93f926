//! Reading contest statistics: turns per-participant activity records into
//! ranked overall, per-medium and per-language tables.

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod ranking;
pub mod record;
pub mod scoring;
pub mod snapshot;

pub use error::RankingError;
pub use ranking::{run, RankingSet, RankingTable};
pub use record::{Medium, RawEntry, Unit};
pub use scoring::ConversionTable;
