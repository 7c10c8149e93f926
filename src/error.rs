use thiserror::Error;

use crate::record::{Medium, Unit};

/// Errors raised by the scoring and ranking core.
///
/// Both kinds abort the whole ranking run; no partial tables are produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("no conversion for medium '{medium}' with unit '{unit}'")]
    UnknownConversion { medium: Medium, unit: Unit },
}

impl RankingError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RankingError::MalformedRecord {
            reason: reason.into(),
        }
    }
}
