use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the ranking core.
///
/// Score floors, tie-breaks and "no upset today" are normal outcomes and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// A raw row failed validation during ingestion. `row` is the
    /// zero-based index of the offending row; `match_id` is filled in
    /// when the row got far enough to have one.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord {
        row: usize,
        match_id: Option<i64>,
        reason: String,
    },

    /// The requested player never appears in the match history.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// No recorded matches on or before the requested date.
    #[error("no recorded activity for {0}")]
    NoActivity(NaiveDate),
}
