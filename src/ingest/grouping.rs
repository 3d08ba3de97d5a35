use chrono::NaiveDate;

use crate::domain::Match;

/// Splits the canonically ordered match list into per-day runs, ascending
/// by date, each run preserving match-id order. Dates without activity are
/// never materialized; "the previous day" downstream always means the most
/// recent earlier date that actually had matches.
pub fn by_day(matches: &[Match]) -> impl Iterator<Item = (NaiveDate, &[Match])> {
    matches
        .chunk_by(|a, b| a.date == b.date)
        .map(|day| (day[0].date, day))
}
