use std::collections::HashMap;

use chrono::NaiveDate;
use log::info;

use crate::config::ScoringSettings;
use crate::domain::{Match, RawRow};
use crate::errors::RankingError;
use crate::ingest;
use crate::scoring::{self, DailyHighlights, DailySnapshot, DayOutcome, Movement};
use crate::stats::{self, HeadToHeadRecord};

/// Read-side facade over one full replay of the match history.
///
/// Built once from raw rows; every query afterwards reads precomputed,
/// immutable day outcomes, so the service can be shared freely across
/// request handlers.
#[derive(Debug)]
pub struct StandingsService {
    settings: ScoringSettings,
    matches: Vec<Match>,
    days: Vec<DayOutcome>,
}

impl StandingsService {
    /// Validates the raw rows and replays the whole history. Any bad row
    /// fails the build; no partial standings are ever handed out.
    pub fn from_rows(rows: &[RawRow], settings: ScoringSettings) -> Result<Self, RankingError> {
        let matches = ingest::normalize(rows)?;
        Ok(Self::from_matches(matches, settings))
    }

    /// Builds from already-validated matches in canonical order.
    pub fn from_matches(matches: Vec<Match>, settings: ScoringSettings) -> Self {
        let days = scoring::replay(&matches, &settings);
        let players = days
            .last()
            .map(|d| d.snapshot.standings.len())
            .unwrap_or(0);
        info!("Standings ready: {} players over {} active days", players, days.len());

        Self {
            settings,
            matches,
            days,
        }
    }

    /// The closing snapshot of the most recent active date at or before
    /// `date`.
    pub fn snapshot_for(&self, date: NaiveDate) -> Result<&DailySnapshot, RankingError> {
        self.day_at_or_before(date).map(|(_, day)| &day.snapshot)
    }

    /// Rank movement of the resolved active date against its predecessor.
    /// The first active date classifies everyone as `New`.
    pub fn movement_for(&self, date: NaiveDate) -> Result<HashMap<String, Movement>, RankingError> {
        let (idx, day) = self.day_at_or_before(date)?;
        Ok(scoring::movement::classify(
            self.snapshot_before(idx),
            &day.snapshot,
        ))
    }

    /// The day's highlights. Unlike snapshots, highlights only exist for a
    /// date with matches of its own.
    pub fn highlights_for(&self, date: NaiveDate) -> Result<DailyHighlights, RankingError> {
        let (idx, day) = self.day_at_or_before(date)?;
        if day.date() != date {
            return Err(RankingError::NoActivity(date));
        }
        scoring::highlights::extract(
            day,
            self.snapshot_before(idx),
            self.matches_on(date),
            &self.settings,
        )
        .ok_or(RankingError::NoActivity(date))
    }

    /// All matches played on `date`, in match-id order; empty for a date
    /// without activity.
    pub fn matches_on(&self, date: NaiveDate) -> &[Match] {
        // The canonical order makes each day one contiguous run.
        let start = self.matches.partition_point(|m| m.date < date);
        let end = self.matches.partition_point(|m| m.date <= date);
        &self.matches[start..end]
    }

    pub fn head_to_head(&self, player: &str) -> Result<HeadToHeadRecord, RankingError> {
        stats::aggregate(player, &self.matches)
    }

    /// Every date with recorded activity, ascending.
    pub fn active_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|d| d.date())
    }

    /// The most recent closing snapshot, if any matches exist at all.
    pub fn latest_snapshot(&self) -> Option<&DailySnapshot> {
        self.days.last().map(|d| &d.snapshot)
    }

    fn day_at_or_before(&self, date: NaiveDate) -> Result<(usize, &DayOutcome), RankingError> {
        let end = self.days.partition_point(|d| d.date() <= date);
        match end {
            0 => Err(RankingError::NoActivity(date)),
            _ => Ok((end - 1, &self.days[end - 1])),
        }
    }

    fn snapshot_before(&self, idx: usize) -> Option<&DailySnapshot> {
        idx.checked_sub(1).map(|i| &self.days[i].snapshot)
    }
}
