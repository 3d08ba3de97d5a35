use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type Score = i32;

/// One entry of a closing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub score: Score,
}

/// The ranking as it stood at the close of one active date.
///
/// Standings are sorted by descending score; equal scores keep
/// first-appearance order (the order a player was first seen in the
/// canonical match sequence). Snapshots are immutable once produced and
/// are never edited by later data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub standings: Vec<Standing>,
}

impl DailySnapshot {
    /// 1-based position, best score first. `None` for a player who had
    /// not appeared by this date.
    pub fn rank_of(&self, player: &str) -> Option<usize> {
        self.standings
            .iter()
            .position(|s| s.player == player)
            .map(|idx| idx + 1)
    }

    pub fn score_of(&self, player: &str) -> Option<Score> {
        self.standings
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.score)
    }
}

/// A closing snapshot plus the net score change of every player who took
/// part that day, bonuses and floor effects included.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub snapshot: DailySnapshot,
    pub net_deltas: HashMap<String, Score>,
}

impl DayOutcome {
    pub fn date(&self) -> NaiveDate {
        self.snapshot.date
    }
}

/// Rank movement between two consecutive active dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// Absent from the previous snapshot.
    New,
    /// Climbed this many places.
    Up(u32),
    /// Fell this many places.
    Down(u32),
    Unchanged,
}

/// A win by a player whose previous closing score was strictly below the
/// loser's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upset {
    pub match_id: i64,
    pub winner: String,
    pub loser: String,
    /// Previous-close score gap in the loser's favor.
    pub score_gap: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyHighlights {
    /// Player with the greatest net gain that day.
    pub player_of_day: String,
    pub points_gained: Score,
    /// `None` means no upset that day, a perfectly normal outcome.
    pub biggest_upset: Option<Upset>,
}
