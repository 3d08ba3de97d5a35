use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw spreadsheet row, exactly as the sheet publishes it.
///
/// Every cell arrives as text and may be blank; validation belongs to
/// `ingest::normalize`, not to deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "ID_Partida")]
    pub match_id: Option<String>,
    #[serde(rename = "Data")]
    pub date: Option<String>,
    #[serde(rename = "Jogador_1")]
    pub player_a: Option<String>,
    #[serde(rename = "Resultado_J1")]
    pub score_a: Option<String>,
    #[serde(rename = "Resultado_J2")]
    pub score_b: Option<String>,
    #[serde(rename = "Jogador_2")]
    pub player_b: Option<String>,
}

/// A validated match. Invariants, enforced at normalization: the players
/// differ, the scores differ and are non-negative, and `id` is unique
/// across the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub date: NaiveDate,
    pub player_a: String,
    pub player_b: String,
    pub score_a: i32,
    pub score_b: i32,
}

impl Match {
    pub fn winner(&self) -> &str {
        if self.score_a > self.score_b {
            &self.player_a
        } else {
            &self.player_b
        }
    }

    pub fn loser(&self) -> &str {
        if self.score_a > self.score_b {
            &self.player_b
        } else {
            &self.player_a
        }
    }

    pub fn involves(&self, player: &str) -> bool {
        self.player_a == player || self.player_b == player
    }

    /// The other side of the table. Only meaningful when `involves(player)`.
    pub fn opponent_of(&self, player: &str) -> &str {
        if self.player_a == player {
            &self.player_b
        } else {
            &self.player_a
        }
    }
}
