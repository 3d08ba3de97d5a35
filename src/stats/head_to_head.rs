use serde::Serialize;

use crate::domain::Match;
use crate::errors::RankingError;

/// Win/loss tally against a single opponent, from the subject player's
/// point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentTally {
    pub opponent: String,
    /// Wins by the subject player over this opponent.
    pub wins: u32,
    /// Losses by the subject player to this opponent.
    pub losses: u32,
}

/// Full head-to-head picture for one player. Derived by a scan of the
/// match history; has no bearing on score computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadRecord {
    pub player: String,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage, 0.0 to 100.0.
    pub win_rate: f64,
    /// Per-opponent tallies in first-encounter order.
    pub opponents: Vec<OpponentTally>,
    /// Opponent with the most wins over the player; `None` when the
    /// player has never lost.
    pub nemesis: Option<OpponentTally>,
    /// Opponent the player has beaten most; `None` when the player has
    /// never won.
    pub favorite_victim: Option<OpponentTally>,
}

/// Scans the canonical match list and tallies every opponent of `player`.
/// Ties for nemesis or favorite victim go to the first-encountered
/// opponent in canonical order.
pub fn aggregate(player: &str, matches: &[Match]) -> Result<HeadToHeadRecord, RankingError> {
    let mut opponents: Vec<OpponentTally> = Vec::new();
    let mut wins = 0u32;
    let mut losses = 0u32;

    for m in matches {
        if !m.involves(player) {
            continue;
        }

        let opponent = m.opponent_of(player);
        let won = m.winner() == player;
        if won {
            wins += 1;
        } else {
            losses += 1;
        }

        match opponents.iter_mut().find(|t| t.opponent == opponent) {
            Some(tally) => {
                if won {
                    tally.wins += 1;
                } else {
                    tally.losses += 1;
                }
            }
            None => opponents.push(OpponentTally {
                opponent: opponent.to_string(),
                wins: if won { 1 } else { 0 },
                losses: if won { 0 } else { 1 },
            }),
        }
    }

    let total_games = wins + losses;
    if total_games == 0 {
        return Err(RankingError::UnknownPlayer(player.to_string()));
    }

    let win_rate = f64::from(wins) / f64::from(total_games) * 100.0;
    let nemesis = pick_top(&opponents, |t| t.losses);
    let favorite_victim = pick_top(&opponents, |t| t.wins);

    Ok(HeadToHeadRecord {
        player: player.to_string(),
        total_games,
        wins,
        losses,
        win_rate,
        opponents,
        nemesis,
        favorite_victim,
    })
}

/// Highest non-zero count wins; the scan order keeps the tie-break on the
/// first-encountered opponent.
fn pick_top<F>(opponents: &[OpponentTally], count: F) -> Option<OpponentTally>
where
    F: Fn(&OpponentTally) -> u32,
{
    let mut best: Option<&OpponentTally> = None;
    for tally in opponents {
        if count(tally) == 0 {
            continue;
        }
        if best.is_none_or(|b| count(tally) > count(b)) {
            best = Some(tally);
        }
    }
    best.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn m(id: i64, winner: &str, loser: &str) -> Match {
        Match {
            id,
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            player_a: winner.to_string(),
            player_b: loser.to_string(),
            score_a: 2,
            score_b: 1,
        }
    }

    #[test]
    fn nemesis_and_favorite_victim() {
        // Alice beat Bob three times and lost to Charlie twice.
        let matches = vec![
            m(1, "Alice", "Bob"),
            m(2, "Alice", "Bob"),
            m(3, "Charlie", "Alice"),
            m(4, "Alice", "Bob"),
            m(5, "Charlie", "Alice"),
        ];

        let record = aggregate("Alice", &matches).unwrap();
        assert_eq!(record.total_games, 5);
        assert_eq!(record.wins, 3);
        assert_eq!(record.losses, 2);
        assert_eq!(record.win_rate, 60.0);
        assert_eq!(record.nemesis.unwrap().opponent, "Charlie");
        assert_eq!(record.favorite_victim.unwrap().opponent, "Bob");
    }

    #[test]
    fn undefeated_player_has_no_nemesis() {
        let matches = vec![m(1, "Alice", "Bob"), m(2, "Alice", "Charlie")];
        let record = aggregate("Alice", &matches).unwrap();
        assert_eq!(record.nemesis, None);
        assert_eq!(record.favorite_victim.unwrap().opponent, "Bob");
    }

    #[test]
    fn winless_player_has_no_favorite_victim() {
        let matches = vec![m(1, "Alice", "Bob")];
        let record = aggregate("Bob", &matches).unwrap();
        assert_eq!(record.favorite_victim, None);
        assert_eq!(record.nemesis.unwrap().opponent, "Alice");
        assert_eq!(record.win_rate, 0.0);
    }

    #[test]
    fn tallies_keep_first_encounter_order_and_break_ties_by_it() {
        // One win each over Bob then Charlie: Bob was met first.
        let matches = vec![m(1, "Alice", "Bob"), m(2, "Alice", "Charlie")];
        let record = aggregate("Alice", &matches).unwrap();

        let order: Vec<&str> = record
            .opponents
            .iter()
            .map(|t| t.opponent.as_str())
            .collect();
        assert_eq!(order, vec!["Bob", "Charlie"]);
        assert_eq!(record.favorite_victim.unwrap().opponent, "Bob");
    }

    #[test]
    fn unknown_player_is_an_error() {
        let matches = vec![m(1, "Alice", "Bob")];
        assert_eq!(
            aggregate("Zeca", &matches).unwrap_err(),
            RankingError::UnknownPlayer("Zeca".to_string())
        );
    }
}
