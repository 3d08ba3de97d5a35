use super::engine::previous_score;
use super::types::{DailyHighlights, DailySnapshot, DayOutcome, Score, Upset};
use crate::config::ScoringSettings;
use crate::domain::Match;

/// Derives the day's highlights: the player with the greatest net gain and
/// the biggest upset, both judged against the previous closing snapshot.
/// Returns `None` only when the outcome covers no participants at all.
pub fn extract(
    outcome: &DayOutcome,
    prev: Option<&DailySnapshot>,
    day_matches: &[Match],
    settings: &ScoringSettings,
) -> Option<DailyHighlights> {
    let (player_of_day, points_gained) = player_of_day(outcome)?;
    Some(DailyHighlights {
        player_of_day,
        points_gained,
        biggest_upset: biggest_upset(prev, day_matches, settings),
    })
}

/// Greatest net delta among the day's participants; ties go to the
/// lexicographically smallest name so the answer never depends on hash
/// iteration order.
fn player_of_day(outcome: &DayOutcome) -> Option<(String, Score)> {
    let mut best: Option<(&str, Score)> = None;
    for (player, &delta) in &outcome.net_deltas {
        let better = match best {
            None => true,
            Some((best_player, best_delta)) => {
                delta > best_delta || (delta == best_delta && player.as_str() < best_player)
            }
        };
        if better {
            best = Some((player, delta));
        }
    }
    best.map(|(player, delta)| (player.to_string(), delta))
}

/// The qualifying match with the widest previous-close score gap; ties go
/// to the earliest match id. `None` when no match qualifies.
fn biggest_upset(
    prev: Option<&DailySnapshot>,
    day_matches: &[Match],
    settings: &ScoringSettings,
) -> Option<Upset> {
    let mut best: Option<Upset> = None;

    for m in day_matches {
        let winner = m.winner();
        let loser = m.loser();
        let gap = previous_score(prev, loser, settings) - previous_score(prev, winner, settings);
        if gap <= 0 {
            continue;
        }
        // Strict > keeps the earliest qualifying match on ties, since the
        // day's matches arrive in id order.
        if best.as_ref().is_none_or(|b| gap > b.score_gap) {
            best = Some(Upset {
                match_id: m.id,
                winner: winner.to_string(),
                loser: loser.to_string(),
                score_gap: gap,
            });
        }
    }

    best
}
