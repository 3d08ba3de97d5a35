use std::collections::HashMap;

use chrono::NaiveDate;
use log::info;

use super::types::{DailySnapshot, DayOutcome, Score, Standing};
use crate::config::ScoringSettings;
use crate::domain::Match;
use crate::ingest;

/// Replays the whole match history in canonical order and produces one
/// closing snapshot per active date.
///
/// Bonus eligibility is decided against the previous active date's closing
/// snapshot only, never against the in-progress scores of the same day, so
/// each day's outcome is a pure function of (previous snapshot, that day's
/// matches). Replaying the same history always yields identical output.
pub fn replay(matches: &[Match], settings: &ScoringSettings) -> Vec<DayOutcome> {
    let mut outcomes: Vec<DayOutcome> = Vec::new();
    let mut roster = Roster::default();

    for (date, day_matches) in ingest::by_day(matches) {
        let prev = outcomes.last().map(|o| &o.snapshot);
        let outcome = fold_day(date, day_matches, prev, &mut roster, settings);
        outcomes.push(outcome);
    }

    info!(
        "Replayed {} matches into {} daily snapshots",
        matches.len(),
        outcomes.len()
    );
    outcomes
}

/// A player's score at the previous close, with the implicit default for
/// players who had not appeared yet. There is no "player not found" case.
pub(crate) fn previous_score(
    prev: Option<&DailySnapshot>,
    player: &str,
    settings: &ScoringSettings,
) -> Score {
    prev.and_then(|s| s.score_of(player))
        .unwrap_or(settings.initial_score)
}

/// First-appearance bookkeeping; the stable tie-break for equal scores.
#[derive(Default)]
struct Roster {
    order: HashMap<String, usize>,
}

impl Roster {
    fn admit(&mut self, player: &str) {
        if !self.order.contains_key(player) {
            self.order.insert(player.to_string(), self.order.len());
        }
    }

    fn seniority(&self, player: &str) -> usize {
        self.order[player]
    }
}

fn fold_day(
    date: NaiveDate,
    day_matches: &[Match],
    prev: Option<&DailySnapshot>,
    roster: &mut Roster,
    settings: &ScoringSettings,
) -> DayOutcome {
    // Working scores start as a copy of the previous close; players who
    // show up for the first time enter lazily at the initial score.
    let mut working: HashMap<String, Score> = prev
        .map(|s| {
            s.standings
                .iter()
                .map(|st| (st.player.clone(), st.score))
                .collect()
        })
        .unwrap_or_default();
    let mut deltas: HashMap<String, Score> = HashMap::new();

    for m in day_matches {
        roster.admit(&m.player_a);
        roster.admit(&m.player_b);
        apply_match(m, prev, &mut working, &mut deltas, settings);
    }

    DayOutcome {
        snapshot: freeze(date, &working, roster),
        net_deltas: deltas,
    }
}

fn apply_match(
    m: &Match,
    prev: Option<&DailySnapshot>,
    working: &mut HashMap<String, Score>,
    deltas: &mut HashMap<String, Score>,
    settings: &ScoringSettings,
) {
    let winner = m.winner();
    let loser = m.loser();

    let gain = settings.win_points + bonus_points(winner, loser, prev, settings);
    *working
        .entry(winner.to_string())
        .or_insert(settings.initial_score) += gain;
    *deltas.entry(winner.to_string()).or_insert(0) += gain;

    // The loser's running score never drops below zero, not even
    // transiently within the day.
    let slot = working
        .entry(loser.to_string())
        .or_insert(settings.initial_score);
    let before = *slot;
    *slot = (before - settings.loss_points).max(0);
    *deltas.entry(loser.to_string()).or_insert(0) += *slot - before;
}

fn bonus_points(
    winner: &str,
    loser: &str,
    prev: Option<&DailySnapshot>,
    settings: &ScoringSettings,
) -> Score {
    let mut bonus = 0;

    if previous_score(prev, winner, settings) < previous_score(prev, loser, settings) {
        bonus += settings.upset_bonus;
    }

    // A loser who had not appeared by the previous close holds no rank and
    // confers no podium bonus.
    if let Some(rank) = prev.and_then(|s| s.rank_of(loser)) {
        if rank <= settings.top_three_bonuses.len() {
            bonus += settings.top_three_bonuses[rank - 1];
        }
    }

    bonus
}

fn freeze(date: NaiveDate, working: &HashMap<String, Score>, roster: &Roster) -> DailySnapshot {
    let mut standings: Vec<Standing> = working
        .iter()
        .map(|(player, &score)| Standing {
            player: player.clone(),
            score,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            roster
                .seniority(&a.player)
                .cmp(&roster.seniority(&b.player))
        })
    });

    DailySnapshot { date, standings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn m(id: i64, day: u32, winner: &str, loser: &str) -> Match {
        Match {
            id,
            date: date(day),
            player_a: winner.to_string(),
            player_b: loser.to_string(),
            score_a: 2,
            score_b: 0,
        }
    }

    fn settings() -> ScoringSettings {
        ScoringSettings::default()
    }

    /// Day one: nobody has a previous close, so everyone defaults to 1000
    /// and no bonus can trigger.
    #[test]
    fn first_day_awards_base_points_only() {
        let matches = vec![m(1, 1, "Ana", "Bruno")];
        let days = replay(&matches, &settings());

        assert_eq!(days.len(), 1);
        let snap = &days[0].snapshot;
        assert_eq!(snap.score_of("Ana"), Some(1010));
        assert_eq!(snap.score_of("Bruno"), Some(990));
        assert_eq!(snap.rank_of("Ana"), Some(1));
    }

    #[test]
    fn equal_scores_keep_first_appearance_order() {
        // Two independent wins: Ana and Carla both close day one at 1010.
        let matches = vec![m(1, 1, "Ana", "Bruno"), m(2, 1, "Carla", "Davi")];
        let days = replay(&matches, &settings());

        let order: Vec<&str> = days[0]
            .snapshot
            .standings
            .iter()
            .map(|s| s.player.as_str())
            .collect();
        assert_eq!(order, vec!["Ana", "Carla", "Bruno", "Davi"]);
    }

    #[test]
    fn beating_previous_number_one_without_deficit_earns_exactly_35() {
        // Day 1 closes: Ana 1010 (#1), Carla 1010 (#2), Bruno 990, Davi 990.
        // Day 2: Carla (also 1010, no deficit) beats Ana -> +10 +25, no upset.
        let matches = vec![
            m(1, 1, "Ana", "Bruno"),
            m(2, 1, "Carla", "Davi"),
            m(3, 2, "Carla", "Ana"),
        ];
        let days = replay(&matches, &settings());

        assert_eq!(days[1].snapshot.score_of("Carla"), Some(1045));
        assert_eq!(days[1].net_deltas["Carla"], 35);
        assert_eq!(days[1].snapshot.score_of("Ana"), Some(1000));
    }

    #[test]
    fn upset_win_over_previous_number_two_earns_base_upset_and_20() {
        // Day 1 closes: Ana 1010 (#1), Carla 1010 (#2), Bruno 990, Davi 990.
        // Day 2: Davi (990) beats Carla (1010, #2) -> +10 +5 +20 = +35.
        let matches = vec![
            m(1, 1, "Ana", "Bruno"),
            m(2, 1, "Carla", "Davi"),
            m(3, 2, "Davi", "Carla"),
        ];
        let days = replay(&matches, &settings());

        assert_eq!(days[1].snapshot.score_of("Davi"), Some(1025));
        assert_eq!(days[1].net_deltas["Davi"], 35);
    }

    #[test]
    fn bonuses_come_from_the_previous_close_not_the_running_day() {
        // Day 1 closes with Ana/Carla/Eva on the podium at 1010 and the
        // three losers at 990. Day 2, in id order: Davi first beats #1 Ana
        // (catapulting Davi to the top of the running scores), then Carla
        // beats Davi. Carla's bonus must still be judged by day 1's close,
        // where Davi sat 5th at 990.
        let matches = vec![
            m(1, 1, "Ana", "Bruno"),
            m(2, 1, "Carla", "Davi"),
            m(3, 1, "Eva", "Fabio"),
            m(4, 2, "Davi", "Ana"),
            m(5, 2, "Carla", "Davi"),
        ];
        let days = replay(&matches, &settings());

        // Davi: 990 +10 +5 (upset over 1010) +25 (beat #1) = 1030, then
        // loses 10 -> 1020.
        assert_eq!(days[1].snapshot.score_of("Davi"), Some(1020));
        // Carla beat a 990-scored, 5th-ranked Davi: base points only.
        assert_eq!(days[1].net_deltas["Carla"], 10);
    }

    #[test]
    fn players_appear_lazily_with_the_default_score() {
        let matches = vec![m(1, 1, "Ana", "Bruno"), m(2, 2, "Carla", "Ana")];
        let days = replay(&matches, &settings());

        // Carla is absent from day 1.
        assert_eq!(days[0].snapshot.score_of("Carla"), None);
        assert_eq!(days[0].snapshot.standings.len(), 2);

        // Day 2: Carla enters at 1000, beats Ana (1010, #1): +10 +5 +25.
        assert_eq!(days[1].snapshot.score_of("Carla"), Some(1040));
    }

    #[test]
    fn losses_floor_at_zero() {
        let low_start = ScoringSettings {
            initial_score: 4,
            ..ScoringSettings::default()
        };
        let matches = vec![m(1, 1, "Ana", "Bruno")];
        let days = replay(&matches, &low_start);

        assert_eq!(days[0].snapshot.score_of("Bruno"), Some(0));
        assert_eq!(days[0].net_deltas["Bruno"], -4);
        assert!(days[0].snapshot.standings.iter().all(|s| s.score >= 0));
    }

    #[test]
    fn a_gap_day_reads_the_last_active_close() {
        // Activity on the 1st and the 9th; the 9th's bonuses are judged
        // against the 1st's close.
        let matches = vec![m(1, 1, "Ana", "Bruno"), m(2, 9, "Bruno", "Ana")];
        let days = replay(&matches, &settings());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date(), date(1));
        assert_eq!(days[1].date(), date(9));
        // Bruno 990 beats #1 Ana 1010: +10 +5 +25.
        assert_eq!(days[1].snapshot.score_of("Bruno"), Some(1030));
    }

    #[test]
    fn multiple_matches_per_day_accumulate_sequentially() {
        let matches = vec![m(1, 1, "Ana", "Bruno"), m(2, 1, "Ana", "Bruno")];
        let days = replay(&matches, &settings());

        assert_eq!(days[0].snapshot.score_of("Ana"), Some(1020));
        assert_eq!(days[0].snapshot.score_of("Bruno"), Some(980));
        assert_eq!(days[0].net_deltas["Ana"], 20);
    }

    #[test]
    fn replay_is_deterministic() {
        let matches = vec![
            m(1, 1, "Ana", "Bruno"),
            m(2, 1, "Carla", "Davi"),
            m(3, 2, "Davi", "Ana"),
            m(4, 2, "Bruno", "Carla"),
            m(5, 4, "Ana", "Davi"),
        ];
        let cfg = settings();
        assert_eq!(replay(&matches, &cfg), replay(&matches, &cfg));
    }
}
