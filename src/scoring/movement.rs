use std::collections::HashMap;

use super::types::{DailySnapshot, Movement};

/// Classifies every player of `curr` against the previous closing
/// snapshot. A player absent from `prev` is `New`, never `Up` or `Down`;
/// on the first active date everyone is `New`. Pure comparison, neither
/// snapshot is touched.
pub fn classify(prev: Option<&DailySnapshot>, curr: &DailySnapshot) -> HashMap<String, Movement> {
    curr.standings
        .iter()
        .enumerate()
        .map(|(idx, standing)| {
            let rank = idx + 1;
            let movement = match prev.and_then(|s| s.rank_of(&standing.player)) {
                None => Movement::New,
                Some(previous_rank) if rank < previous_rank => {
                    Movement::Up((previous_rank - rank) as u32)
                }
                Some(previous_rank) if rank > previous_rank => {
                    Movement::Down((rank - previous_rank) as u32)
                }
                Some(_) => Movement::Unchanged,
            };
            (standing.player.clone(), movement)
        })
        .collect()
}
