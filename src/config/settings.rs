/// Scoring rules for the daily ranking.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Score a player holds before their first match.
    pub initial_score: i32,
    /// Points awarded to the winner of a match.
    pub win_points: i32,
    /// Points taken from the loser of a match (floored at zero).
    pub loss_points: i32,
    /// Extra points for beating an opponent whose previous closing score
    /// was strictly higher.
    pub upset_bonus: i32,
    /// Extra points for beating the player ranked 1st, 2nd or 3rd at the
    /// previous close.
    pub top_three_bonuses: [i32; 3],
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            initial_score: 1000,
            win_points: 10,
            loss_points: 10,
            upset_bonus: 5,
            top_three_bonuses: [25, 20, 15],
        }
    }
}

// Prefer passing settings explicitly (dependency injection) rather than
// globals; the engine and the derived views all take `&ScoringSettings`.
