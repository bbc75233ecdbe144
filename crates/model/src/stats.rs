use crate::record::{AllTimeStats, ScoreRecord};

/// Positive increments between two cumulative records of the same period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    /// Score increment.
    pub score: u64,
    /// Game count increment.
    pub game_count: u64,
    /// Referral points increment.
    pub referral_points: u64,
}

impl ScoreDelta {
    /// Deltas of `new` over `prev`, floored at zero.
    pub fn between(new: &ScoreRecord, prev: &ScoreRecord) -> Self {
        Self {
            score: new.score.saturating_sub(prev.score),
            game_count: new.game_count.saturating_sub(prev.game_count),
            referral_points: new.referral_points.saturating_sub(prev.referral_points),
        }
    }

    /// Returns whether nothing increased.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl AllTimeStats {
    /// Fold a submission into the lifetime counters.
    ///
    /// Maxima take the new absolute values; totals only grow by the positive
    /// delta against the previous record, so resubmitting never double counts.
    pub fn update_delta(&mut self, new: &ScoreRecord, prev: &ScoreRecord) -> ScoreDelta {
        let delta = ScoreDelta::between(new, prev);
        self.owner = new.owner;
        self.highest_game_score = self.highest_game_score.max(new.game_score);
        self.highest_period_score = self.highest_period_score.max(new.score);
        self.total_games_played = self.total_games_played.saturating_add(delta.game_count);
        self.total_referral_points = self
            .total_referral_points
            .saturating_add(delta.referral_points);
        self.total_lifetime_score = self.total_lifetime_score.saturating_add(delta.score);
        delta
    }
}
