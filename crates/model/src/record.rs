use crate::{address::Address, payload::ScorePayload};

/// A player's current cumulative record for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRecord {
    /// Owner.
    pub owner: Address,
    /// Cumulative score.
    pub score: u64,
    /// Best single game score.
    pub game_score: u64,
    /// Cumulative game count.
    pub game_count: u64,
    /// Cumulative referral points.
    pub referral_points: u64,
    /// Leaderboard rank, `0` when not listed.
    pub rank: u8,
}

impl ScoreRecord {
    /// Zero record for the given owner.
    pub fn empty(owner: Address) -> Self {
        Self {
            owner,
            ..Default::default()
        }
    }

    /// Record carrying the absolute values of a payload. Rank is left unset.
    pub fn from_payload(payload: &ScorePayload) -> Self {
        Self {
            owner: payload.submitter,
            score: payload.score,
            game_score: payload.game_score,
            game_count: payload.game_count,
            referral_points: payload.referral_points,
            rank: 0,
        }
    }
}

/// Lifetime statistics of a player. Every field is non-decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllTimeStats {
    /// Owner.
    pub owner: Address,
    /// Highest single game score ever submitted.
    pub highest_game_score: u64,
    /// Highest cumulative score reached in any period.
    pub highest_period_score: u64,
    /// Games played across all periods.
    pub total_games_played: u64,
    /// Referral points across all periods.
    pub total_referral_points: u64,
    /// Score across all periods.
    pub total_lifetime_score: u64,
}

/// Reward pool of a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardPool {
    /// Period.
    pub period_id: u64,
    /// Configured base pool at resolution time.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub base_pool_amount: u128,
    /// Rollover carried in from the previous period.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub rollover_amount_in: u128,
    /// `base_pool_amount + rollover_amount_in`.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub total_pool_amount: u128,
    /// Unpaid amount carried out to the next period. Only set once distributed.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub rollover_amount_out: u128,
    /// Whether the pool has been distributed.
    pub distributed: bool,
}

/// A reward held in escrow for a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnclaimedRewardEntry {
    /// Owner.
    pub owner: Address,
    /// Period the reward was earned in.
    pub period_id: u64,
    /// Amount owed.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub amount: u128,
    /// Whether it has been paid out.
    pub claimed: bool,
}
