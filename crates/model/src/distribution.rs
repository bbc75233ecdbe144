use crate::{
    address::Address,
    leaderboard::{LeaderboardEntry, MAX_LEADERBOARD_LEN},
    record::RewardPool,
};

/// Basis points in one whole.
pub const BASIS_POINTS_DIVISOR: u128 = 10_000;

/// Share of the pool for each rank, in basis points.
pub const REWARD_BASIS_POINTS: [u16; MAX_LEADERBOARD_LEN] =
    [3000, 2000, 1500, 1000, 800, 340, 340, 340, 340, 340];

/// Share of `total_pool` owed to the given 0-based rank slot.
pub fn rank_share(total_pool: u128, slot: usize) -> crate::Result<u128> {
    let bps = REWARD_BASIS_POINTS
        .get(slot)
        .ok_or(crate::Error::Computation("rank slot out of range"))?;
    total_pool
        .checked_mul(u128::from(*bps))
        .map(|v| v / BASIS_POINTS_DIVISOR)
        .ok_or(crate::Error::Computation("rank share overflow"))
}

impl RewardPool {
    /// Resolve the pool of `period_id` from the configured base pool and the
    /// previous period's pool.
    ///
    /// Rollover only flows in once the previous pool has been distributed.
    pub fn resolve(
        period_id: u64,
        base_pool_amount: u128,
        previous: Option<&RewardPool>,
    ) -> crate::Result<Self> {
        let rollover_amount_in = match previous {
            Some(prev) if period_id > 1 && prev.distributed => prev.rollover_amount_out,
            _ => 0,
        };
        let total_pool_amount = base_pool_amount
            .checked_add(rollover_amount_in)
            .ok_or(crate::Error::Computation("total pool overflow"))?;
        Ok(Self {
            period_id,
            base_pool_amount,
            rollover_amount_in,
            total_pool_amount,
            rollover_amount_out: 0,
            distributed: false,
        })
    }
}

/// A reward owed to a ranked winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payout {
    /// Winner.
    pub owner: Address,
    /// Rank the share was computed for.
    pub rank: u8,
    /// Amount to escrow.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub amount: u128,
}

/// Outcome of distributing a period's pool.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionPlan {
    /// Period.
    pub period_id: u64,
    /// Pool being distributed.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub total_pool: u128,
    /// Qualified winners and their shares.
    pub payouts: Vec<Payout>,
    /// Ranked owners that did not reach the qualification threshold.
    pub disqualified: Vec<Address>,
    /// Amount carried to the next period.
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    pub rolled_over: u128,
}

impl DistributionPlan {
    /// Build the plan for a leaderboard.
    ///
    /// Each of the [`MAX_LEADERBOARD_LEN`] rank slots is worth its basis-point
    /// share whether or not it is filled. Shares of unfilled slots and of
    /// entries below `min_qualification_score` roll over, as does the
    /// integer-division remainder, so `paid + rolled_over == total_pool`.
    pub fn new(
        period_id: u64,
        total_pool: u128,
        entries: &[LeaderboardEntry],
        min_qualification_score: u64,
    ) -> crate::Result<Self> {
        let mut payouts = Vec::with_capacity(entries.len());
        let mut disqualified = Vec::new();
        let mut paid: u128 = 0;

        for (slot, entry) in entries.iter().take(MAX_LEADERBOARD_LEN).enumerate() {
            let share = rank_share(total_pool, slot)?;
            if entry.score >= min_qualification_score {
                paid = paid
                    .checked_add(share)
                    .ok_or(crate::Error::Computation("paid amount overflow"))?;
                payouts.push(Payout {
                    owner: entry.owner,
                    rank: slot as u8 + 1,
                    amount: share,
                });
            } else {
                disqualified.push(entry.owner);
            }
        }

        let rolled_over = total_pool
            .checked_sub(paid)
            .ok_or(crate::Error::Computation("paid more than the pool"))?;

        Ok(Self {
            period_id,
            total_pool,
            payouts,
            disqualified,
            rolled_over,
        })
    }

    /// Total amount escrowed to winners.
    pub fn paid(&self) -> u128 {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}
