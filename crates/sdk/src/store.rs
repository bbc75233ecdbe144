use std::collections::BTreeMap;

use arena_model::{Address, AllTimeStats, Leaderboard, RewardEscrow, RewardPool, ScoreRecord};
use serde::{Deserialize, Serialize};

/// State store of a competition.
///
/// Reads return owned values; absent keys read as `None` (or an empty
/// leaderboard). Writes replace the stored value.
pub trait CompetitionStore {
    /// Player record of a period.
    fn score_record(&self, period_id: u64, owner: &Address) -> Option<ScoreRecord>;

    /// Store a player record.
    fn set_score_record(&mut self, period_id: u64, record: ScoreRecord);

    /// Leaderboard of a period.
    fn leaderboard(&self, period_id: u64) -> Leaderboard;

    /// Store a leaderboard.
    fn set_leaderboard(&mut self, period_id: u64, leaderboard: Leaderboard);

    /// Lifetime stats of a player.
    fn all_time_stats(&self, owner: &Address) -> Option<AllTimeStats>;

    /// Store lifetime stats.
    fn set_all_time_stats(&mut self, stats: AllTimeStats);

    /// Persisted reward pool of a period.
    fn reward_pool(&self, period_id: u64) -> Option<RewardPool>;

    /// Store a reward pool.
    fn set_reward_pool(&mut self, pool: RewardPool);

    /// Escrowed rewards of a player.
    fn escrow(&self, owner: &Address) -> Option<RewardEscrow>;

    /// Store escrowed rewards.
    fn set_escrow(&mut self, owner: &Address, escrow: RewardEscrow);
}

/// In-memory [`CompetitionStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    pub(crate) records: BTreeMap<u64, BTreeMap<Address, ScoreRecord>>,
    pub(crate) leaderboards: BTreeMap<u64, Leaderboard>,
    pub(crate) stats: BTreeMap<Address, AllTimeStats>,
    pub(crate) pools: BTreeMap<u64, RewardPool>,
    pub(crate) escrows: BTreeMap<Address, RewardEscrow>,
}

impl MemoryStore {
    /// Owners with escrowed rewards.
    pub fn escrow_owners(&self) -> impl Iterator<Item = &Address> + '_ {
        self.escrows.keys()
    }

    /// Periods that have at least one submission.
    pub fn periods(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.keys().copied()
    }
}

impl CompetitionStore for MemoryStore {
    fn score_record(&self, period_id: u64, owner: &Address) -> Option<ScoreRecord> {
        self.records.get(&period_id)?.get(owner).copied()
    }

    fn set_score_record(&mut self, period_id: u64, record: ScoreRecord) {
        self.records
            .entry(period_id)
            .or_default()
            .insert(record.owner, record);
    }

    fn leaderboard(&self, period_id: u64) -> Leaderboard {
        self.leaderboards
            .get(&period_id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_leaderboard(&mut self, period_id: u64, leaderboard: Leaderboard) {
        self.leaderboards.insert(period_id, leaderboard);
    }

    fn all_time_stats(&self, owner: &Address) -> Option<AllTimeStats> {
        self.stats.get(owner).copied()
    }

    fn set_all_time_stats(&mut self, stats: AllTimeStats) {
        self.stats.insert(stats.owner, stats);
    }

    fn reward_pool(&self, period_id: u64) -> Option<RewardPool> {
        self.pools.get(&period_id).copied()
    }

    fn set_reward_pool(&mut self, pool: RewardPool) {
        self.pools.insert(pool.period_id, pool);
    }

    fn escrow(&self, owner: &Address) -> Option<RewardEscrow> {
        self.escrows.get(owner).cloned()
    }

    fn set_escrow(&mut self, owner: &Address, escrow: RewardEscrow) {
        self.escrows.insert(*owner, escrow);
    }
}
