use std::cmp::Ordering;

use crate::{address::Address, record::ScoreRecord};

/// The maximum number of leaderboard entries kept per period.
pub const MAX_LEADERBOARD_LEN: usize = 10;

/// A leaderboard entry is the owner's [`ScoreRecord`] with `rank` set to its
/// 1-based position.
pub type LeaderboardEntry = ScoreRecord;

/// Ranking order: score descending, then fewer games, then more referral points.
///
/// [`Ordering::Less`] means `a` ranks above `b`.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.game_count.cmp(&b.game_count))
        .then_with(|| b.referral_points.cmp(&a.referral_points))
}

/// Returns whether `a` strictly ranks above `b`.
pub fn outranks(a: &LeaderboardEntry, b: &LeaderboardEntry) -> bool {
    compare_entries(a, b) == Ordering::Less
}

/// Bounded sorted array of the best entries of a period.
///
/// Every operation is a linear scan over at most [`MAX_LEADERBOARD_LEN`]
/// entries. Fully equal entries keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Entries from best to worst.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Number of listed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no entry is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the leaderboard is at capacity.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_LEADERBOARD_LEN
    }

    /// Rank of the owner, if listed.
    pub fn rank_of(&self, owner: &Address) -> Option<u8> {
        self.position_of(owner).map(rank_at)
    }

    /// The listed owners in rank order.
    pub fn owners(&self) -> impl Iterator<Item = &Address> + '_ {
        self.entries.iter().map(|e| &e.owner)
    }

    fn position_of(&self, owner: &Address) -> Option<usize> {
        self.entries.iter().position(|e| e.owner == *owner)
    }

    /// Insert or re-evaluate the owner's entry. Returns the new rank, or
    /// `None` when the entry does not make the cut.
    pub fn upsert(&mut self, mut candidate: LeaderboardEntry) -> Option<u8> {
        // The owner is re-evaluated at its new value, which may be worse.
        if let Some(pos) = self.position_of(&candidate.owner) {
            self.entries.remove(pos);
        }

        let below_cut = self.is_full()
            && self
                .entries
                .last()
                .is_some_and(|last| !outranks(&candidate, last));
        if below_cut {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| outranks(&candidate, e))
            .unwrap_or(self.entries.len());
        candidate.rank = rank_at(pos);
        self.entries.insert(pos, candidate);
        self.entries.truncate(MAX_LEADERBOARD_LEN);
        self.refresh_ranks();
        Some(rank_at(pos))
    }

    fn refresh_ranks(&mut self) {
        for (pos, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = rank_at(pos);
        }
    }

    /// Returns whether the entries satisfy the ranking order, are distinct
    /// by owner and fit the capacity.
    pub fn is_well_formed(&self) -> bool {
        let ordered = self.entries.windows(2).all(|w| !outranks(&w[1], &w[0]));
        let ranked = self
            .entries
            .iter()
            .enumerate()
            .all(|(pos, e)| e.rank == rank_at(pos));
        let distinct = self
            .entries
            .iter()
            .enumerate()
            .all(|(pos, e)| self.position_of(&e.owner) == Some(pos));
        ordered && ranked && distinct && self.len() <= MAX_LEADERBOARD_LEN
    }
}

fn rank_at(pos: usize) -> u8 {
    debug_assert!(pos < MAX_LEADERBOARD_LEN);
    pos as u8 + 1
}
