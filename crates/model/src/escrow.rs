use crate::{address::Address, record::UnclaimedRewardEntry};

/// Rewards held for one owner.
///
/// Entries are append-only and never removed; claiming only flips their flag.
/// `total_unclaimed` always equals the sum of unclaimed entry amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardEscrow {
    entries: Vec<UnclaimedRewardEntry>,
    #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
    total_unclaimed: u128,
}

/// Entries selected by a claim and the amount they add up to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimPlan {
    /// Indices to mark as claimed.
    pub indices: Vec<usize>,
    /// Amount to pay out.
    pub amount: u128,
}

impl RewardEscrow {
    /// Rebuild from entries, recomputing the running total.
    pub fn from_entries(entries: Vec<UnclaimedRewardEntry>) -> crate::Result<Self> {
        let total_unclaimed = sum_unclaimed(&entries)?;
        Ok(Self {
            entries,
            total_unclaimed,
        })
    }

    /// All entries, claimed or not, in escrow order.
    pub fn entries(&self) -> &[UnclaimedRewardEntry] {
        &self.entries
    }

    /// Running total of unclaimed amounts.
    pub fn total_unclaimed(&self) -> u128 {
        self.total_unclaimed
    }

    /// Append a reward.
    pub fn add(&mut self, owner: Address, period_id: u64, amount: u128) -> crate::Result<()> {
        let total = self
            .total_unclaimed
            .checked_add(amount)
            .ok_or(crate::Error::Computation("unclaimed total overflow"))?;
        self.entries.push(UnclaimedRewardEntry {
            owner,
            period_id,
            amount,
            claimed: false,
        });
        self.total_unclaimed = total;
        Ok(())
    }

    /// Select entries for a claim without modifying anything.
    ///
    /// Empty `indices` selects every unclaimed entry. Listing the same index
    /// twice fails as already claimed.
    pub fn plan_claim(&self, indices: &[usize]) -> crate::Result<ClaimPlan> {
        if self.entries.is_empty() {
            return Err(crate::Error::NoUnclaimedRewards);
        }

        let selected: Vec<usize> = if indices.is_empty() {
            self.entries
                .iter()
                .enumerate()
                .filter(|(_, e)| !e.claimed)
                .map(|(idx, _)| idx)
                .collect()
        } else {
            let mut taken = vec![false; self.entries.len()];
            for &idx in indices {
                let entry = self
                    .entries
                    .get(idx)
                    .ok_or(crate::Error::InvalidRewardIndex(idx))?;
                if entry.claimed || taken[idx] {
                    return Err(crate::Error::RewardAlreadyClaimed(idx));
                }
                taken[idx] = true;
            }
            indices.to_vec()
        };

        let amount = selected.iter().try_fold(0u128, |acc, idx| {
            acc.checked_add(self.entries[*idx].amount)
                .ok_or(crate::Error::Computation("claim amount overflow"))
        })?;
        if amount == 0 {
            return Err(crate::Error::InvalidClaimAmount);
        }

        Ok(ClaimPlan {
            indices: selected,
            amount,
        })
    }

    /// Apply a plan produced by [`plan_claim`](Self::plan_claim) on this escrow.
    pub fn apply_claim(&mut self, plan: &ClaimPlan) -> crate::Result<()> {
        let total = self
            .total_unclaimed
            .checked_sub(plan.amount)
            .ok_or(crate::Error::Computation("claim exceeds unclaimed total"))?;
        for idx in &plan.indices {
            let entry = self
                .entries
                .get_mut(*idx)
                .ok_or(crate::Error::InvalidRewardIndex(*idx))?;
            entry.claimed = true;
        }
        self.total_unclaimed = total;
        Ok(())
    }

    /// Returns whether the running total matches the entries.
    pub fn is_consistent(&self) -> bool {
        sum_unclaimed(&self.entries).is_ok_and(|sum| sum == self.total_unclaimed)
    }
}

fn sum_unclaimed(entries: &[UnclaimedRewardEntry]) -> crate::Result<u128> {
    entries
        .iter()
        .filter(|e| !e.claimed)
        .try_fold(0u128, |acc, e| {
            acc.checked_add(e.amount)
                .ok_or(crate::Error::Computation("unclaimed total overflow"))
        })
}
