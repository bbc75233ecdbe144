use crate::address::Address;

/// Observations emitted by competition operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "strum", derive(strum::IntoStaticStr))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CompetitionEvent {
    /// A score was accepted.
    ScoreSubmitted {
        owner: Address,
        period_id: u64,
        score: u64,
        game_score: u64,
        game_count: u64,
        referral_points: u64,
        /// Resulting rank, `0` if unranked.
        rank: u8,
    },
    /// A reward was placed in escrow.
    RewardEscrowed {
        owner: Address,
        period_id: u64,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        amount: u128,
    },
    /// A period's pool was distributed.
    RewardsDistributed {
        period_id: u64,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        total_pool: u128,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        paid: u128,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        rolled_over: u128,
        winners: u8,
    },
    /// Escrowed rewards were paid out.
    RewardsClaimed {
        owner: Address,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        amount: u128,
        count: u32,
    },
    /// Custody received funds.
    PoolFunded {
        from: Address,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        amount: u128,
    },
    /// The authority withdrew funds from custody.
    EmergencyWithdrawal {
        to: Address,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        amount: u128,
    },
    /// Minimum qualification score changed.
    MinQualificationScoreUpdated { old: u64, new: u64 },
    /// Trusted signer rotated.
    BackendSignerUpdated { old: Address, new: Address },
    /// Base pool changed.
    BasePoolUpdated {
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        old: u128,
        #[cfg_attr(feature = "serde", serde(with = "crate::amount::Decimal"))]
        new: u128,
    },
    /// Maximum score changed.
    MaxScoreUpdated { old: u64, new: u64 },
}
