#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]
//! # Arena Model
//!
//! Core state transitions of a periodic score competition, free of any
//! storage, clock or transport concerns.
//!
//! - [`Leaderboard`]: bounded, strictly ordered best scores of a period.
//! - [`AllTimeStats::update_delta`]: lifetime counters fed by per-submission deltas.
//! - [`DistributionPlan`]: basis-point apportioning of a period pool with rollover.
//! - [`RewardEscrow`]: per-owner escrow entries and claim planning.

/// Identities.
pub mod address;

#[cfg(feature = "serde")]
mod amount;

/// Error type.
pub mod error;

/// Emitted observations.
#[allow(missing_docs)]
pub mod event;

/// Period arithmetic.
pub mod period;

/// Signed score payloads.
pub mod payload;

/// Persisted records.
pub mod record;

/// Top-N ranking.
pub mod leaderboard;

/// Lifetime stats aggregation.
pub mod stats;

/// Reward pool distribution.
pub mod distribution;

/// Escrow and claims.
pub mod escrow;

pub use address::{Address, ParseAddressError};
pub use distribution::{DistributionPlan, Payout, REWARD_BASIS_POINTS};
pub use error::{Error, SignatureError};
pub use escrow::{ClaimPlan, RewardEscrow};
pub use event::CompetitionEvent;
pub use leaderboard::{Leaderboard, LeaderboardEntry, MAX_LEADERBOARD_LEN};
pub use payload::ScorePayload;
pub use period::{PeriodClock, PeriodKind};
pub use record::{AllTimeStats, RewardPool, ScoreRecord, UnclaimedRewardEntry};
pub use stats::ScoreDelta;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
