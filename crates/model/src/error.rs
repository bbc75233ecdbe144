use crate::{address::Address, period::PeriodKind};

/// Reason a score signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The signature bytes could not be used for recovery.
    #[error("malformed signature: {0}")]
    Malformed(&'static str),
    /// Recovery succeeded but produced an identity other than the trusted signer.
    #[error("unexpected signer: expected {expected}, recovered {recovered}")]
    UnexpectedSigner {
        /// The configured trusted signer.
        expected: Address,
        /// The identity recovered from the signature.
        recovered: Address,
    },
    /// The payload was signed for a player other than the caller.
    #[error("payload submitter {submitter} is not the caller {caller}")]
    SubmitterMismatch {
        /// The submitting identity.
        caller: Address,
        /// The player named in the payload.
        submitter: Address,
    },
}

/// Error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Submissions are not accepted right now.
    #[error("not in a submission period")]
    NotSubmissionPeriod,
    /// The payload targets a period other than the current one.
    #[error("not the current period: expected {expected}, got {got}")]
    NotCurrentPeriod {
        /// Current period id.
        expected: u64,
        /// Period id in the payload.
        got: u64,
    },
    /// Score does not reach the qualification threshold.
    #[error("score below qualification")]
    ScoreBelowQualification,
    /// Game count is zero.
    #[error("game count must be positive")]
    GameCountMustBePositive,
    /// Score or game score exceeds the configured maximum.
    #[error("score too high")]
    ScoreTooHigh,
    /// The signature did not authenticate the payload.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
    /// Cumulative score went down.
    #[error("score cannot decrease")]
    ScoreCannotDecrease,
    /// Cumulative game count went down.
    #[error("game count cannot decrease")]
    GameCountCannotDecrease,
    /// Period id is zero or in the future.
    #[error("invalid period: {0}")]
    InvalidPeriod(u64),
    /// The daily period has not elapsed yet.
    #[error("day not finished")]
    DayNotFinished,
    /// The weekly period has not elapsed yet.
    #[error("week not finished")]
    WeekNotFinished,
    /// Rewards of the period were already distributed.
    #[error("already distributed")]
    AlreadyDistributed,
    /// The leaderboard of the period is empty.
    #[error("no winners this period")]
    NoWinnersThisPeriod,
    /// Custody does not hold enough value.
    #[error("insufficient contract balance: required {required}, available {available}")]
    InsufficientContractBalance {
        /// Amount needed.
        required: u128,
        /// Custody balance.
        available: u128,
    },
    /// Reward index out of bounds.
    #[error("invalid reward index: {0}")]
    InvalidRewardIndex(usize),
    /// Reward entry already claimed.
    #[error("reward already claimed: {0}")]
    RewardAlreadyClaimed(usize),
    /// The caller never received any reward.
    #[error("no unclaimed rewards")]
    NoUnclaimedRewards,
    /// The claim would transfer nothing.
    #[error("invalid claim amount")]
    InvalidClaimAmount,
    /// The value ledger refused a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(String),
    /// Caller is not the administrative authority.
    #[error("unauthorized: {0}")]
    Unauthorized(Address),
    /// Signer address is not usable.
    #[error("invalid signer")]
    InvalidSigner,
    /// Amount argument is not usable.
    #[error("invalid amount")]
    InvalidAmount,
    /// A guarded operation was entered while another one is running.
    #[error("reentrant call")]
    Reentrancy,
    /// Arithmetic failure.
    #[error("computation: {0}")]
    Computation(&'static str),
}

impl Error {
    /// The "period not finished" error for the given period kind.
    pub fn period_not_finished(kind: PeriodKind) -> Self {
        match kind {
            PeriodKind::Daily => Self::DayNotFinished,
            PeriodKind::Weekly => Self::WeekNotFinished,
        }
    }

    /// Create a transfer failure from any displayable cause.
    pub fn transfer_failed(msg: impl ToString) -> Self {
        Self::TransferFailed(msg.to_string())
    }
}
