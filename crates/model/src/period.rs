use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Seconds in a daily period.
pub const DAY_SECONDS: i64 = 86_400;

/// Seconds in a weekly period.
pub const WEEK_SECONDS: i64 = 7 * DAY_SECONDS;

/// Length of a competition period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "strum", derive(strum::EnumString, strum::Display))]
#[cfg_attr(feature = "strum", strum(serialize_all = "snake_case"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum PeriodKind {
    /// One period per day.
    #[default]
    Daily,
    /// One period per week.
    Weekly,
}

impl PeriodKind {
    /// Length of the period in seconds.
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Daily => DAY_SECONDS,
            Self::Weekly => WEEK_SECONDS,
        }
    }
}

/// Period arithmetic anchored at a genesis timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodClock {
    /// Start of period 1.
    pub genesis: i64,
    /// Period length.
    pub kind: PeriodKind,
}

impl PeriodClock {
    /// Create a new period clock.
    pub fn new(genesis: i64, kind: PeriodKind) -> Self {
        Self { genesis, kind }
    }

    /// Period id at `now`. Returns `0` before genesis.
    pub fn period_at(&self, now: i64) -> u64 {
        if now < self.genesis {
            return 0;
        }
        let elapsed = i128::from(now) - i128::from(self.genesis);
        (elapsed / i128::from(self.kind.seconds())) as u64 + 1
    }

    /// Timestamp at which the given period starts.
    ///
    /// Returns `None` for period `0` or on overflow.
    pub fn period_start(&self, period_id: u64) -> Option<i64> {
        let index = i64::try_from(period_id.checked_sub(1)?).ok()?;
        index
            .checked_mul(self.kind.seconds())?
            .checked_add(self.genesis)
    }

    /// Timestamp at which the given period ends (exclusive).
    pub fn period_end(&self, period_id: u64) -> Option<i64> {
        self.period_start(period_id)?
            .checked_add(self.kind.seconds())
    }

    /// Seconds left in the period containing `now`. Returns `None` before genesis.
    pub fn time_until_period_end(&self, now: i64) -> Option<i64> {
        let current = self.period_at(now);
        if current == 0 {
            return None;
        }
        Some(self.period_end(current)? - now)
    }
}
