use arena_model::{Address, PeriodClock, PeriodKind};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use typed_builder::TypedBuilder;

/// Default upper bound for submitted scores.
pub const DEFAULT_MAX_SCORE: u64 = 1_000_000_000;

/// Competition parameters.
///
/// `genesis` and `period_kind` are fixed once an arena is created; the
/// remaining fields are administrative settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct ArenaConfig {
    /// Daily or weekly periods.
    #[serde(default)]
    #[builder(default)]
    pub period_kind: PeriodKind,
    /// Start of period 1, unix seconds.
    pub genesis: i64,
    /// Submissions close at this timestamp, if set.
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub season_end: Option<i64>,
    /// Administrative authority.
    pub authority: Address,
    /// Trusted score signer.
    pub backend_signer: Address,
    /// Account holding pooled and escrowed funds.
    pub custody: Address,
    /// Amount offered each period before rollover. Written as a decimal
    /// string; plain integers are accepted on input.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    #[builder(default)]
    pub base_pool: u128,
    /// Minimum score to submit and to be paid.
    #[serde(default)]
    #[builder(default)]
    pub min_qualification_score: u64,
    /// Maximum accepted score and game score.
    #[serde(default = "default_max_score")]
    #[builder(default = DEFAULT_MAX_SCORE)]
    pub max_score: u64,
    /// Reject submissions whose score or game count went down.
    #[serde(default = "default_enforce_monotonic")]
    #[builder(default = true)]
    pub enforce_monotonic: bool,
}

fn default_max_score() -> u64 {
    DEFAULT_MAX_SCORE
}

fn default_enforce_monotonic() -> bool {
    true
}

impl ArenaConfig {
    /// Period arithmetic for this config.
    pub fn period_clock(&self) -> PeriodClock {
        PeriodClock::new(self.genesis, self.period_kind)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> crate::Result<()> {
        if self.authority.is_zero() {
            return Err(crate::Error::Config("authority is not set"));
        }
        if self.backend_signer.is_zero() {
            return Err(crate::Error::Config("backend signer is not set"));
        }
        if self.custody.is_zero() {
            return Err(crate::Error::Config("custody is not set"));
        }
        if self.max_score == 0 {
            return Err(crate::Error::Config("max score must be positive"));
        }
        if self.season_end.is_some_and(|end| end <= self.genesis) {
            return Err(crate::Error::Config("season must end after genesis"));
        }
        Ok(())
    }
}
