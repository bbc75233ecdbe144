use crate::address::{Address, ADDRESS_LEN};

const WORD_LEN: usize = 32;

/// Length of the message a backend signer attests to.
pub const SIGNED_MESSAGE_LEN: usize = ADDRESS_LEN + 5 * WORD_LEN;

/// A score submission as attested by the backend signer.
///
/// All counters are cumulative for the period, so a later payload from the
/// same submitter supersedes an earlier one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScorePayload {
    /// Player the scores belong to.
    pub submitter: Address,
    /// Target period.
    pub period_id: u64,
    /// Cumulative period score.
    pub score: u64,
    /// Best single game score.
    pub game_score: u64,
    /// Cumulative number of games.
    pub game_count: u64,
    /// Cumulative referral points.
    pub referral_points: u64,
}

impl ScorePayload {
    /// The fixed-width message covered by the signature.
    ///
    /// Layout: `submitter (20) || period_id || score || game_score ||
    /// game_count || referral_points`, each counter a big-endian 256-bit word.
    pub fn signed_message(&self) -> [u8; SIGNED_MESSAGE_LEN] {
        let mut msg = [0u8; SIGNED_MESSAGE_LEN];
        msg[..ADDRESS_LEN].copy_from_slice(self.submitter.as_bytes());
        let words = [
            self.period_id,
            self.score,
            self.game_score,
            self.game_count,
            self.referral_points,
        ];
        for (idx, value) in words.into_iter().enumerate() {
            let end = ADDRESS_LEN + (idx + 1) * WORD_LEN;
            msg[end - 8..end].copy_from_slice(&value.to_be_bytes());
        }
        msg
    }
}
