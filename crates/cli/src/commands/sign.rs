use arena_sdk::{
    model::{Address, ScorePayload},
    BackendSigner,
};

/// Sign a score payload with the backend key.
#[derive(Debug, clap::Args)]
pub struct Sign {
    /// Hex-encoded secret key of the backend signer.
    #[arg(long, env = "ARENA_SIGNER_KEY", hide_env_values = true)]
    key: String,
    /// Player the score belongs to. Defaults to the caller.
    #[arg(long)]
    submitter: Option<Address>,
    #[command(flatten)]
    score: ScoreArgs,
}

/// Score fields of a payload.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArgs {
    /// Period the score belongs to. Defaults to the current period.
    #[arg(long)]
    pub(crate) period: Option<u64>,
    /// Cumulative period score.
    #[arg(long)]
    pub(crate) score: u64,
    /// Best single-game score.
    #[arg(long)]
    pub(crate) game_score: u64,
    /// Cumulative games played.
    #[arg(long)]
    pub(crate) game_count: u64,
    /// Cumulative referral points.
    #[arg(long, default_value_t = 0)]
    pub(crate) referral_points: u64,
}

impl ScoreArgs {
    pub(crate) fn to_payload(&self, submitter: Address, current_period: u64) -> ScorePayload {
        ScorePayload {
            submitter,
            period_id: self.period.unwrap_or(current_period),
            score: self.score,
            game_score: self.game_score,
            game_count: self.game_count,
            referral_points: self.referral_points,
        }
    }
}

impl super::Command for Sign {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let signer = BackendSigner::from_hex(&self.key)?;
        let submitter = match self.submitter {
            Some(submitter) => submitter,
            None => ctx.caller()?,
        };
        let current = match self.score.period {
            Some(period) => period,
            None => ctx.arena().await?.current_period(),
        };
        let payload = self.score.to_payload(submitter, current);
        let signature = signer.sign(&payload);
        super::print_json(&serde_json::json!({
            "signer": signer.address(),
            "submitter": payload.submitter,
            "period_id": payload.period_id,
            "score": payload.score,
            "game_score": payload.game_score,
            "game_count": payload.game_count,
            "referral_points": payload.referral_points,
            "signature": format!("0x{}", hex::encode(signature)),
        }))
    }
}
