use super::{sign::ScoreArgs, Receipt};

/// Submit a signed score as the caller.
#[derive(Debug, clap::Args)]
pub struct Submit {
    #[command(flatten)]
    score: ScoreArgs,
    /// Hex-encoded 65-byte signature from the backend signer.
    #[arg(long)]
    signature: String,
}

impl super::Command for Submit {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let signature = decode_hex(&self.signature)?;
        let mut arena = ctx.arena().await?;
        let payload = self.score.to_payload(caller, arena.current_period());
        let rank = arena.submit_score(&caller, &payload, &signature)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print(serde_json::json!({ "rank": rank }), events)
    }
}

/// Move funds from the caller into custody.
#[derive(Debug, clap::Args)]
pub struct Fund {
    /// Amount to move.
    #[arg(long)]
    amount: u128,
    /// Credit the caller with `amount` first. The state file ledger has no
    /// other source of funds.
    #[arg(long)]
    mint: bool,
}

impl super::Command for Fund {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        if self.mint {
            arena.ledger_mut().mint(&caller, self.amount)?;
        }
        arena.fund_pool(&caller, self.amount)?;
        let custody = arena.custody_balance();
        let events = ctx.commit(&mut arena).await?;
        Receipt::print(
            serde_json::json!({ "custody_balance": custody.to_string() }),
            events,
        )
    }
}

/// Claim escrowed rewards as the caller.
#[derive(Debug, clap::Args)]
pub struct Claim {
    /// Escrow entry indices to claim. Claims every unclaimed entry if empty.
    #[arg(long = "index")]
    indices: Vec<usize>,
}

impl super::Command for Claim {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        let amount = arena.claim_rewards(&caller, &self.indices)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print(serde_json::json!({ "amount": amount.to_string() }), events)
    }
}

fn decode_hex(value: &str) -> eyre::Result<Vec<u8>> {
    let value = value.trim();
    let value = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(value)?)
}
