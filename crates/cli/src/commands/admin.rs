use arena_sdk::model::Address;

use super::Receipt;

/// Distribute the pool of a finished period.
#[derive(Debug, clap::Args)]
pub struct Distribute {
    /// Period to distribute. Defaults to the previous period.
    #[arg(long)]
    period: Option<u64>,
}

impl super::Command for Distribute {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        let period = match self.period {
            Some(period) => period,
            None => arena.current_period().saturating_sub(1),
        };
        let plan = arena.distribute_rewards(&caller, period)?;
        let events = ctx.commit(&mut arena).await?;
        let payouts = plan
            .payouts
            .iter()
            .map(|payout| {
                serde_json::json!({
                    "owner": payout.owner,
                    "rank": payout.rank,
                    "amount": payout.amount.to_string(),
                })
            })
            .collect::<Vec<_>>();
        Receipt::print(
            serde_json::json!({
                "period_id": plan.period_id,
                "total_pool": plan.total_pool.to_string(),
                "paid": plan.paid().to_string(),
                "rolled_over": plan.rolled_over.to_string(),
                "payouts": payouts,
                "disqualified": plan.disqualified,
            }),
            events,
        )
    }
}

/// Set the minimum qualification score.
#[derive(Debug, clap::Args)]
pub struct SetMinScore {
    score: u64,
}

impl super::Command for SetMinScore {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        arena.set_min_qualification_score(&caller, self.score)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print((), events)
    }
}

/// Rotate the backend signer.
#[derive(Debug, clap::Args)]
pub struct SetSigner {
    signer: Address,
}

impl super::Command for SetSigner {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        arena.set_backend_signer(&caller, self.signer)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print((), events)
    }
}

/// Set the per-period base pool.
#[derive(Debug, clap::Args)]
pub struct SetBasePool {
    amount: u128,
}

impl super::Command for SetBasePool {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        arena.set_base_pool(&caller, self.amount)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print((), events)
    }
}

/// Set the maximum accepted score.
#[derive(Debug, clap::Args)]
pub struct SetMaxScore {
    score: u64,
}

impl super::Command for SetMaxScore {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        arena.set_max_score(&caller, self.score)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print((), events)
    }
}

/// Move funds out of custody.
#[derive(Debug, clap::Args)]
pub struct EmergencyWithdraw {
    /// Receiver.
    #[arg(long)]
    to: Address,
    /// Amount to move.
    #[arg(long)]
    amount: u128,
}

impl super::Command for EmergencyWithdraw {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let caller = ctx.caller()?;
        let mut arena = ctx.arena().await?;
        arena.emergency_withdraw(&caller, &self.to, self.amount)?;
        let events = ctx.commit(&mut arena).await?;
        Receipt::print((), events)
    }
}
