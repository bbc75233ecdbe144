use arena_sdk::{model::Address, Clock};
use serde_with::{serde_as, DisplayFromStr};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::print_json;

/// Show the leaderboard of a period.
#[derive(Debug, clap::Args)]
pub struct Leaderboard {
    /// Period. Defaults to the current period.
    #[arg(long)]
    period: Option<u64>,
}

impl super::Command for Leaderboard {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let arena = ctx.arena().await?;
        let period = self.period.unwrap_or_else(|| arena.current_period());
        let leaderboard = arena.get_leaderboard(period)?;
        print_json(&leaderboard.entries())
    }
}

/// Player selection, defaulting to the caller.
#[derive(Debug, clap::Args)]
pub(crate) struct OwnerArg {
    /// Player. Defaults to the caller.
    #[arg(long)]
    owner: Option<Address>,
}

impl OwnerArg {
    fn resolve(&self, ctx: &super::Context<'_>) -> eyre::Result<Address> {
        match self.owner {
            Some(owner) => Ok(owner),
            None => ctx.caller(),
        }
    }
}

/// Show lifetime stats of a player.
#[derive(Debug, clap::Args)]
pub struct Stats {
    #[command(flatten)]
    owner: OwnerArg,
}

impl super::Command for Stats {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let owner = self.owner.resolve(&ctx)?;
        let arena = ctx.arena().await?;
        print_json(&arena.get_player_stats(&owner))
    }
}

/// Show the record of a player in a period.
#[derive(Debug, clap::Args)]
pub struct PeriodStats {
    /// Period. Defaults to the current period.
    #[arg(long)]
    period: Option<u64>,
    #[command(flatten)]
    owner: OwnerArg,
}

impl super::Command for PeriodStats {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let owner = self.owner.resolve(&ctx)?;
        let arena = ctx.arena().await?;
        let period = self.period.unwrap_or_else(|| arena.current_period());
        let record = arena.get_player_period_stats(period, &owner);
        print_json(&record)
    }
}

/// Show the reward pool of a period.
#[derive(Debug, clap::Args)]
pub struct Pool {
    /// Period. Defaults to the current period.
    #[arg(long)]
    period: Option<u64>,
}

impl super::Command for Pool {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let arena = ctx.arena().await?;
        let period = self.period.unwrap_or_else(|| arena.current_period());
        print_json(&arena.get_reward_pool(period)?)
    }
}

/// Show escrowed rewards of a player.
#[derive(Debug, clap::Args)]
pub struct Unclaimed {
    #[command(flatten)]
    owner: OwnerArg,
}

#[serde_as]
#[derive(serde::Serialize)]
struct UnclaimedOutput {
    #[serde_as(as = "DisplayFromStr")]
    total_unclaimed: u128,
    entries: Vec<arena_sdk::model::UnclaimedRewardEntry>,
}

impl super::Command for Unclaimed {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let owner = self.owner.resolve(&ctx)?;
        let arena = ctx.arena().await?;
        print_json(&UnclaimedOutput {
            total_unclaimed: arena.get_total_unclaimed_amount(&owner),
            entries: arena.get_unclaimed_rewards(&owner),
        })
    }
}

/// Show the current period.
#[derive(Debug, clap::Args)]
pub struct Period {}

#[serde_as]
#[derive(serde::Serialize)]
struct PeriodOutput {
    now: i64,
    period_id: u64,
    period_end: Option<i64>,
    period_end_utc: Option<String>,
    time_until_period_end: Option<i64>,
    #[serde_as(as = "DisplayFromStr")]
    custody_balance: u128,
}

impl super::Command for Period {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let arena = ctx.arena().await?;
        let period_id = arena.current_period();
        let period_end = arena.period_end(period_id);
        let period_end_utc = period_end.map(format_timestamp).transpose()?;
        print_json(&PeriodOutput {
            now: arena.clock().now(),
            period_id,
            period_end,
            period_end_utc,
            time_until_period_end: arena.time_until_period_end(),
            custody_balance: arena.custody_balance(),
        })
    }
}

fn format_timestamp(ts: i64) -> eyre::Result<String> {
    Ok(OffsetDateTime::from_unix_timestamp(ts)?.format(&Rfc3339)?)
}
