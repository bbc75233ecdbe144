use std::path::Path;

use admin::{Distribute, EmergencyWithdraw, SetBasePool, SetMaxScore, SetMinScore, SetSigner};
use arena_sdk::{
    model::{Address, CompetitionEvent},
    Arena, Clock, ManualClock, MemoryLedger, MemoryStore, Snapshot, SystemClock,
};
use enum_dispatch::enum_dispatch;
use eyre::OptionExt;
use init_config::InitConfig;
use inspect::{Leaderboard, Period, PeriodStats, Pool, Stats, Unclaimed};
use player::{Claim, Fund, Submit};
use serde::Serialize;
use sign::Sign;
use state::{InitState, Migrate};

use crate::config::Config;

mod admin;
mod init_config;
mod inspect;
mod player;
mod sign;
mod state;

/// Commands.
#[enum_dispatch(Command)]
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Write a config file.
    InitConfig(InitConfig),
    /// Create a fresh state file from the config.
    InitState(InitState),
    /// Sign a score payload with the backend key.
    Sign(Sign),
    /// Submit a signed score as the caller.
    Submit(Submit),
    /// Move funds from the caller into custody.
    Fund(Fund),
    /// Distribute the pool of a finished period.
    Distribute(Distribute),
    /// Claim escrowed rewards as the caller.
    Claim(Claim),
    /// Set the minimum qualification score.
    SetMinScore(SetMinScore),
    /// Rotate the backend signer.
    SetSigner(SetSigner),
    /// Set the per-period base pool.
    SetBasePool(SetBasePool),
    /// Set the maximum accepted score.
    SetMaxScore(SetMaxScore),
    /// Move funds out of custody.
    EmergencyWithdraw(EmergencyWithdraw),
    /// Show the leaderboard of a period.
    Leaderboard(Leaderboard),
    /// Show lifetime stats of a player.
    Stats(Stats),
    /// Show the record of a player in a period.
    PeriodStats(PeriodStats),
    /// Show the reward pool of a period.
    Pool(Pool),
    /// Show escrowed rewards of a player.
    Unclaimed(Unclaimed),
    /// Rewrite a state file in the current schema.
    Migrate(Migrate),
    /// Show the current period.
    Period(Period),
}

#[enum_dispatch]
pub(crate) trait Command {
    async fn execute(&self, ctx: Context<'_>) -> eyre::Result<()>;
}

/// Arena backed by the state file.
pub(crate) type LocalArena = Arena<MemoryStore, MemoryLedger, ManualClock>;

pub(crate) struct Context<'a> {
    config_path: &'a Path,
    config: &'a Config,
    now: Option<i64>,
}

impl<'a> Context<'a> {
    pub(super) fn new(config_path: &'a Path, config: &'a Config, now: Option<i64>) -> Self {
        Self {
            config_path,
            config,
            now,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    pub(crate) fn config_path(&self) -> &Path {
        self.config_path
    }

    pub(crate) fn now(&self) -> i64 {
        self.now.unwrap_or_else(|| SystemClock.now())
    }

    pub(crate) fn caller(&self) -> eyre::Result<Address> {
        self.config
            .caller()
            .copied()
            .ok_or_eyre("caller is not provided, use `--caller` or set `caller` in the config")
    }

    pub(crate) async fn load_snapshot(&self) -> eyre::Result<Snapshot> {
        let path = self.config.state_path();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| eyre::eyre!("failed to read state `{}`: {err}", path.display()))?;
        Ok(Snapshot::from_json(&json)?)
    }

    pub(crate) async fn write_snapshot(&self, path: &Path, snapshot: &Snapshot) -> eyre::Result<()> {
        tokio::fs::write(path, snapshot.to_json()?).await?;
        tracing::debug!(path = %path.display(), version = snapshot.version, "state written");
        Ok(())
    }

    pub(crate) async fn arena(&self) -> eyre::Result<LocalArena> {
        let snapshot = self.load_snapshot().await?;
        Ok(snapshot.into_arena(ManualClock::new(self.now()))?)
    }

    /// Persist the arena and return the events it emitted.
    pub(crate) async fn commit(&self, arena: &mut LocalArena) -> eyre::Result<Vec<CompetitionEvent>> {
        let events = arena.take_events();
        let kinds = events.iter().map(<&'static str>::from).collect::<Vec<_>>();
        tracing::debug!(?kinds, "events emitted");
        self.write_snapshot(self.config.state_path(), &Snapshot::capture(arena))
            .await?;
        Ok(events)
    }
}

/// Print `value` as pretty JSON.
pub(crate) fn print_json(value: &impl Serialize) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Outcome of a state-changing command.
#[derive(Debug, Serialize)]
pub(crate) struct Receipt<T> {
    pub(crate) result: T,
    pub(crate) events: Vec<CompetitionEvent>,
}

impl<T: Serialize> Receipt<T> {
    pub(crate) fn print(result: T, events: Vec<CompetitionEvent>) -> eyre::Result<()> {
        print_json(&Self { result, events })
    }
}
