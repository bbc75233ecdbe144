use arena_sdk::{
    model::{Address, PeriodKind},
    ArenaConfig,
};

use crate::config::Config;

/// Write a config file.
#[derive(Debug, clap::Args)]
pub struct InitConfig {
    /// Administrative authority.
    #[arg(long)]
    authority: Address,
    /// Trusted score signer.
    #[arg(long)]
    backend_signer: Address,
    /// Custody account.
    #[arg(long)]
    custody: Address,
    /// Period length.
    #[arg(long, default_value = "daily")]
    period_kind: PeriodKind,
    /// Start of period 1. Defaults to now.
    #[arg(long)]
    genesis: Option<i64>,
    /// Close submissions at this timestamp.
    #[arg(long)]
    season_end: Option<i64>,
    /// Amount offered each period.
    #[arg(long, default_value_t = 0)]
    base_pool: u128,
    /// Minimum qualification score.
    #[arg(long, default_value_t = 0)]
    min_score: u64,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

impl super::Command for InitConfig {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let path = ctx.config_path();
        if !self.force && tokio::fs::try_exists(path).await? {
            eyre::bail!(
                "`{}` already exists, use `--force` to overwrite",
                path.display()
            );
        }

        let mut arena = ArenaConfig::builder()
            .period_kind(self.period_kind)
            .genesis(self.genesis.unwrap_or_else(|| ctx.now()))
            .authority(self.authority)
            .backend_signer(self.backend_signer)
            .custody(self.custody)
            .base_pool(self.base_pool)
            .min_qualification_score(self.min_score)
            .build();
        arena.season_end = self.season_end;
        arena.validate()?;

        let config = Config::new(arena, ctx.config().caller().copied());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, config.to_toml()?).await?;
        tracing::info!(path = %path.display(), "config written");
        Ok(())
    }
}
