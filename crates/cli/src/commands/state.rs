use std::path::PathBuf;

use arena_sdk::{Snapshot, SNAPSHOT_VERSION};
use eyre::OptionExt;

/// Create a fresh state file.
#[derive(Debug, clap::Args)]
pub struct InitState {
    /// Overwrite an existing state file.
    #[arg(long)]
    force: bool,
}

impl super::Command for InitState {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let path = ctx.config().state_path();
        if !self.force && tokio::fs::try_exists(path).await? {
            eyre::bail!(
                "`{}` already exists, use `--force` to overwrite",
                path.display()
            );
        }
        let arena = ctx
            .config()
            .arena()
            .cloned()
            .ok_or_eyre("the config has no `[arena]` section, run `init-config` first")?;
        arena.validate()?;
        ctx.write_snapshot(path, &Snapshot::new(arena)).await?;
        tracing::info!(path = %path.display(), "state initialized");
        Ok(())
    }
}

/// Rewrite a state file in the current schema.
#[derive(Debug, clap::Args)]
pub struct Migrate {
    /// Write to this path instead of in place.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl super::Command for Migrate {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let snapshot = ctx.load_snapshot().await?;
        let output = self
            .output
            .as_deref()
            .unwrap_or_else(|| ctx.config().state_path());
        ctx.write_snapshot(output, &snapshot).await?;
        super::print_json(&serde_json::json!({
            "path": output.display().to_string(),
            "version": SNAPSHOT_VERSION,
        }))
    }
}
