use std::path::{Path, PathBuf};

use arena_sdk::{model::Address, ArenaConfig};
use etcetera::BaseStrategy;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "arena.toml";
const DEFAULT_STATE_FILE: &str = "arena-state.json";
const ENV_PREFIX: &str = "ARENA_";

/// CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Config {
    /// Snapshot file holding the arena state.
    #[serde(default = "default_state_path")]
    state: PathBuf,
    /// Default caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caller: Option<Address>,
    /// Arena parameters used by `init-state`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arena: Option<ArenaConfig>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

impl Config {
    pub(crate) fn new(arena: ArenaConfig, caller: Option<Address>) -> Self {
        Self {
            state: default_state_path(),
            caller,
            arena: Some(arena),
        }
    }

    /// `arena.toml` in the working directory if present, otherwise in the
    /// user config directory.
    pub(crate) fn default_path() -> eyre::Result<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }
        let strategy = etcetera::choose_base_strategy()?;
        Ok(strategy.config_dir().join("arena").join(CONFIG_FILE))
    }

    /// Layer the TOML file at `path` (if any) with `ARENA_` environment
    /// variables. Nested keys are separated by `__`, e.g.
    /// `ARENA_ARENA__MIN_QUALIFICATION_SCORE`.
    pub(crate) fn load(path: &Path) -> eyre::Result<Self> {
        let config = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    pub(crate) fn to_toml(&self) -> eyre::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub(crate) fn state_path(&self) -> &Path {
        &self.state
    }

    pub(crate) fn set_state_path(&mut self, path: PathBuf) {
        self.state = path;
    }

    pub(crate) fn caller(&self) -> Option<&Address> {
        self.caller.as_ref()
    }

    pub(crate) fn set_caller(&mut self, caller: Address) {
        self.caller = Some(caller);
    }

    pub(crate) fn arena(&self) -> Option<&ArenaConfig> {
        self.arena.as_ref()
    }
}
