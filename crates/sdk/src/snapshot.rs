use std::collections::BTreeMap;

use arena_model::{
    Address, AllTimeStats, Leaderboard, RewardEscrow, RewardPool, ScoreRecord,
    UnclaimedRewardEntry,
};
use serde::{Deserialize, Serialize};

use crate::{
    arena::Arena, clock::Clock, config::ArenaConfig, ledger::MemoryLedger, store::MemoryStore,
};

/// Schema version written by this build.
pub const SNAPSHOT_VERSION: u16 = 2;

/// Persisted state of an in-memory arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version.
    pub version: u16,
    /// Settings.
    pub config: ArenaConfig,
    /// Competition state.
    pub store: MemoryStore,
    /// Balances.
    pub ledger: MemoryLedger,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u16,
}

/// Version 1 kept only the escrow entries per owner, without running totals.
#[derive(Deserialize)]
struct SnapshotV1 {
    config: ArenaConfig,
    store: MemoryStoreV1,
    ledger: MemoryLedger,
}

#[derive(Deserialize)]
struct MemoryStoreV1 {
    records: BTreeMap<u64, BTreeMap<Address, ScoreRecord>>,
    leaderboards: BTreeMap<u64, Leaderboard>,
    stats: BTreeMap<Address, AllTimeStats>,
    pools: BTreeMap<u64, RewardPool>,
    escrows: BTreeMap<Address, Vec<UnclaimedRewardEntry>>,
}

impl Snapshot {
    /// Create a fresh snapshot.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ledger: MemoryLedger::new(config.custody),
            config,
            store: MemoryStore::default(),
        }
    }

    /// Parse a snapshot of any supported version, migrating it to the
    /// current one.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let VersionProbe { version } = serde_json::from_str(json)?;
        match version {
            1 => migrate_v1(serde_json::from_str(json)?),
            SNAPSHOT_VERSION => Ok(serde_json::from_str(json)?),
            other => Err(crate::Error::UnsupportedVersion(other)),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load into an arena driven by `clock`.
    ///
    /// The ledger must act for the configured custody account.
    pub fn into_arena<C: Clock>(
        self,
        clock: C,
    ) -> crate::Result<Arena<MemoryStore, MemoryLedger, C>> {
        if *self.ledger.custody() != self.config.custody {
            return Err(crate::Error::Config(
                "ledger custody does not match the configured custody",
            ));
        }
        Arena::new(self.config, self.store, self.ledger, clock)
    }

    /// Capture an arena's state.
    pub fn capture<C: Clock>(arena: &Arena<MemoryStore, MemoryLedger, C>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            config: arena.config().clone(),
            store: arena.store().clone(),
            ledger: arena.ledger().clone(),
        }
    }
}

fn migrate_v1(v1: SnapshotV1) -> crate::Result<Snapshot> {
    let SnapshotV1 {
        config,
        store,
        ledger,
    } = v1;
    let escrows = store
        .escrows
        .into_iter()
        .map(|(owner, entries)| -> crate::Result<_> {
            Ok((owner, RewardEscrow::from_entries(entries)?))
        })
        .collect::<crate::Result<BTreeMap<_, _>>>()?;
    tracing::info!(
        from = 1,
        to = SNAPSHOT_VERSION,
        owners = escrows.len(),
        "migrated snapshot"
    );
    Ok(Snapshot {
        version: SNAPSHOT_VERSION,
        config,
        store: MemoryStore {
            records: store.records,
            leaderboards: store.leaderboards,
            stats: store.stats,
            pools: store.pools,
            escrows,
        },
        ledger,
    })
}
