#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]
//! # Arena SDK
//!
//! Runs a periodic score competition on top of [`arena_model`]: verifies
//! signed submissions, keeps the per-period leaderboards and lifetime stats,
//! distributes each finished period's pool into escrow and pays out claims.
//!
//! Storage, value transfer and time are injected through
//! [`CompetitionStore`], [`ValueLedger`] and [`Clock`]. In-memory versions of
//! all three are provided, together with a versioned [`Snapshot`] format for
//! persisting them.

/// The competition engine.
pub mod arena;

/// Signature verification.
pub mod auth;

/// Time source.
pub mod clock;

/// Settings.
pub mod config;

/// Error type.
pub mod error;

/// Reentrancy guard.
pub mod guard;

/// Value ledger.
pub mod ledger;

/// Persisted state.
pub mod snapshot;

/// State store.
pub mod store;

pub use arena::Arena;
#[cfg(feature = "signer")]
pub use auth::BackendSigner;
pub use auth::{Authenticator, Secp256k1Recovery, SignatureRecovery};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ArenaConfig;
pub use error::Error;
pub use guard::ReentrancyGuard;
pub use ledger::{LedgerError, MemoryLedger, ValueLedger};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use store::{CompetitionStore, MemoryStore};

pub use arena_model as model;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
