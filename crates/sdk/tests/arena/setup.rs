use arena_sdk::{
    model::{Address, PeriodKind, ScorePayload},
    Arena, ArenaConfig, BackendSigner, ManualClock, MemoryLedger, MemoryStore, ValueLedger,
};
use tracing_subscriber::EnvFilter;

pub const GENESIS: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;
pub const WEEK: i64 = 7 * DAY;
pub const UNIT: u128 = 1_000_000_000_000_000_000;

pub const AUTHORITY: Address = Address::new([0xaa; 20]);
pub const CUSTODY: Address = Address::new([0xcc; 20]);
pub const FUNDER: Address = Address::new([0xf0; 20]);

pub const SIGNER_KEY: [u8; 32] = [0x11; 32];
pub const OTHER_KEY: [u8; 32] = [0x22; 32];

pub fn player(n: u8) -> Address {
    Address::new([n; 20])
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config starting at [`GENESIS`] with a 5 unit base pool.
pub fn config(kind: PeriodKind, signer: &BackendSigner) -> ArenaConfig {
    ArenaConfig::builder()
        .period_kind(kind)
        .genesis(GENESIS)
        .authority(AUTHORITY)
        .backend_signer(signer.address())
        .custody(CUSTODY)
        .base_pool(5 * UNIT)
        .build()
}

pub struct Harness<L = MemoryLedger> {
    pub arena: Arena<MemoryStore, L, ManualClock>,
    pub clock: ManualClock,
    pub signer: BackendSigner,
}

impl Harness {
    /// Daily arena in period 1.
    pub fn daily() -> arena_sdk::Result<Self> {
        Self::new(PeriodKind::Daily)
    }

    pub fn new(kind: PeriodKind) -> arena_sdk::Result<Self> {
        let signer = BackendSigner::from_bytes(&SIGNER_KEY)?;
        let config = config(kind, &signer);
        Self::with_config(config, MemoryLedger::new(CUSTODY))
    }

    /// Mint `amount` to the funder and pull it into custody.
    pub fn fund(&mut self, amount: u128) -> arena_sdk::Result<()> {
        self.arena
            .ledger_mut()
            .mint(&FUNDER, amount)
            .map_err(arena_sdk::Error::custom)?;
        self.arena.fund_pool(&FUNDER, amount)?;
        Ok(())
    }

    pub fn balance_of(&self, holder: &Address) -> u128 {
        self.arena.ledger().balance_of(holder)
    }
}

impl<L: ValueLedger> Harness<L> {
    pub fn with_config(config: ArenaConfig, ledger: L) -> arena_sdk::Result<Self> {
        init_tracing();
        let signer = BackendSigner::from_bytes(&SIGNER_KEY)?;
        let clock = ManualClock::new(config.genesis);
        let arena = Arena::new(config, MemoryStore::default(), ledger, clock.clone())?;
        Ok(Self {
            arena,
            clock,
            signer,
        })
    }

    /// Payload for the current period. The game score is half the score.
    pub fn payload(
        &self,
        owner: Address,
        score: u64,
        game_count: u64,
        referral_points: u64,
    ) -> ScorePayload {
        ScorePayload {
            submitter: owner,
            period_id: self.arena.current_period(),
            score,
            game_score: score / 2,
            game_count,
            referral_points,
        }
    }

    pub fn submit(
        &mut self,
        owner: Address,
        score: u64,
        game_count: u64,
        referral_points: u64,
    ) -> arena_sdk::model::Result<u8> {
        let payload = self.payload(owner, score, game_count, referral_points);
        self.submit_payload(&payload)
    }

    pub fn submit_payload(&mut self, payload: &ScorePayload) -> arena_sdk::model::Result<u8> {
        let signature = self.signer.sign(payload);
        self.arena
            .submit_score(&payload.submitter, payload, &signature)
    }

    pub fn next_period(&self) {
        self.clock.advance(self.arena.config().period_kind.seconds());
    }

    pub fn board(&self, period_id: u64) -> arena_sdk::Result<Vec<Address>> {
        Ok(self
            .arena
            .get_leaderboard(period_id)?
            .owners()
            .copied()
            .collect())
    }
}
