use std::collections::BTreeSet;

use arena_model::{
    Address, AllTimeStats, CompetitionEvent, DistributionPlan, Error, Leaderboard, PeriodClock,
    RewardPool, ScorePayload, ScoreRecord, SignatureError, UnclaimedRewardEntry,
};

use crate::{
    auth::{Authenticator, Secp256k1Recovery, SignatureRecovery},
    clock::Clock,
    config::ArenaConfig,
    guard::ReentrancyGuard,
    ledger::ValueLedger,
    store::CompetitionStore,
};

/// A periodic score competition.
///
/// Every operation runs to completion against the injected store and ledger
/// before the next one starts, and leaves no trace when it fails: rules are
/// checked and effects planned first, the external transfer (if any) happens
/// next, and the store is only written after that.
#[derive(Debug)]
pub struct Arena<S, L, C, R = Secp256k1Recovery> {
    config: ArenaConfig,
    periods: PeriodClock,
    auth: Authenticator<R>,
    store: S,
    ledger: L,
    clock: C,
    guard: ReentrancyGuard,
    events: Vec<CompetitionEvent>,
}

impl<S, L, C> Arena<S, L, C, Secp256k1Recovery>
where
    S: CompetitionStore,
    L: ValueLedger,
    C: Clock,
{
    /// Create an arena verifying signatures with secp256k1.
    pub fn new(config: ArenaConfig, store: S, ledger: L, clock: C) -> crate::Result<Self> {
        Self::with_recovery(config, store, ledger, clock, Secp256k1Recovery)
    }
}

impl<S, L, C, R> Arena<S, L, C, R>
where
    S: CompetitionStore,
    L: ValueLedger,
    C: Clock,
    R: SignatureRecovery,
{
    /// Create an arena with a custom signature recovery primitive.
    pub fn with_recovery(
        config: ArenaConfig,
        store: S,
        ledger: L,
        clock: C,
        recovery: R,
    ) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            periods: config.period_clock(),
            config,
            auth: Authenticator::new(recovery),
            store,
            ledger,
            clock,
            guard: ReentrancyGuard::default(),
            events: Vec::new(),
        })
    }

    /// Current settings.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The state store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The value ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The value ledger, mutably. Used to seed balances outside of the
    /// competition flow.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle to the reentrancy guard shared by claim, distribute and funding.
    pub fn guard(&self) -> ReentrancyGuard {
        self.guard.clone()
    }

    /// Take the buffered events.
    pub fn take_events(&mut self) -> Vec<CompetitionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Split into config, store and ledger.
    pub fn into_parts(self) -> (ArenaConfig, S, L) {
        (self.config, self.store, self.ledger)
    }

    fn emit(&mut self, event: CompetitionEvent) {
        self.events.push(event);
    }

    fn require_authority(&self, caller: &Address) -> arena_model::Result<()> {
        if *caller != self.config.authority {
            tracing::warn!(%caller, "rejected privileged call");
            return Err(Error::Unauthorized(*caller));
        }
        Ok(())
    }

    fn custody_balance_inner(&self) -> u128 {
        self.ledger.balance_of(&self.config.custody)
    }

    fn require_custody(&self, required: u128) -> arena_model::Result<()> {
        let available = self.custody_balance_inner();
        if available < required {
            return Err(Error::InsufficientContractBalance {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Submit a signed cumulative score. The payload must name the caller as
    /// its submitter.
    ///
    /// Returns the resulting rank, `0` if the entry is not on the leaderboard.
    pub fn submit_score(
        &mut self,
        caller: &Address,
        payload: &ScorePayload,
        signature: &[u8],
    ) -> arena_model::Result<u8> {
        self.submit_score_inner(caller, payload, signature)
            .inspect_err(|err| {
                tracing::debug!(
                    owner = %payload.submitter,
                    period_id = payload.period_id,
                    %err,
                    "score rejected"
                );
            })
    }

    fn submit_score_inner(
        &mut self,
        caller: &Address,
        payload: &ScorePayload,
        signature: &[u8],
    ) -> arena_model::Result<u8> {
        if payload.submitter != *caller {
            return Err(SignatureError::SubmitterMismatch {
                caller: *caller,
                submitter: payload.submitter,
            }
            .into());
        }
        let now = self.clock.now();
        let current = self.periods.period_at(now);
        let season_over = self.config.season_end.is_some_and(|end| now >= end);
        if current == 0 || season_over {
            return Err(Error::NotSubmissionPeriod);
        }
        if payload.period_id != current {
            return Err(Error::NotCurrentPeriod {
                expected: current,
                got: payload.period_id,
            });
        }
        if payload.score < self.config.min_qualification_score {
            return Err(Error::ScoreBelowQualification);
        }
        if payload.game_count == 0 {
            return Err(Error::GameCountMustBePositive);
        }
        if payload.score > self.config.max_score || payload.game_score > self.config.max_score {
            return Err(Error::ScoreTooHigh);
        }
        self.auth
            .verify(payload, signature, &self.config.backend_signer)?;

        let owner = payload.submitter;
        let period_id = payload.period_id;
        let prev = self
            .store
            .score_record(period_id, &owner)
            .unwrap_or_else(|| ScoreRecord::empty(owner));
        if self.config.enforce_monotonic {
            if payload.score < prev.score {
                return Err(Error::ScoreCannotDecrease);
            }
            if payload.game_count < prev.game_count {
                return Err(Error::GameCountCannotDecrease);
            }
        }

        let mut record = ScoreRecord::from_payload(payload);
        let mut stats = self
            .store
            .all_time_stats(&owner)
            .unwrap_or_default();
        let delta = stats.update_delta(&record, &prev);

        let mut leaderboard = self.store.leaderboard(period_id);
        let listed_before: BTreeSet<Address> = leaderboard.owners().copied().collect();
        let rank = leaderboard.upsert(record).unwrap_or(0);
        record.rank = rank;
        tracing::debug!(%owner, ?delta, rank, "planned submission");

        self.store.set_score_record(period_id, record);
        self.sync_ranks(period_id, &owner, &leaderboard, &listed_before);
        self.store.set_leaderboard(period_id, leaderboard);
        self.store.set_all_time_stats(stats);

        tracing::info!(%owner, period_id, score = payload.score, rank, "score submitted");
        self.emit(CompetitionEvent::ScoreSubmitted {
            owner,
            period_id,
            score: payload.score,
            game_score: payload.game_score,
            game_count: payload.game_count,
            referral_points: payload.referral_points,
            rank,
        });
        Ok(rank)
    }

    /// Rewrite stored ranks of owners whose position changed.
    fn sync_ranks(
        &mut self,
        period_id: u64,
        submitter: &Address,
        leaderboard: &Leaderboard,
        listed_before: &BTreeSet<Address>,
    ) {
        for entry in leaderboard.entries() {
            if entry.owner == *submitter {
                continue;
            }
            if let Some(mut record) = self.store.score_record(period_id, &entry.owner) {
                if record.rank != entry.rank {
                    record.rank = entry.rank;
                    self.store.set_score_record(period_id, record);
                }
            }
        }
        for owner in listed_before {
            if owner == submitter || leaderboard.rank_of(owner).is_some() {
                continue;
            }
            if let Some(mut record) = self.store.score_record(period_id, owner) {
                record.rank = 0;
                self.store.set_score_record(period_id, record);
            }
        }
    }

    /// Distribute the pool of a finished period to its leaderboard.
    pub fn distribute_rewards(
        &mut self,
        caller: &Address,
        period_id: u64,
    ) -> arena_model::Result<DistributionPlan> {
        let _entered = self.guard.enter()?;
        self.require_authority(caller)?;

        let current = self.current_period();
        if period_id == 0 {
            return Err(Error::InvalidPeriod(period_id));
        }
        if period_id >= current {
            return Err(Error::period_not_finished(self.periods.kind));
        }

        let mut pool = self.resolve_pool(period_id)?;
        if pool.distributed {
            return Err(Error::AlreadyDistributed);
        }
        let leaderboard = self.store.leaderboard(period_id);
        if leaderboard.is_empty() {
            return Err(Error::NoWinnersThisPeriod);
        }
        self.require_custody(pool.total_pool_amount)?;

        let plan = DistributionPlan::new(
            period_id,
            pool.total_pool_amount,
            leaderboard.entries(),
            self.config.min_qualification_score,
        )?;
        tracing::debug!(?plan, "planned distribution");

        let mut escrows = Vec::with_capacity(plan.payouts.len());
        for payout in &plan.payouts {
            let mut escrow = self.store.escrow(&payout.owner).unwrap_or_default();
            escrow.add(payout.owner, period_id, payout.amount)?;
            escrows.push((payout.owner, escrow));
        }

        for (owner, escrow) in escrows {
            self.store.set_escrow(&owner, escrow);
        }
        pool.distributed = true;
        pool.rollover_amount_out = plan.rolled_over;
        self.store.set_reward_pool(pool);

        for payout in &plan.payouts {
            self.emit(CompetitionEvent::RewardEscrowed {
                owner: payout.owner,
                period_id,
                amount: payout.amount,
            });
        }
        let paid = plan.paid();
        tracing::info!(
            period_id,
            total_pool = plan.total_pool,
            paid,
            rolled_over = plan.rolled_over,
            winners = plan.payouts.len(),
            "rewards distributed"
        );
        self.emit(CompetitionEvent::RewardsDistributed {
            period_id,
            total_pool: plan.total_pool,
            paid,
            rolled_over: plan.rolled_over,
            winners: plan.payouts.len() as u8,
        });
        Ok(plan)
    }

    /// Claim escrowed rewards. Empty `indices` claims everything unclaimed.
    ///
    /// Returns the amount paid.
    pub fn claim_rewards(
        &mut self,
        caller: &Address,
        indices: &[usize],
    ) -> arena_model::Result<u128> {
        let _entered = self.guard.enter()?;

        let mut escrow = self.store.escrow(caller).unwrap_or_default();
        let plan = escrow.plan_claim(indices)?;
        self.require_custody(plan.amount)?;
        escrow.apply_claim(&plan)?;

        self.ledger
            .transfer(caller, plan.amount)
            .map_err(Error::transfer_failed)?;
        self.store.set_escrow(caller, escrow);

        tracing::info!(
            owner = %caller,
            amount = plan.amount,
            count = plan.indices.len(),
            "rewards claimed"
        );
        self.emit(CompetitionEvent::RewardsClaimed {
            owner: *caller,
            amount: plan.amount,
            count: plan.indices.len() as u32,
        });
        Ok(plan.amount)
    }

    /// Pull `amount` from `from` into custody.
    pub fn fund_pool(&mut self, from: &Address, amount: u128) -> arena_model::Result<()> {
        let _entered = self.guard.enter()?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let custody = self.config.custody;
        self.ledger
            .transfer_from(from, &custody, amount)
            .map_err(Error::transfer_failed)?;
        tracing::info!(%from, amount, "pool funded");
        self.emit(CompetitionEvent::PoolFunded {
            from: *from,
            amount,
        });
        Ok(())
    }

    /// Move `amount` out of custody to `to`. Authority only.
    pub fn emergency_withdraw(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> arena_model::Result<()> {
        let _entered = self.guard.enter()?;
        self.require_authority(caller)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        self.require_custody(amount)?;
        self.ledger
            .transfer(to, amount)
            .map_err(Error::transfer_failed)?;
        tracing::warn!(%to, amount, "emergency withdrawal");
        self.emit(CompetitionEvent::EmergencyWithdrawal { to: *to, amount });
        Ok(())
    }

    /// Set the minimum qualification score. Authority only.
    pub fn set_min_qualification_score(
        &mut self,
        caller: &Address,
        min: u64,
    ) -> arena_model::Result<()> {
        self.require_authority(caller)?;
        let old = std::mem::replace(&mut self.config.min_qualification_score, min);
        tracing::info!(old, new = min, "min qualification score updated");
        self.emit(CompetitionEvent::MinQualificationScoreUpdated { old, new: min });
        Ok(())
    }

    /// Rotate the trusted score signer. Authority only.
    pub fn set_backend_signer(
        &mut self,
        caller: &Address,
        signer: Address,
    ) -> arena_model::Result<()> {
        self.require_authority(caller)?;
        if signer.is_zero() {
            return Err(Error::InvalidSigner);
        }
        let old = std::mem::replace(&mut self.config.backend_signer, signer);
        tracing::info!(%old, new = %signer, "backend signer updated");
        self.emit(CompetitionEvent::BackendSignerUpdated { old, new: signer });
        Ok(())
    }

    /// Set the per-period base pool. Authority only.
    ///
    /// Periods whose pool was already distributed keep their amount.
    pub fn set_base_pool(&mut self, caller: &Address, amount: u128) -> arena_model::Result<()> {
        self.require_authority(caller)?;
        let old = std::mem::replace(&mut self.config.base_pool, amount);
        tracing::info!(old, new = amount, "base pool updated");
        self.emit(CompetitionEvent::BasePoolUpdated { old, new: amount });
        Ok(())
    }

    /// Set the maximum accepted score. Authority only.
    pub fn set_max_score(&mut self, caller: &Address, max: u64) -> arena_model::Result<()> {
        self.require_authority(caller)?;
        if max == 0 {
            return Err(Error::InvalidAmount);
        }
        let old = std::mem::replace(&mut self.config.max_score, max);
        tracing::info!(old, new = max, "max score updated");
        self.emit(CompetitionEvent::MaxScoreUpdated { old, new: max });
        Ok(())
    }

    /// Current period id, `0` before genesis.
    pub fn current_period(&self) -> u64 {
        self.periods.period_at(self.clock.now())
    }

    /// Timestamp at which the given period closes.
    pub fn period_end(&self, period_id: u64) -> Option<i64> {
        self.periods.period_end(period_id)
    }

    /// Seconds until the current period closes. `None` before genesis.
    pub fn time_until_period_end(&self) -> Option<i64> {
        self.periods.time_until_period_end(self.clock.now())
    }

    /// Balance held in custody.
    pub fn custody_balance(&self) -> u128 {
        self.custody_balance_inner()
    }

    /// Leaderboard of a started period.
    pub fn get_leaderboard(&self, period_id: u64) -> arena_model::Result<Leaderboard> {
        if period_id == 0 || period_id > self.current_period() {
            return Err(Error::InvalidPeriod(period_id));
        }
        Ok(self.store.leaderboard(period_id))
    }

    /// Lifetime stats of a player. Zeroed if the player never submitted.
    pub fn get_player_stats(&self, owner: &Address) -> AllTimeStats {
        self.store.all_time_stats(owner).unwrap_or(AllTimeStats {
            owner: *owner,
            ..Default::default()
        })
    }

    /// Record of a player in a period. Zeroed if absent.
    pub fn get_player_period_stats(&self, period_id: u64, owner: &Address) -> ScoreRecord {
        self.store
            .score_record(period_id, owner)
            .unwrap_or_else(|| ScoreRecord::empty(*owner))
    }

    /// Leaderboard rank of a player in a period, `0` if unranked.
    pub fn get_player_rank(&self, period_id: u64, owner: &Address) -> u8 {
        self.store
            .leaderboard(period_id)
            .rank_of(owner)
            .unwrap_or(0)
    }

    /// Reward pool of a period. Resolved from the current base pool and the
    /// previous period's rollover until it is distributed.
    pub fn get_reward_pool(&self, period_id: u64) -> arena_model::Result<RewardPool> {
        if period_id == 0 {
            return Err(Error::InvalidPeriod(period_id));
        }
        self.resolve_pool(period_id)
    }

    fn resolve_pool(&self, period_id: u64) -> arena_model::Result<RewardPool> {
        if let Some(pool) = self.store.reward_pool(period_id) {
            return Ok(pool);
        }
        let previous = period_id
            .checked_sub(1)
            .and_then(|prev| self.store.reward_pool(prev));
        RewardPool::resolve(period_id, self.config.base_pool, previous.as_ref())
    }

    /// All escrow entries of a player, claimed or not.
    pub fn get_unclaimed_rewards(&self, owner: &Address) -> Vec<UnclaimedRewardEntry> {
        self.store
            .escrow(owner)
            .map(|escrow| escrow.entries().to_vec())
            .unwrap_or_default()
    }

    /// Sum of a player's unclaimed rewards.
    pub fn get_total_unclaimed_amount(&self, owner: &Address) -> u128 {
        self.store
            .escrow(owner)
            .map(|escrow| escrow.total_unclaimed())
            .unwrap_or_default()
    }
}
