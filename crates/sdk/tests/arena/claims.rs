use arena_sdk::{
    model::{Address, CompetitionEvent, Error, PeriodKind},
    BackendSigner, MemoryLedger, ReentrancyGuard, ValueLedger,
};

use crate::setup::{config, player, Harness, AUTHORITY, CUSTODY, FUNDER, SIGNER_KEY, UNIT};

/// Player 1 wins periods 1 and 2 alone: 1.5 and 2.55 units escrowed.
fn two_rewards<L: ValueLedger>(harness: &mut Harness<L>) -> arena_sdk::Result<()> {
    for period_id in 1..=2 {
        harness.submit(player(1), 10, 1, 0)?;
        harness.next_period();
        harness.arena.distribute_rewards(&AUTHORITY, period_id)?;
    }
    Ok(())
}

#[test]
fn claim_by_index() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    let a = player(1);
    harness.fund(100 * UNIT)?;
    two_rewards(&mut harness)?;
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 405 * UNIT / 100);
    harness.arena.take_events();

    assert_eq!(harness.arena.claim_rewards(&a, &[1])?, 255 * UNIT / 100);
    assert_eq!(
        harness.arena.claim_rewards(&a, &[1]),
        Err(Error::RewardAlreadyClaimed(1))
    );
    assert_eq!(
        harness.arena.claim_rewards(&a, &[0, 5]),
        Err(Error::InvalidRewardIndex(5))
    );
    assert_eq!(
        harness.arena.claim_rewards(&a, &[0, 0]),
        Err(Error::RewardAlreadyClaimed(0))
    );
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 3 * UNIT / 2);

    assert_eq!(harness.arena.claim_rewards(&a, &[])?, 3 * UNIT / 2);
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 0);
    let entries = harness.arena.get_unclaimed_rewards(&a);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.claimed));
    assert_eq!(
        harness.arena.claim_rewards(&a, &[]),
        Err(Error::InvalidClaimAmount)
    );

    assert_eq!(harness.balance_of(&a), 405 * UNIT / 100);
    assert_eq!(
        harness.arena.take_events(),
        [
            CompetitionEvent::RewardsClaimed {
                owner: a,
                amount: 255 * UNIT / 100,
                count: 1,
            },
            CompetitionEvent::RewardsClaimed {
                owner: a,
                amount: 3 * UNIT / 2,
                count: 1,
            },
        ]
    );
    Ok(())
}

#[test]
fn nothing_to_claim() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    assert_eq!(
        harness.arena.claim_rewards(&player(9), &[]),
        Err(Error::NoUnclaimedRewards)
    );
    Ok(())
}

#[test]
fn claim_needs_custody_balance() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    let a = player(1);
    harness.fund(100 * UNIT)?;
    two_rewards(&mut harness)?;
    harness
        .arena
        .emergency_withdraw(&AUTHORITY, &FUNDER, 99 * UNIT)?;

    assert_eq!(
        harness.arena.claim_rewards(&a, &[]),
        Err(Error::InsufficientContractBalance {
            required: 405 * UNIT / 100,
            available: UNIT,
        })
    );
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 405 * UNIT / 100);
    harness.fund(10 * UNIT)?;
    assert_eq!(harness.arena.claim_rewards(&a, &[])?, 405 * UNIT / 100);
    Ok(())
}

/// Ledger whose payouts can be switched off.
#[derive(Debug)]
struct FlakyLedger {
    inner: MemoryLedger,
    reject_payouts: bool,
}

impl ValueLedger for FlakyLedger {
    type Error = &'static str;

    fn balance_of(&self, holder: &Address) -> u128 {
        self.inner.balance_of(holder)
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), Self::Error> {
        self.inner
            .transfer_from(from, to, amount)
            .map_err(|_| "transfer rejected")
    }

    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), Self::Error> {
        if self.reject_payouts {
            return Err("payouts paused");
        }
        self.inner.transfer(to, amount).map_err(|_| "transfer rejected")
    }
}

#[test]
fn failed_transfer_leaves_escrow_untouched() -> arena_sdk::Result<()> {
    let signer = BackendSigner::from_bytes(&SIGNER_KEY)?;
    let ledger = FlakyLedger {
        inner: MemoryLedger::new(CUSTODY),
        reject_payouts: true,
    };
    let mut harness = Harness::with_config(config(PeriodKind::Daily, &signer), ledger)?;
    let a = player(1);
    harness
        .arena
        .ledger_mut()
        .inner
        .mint(&FUNDER, 100 * UNIT)
        .map_err(arena_sdk::Error::custom)?;
    harness.arena.fund_pool(&FUNDER, 100 * UNIT)?;
    two_rewards(&mut harness)?;
    harness.arena.take_events();

    assert!(matches!(
        harness.arena.claim_rewards(&a, &[]),
        Err(Error::TransferFailed(_))
    ));
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 405 * UNIT / 100);
    assert!(harness
        .arena
        .get_unclaimed_rewards(&a)
        .iter()
        .all(|entry| !entry.claimed));
    assert!(harness.arena.take_events().is_empty());
    assert!(!harness.arena.guard().is_entered());

    harness.arena.ledger_mut().reject_payouts = false;
    assert_eq!(harness.arena.claim_rewards(&a, &[])?, 405 * UNIT / 100);
    Ok(())
}

/// Ledger that calls back into the guarded section while paying out.
#[derive(Debug)]
struct ReentrantLedger {
    inner: MemoryLedger,
    guard: Option<ReentrancyGuard>,
    reentry: Option<arena_sdk::model::Result<()>>,
}

impl ValueLedger for ReentrantLedger {
    type Error = arena_sdk::LedgerError;

    fn balance_of(&self, holder: &Address) -> u128 {
        self.inner.balance_of(holder)
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), Self::Error> {
        self.inner.transfer_from(from, to, amount)
    }

    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), Self::Error> {
        if let Some(guard) = &self.guard {
            self.reentry = Some(guard.enter().map(drop));
        }
        self.inner.transfer(to, amount)
    }
}

#[test]
fn reentrant_payout_is_rejected() -> arena_sdk::Result<()> {
    let signer = BackendSigner::from_bytes(&SIGNER_KEY)?;
    let ledger = ReentrantLedger {
        inner: MemoryLedger::new(CUSTODY),
        guard: None,
        reentry: None,
    };
    let mut harness = Harness::with_config(config(PeriodKind::Daily, &signer), ledger)?;
    let a = player(1);
    harness
        .arena
        .ledger_mut()
        .inner
        .mint(&FUNDER, 100 * UNIT)
        .map_err(arena_sdk::Error::custom)?;
    harness.arena.fund_pool(&FUNDER, 100 * UNIT)?;
    two_rewards(&mut harness)?;

    let guard = harness.arena.guard();
    harness.arena.ledger_mut().guard = Some(guard.clone());
    harness.arena.claim_rewards(&a, &[])?;

    assert_eq!(
        harness.arena.ledger().reentry,
        Some(Err(Error::Reentrancy))
    );
    assert!(!guard.is_entered());
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 0);
    Ok(())
}

#[test]
fn guarded_operations_exclude_each_other() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();

    let guard = harness.arena.guard();
    {
        let _held = guard.enter()?;
        assert_eq!(
            harness.arena.distribute_rewards(&AUTHORITY, 1),
            Err(Error::Reentrancy)
        );
        assert_eq!(
            harness.arena.claim_rewards(&player(1), &[]),
            Err(Error::Reentrancy)
        );
        assert_eq!(
            harness.arena.fund_pool(&FUNDER, 1),
            Err(Error::Reentrancy)
        );
    }
    harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    Ok(())
}

#[test]
fn funding() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    assert_eq!(
        harness.arena.fund_pool(&FUNDER, 0),
        Err(Error::InvalidAmount)
    );
    assert!(matches!(
        harness.arena.fund_pool(&FUNDER, 1),
        Err(Error::TransferFailed(_))
    ));

    harness.fund(7 * UNIT)?;
    assert_eq!(harness.arena.custody_balance(), 7 * UNIT);
    assert_eq!(harness.balance_of(&FUNDER), 0);
    assert_eq!(
        harness.arena.take_events(),
        [CompetitionEvent::PoolFunded {
            from: FUNDER,
            amount: 7 * UNIT,
        }]
    );
    Ok(())
}
