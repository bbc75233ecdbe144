use arena_sdk::{
    model::{CompetitionEvent, Error, PeriodKind, Payout, REWARD_BASIS_POINTS},
    BackendSigner, MemoryLedger,
};

use crate::setup::{config, player, Harness, AUTHORITY, CUSTODY, SIGNER_KEY, UNIT};

fn harness_with_base_pool(base_pool: u128) -> arena_sdk::Result<Harness> {
    let signer = BackendSigner::from_bytes(&SIGNER_KEY)?;
    let mut config = config(PeriodKind::Daily, &signer);
    config.base_pool = base_pool;
    Harness::with_config(config, MemoryLedger::new(CUSTODY))
}

#[test]
fn disqualified_share_rolls_over() -> arena_sdk::Result<()> {
    let span = tracing::info_span!("disqualified_share_rolls_over");
    let _enter = span.enter();

    let mut harness = Harness::daily()?;
    let [a, b] = [player(1), player(2)];
    harness.fund(100 * UNIT)?;
    harness.submit(a, 600, 3, 0)?;
    harness.submit(b, 400, 3, 0)?;
    harness
        .arena
        .set_min_qualification_score(&AUTHORITY, 500)?;
    harness.next_period();
    harness.arena.take_events();

    let plan = harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    assert_eq!(plan.total_pool, 5 * UNIT);
    assert_eq!(
        plan.payouts,
        [Payout {
            owner: a,
            rank: 1,
            amount: 3 * UNIT / 2,
        }]
    );
    assert_eq!(plan.disqualified, [b]);
    assert_eq!(plan.rolled_over, 7 * UNIT / 2);

    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 3 * UNIT / 2);
    assert_eq!(harness.arena.get_total_unclaimed_amount(&b), 0);
    assert!(harness.arena.get_unclaimed_rewards(&b).is_empty());

    assert_eq!(
        harness.arena.take_events(),
        [
            CompetitionEvent::RewardEscrowed {
                owner: a,
                period_id: 1,
                amount: 3 * UNIT / 2,
            },
            CompetitionEvent::RewardsDistributed {
                period_id: 1,
                total_pool: 5 * UNIT,
                paid: 3 * UNIT / 2,
                rolled_over: 7 * UNIT / 2,
                winners: 1,
            },
        ]
    );

    let distributed = harness.arena.get_reward_pool(1)?;
    assert!(distributed.distributed);
    assert_eq!(distributed.rollover_amount_out, 7 * UNIT / 2);

    let next = harness.arena.get_reward_pool(2)?;
    assert!(!next.distributed);
    assert_eq!(next.rollover_amount_in, 7 * UNIT / 2);
    assert_eq!(next.total_pool_amount, 17 * UNIT / 2);

    harness.submit(a, 700, 4, 0)?;
    harness.next_period();
    let plan = harness.arena.distribute_rewards(&AUTHORITY, 2)?;
    assert_eq!(plan.total_pool, 17 * UNIT / 2);
    assert_eq!(plan.paid(), 255 * UNIT / 100);

    assert_eq!(harness.arena.claim_rewards(&a, &[])?, 405 * UNIT / 100);
    assert_eq!(harness.balance_of(&a), 405 * UNIT / 100);
    assert_eq!(harness.arena.custody_balance(), 100 * UNIT - 405 * UNIT / 100);
    assert_eq!(harness.arena.get_total_unclaimed_amount(&a), 0);
    Ok(())
}

#[test]
fn distributes_once() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();

    harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 1),
        Err(Error::AlreadyDistributed)
    );
    assert_eq!(harness.arena.get_unclaimed_rewards(&player(1)).len(), 1);
    Ok(())
}

#[test]
fn only_finished_periods() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 10, 1, 0)?;

    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 0),
        Err(Error::InvalidPeriod(0))
    );
    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 1),
        Err(Error::DayNotFinished)
    );
    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 5),
        Err(Error::DayNotFinished)
    );

    let mut weekly = Harness::new(PeriodKind::Weekly)?;
    weekly.fund(100 * UNIT)?;
    weekly.submit(player(1), 10, 1, 0)?;
    weekly.clock.advance(PeriodKind::Daily.seconds());
    assert_eq!(
        weekly.arena.distribute_rewards(&AUTHORITY, 1),
        Err(Error::WeekNotFinished)
    );
    weekly.next_period();
    weekly.arena.distribute_rewards(&AUTHORITY, 1)?;
    Ok(())
}

#[test]
fn needs_winners_and_funds() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.next_period();
    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 1),
        Err(Error::NoWinnersThisPeriod)
    );

    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();
    assert_eq!(
        harness.arena.distribute_rewards(&AUTHORITY, 2),
        Err(Error::InsufficientContractBalance {
            required: 5 * UNIT,
            available: 0,
        })
    );
    assert!(!harness.arena.get_reward_pool(2)?.distributed);
    assert!(harness.arena.get_unclaimed_rewards(&player(1)).is_empty());

    harness.fund(5 * UNIT)?;
    harness.arena.distribute_rewards(&AUTHORITY, 2)?;
    assert!(harness.arena.get_reward_pool(2)?.distributed);
    Ok(())
}

#[test]
fn authority_only() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();
    assert_eq!(
        harness.arena.distribute_rewards(&player(1), 1),
        Err(Error::Unauthorized(player(1)))
    );
    assert!(!harness.arena.get_reward_pool(1)?.distributed);
    Ok(())
}

#[test]
fn remainder_rolls_over() -> arena_sdk::Result<()> {
    let mut harness = harness_with_base_pool(1_001)?;
    harness.fund(1_001)?;
    for (n, score) in [(1, 30), (2, 20), (3, 10)] {
        harness.submit(player(n), score, 1, 0)?;
    }
    harness.next_period();

    let plan = harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    let amounts: Vec<u128> = plan.payouts.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, [300, 200, 150]);
    assert_eq!(plan.rolled_over, 351);
    assert_eq!(plan.paid() + plan.rolled_over, plan.total_pool);
    assert_eq!(harness.arena.get_reward_pool(2)?.total_pool_amount, 1_001 + 351);
    Ok(())
}

#[test]
fn full_board_pays_whole_pool() -> arena_sdk::Result<()> {
    let mut harness = harness_with_base_pool(10_000)?;
    harness.fund(10_000)?;
    for n in 1..=10u8 {
        harness.submit(player(n), 1_000 - u64::from(n), 1, 0)?;
    }
    harness.next_period();

    let plan = harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    let amounts: Vec<u128> = plan.payouts.iter().map(|p| p.amount).collect();
    let expected: Vec<u128> = REWARD_BASIS_POINTS.iter().map(|bp| u128::from(*bp)).collect();
    assert_eq!(amounts, expected);
    assert_eq!(plan.rolled_over, 0);
    assert_eq!(plan.payouts[0].owner, player(1));
    Ok(())
}

#[test]
fn rollover_needs_previous_distribution() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();
    harness.submit(player(1), 10, 1, 0)?;
    harness.next_period();

    let plan = harness.arena.distribute_rewards(&AUTHORITY, 2)?;
    assert_eq!(plan.total_pool, 5 * UNIT);

    harness.arena.distribute_rewards(&AUTHORITY, 1)?;
    let pool = harness.arena.get_reward_pool(2)?;
    assert_eq!(pool.rollover_amount_in, 0);
    assert_eq!(pool.total_pool_amount, 5 * UNIT);
    assert_eq!(
        harness.arena.get_reward_pool(3)?.rollover_amount_in,
        7 * UNIT / 2
    );
    Ok(())
}
