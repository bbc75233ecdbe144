use arena_sdk::{Clock, ManualClock, Snapshot};

use crate::setup::{player, Harness, AUTHORITY, UNIT};

#[test]
fn snapshot_restores_arena() -> arena_sdk::Result<()> {
    let mut harness = Harness::daily()?;
    harness.fund(100 * UNIT)?;
    harness.submit(player(1), 50, 5, 10)?;
    harness.submit(player(2), 40, 3, 5)?;
    harness.next_period();
    harness.arena.distribute_rewards(&AUTHORITY, 1)?;

    let json = Snapshot::capture(&harness.arena).to_json()?;
    let clock = ManualClock::new(harness.clock.now());
    let restored = Snapshot::from_json(&json)?.into_arena(clock)?;

    assert_eq!(restored.store(), harness.arena.store());
    assert_eq!(restored.ledger(), harness.arena.ledger());
    assert_eq!(restored.current_period(), 2);
    assert_eq!(
        restored.get_total_unclaimed_amount(&player(1)),
        3 * UNIT / 2
    );
    assert_eq!(
        restored.get_leaderboard(1)?,
        harness.arena.get_leaderboard(1)?
    );
    assert_eq!(restored.get_reward_pool(2)?.rollover_amount_in, 5 * UNIT / 2);
    Ok(())
}
