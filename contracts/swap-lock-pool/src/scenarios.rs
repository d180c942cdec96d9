//! End-to-end pool flows and randomized operation sequences.

use crate::testutils::{seed, setup, setup_with_allow_list, PoolFixture};
use crate::SwapLockPoolClient;
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use swap_types::{Direction, PoolError, TokenBalance};

fn product(client: &SwapLockPoolClient) -> u128 {
    let state = client.pool_state();
    state.reserve_a * state.reserve_b
}

// === Pricing Scenarios ===

#[test]
fn test_feeless_swap_matches_formula() {
    let fixture = setup(0);
    let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
    seed(&fixture, 1000, 1000);
    let trader = Address::generate(&fixture.env);
    fixture.token_a.deposit_into(&client, &trader, 4);

    // floor(2 * 1000 * 1000 / (1000 * 1000 + 2 * 1000)) = 1, by either path
    assert_eq!(client.instant_swap(&trader, &fixture.token_a.address, &2, &0), 1);

    let lock_id = client.acquire_swap_lock(&trader, &fixture.token_a.address, &2, &0);
    assert_eq!(client.get_lock(&lock_id).unwrap().amount_out, 1);
}

#[test]
fn test_cancelled_drain_cannot_be_exploited() {
    let fixture = setup(0);
    let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
    seed(&fixture, 1_000_000_000, 1_000_000_000);
    let initial_product = product(&client);

    let attacker = Address::generate(&fixture.env);
    fixture
        .token_a
        .deposit_into(&client, &attacker, 10_000_000_000);
    fixture
        .token_b
        .deposit_into(&client, &attacker, 1_999_999_998);

    // A huge A -> B lock drains the virtual B side close to zero
    let drain = client.acquire_swap_lock(&attacker, &fixture.token_a.address, &10_000_000_000, &0);
    assert_eq!(client.get_lock(&drain).unwrap().amount_out, 909_090_909);

    // B -> A locks are priced without the drain, which may still be cancelled
    let second = client.acquire_swap_lock(&attacker, &fixture.token_b.address, &999_999_999, &0);
    let third = client.acquire_swap_lock(&attacker, &fixture.token_b.address, &999_999_999, &0);
    assert_eq!(client.get_lock(&second).unwrap().amount_out, 499_999_999);
    assert_eq!(client.get_lock(&third).unwrap().amount_out, 166_666_666);

    client.cancel_lock(&attacker, &drain);
    client.execute_lock_swap(&attacker, &second);
    client.execute_lock_swap(&attacker, &third);

    let final_product = product(&client);
    assert_eq!(final_product, 1_000_000_004_333_333_330);
    assert!(final_product >= initial_product);
    assert_eq!(client.locked_collateral(), TokenBalance::default());
    client.verify_invariants();
}

#[test]
fn test_any_cancellation_order_keeps_product() {
    let orders: [[usize; 3]; 3] = [[0, 1, 2], [1, 0, 2], [2, 1, 0]];
    for order in orders {
        let fixture = setup(0);
        let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
        seed(&fixture, 1_000_000, 1_000_000);
        let initial_product = product(&client);
        let trader = Address::generate(&fixture.env);
        fixture.token_a.deposit_into(&client, &trader, 20_000_000);
        fixture.token_b.deposit_into(&client, &trader, 2_000_000);

        let ids = [
            client.acquire_swap_lock(&trader, &fixture.token_a.address, &10_000_000, &0),
            client.acquire_swap_lock(&trader, &fixture.token_b.address, &900_000, &0),
            client.acquire_swap_lock(&trader, &fixture.token_b.address, &900_000, &0),
        ];

        // The first lock in `order` is cancelled, the rest execute in id order
        client.cancel_lock(&trader, &ids[order[0]]);
        let mut remaining = [ids[order[1]], ids[order[2]]];
        remaining.sort_unstable();
        for lock_id in remaining {
            let before = product(&client);
            client.execute_lock_swap(&trader, &lock_id);
            assert!(product(&client) >= before);
        }
        assert!(product(&client) >= initial_product);
    }
}

// === Permission Scenarios ===

#[test]
fn test_stranger_cannot_acquire_lock() {
    let (fixture, allowed) = setup_with_allow_list(0, 1);
    let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
    seed(&fixture, 1000, 1000);
    let stranger = Address::generate(&fixture.env);
    fixture.token_a.deposit_into(&client, &stranger, 10);

    let state_before = client.pool_state();
    let balance_before = client.get_balance(&stranger);
    assert_eq!(
        client.try_acquire_swap_lock(&stranger, &fixture.token_a.address, &10, &0),
        Err(Ok(PoolError::UnauthorizedLockSwap))
    );
    assert_eq!(client.next_lock_id(), 0);
    assert_eq!(client.virtual_state().locks.len(), 0);
    assert_eq!(client.pool_state(), state_before);
    assert_eq!(client.get_balance(&stranger), balance_before);
    assert_eq!(client.locked_collateral(), TokenBalance::default());

    // Allowed members go through
    let member = allowed.get(0).unwrap();
    fixture.token_a.deposit_into(&client, &member, 10);
    let lock_id = client.acquire_swap_lock(&member, &fixture.token_a.address, &10, &0);

    // Settling someone else's lock needs the same permission
    assert_eq!(
        client.try_execute_lock_swap(&stranger, &lock_id),
        Err(Ok(PoolError::UnauthorizedLockSwap))
    );
    assert_eq!(
        client.try_cancel_lock(&stranger, &lock_id),
        Err(Ok(PoolError::UnauthorizedLockSwap))
    );
    client.execute_lock_swap(&member, &lock_id);
}

#[test]
fn test_stranger_cannot_swap_instantly() {
    let (fixture, allowed) = setup_with_allow_list(3, 2);
    let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
    seed(&fixture, 1000, 1000);
    let stranger = Address::generate(&fixture.env);
    fixture.token_b.deposit_into(&client, &stranger, 10);

    assert_eq!(
        client.try_instant_swap(&stranger, &fixture.token_b.address, &10, &0),
        Err(Ok(PoolError::UnauthorizedInstantSwap))
    );
    assert_eq!(client.pool_state().reserve_b, 1000);

    // Ledger and liquidity entry points stay open to everyone
    client.withdraw(&stranger, &fixture.token_b.address, &10, &false);

    let member = allowed.get(1).unwrap();
    fixture.token_b.deposit_into(&client, &member, 10);
    assert_eq!(client.instant_swap(&member, &fixture.token_b.address, &10, &0), 9);
}

// === Random Operation Sequences ===

#[derive(Clone, Debug)]
enum Op {
    Deposit { who: usize, token_a: bool, amount: u128 },
    Withdraw { who: usize, token_a: bool, amount: u128 },
    Provide { who: usize, token_a: bool, amount: u128 },
    Reclaim { who: usize, shares: u128 },
    InstantSwap { who: usize, token_a: bool, amount: u128 },
    Acquire { who: usize, token_a: bool, amount: u128, minimum_out: u128 },
    Execute { who: usize, pick: u64 },
    Cancel { who: usize, pick: u64 },
}

const ACCOUNTS: usize = 4;

fn op_strategy() -> impl Strategy<Value = Op> {
    let who = 0..ACCOUNTS;
    prop_oneof![
        (who.clone(), any::<bool>(), 1u128..50_000)
            .prop_map(|(who, token_a, amount)| Op::Deposit { who, token_a, amount }),
        (who.clone(), any::<bool>(), 1u128..20_000)
            .prop_map(|(who, token_a, amount)| Op::Withdraw { who, token_a, amount }),
        (who.clone(), any::<bool>(), 1u128..20_000)
            .prop_map(|(who, token_a, amount)| Op::Provide { who, token_a, amount }),
        (who.clone(), 1u128..20_000).prop_map(|(who, shares)| Op::Reclaim { who, shares }),
        (who.clone(), any::<bool>(), 1u128..30_000)
            .prop_map(|(who, token_a, amount)| Op::InstantSwap { who, token_a, amount }),
        (who.clone(), any::<bool>(), 1u128..30_000, 0u128..100).prop_map(
            |(who, token_a, amount, minimum_out)| Op::Acquire {
                who,
                token_a,
                amount,
                minimum_out,
            }
        ),
        (who.clone(), any::<u64>()).prop_map(|(who, pick)| Op::Execute { who, pick }),
        (who, any::<u64>()).prop_map(|(who, pick)| Op::Cancel { who, pick }),
    ]
}

fn token<'a>(fixture: &'a PoolFixture, token_a: bool) -> &'a Address {
    if token_a {
        &fixture.token_a.address
    } else {
        &fixture.token_b.address
    }
}

/// Lock id derived from `pick`, landing on an issued id most of the time
fn pick_lock(client: &SwapLockPoolClient, pick: u64) -> u64 {
    pick % (client.next_lock_id() + 1)
}

fn assert_ledger_consistent(
    fixture: &PoolFixture,
    client: &SwapLockPoolClient,
    accounts: &[Address],
) {
    let pool_entry = client.get_balance(&fixture.pool);
    let collateral = client.locked_collateral();

    let mut held_a = pool_entry.a_tokens + collateral.a_tokens;
    let mut held_b = pool_entry.b_tokens + collateral.b_tokens;
    let mut shares = 0u128;
    for account in accounts {
        let balance = client.get_balance(account);
        assert_eq!(client.has_ledger_entry(account), balance != TokenBalance::default());
        held_a += balance.a_tokens;
        held_b += balance.b_tokens;
        shares += balance.liquidity_tokens;
    }

    // Every backing token in custody is owed to exactly one ledger field
    assert_eq!(fixture.token_a.balance(&fixture.pool) as u128, held_a);
    assert_eq!(fixture.token_b.balance(&fixture.pool) as u128, held_b);
    assert_eq!(shares, pool_entry.liquidity_tokens);
    assert_eq!(
        client.has_ledger_entry(&fixture.pool),
        pool_entry != TokenBalance::default()
    );

    let virtual_state = client.virtual_state();
    assert_eq!(virtual_state.lock_sums.a_in, collateral.a_tokens);
    assert_eq!(virtual_state.lock_sums.b_in, collateral.b_tokens);
    let (mut sum_a, mut sum_b) = (0u128, 0u128);
    for lock in virtual_state.locks.iter() {
        match lock.direction {
            Direction::AToB => sum_a += lock.amount_in,
            Direction::BToA => sum_b += lock.amount_in,
        }
    }
    assert_eq!((sum_a, sum_b), (collateral.a_tokens, collateral.b_tokens));

    client.verify_invariants();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_sequences_keep_invariants(
        fee_per_mille in prop_oneof![Just(0u32), Just(3u32), 0u32..=30],
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let fixture = setup(fee_per_mille);
        let client = SwapLockPoolClient::new(&fixture.env, &fixture.pool);
        let provider = seed(&fixture, 100_000, 50_000);
        let accounts = [
            provider,
            Address::generate(&fixture.env),
            Address::generate(&fixture.env),
            Address::generate(&fixture.env),
        ];

        for op in ops {
            let before = product(&client);
            let settles = match op {
                Op::Deposit { who, token_a, amount } => {
                    let backing = if token_a { &fixture.token_a } else { &fixture.token_b };
                    backing.deposit_into(&client, &accounts[who], amount as i128);
                    false
                }
                Op::Withdraw { who, token_a, amount } => {
                    let result = client.try_withdraw(&accounts[who], token(&fixture, token_a), &amount, &false);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    false
                }
                Op::Provide { who, token_a, amount } => {
                    let result = client.try_provide_liquidity(&accounts[who], token(&fixture, token_a), &amount);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    false
                }
                Op::Reclaim { who, shares } => {
                    let result = client.try_reclaim_liquidity(&accounts[who], &shares);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    false
                }
                Op::InstantSwap { who, token_a, amount } => {
                    let result = client.try_instant_swap(&accounts[who], token(&fixture, token_a), &amount, &0);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    result.is_ok()
                }
                Op::Acquire { who, token_a, amount, minimum_out } => {
                    let result = client.try_acquire_swap_lock(&accounts[who], token(&fixture, token_a), &amount, &minimum_out);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    prop_assert_eq!(product(&client), before);
                    false
                }
                Op::Execute { who, pick } => {
                    let lock_id = pick_lock(&client, pick);
                    let result = client.try_execute_lock_swap(&accounts[who], &lock_id);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    result.is_ok()
                }
                Op::Cancel { who, pick } => {
                    let lock_id = pick_lock(&client, pick);
                    let result = client.try_cancel_lock(&accounts[who], &lock_id);
                    prop_assert_ne!(result, Err(Ok(PoolError::InvariantViolation)));
                    prop_assert_eq!(product(&client), before);
                    false
                }
            };

            if settles {
                prop_assert!(product(&client) >= before);
            }
            assert_ledger_consistent(&fixture, &client, &accounts);
        }

        // Unwinding every lock restores a lock-free pool
        let mut lock_id = 0;
        while lock_id < client.next_lock_id() {
            if client.get_lock(&lock_id).is_some() {
                client.cancel_lock(&accounts[0], &lock_id);
            }
            lock_id += 1;
        }
        prop_assert_eq!(client.locked_collateral(), TokenBalance::default());
        assert_ledger_consistent(&fixture, &client, &accounts);
    }
}
