//! End-to-end pricing scenarios against worked numbers

use amm::{
    initialize_pool, AmmError, AssetId, Direction, PairId, Pool, PricingEngine,
};

fn pair() -> PairId {
    PairId::new(AssetId::new([0x11; 32]), AssetId::new([0x22; 32])).unwrap()
}

/// Pool after depositing (100, 200) into an empty pool
fn seeded_pool(engine: &PricingEngine) -> Pool {
    engine
        .deposit(&initialize_pool(pair()), 100, 200, 0)
        .unwrap()
        .pool
}

#[test]
fn test_first_deposit_sets_price() {
    let engine = PricingEngine::default();
    let outcome = engine
        .deposit(&initialize_pool(pair()), 100, 200, 141)
        .unwrap();

    assert_eq!(outcome.shares_minted, 141);
    assert_eq!((outcome.amount_a, outcome.amount_b), (100, 200));
    assert_eq!(outcome.pool.reserve_a(), 100);
    assert_eq!(outcome.pool.reserve_b(), 200);
    assert_eq!(outcome.pool.share_supply(), 141);
}

#[test]
fn test_swap_a_for_b() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);

    let outcome = engine.swap(&pool, 10, 18, Direction::AToB).unwrap();

    assert_eq!(outcome.amount_out, 18);
    assert_eq!(outcome.pool.reserve_a(), 110);
    assert_eq!(outcome.pool.reserve_b(), 182);
    assert_eq!(outcome.pool.share_supply(), 141);
    assert!(outcome.pool.invariant() >= pool.invariant());
}

#[test]
fn test_quote_matches_swap() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);

    let quote = engine.quote(&pool, 10, Direction::AToB).unwrap();
    assert_eq!(quote.amount_out, 18);
    assert_eq!(quote.fee_paid, 1);
    assert_eq!(quote.price_impact_bps, 1_000);

    // Quoting is read-only
    assert_eq!(pool.reserve_a(), 100);
}

#[test]
fn test_ratio_deposit_takes_only_what_the_ratio_needs() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);

    let outcome = engine.deposit(&pool, 50, 1_000, 0).unwrap();

    assert_eq!((outcome.amount_a, outcome.amount_b), (50, 100));
    assert_eq!(outcome.shares_minted, 70);
    assert_eq!(outcome.pool.reserve_a(), 150);
    assert_eq!(outcome.pool.reserve_b(), 300);
    assert_eq!(outcome.pool.share_supply(), 211);
}

#[test]
fn test_partial_withdrawal_floors_payouts() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);

    let outcome = engine.withdraw(&pool, 70, 49, 99).unwrap();

    assert_eq!((outcome.amount_a, outcome.amount_b), (49, 99));
    assert_eq!(outcome.pool.reserve_a(), 51);
    assert_eq!(outcome.pool.reserve_b(), 101);
    assert_eq!(outcome.pool.share_supply(), 71);
}

#[test]
fn test_full_withdrawal_empties_pool() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);
    let traded = engine.swap(&pool, 10, 0, Direction::AToB).unwrap().pool;

    let outcome = engine
        .withdraw(&traded, traded.share_supply(), 0, 0)
        .unwrap();

    assert_eq!((outcome.amount_a, outcome.amount_b), (110, 182));
    assert_eq!(outcome.pool.reserve_a(), 0);
    assert_eq!(outcome.pool.reserve_b(), 0);
    assert!(outcome.pool.is_empty());

    // A drained pool can be seeded again at a new price
    let reseeded = engine.deposit(&outcome.pool, 400, 100, 0).unwrap();
    assert_eq!(reseeded.shares_minted, 200);
}

#[test]
fn test_initialize_twice_is_rejected() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);
    assert_eq!(
        engine.initialize(&pool),
        Err(AmmError::AlreadyInitialized { share_supply: 141 })
    );
}

#[test]
fn test_swap_cannot_drain_output_side() {
    let engine = PricingEngine::default();
    let pool = seeded_pool(&engine);

    // Even an enormous input leaves at least one unit behind
    let outcome = engine
        .swap(&pool, u64::MAX - 100, 0, Direction::AToB)
        .unwrap();
    assert!(outcome.pool.reserve_b() >= 1);
    assert!(outcome.amount_out < 200);
}

#[test]
fn test_fees_accrue_to_liquidity_providers() {
    let engine = PricingEngine::default();
    let mut pool = seeded_pool(&engine);

    for _ in 0..10 {
        pool = engine.swap(&pool, 10, 0, Direction::AToB).unwrap().pool;
        let back = engine.quote(&pool, 10, Direction::BToA).unwrap();
        pool = engine
            .swap(&pool, 10, back.amount_out, Direction::BToA)
            .unwrap()
            .pool;
    }

    assert!(pool.invariant() > 20_000);
    let exit = engine.withdraw(&pool, 141, 0, 0).unwrap();
    assert!(exit.amount_a as u128 * exit.amount_b as u128 > 20_000);
}
