//! Property tests for the VaR estimators.
//!
//! These tests verify orderings and identities that should hold for any
//! return sample:
//! - CVaR never exceeds historical VaR
//! - A constant sample has VaR equal to the constant
//! - VaR is monotone in the confidence level
//! - Seeded Monte Carlo runs are reproducible

use marisk_risk::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

/// Generates `n` returns in roughly [-5%, +5%].
fn generate_returns(n: usize, seed: u64) -> Vec<f64> {
    (0..n)
        .map(|i| (simple_hash(seed, i as u64) % 10_001) as f64 / 100_000.0 - 0.05)
        .collect()
}

// =============================================================================
// PROPERTY: CVAR <= VAR
// =============================================================================

#[test]
fn property_cvar_not_above_var() {
    for seed in 0..10 {
        for size in [5, 20, 100, 500] {
            let returns = generate_returns(size, seed);
            for c in [0.8, 0.9, 0.95, 0.99] {
                let var = historical_var(&returns, c).unwrap();
                let cvar = conditional_var(&returns, c).unwrap();
                assert!(
                    cvar.value <= var.value + 1e-15,
                    "CVaR {} above VaR {} for size={}, seed={}, c={}",
                    cvar.value,
                    var.value,
                    size,
                    seed,
                    c
                );
            }
        }
    }
}

// =============================================================================
// PROPERTY: MONOTONE IN CONFIDENCE
// =============================================================================

#[test]
fn property_var_monotone_in_confidence() {
    for seed in 0..10 {
        let returns = generate_returns(250, seed);
        let levels = [0.5, 0.8, 0.9, 0.95, 0.99];

        let historical: Vec<f64> = levels
            .iter()
            .map(|c| historical_var(&returns, *c).unwrap().value)
            .collect();
        let parametric: Vec<f64> = levels
            .iter()
            .map(|c| parametric_var(&returns, *c).unwrap().value)
            .collect();

        for w in historical.windows(2) {
            assert!(w[1] <= w[0], "historical VaR not monotone: {:?}", historical);
        }
        for w in parametric.windows(2) {
            assert!(w[1] <= w[0], "parametric VaR not monotone: {:?}", parametric);
        }
    }
}

// =============================================================================
// PROPERTY: REPRODUCIBLE MONTE CARLO
// =============================================================================

#[test]
fn property_monte_carlo_reproducible() {
    let config = MonteCarloConfig::default().with_simulations(2_000);

    for seed in 0..5 {
        let returns = generate_returns(100, seed);
        for model in [SimulationModel::Normal, SimulationModel::Bootstrap] {
            let config = config.with_model(model);
            let a = monte_carlo_var(&returns, 0.95, &config, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            let b = monte_carlo_var(&returns, 0.95, &config, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(a.value, b.value);
        }
    }
}

// =============================================================================
// PROPTEST
// =============================================================================

proptest! {
    #[test]
    fn historical_var_is_a_sample_member(
        returns in prop::collection::vec(-0.2f64..0.2, 1..200),
        c in 0.01f64..0.99,
    ) {
        let var = historical_var(&returns, c).unwrap();
        prop_assert!(returns.contains(&var.value));
    }

    #[test]
    fn constant_sample_var_is_the_constant(
        r in -0.1f64..0.1,
        n in 1usize..100,
        c in 0.01f64..0.99,
    ) {
        let returns = vec![r; n];
        prop_assert_eq!(historical_var(&returns, c).unwrap().value, r);
        let cvar = conditional_var(&returns, c).unwrap().value;
        prop_assert!((cvar - r).abs() < 1e-12);
    }

    #[test]
    fn confidence_outside_unit_interval_rejected(c in prop_oneof![-1.0f64..=0.0, 1.0f64..2.0]) {
        let is_invalid = matches!(
            historical_var(&[0.01, 0.02], c),
            Err(RiskError::InvalidInput { .. })
        );
        prop_assert!(is_invalid);
    }
}
