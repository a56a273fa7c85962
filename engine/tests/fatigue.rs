use fightsim::{fatigue_multiplier, EliminationConfig};
use fightsim::fatigue::hazard_rate;
use proptest::prelude::*;

#[test]
fn fresh_combatant_has_no_penalty() {
    let cfg = EliminationConfig::default();
    assert_eq!(fatigue_multiplier(0.0, &cfg), 1.0);
    assert_eq!(hazard_rate(0.0, &cfg), cfg.base_lambda);
}

#[test]
fn one_full_round_adds_the_fatigue_factor() {
    let cfg = EliminationConfig::default();
    assert!((fatigue_multiplier(300.0, &cfg) - 1.35).abs() < 1e-12);
    assert!((fatigue_multiplier(600.0, &cfg) - 1.70).abs() < 1e-12);
}

#[test]
fn growth_is_unbounded() {
    let cfg = EliminationConfig::default();
    assert!(fatigue_multiplier(300.0 * 100.0, &cfg) > 35.0);
}

#[test]
fn zero_factor_disables_fatigue() {
    let cfg = EliminationConfig { fatigue_factor: 0.0, ..Default::default() };
    assert_eq!(fatigue_multiplier(1_000.0, &cfg), 1.0);
}

proptest! {
    #[test]
    fn multiplier_strictly_increases(x in 0.0f64..10_000.0, dx in 0.01f64..1_000.0) {
        let cfg = EliminationConfig::default();
        prop_assert!(fatigue_multiplier(x + dx, &cfg) > fatigue_multiplier(x, &cfg));
    }
}
