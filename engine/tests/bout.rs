use fightsim::{
    resolve_bout, BoutEvent, BoutOutcome, BoutReason, Combatant, Corner, Dice, EliminationConfig,
    FinishMethod, ScriptedDice, TeamId,
};
use proptest::prelude::*;

fn pair() -> (Combatant, Combatant) {
    (
        Combatant::new("FFM-1", TeamId::from("FFM")),
        Combatant::new("LEI-1", TeamId::from("LEI")),
    )
}

#[test]
fn early_finish_goes_to_weighted_winner() {
    let cfg = EliminationConfig::default();
    let (a, b) = pair();
    let mut dice = ScriptedDice::new()
        .with_exponentials([10.0])
        .with_uniforms([0.1])
        .with_choices([2]);
    let out = resolve_bout(&a, &b, &cfg, &mut dice);
    assert_eq!(out.reason, BoutReason::Finish);
    assert_eq!(out.winner, Corner::A);
    assert_eq!(out.loser(), Corner::B);
    assert_eq!(out.duration, 10.0);
    assert_eq!(out.method, Some(FinishMethod::Submission));
}

#[test]
fn reaching_round_time_is_a_decision() {
    let cfg = EliminationConfig::default();
    let (a, b) = pair();
    let mut dice = ScriptedDice::new().with_exponentials([450.0]).with_uniforms([0.7]);
    let out = resolve_bout(&a, &b, &cfg, &mut dice);
    assert_eq!(out.reason, BoutReason::Decision);
    assert_eq!(out.duration, cfg.round_time);
    assert_eq!(out.winner, Corner::B);
    assert_eq!(out.method, None);
}

#[test]
fn fresher_fighter_is_favoured_on_finish() {
    let cfg = EliminationConfig::default();
    let (mut a, b) = pair();
    // one full round of fatigue: rate_a = 1.35 * base, so P(a wins) = 1 / 2.35
    a.fatigue = 300.0;
    let p_a = 1.0 / 2.35;

    let mut just_below = ScriptedDice::new().with_exponentials([5.0]).with_uniforms([p_a - 0.001]);
    assert_eq!(resolve_bout(&a, &b, &cfg, &mut just_below).winner, Corner::A);

    let mut just_above = ScriptedDice::new().with_exponentials([5.0]).with_uniforms([p_a + 0.001]);
    assert_eq!(resolve_bout(&a, &b, &cfg, &mut just_above).winner, Corner::B);
}

#[test]
fn applying_an_outcome_only_tires_the_winner() {
    let cfg = EliminationConfig::default();
    let (mut a, mut b) = pair();
    b.fatigue = 42.0;
    let mut dice = ScriptedDice::new().with_exponentials([80.0]).with_uniforms([0.99]);
    let out = resolve_bout(&a, &b, &cfg, &mut dice);
    assert_eq!(out.winner, Corner::B);
    out.apply(&mut a, &mut b);
    assert_eq!(a.fatigue, 0.0);
    assert_eq!(b.fatigue, 122.0);
}

#[test]
fn event_line_renders_method_and_duration() {
    let cfg = EliminationConfig::default();
    let (a, b) = pair();
    let mut dice = ScriptedDice::new()
        .with_exponentials([10.0])
        .with_uniforms([0.0])
        .with_choices([0]);
    let out = resolve_bout(&a, &b, &cfg, &mut dice);
    let event = BoutEvent::new(1, &a, &b, &out);
    assert_eq!(event.method_label(), "KO");
    insta::assert_snapshot!(event.to_string(), @"[BOUT 1] FFM-1 vs LEI-1 → FFM-1 def. LEI-1 by KO in 10.0s");

    let mut dice = ScriptedDice::new().with_exponentials([301.0]).with_uniforms([0.9]);
    let out = resolve_bout(&a, &b, &cfg, &mut dice);
    let event = BoutEvent::new(2, &a, &b, &out);
    assert_eq!(event.method_label(), "Decision");
    insta::assert_snapshot!(event.to_string(), @"[BOUT 2] FFM-1 vs LEI-1 → LEI-1 def. FFM-1 by Decision in 300.0s");
}

#[test]
fn finish_without_method_is_labelled_finish() {
    let (a, b) = pair();
    let out = BoutOutcome { winner: Corner::A, duration: 5.0, reason: BoutReason::Finish, method: None };
    let event = BoutEvent::new(3, &a, &b, &out);
    assert_eq!(event.method_label(), "Finish");
}

proptest! {
    #[test]
    fn outcomes_respect_round_time(seed in any::<u64>(), fa in 0.0f64..3_000.0, fb in 0.0f64..3_000.0) {
        let cfg = EliminationConfig::default();
        let (mut a, mut b) = pair();
        a.fatigue = fa;
        b.fatigue = fb;
        let mut dice = Dice::from_seed(seed);
        let out = resolve_bout(&a, &b, &cfg, &mut dice);
        prop_assert!(out.duration >= 0.0 && out.duration <= cfg.round_time);
        prop_assert_ne!(out.winner, out.loser());
        prop_assert_eq!(out.method.is_some(), out.reason == BoutReason::Finish);
        if out.reason == BoutReason::Decision {
            prop_assert_eq!(out.duration, cfg.round_time);
        }
    }
}
