use fightsim::{
    run_elimination, BoutReason, Corner, Dice, EliminationConfig, EliminationEngine, EngineState, Roster,
    ScriptedDice, SimError, TeamId,
};
use proptest::prelude::*;

#[test]
fn one_vs_one_finish_ends_after_a_single_bout() {
    let cfg = EliminationConfig::default();
    let mut dice = ScriptedDice::new()
        .with_exponentials([10.0])
        .with_uniforms([0.0])
        .with_choices([0]);
    let mut engine =
        EliminationEngine::new(Roster::new("FFM", 1), Roster::new("LEI", 1), cfg).unwrap();
    assert_eq!(engine.state(), EngineState::Running);
    let event = engine.step(&mut dice).cloned().expect("one bout");
    assert_eq!(event.round, 1);
    assert_eq!(event.reason, BoutReason::Finish);
    assert_eq!(event.winner, "FFM-1");
    assert_eq!(event.loser, "LEI-1");
    assert_eq!(event.fatigue_a, 0.0);

    assert_eq!(engine.state(), EngineState::TeamBEmpty);
    assert!(engine.state().is_terminal());
    assert_eq!(engine.roster_a().head().map(|c| c.fatigue), Some(10.0));
    assert_eq!(engine.winning_team(), Some(&TeamId::from("FFM")));
    assert!(engine.step(&mut dice).is_none());

    let (events, result) = engine.run(&mut dice);
    assert_eq!(events.len(), 1);
    assert_eq!(result.winning_team, TeamId::from("FFM"));
    assert_eq!(result.total_bout_duration, 10.0);
    assert_eq!(result.total_break_duration, 0.0);
}

#[test]
fn sweeping_winner_keeps_its_place_and_accumulates_fatigue() {
    let cfg = EliminationConfig::default();
    let mut dice = ScriptedDice::new().with_exponentials([20.0]).with_uniforms([0.0]);
    let (events, result) =
        run_elimination(Roster::new("FFM", 3), Roster::new("LEI", 4), &cfg, &mut dice).unwrap();

    assert_eq!(events.len(), 4);
    for (i, e) in events.iter().enumerate() {
        assert_eq!(e.fighter_a, "FFM-1");
        assert_eq!(e.fighter_b, format!("LEI-{}", i + 1));
        assert_eq!(e.fatigue_a, 20.0 * i as f64);
        assert_eq!(e.fatigue_b, 0.0);
    }
    assert_eq!(result.winning_side, Corner::A);
    assert_eq!(result.winning_team, TeamId::from("FFM"));
    assert_eq!(result.total_bout_duration, 80.0);
    assert_eq!(result.total_break_duration, 180.0);
}

#[test]
fn loser_side_brings_in_next_fighter() {
    let cfg = EliminationConfig::default();
    // B wins every bout
    let mut dice = ScriptedDice::new().with_exponentials([30.0]).with_uniforms([0.999]);
    let (events, result) =
        run_elimination(Roster::new("FFM", 2), Roster::new("LEI", 2), &cfg, &mut dice).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].fighter_a, "FFM-2");
    assert_eq!(events[1].fighter_b, "LEI-1");
    assert_eq!(events[1].fatigue_b, 30.0);
    assert_eq!(result.winning_side, Corner::B);
    assert_eq!(result.winning_team, TeamId::from("LEI"));
}

#[test]
fn empty_roster_is_rejected() {
    let cfg = EliminationConfig::default();
    let err = EliminationEngine::new(Roster::new("FFM", 0), Roster::new("LEI", 2), cfg).unwrap_err();
    assert_eq!(err, SimError::EmptyRosterInput { team: "FFM".into() });
}

#[test]
fn invalid_config_fails_before_any_bout() {
    let cfg = EliminationConfig { round_time: 0.0, ..Default::default() };
    let mut dice = Dice::from_seed(1);
    let res = run_elimination(Roster::new("FFM", 2), Roster::new("LEI", 2), &cfg, &mut dice);
    assert!(matches!(res, Err(SimError::InvalidConfiguration { field: "round_time", .. })));
}

proptest! {
    #[test]
    fn every_bout_removes_exactly_one_fighter(seed in any::<u64>(), na in 1usize..8, nb in 1usize..8) {
        let cfg = EliminationConfig::default();
        let mut dice = Dice::from_seed(seed);
        let mut engine =
            EliminationEngine::new(Roster::new("FFM", na), Roster::new("LEI", nb), cfg).unwrap();

        let mut remaining = na + nb;
        while engine.step(&mut dice).is_some() {
            let now = engine.roster_a().len() + engine.roster_b().len();
            prop_assert_eq!(now, remaining - 1);
            remaining = now;
        }

        prop_assert!(engine.state().is_terminal());
        prop_assert!(engine.roster_a().is_empty() != engine.roster_b().is_empty());
        let survivors = engine.roster_a().len() + engine.roster_b().len();
        prop_assert_eq!(engine.events().len(), na + nb - survivors);
        prop_assert!(engine.events().len() >= na.min(nb));
        prop_assert!(engine.events().len() <= na + nb - 1);
    }

    #[test]
    fn fatigue_only_grows_through_wins(seed in any::<u64>()) {
        let cfg = EliminationConfig::default();
        let mut dice = Dice::from_seed(seed);
        let (events, _) =
            run_elimination(Roster::new("FFM", 5), Roster::new("LEI", 5), &cfg, &mut dice).unwrap();
        for pair in events.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let before = if prev.winner == prev.fighter_a { prev.fatigue_a } else { prev.fatigue_b };
            let after = if next.fighter_a == prev.winner { next.fatigue_a } else { next.fatigue_b };
            prop_assert!((after - before - prev.duration).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_same_bouts(seed in any::<u64>()) {
        let cfg = EliminationConfig::default();
        let run = |seed| {
            let mut dice = Dice::from_seed(seed);
            run_elimination(Roster::new("FFM", 4), Roster::new("LEI", 3), &cfg, &mut dice).unwrap()
        };
        let (first, _) = run(seed);
        let (second, _) = run(seed);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
