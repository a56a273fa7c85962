use tracing::{debug, info};

use crate::bout::{resolve_bout, BoutEvent, Corner};
use crate::config::EliminationConfig;
use crate::error::SimError;
use crate::roster::{Combatant, Roster, TeamId};
use crate::summary::{summarize, TournamentResult};
use crate::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    TeamAEmpty,
    TeamBEmpty,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EngineState::Running)
    }
}

/// Head-to-head elimination between two rosters. Each bout removes the
/// loser; the winner keeps its place and carries its fatigue forward.
#[derive(Debug, Clone)]
pub struct EliminationEngine {
    cfg: EliminationConfig,
    roster_a: Roster<Combatant>,
    roster_b: Roster<Combatant>,
    events: Vec<BoutEvent>,
}

impl EliminationEngine {
    pub fn new(
        roster_a: Roster<Combatant>,
        roster_b: Roster<Combatant>,
        cfg: EliminationConfig,
    ) -> Result<Self, SimError> {
        cfg.validate()?;
        for roster in [&roster_a, &roster_b] {
            if roster.is_empty() {
                return Err(SimError::EmptyRosterInput { team: roster.team().to_string() });
            }
        }
        Ok(Self { cfg, roster_a, roster_b, events: Vec::new() })
    }

    pub fn state(&self) -> EngineState {
        if self.roster_a.is_empty() {
            EngineState::TeamAEmpty
        } else if self.roster_b.is_empty() {
            EngineState::TeamBEmpty
        } else {
            EngineState::Running
        }
    }

    pub fn roster_a(&self) -> &Roster<Combatant> {
        &self.roster_a
    }

    pub fn roster_b(&self) -> &Roster<Combatant> {
        &self.roster_b
    }

    pub fn events(&self) -> &[BoutEvent] {
        &self.events
    }

    /// Fight one bout between the two heads. Returns `None` once a roster
    /// is empty.
    pub fn step(&mut self, rng: &mut impl RandomSource) -> Option<&BoutEvent> {
        let round = self.events.len() as u32 + 1;
        let (Some(a), Some(b)) = (self.roster_a.head_mut(), self.roster_b.head_mut()) else {
            return None;
        };

        let outcome = resolve_bout(a, b, &self.cfg, rng);
        let event = BoutEvent::new(round, a, b, &outcome);
        outcome.apply(a, b);

        debug!(
            round,
            fighter_a = %event.fighter_a,
            fighter_b = %event.fighter_b,
            winner = %event.winner,
            duration = event.duration,
            reason = ?event.reason,
            "bout resolved"
        );

        match outcome.loser() {
            Corner::A => self.roster_a.eliminate_head(),
            Corner::B => self.roster_b.eliminate_head(),
        };
        self.events.push(event);
        self.events.last()
    }

    pub fn winning_team(&self) -> Option<&TeamId> {
        match self.state() {
            EngineState::Running => None,
            EngineState::TeamAEmpty => Some(self.roster_b.team()),
            EngineState::TeamBEmpty => Some(self.roster_a.team()),
        }
    }

    /// Run to completion.
    pub fn run(mut self, rng: &mut impl RandomSource) -> (Vec<BoutEvent>, TournamentResult) {
        while self.step(rng).is_some() {}

        // Both rosters start non-empty and each bout removes exactly one
        // fighter, so the loop always ends with exactly one side empty.
        let (side, team) = match self.state() {
            EngineState::TeamAEmpty => (Corner::B, self.roster_b.team().clone()),
            _ => (Corner::A, self.roster_a.team().clone()),
        };
        let result = summarize(&self.events, self.cfg.break_seconds, side, team);
        info!(
            winner = %result.winning_team,
            bouts = result.bouts,
            total_bout_duration = result.total_bout_duration,
            "elimination finished"
        );
        (self.events, result)
    }
}

pub fn run_elimination(
    roster_a: Roster<Combatant>,
    roster_b: Roster<Combatant>,
    cfg: &EliminationConfig,
    rng: &mut impl RandomSource,
) -> Result<(Vec<BoutEvent>, TournamentResult), SimError> {
    Ok(EliminationEngine::new(roster_a, roster_b, *cfg)?.run(rng))
}
