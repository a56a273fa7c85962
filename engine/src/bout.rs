use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EliminationConfig;
use crate::fatigue::hazard_rate;
use crate::roster::Combatant;
use crate::RandomSource;

/// Side of a bout: `A` is always the first team's fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    A,
    B,
}

impl Corner {
    pub fn opponent(self) -> Corner {
        match self {
            Corner::A => Corner::B,
            Corner::B => Corner::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoutReason {
    Finish,
    Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishMethod {
    #[serde(rename = "KO")]
    Ko,
    #[serde(rename = "TKO")]
    Tko,
    Submission,
    #[serde(rename = "DQ")]
    Dq,
}

impl FinishMethod {
    pub const ALL: [FinishMethod; 4] =
        [FinishMethod::Ko, FinishMethod::Tko, FinishMethod::Submission, FinishMethod::Dq];

    pub fn draw(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.choose(Self::ALL.len())]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FinishMethod::Ko => "KO",
            FinishMethod::Tko => "TKO",
            FinishMethod::Submission => "Submission",
            FinishMethod::Dq => "DQ",
        }
    }
}

impl fmt::Display for FinishMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one fatigue-weighted bout. Carries no references so the engine
/// decides how to apply it to its rosters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoutOutcome {
    pub winner: Corner,
    /// Seconds fought, in `[0, round_time]`.
    pub duration: f64,
    pub reason: BoutReason,
    /// Set only for finishes.
    pub method: Option<FinishMethod>,
}

impl BoutOutcome {
    pub fn loser(&self) -> Corner {
        self.winner.opponent()
    }

    /// Credit the bout time to the winner. The loser is left untouched.
    pub fn apply(&self, a: &mut Combatant, b: &mut Combatant) {
        let winner = match self.winner {
            Corner::A => a,
            Corner::B => b,
        };
        winner.fatigue += self.duration;
    }
}

/// Resolve a bout as two competing exponential finish clocks.
///
/// Time to the first finish is exponential in `rate_a + rate_b`. On a finish,
/// `a` wins with probability `rate_b / (rate_a + rate_b)`: each side's own
/// hazard is the chance that *they* are the one finished. Reaching
/// `round_time` goes to a coin-flip decision.
pub fn resolve_bout(
    a: &Combatant,
    b: &Combatant,
    cfg: &EliminationConfig,
    rng: &mut impl RandomSource,
) -> BoutOutcome {
    let rate_a = hazard_rate(a.fatigue, cfg);
    let rate_b = hazard_rate(b.fatigue, cfg);
    let total = rate_a + rate_b;

    let finish_time = rng.exponential(total);
    if finish_time < cfg.round_time {
        let p_a = rate_b / total;
        let winner = if rng.uniform() < p_a { Corner::A } else { Corner::B };
        BoutOutcome {
            winner,
            duration: finish_time.max(0.0),
            reason: BoutReason::Finish,
            method: Some(FinishMethod::draw(rng)),
        }
    } else {
        let winner = if rng.uniform() < 0.5 { Corner::A } else { Corner::B };
        BoutOutcome {
            winner,
            duration: cfg.round_time,
            reason: BoutReason::Decision,
            method: None,
        }
    }
}

/// Per-bout record handed to the presentation layer. Fatigue values are
/// taken as the fighters entered the bout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoutEvent {
    pub round: u32,
    pub fighter_a: String,
    pub fighter_b: String,
    pub fatigue_a: f64,
    pub fatigue_b: f64,
    pub winner: String,
    pub loser: String,
    pub duration: f64,
    pub reason: BoutReason,
    pub method: Option<FinishMethod>,
}

impl BoutEvent {
    pub fn new(round: u32, a: &Combatant, b: &Combatant, outcome: &BoutOutcome) -> Self {
        let (winner, loser) = match outcome.winner {
            Corner::A => (a, b),
            Corner::B => (b, a),
        };
        Self {
            round,
            fighter_a: a.name.clone(),
            fighter_b: b.name.clone(),
            fatigue_a: a.fatigue,
            fatigue_b: b.fatigue,
            winner: winner.name.clone(),
            loser: loser.name.clone(),
            duration: outcome.duration,
            reason: outcome.reason,
            method: outcome.method,
        }
    }

    /// Finish method, or "Decision" when the bout went the distance.
    pub fn method_label(&self) -> &'static str {
        match (self.reason, self.method) {
            (BoutReason::Finish, Some(m)) => m.as_str(),
            (BoutReason::Finish, None) => "Finish",
            (BoutReason::Decision, _) => "Decision",
        }
    }
}

impl fmt::Display for BoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[BOUT {}] {} vs {} → {} def. {} by {} in {:.1}s",
            self.round,
            self.fighter_a,
            self.fighter_b,
            self.winner,
            self.loser,
            self.method_label(),
            self.duration
        )
    }
}
