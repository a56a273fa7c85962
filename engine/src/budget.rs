//! Time-budget league format.
//!
//! Every fighter brings a fixed amount of fight time and a cap on entries.
//! Bouts pair a random eligible fighter from each team. A finish costs the
//! loser their whole remaining time; a bout that runs out the clock costs
//! both sides the elapsed time. A team loses once its pooled time is gone.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bout::{Corner, FinishMethod};
use crate::config::BudgetConfig;
use crate::error::SimError;
use crate::roster::{BudgetFighter, Roster, TeamId};
use crate::RandomSource;

/// Result of a single budget bout. `winner` is `None` when time expired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBout {
    pub duration: f64,
    pub winner: Option<Corner>,
    pub method: Option<FinishMethod>,
    /// Remaining time the loser gave up on a finish; 0 on time expiry.
    pub time_forfeited: f64,
    pub time_left_a: f64,
    pub time_left_b: f64,
}

impl BudgetBout {
    pub fn is_time_expired(&self) -> bool {
        self.winner.is_none()
    }

    pub fn loser(&self) -> Option<Corner> {
        self.winner.map(Corner::opponent)
    }
}

/// Fight one budget bout, charging time and entries to both fighters.
pub fn resolve_budget_bout(
    a: &mut BudgetFighter,
    b: &mut BudgetFighter,
    cfg: &BudgetConfig,
    rng: &mut impl RandomSource,
) -> BudgetBout {
    let duration = rng
        .exponential(cfg.lambda_finish_rate)
        .clamp(0.0, cfg.max_time_per_entry);

    if duration < cfg.max_time_per_entry {
        let method = FinishMethod::draw(rng);
        let winner = if rng.choose(2) == 0 { Corner::A } else { Corner::B };
        let (won, lost) = match winner {
            Corner::A => (&mut *a, &mut *b),
            Corner::B => (&mut *b, &mut *a),
        };

        let time_forfeited = lost.time_left;
        lost.time_left = 0.0;
        lost.entries += 1;
        won.spend(duration);

        BudgetBout {
            duration,
            winner: Some(winner),
            method: Some(method),
            time_forfeited,
            time_left_a: a.time_left,
            time_left_b: b.time_left,
        }
    } else {
        a.spend(duration);
        b.spend(duration);
        BudgetBout {
            duration,
            winner: None,
            method: None,
            time_forfeited: 0.0,
            time_left_a: a.time_left,
            time_left_b: b.time_left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEvent {
    pub round: u32,
    pub fighter_a: String,
    pub fighter_b: String,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub duration: f64,
    pub method: Option<FinishMethod>,
    pub time_forfeited: f64,
    pub time_left_a: f64,
    pub time_left_b: f64,
    pub team_time_a: f64,
    pub team_time_b: f64,
}

impl BudgetEvent {
    /// Human-readable method, "Time expired" when nobody was finished.
    pub fn method_label(&self) -> &'static str {
        self.method.map_or("Time expired", FinishMethod::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetVerdict {
    TeamATimeExhausted,
    TeamBTimeExhausted,
    BothExhausted,
    /// No eligible fighter left on a side while both teams still had time.
    PrematureHalt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub bouts: u32,
    pub total_bout_duration: f64,
    pub time_left_a: f64,
    pub time_left_b: f64,
    pub verdict: BudgetVerdict,
    pub team_a: TeamId,
    pub team_b: TeamId,
}

impl BudgetResult {
    /// Winning team, `None` on a draw or a premature halt.
    pub fn winning_team(&self) -> Option<&TeamId> {
        match self.verdict {
            BudgetVerdict::TeamATimeExhausted => Some(&self.team_b),
            BudgetVerdict::TeamBTimeExhausted => Some(&self.team_a),
            BudgetVerdict::BothExhausted | BudgetVerdict::PrematureHalt => None,
        }
    }

    /// Decisive outcome: `Ok(Some(team))` for a win, `Ok(None)` for a draw.
    /// A premature halt is an error rather than a result.
    pub fn decisive(&self) -> Result<Option<&TeamId>, SimError> {
        match self.verdict {
            BudgetVerdict::PrematureHalt => Err(SimError::PrematureHalt {
                round: self.bouts,
                time_left_a: self.time_left_a,
                time_left_b: self.time_left_b,
            }),
            _ => Ok(self.winning_team()),
        }
    }
}

fn pick(roster: &Roster<BudgetFighter>, cfg: &BudgetConfig, rng: &mut impl RandomSource) -> Option<usize> {
    let eligible = roster.eligible(cfg);
    if eligible.is_empty() {
        return None;
    }
    Some(eligible[rng.choose(eligible.len())])
}

pub fn run_budget(
    mut roster_a: Roster<BudgetFighter>,
    mut roster_b: Roster<BudgetFighter>,
    cfg: &BudgetConfig,
    rng: &mut impl RandomSource,
) -> Result<(Vec<BudgetEvent>, BudgetResult), SimError> {
    cfg.validate()?;
    for roster in [&roster_a, &roster_b] {
        if roster.is_empty() {
            return Err(SimError::EmptyRosterInput { team: roster.team().to_string() });
        }
    }

    let mut events = Vec::new();
    while roster_a.time_left() > 0.0 && roster_b.time_left() > 0.0 {
        let (Some(ia), Some(ib)) = (pick(&roster_a, cfg, rng), pick(&roster_b, cfg, rng)) else {
            break;
        };
        let (Some(a), Some(b)) = (roster_a.get_mut(ia), roster_b.get_mut(ib)) else {
            break;
        };

        let fighter_a = a.name.clone();
        let fighter_b = b.name.clone();
        let bout = resolve_budget_bout(a, b, cfg, rng);
        let name_of = |corner: Corner| match corner {
            Corner::A => fighter_a.clone(),
            Corner::B => fighter_b.clone(),
        };

        let event = BudgetEvent {
            round: events.len() as u32 + 1,
            winner: bout.winner.map(name_of),
            loser: bout.loser().map(name_of),
            fighter_a: fighter_a.clone(),
            fighter_b: fighter_b.clone(),
            duration: bout.duration,
            method: bout.method,
            time_forfeited: bout.time_forfeited,
            time_left_a: bout.time_left_a,
            time_left_b: bout.time_left_b,
            team_time_a: roster_a.time_left(),
            team_time_b: roster_b.time_left(),
        };
        debug!(
            round = event.round,
            fighter_a = %event.fighter_a,
            fighter_b = %event.fighter_b,
            winner = event.winner.as_deref().unwrap_or("none"),
            method = event.method_label(),
            duration = event.duration,
            "budget bout resolved"
        );
        events.push(event);
    }

    let time_left_a = roster_a.time_left();
    let time_left_b = roster_b.time_left();
    let verdict = match (time_left_a <= 0.0, time_left_b <= 0.0) {
        (true, true) => BudgetVerdict::BothExhausted,
        (true, false) => BudgetVerdict::TeamATimeExhausted,
        (false, true) => BudgetVerdict::TeamBTimeExhausted,
        (false, false) => BudgetVerdict::PrematureHalt,
    };

    let result = BudgetResult {
        bouts: events.len() as u32,
        total_bout_duration: events.iter().map(|e| e.duration).sum(),
        time_left_a,
        time_left_b,
        verdict,
        team_a: roster_a.team().clone(),
        team_b: roster_b.team().clone(),
    };

    if verdict == BudgetVerdict::PrematureHalt {
        warn!(time_left_a, time_left_b, bouts = result.bouts, "no eligible fighters left");
    } else {
        info!(?verdict, bouts = result.bouts, "budget league finished");
    }
    Ok((events, result))
}
