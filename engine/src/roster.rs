use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BudgetConfig;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        TeamId(s.to_string())
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        TeamId(s)
    }
}

/// Fighter in the fatigue-weighted elimination model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub team: TeamId,
    /// Seconds of active bout time accumulated through wins. Never decreases.
    pub fatigue: f64,
}

impl Combatant {
    pub fn new(name: impl Into<String>, team: TeamId) -> Self {
        Self { name: name.into(), team, fatigue: 0.0 }
    }
}

/// Fighter in the time-budget model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetFighter {
    pub name: String,
    pub team: TeamId,
    pub entries: u32,
    /// Seconds of fight time left; clamped at zero.
    pub time_left: f64,
}

impl BudgetFighter {
    pub fn new(name: impl Into<String>, team: TeamId, total_time: f64) -> Self {
        Self { name: name.into(), team, entries: 0, time_left: total_time }
    }

    pub fn is_eligible(&self, cfg: &BudgetConfig) -> bool {
        self.entries < cfg.max_entries_per_fighter && self.time_left > 0.0
    }

    pub(crate) fn spend(&mut self, seconds: f64) {
        self.time_left = (self.time_left - seconds).max(0.0);
        self.entries += 1;
    }
}

/// Ordered fighters of one team. The head is the one currently on the mat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster<F> {
    team: TeamId,
    members: VecDeque<F>,
}

fn member_name(team: &TeamId, index: usize) -> String {
    format!("{}-{}", team, index + 1)
}

impl Roster<Combatant> {
    /// `size` fresh combatants named `TEAM-1`, `TEAM-2`, ...
    pub fn new(team: impl Into<TeamId>, size: usize) -> Self {
        let team = team.into();
        let members = (0..size)
            .map(|i| Combatant::new(member_name(&team, i), team.clone()))
            .collect();
        Self { team, members }
    }
}

impl Roster<BudgetFighter> {
    pub fn with_budget(team: impl Into<TeamId>, size: usize, cfg: &BudgetConfig) -> Self {
        let team = team.into();
        let members = (0..size)
            .map(|i| BudgetFighter::new(member_name(&team, i), team.clone(), cfg.total_fighter_time))
            .collect();
        Self { team, members }
    }

    pub fn time_left(&self) -> f64 {
        self.members.iter().map(|f| f.time_left).sum()
    }

    /// Indices of fighters that may still enter a bout.
    pub fn eligible(&self, cfg: &BudgetConfig) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_eligible(cfg))
            .map(|(i, _)| i)
            .collect()
    }
}

impl<F> Roster<F> {
    pub fn team(&self) -> &TeamId {
        &self.team
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn head(&self) -> Option<&F> {
        self.members.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut F> {
        self.members.front_mut()
    }

    /// Drop the current head; the next member steps up.
    pub fn eliminate_head(&mut self) -> Option<F> {
        self.members.pop_front()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut F> {
        self.members.get_mut(index)
    }
}
