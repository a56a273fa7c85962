use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const DEFAULT_TEAM_A: &str = "FFM";
pub const DEFAULT_TEAM_B: &str = "LEI";
pub const DEFAULT_TEAM_SIZE: usize = 6;

/// Parameters of the fatigue-weighted elimination model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EliminationConfig {
    /// Finish hazard of a fresh combatant, per second.
    pub base_lambda: f64,
    /// Rate penalty per full round of prior active time.
    pub fatigue_factor: f64,
    /// Maximum duration of one bout in seconds.
    pub round_time: f64,
    /// Rest between consecutive bouts, in seconds.
    pub break_seconds: f64,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            base_lambda: 0.005,
            fatigue_factor: 0.35,
            round_time: 300.0,
            break_seconds: 60.0,
        }
    }
}

impl EliminationConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        positive("base_lambda", self.base_lambda)?;
        positive("round_time", self.round_time)?;
        non_negative("fatigue_factor", self.fatigue_factor)?;
        non_negative("break_seconds", self.break_seconds)?;
        Ok(())
    }
}

/// Parameters of the time-budget league model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct BudgetConfig {
    pub max_time_per_entry: f64,
    pub total_fighter_time: f64,
    pub max_entries_per_fighter: u32,
    pub lambda_finish_rate: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_time_per_entry: 300.0,
            total_fighter_time: 600.0,
            max_entries_per_fighter: 2,
            lambda_finish_rate: 0.005,
        }
    }
}

impl BudgetConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        positive("max_time_per_entry", self.max_time_per_entry)?;
        positive("total_fighter_time", self.total_fighter_time)?;
        positive("lambda_finish_rate", self.lambda_finish_rate)?;
        if self.max_entries_per_fighter == 0 {
            return Err(SimError::invalid("max_entries_per_fighter", "must be at least 1"));
        }
        Ok(())
    }
}

/// Which bout resolver and termination rule a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    Elimination(EliminationConfig),
    Budget(BudgetConfig),
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Elimination(EliminationConfig::default())
    }
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Elimination(_) => "elimination",
            Policy::Budget(_) => "budget",
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        match self {
            Policy::Elimination(cfg) => cfg.validate(),
            Policy::Budget(cfg) => cfg.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub team_a: String,
    pub team_b: String,
    pub policy: Policy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            team_a: DEFAULT_TEAM_A.to_string(),
            team_b: DEFAULT_TEAM_B.to_string(),
            policy: Policy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn elimination(cfg: EliminationConfig) -> Self {
        Self { policy: Policy::Elimination(cfg), ..Default::default() }
    }

    pub fn budget(cfg: BudgetConfig) -> Self {
        Self { policy: Policy::Budget(cfg), ..Default::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the policy and require two distinct team names.
    pub fn validate(&self) -> Result<(), SimError> {
        self.policy.validate()?;
        if self.team_a == self.team_b {
            return Err(SimError::invalid(
                "team_b",
                format!("must differ from team_a, both are '{}'", self.team_a),
            ));
        }
        Ok(())
    }

    pub fn with_teams(mut self, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        self.team_a = team_a.into();
        self.team_b = team_b.into();
        self
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be zero or positive, got {value}")))
    }
}
