use std::{fs, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use serde::Serialize;

use crate::budget::{run_budget, BudgetEvent, BudgetResult, BudgetVerdict};
use crate::config::{Policy, SimulationConfig};
use crate::content::builtin_presets;
use crate::elimination::run_elimination;
use crate::error::SimError;
use crate::roster::Roster;
use crate::summary::TournamentResult;
use crate::{BoutEvent, Corner, Dice, RandomSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationReport {
    Elimination {
        events: Vec<BoutEvent>,
        result: TournamentResult,
    },
    Budget {
        events: Vec<BudgetEvent>,
        result: BudgetResult,
    },
}

impl SimulationReport {
    pub fn bouts(&self) -> usize {
        match self {
            SimulationReport::Elimination { events, .. } => events.len(),
            SimulationReport::Budget { events, .. } => events.len(),
        }
    }

    pub fn total_bout_duration(&self) -> f64 {
        match self {
            SimulationReport::Elimination { result, .. } => result.total_bout_duration,
            SimulationReport::Budget { result, .. } => result.total_bout_duration,
        }
    }
}

/// Run one simulation seeded from `cfg.seed`.
pub fn run_simulation(
    team_size_a: usize,
    team_size_b: usize,
    cfg: &SimulationConfig,
) -> Result<SimulationReport, SimError> {
    let mut dice = Dice::from_seed(cfg.seed);
    run_simulation_with(team_size_a, team_size_b, cfg, &mut dice)
}

/// Run one simulation drawing from the given random source.
pub fn run_simulation_with(
    team_size_a: usize,
    team_size_b: usize,
    cfg: &SimulationConfig,
    rng: &mut impl RandomSource,
) -> Result<SimulationReport, SimError> {
    cfg.validate()?;
    match &cfg.policy {
        Policy::Elimination(elim) => {
            let roster_a = Roster::new(cfg.team_a.as_str(), team_size_a);
            let roster_b = Roster::new(cfg.team_b.as_str(), team_size_b);
            let (events, result) = run_elimination(roster_a, roster_b, elim, rng)?;
            Ok(SimulationReport::Elimination { events, result })
        }
        Policy::Budget(budget) => {
            let roster_a = Roster::with_budget(cfg.team_a.as_str(), team_size_a, budget);
            let roster_b = Roster::with_budget(cfg.team_b.as_str(), team_size_b, budget);
            let (events, result) = run_budget(roster_a, roster_b, budget, rng)?;
            Ok(SimulationReport::Budget { events, result })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchStats {
    pub samples: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub draws: u32,
    pub premature_halts: u32,
    pub mean_bouts: f64,
    pub mean_bout_duration: f64,
}

/// Run `samples` simulations; sample `i` uses seed `cfg.seed + i`.
pub fn simulate_many(
    team_size_a: usize,
    team_size_b: usize,
    cfg: &SimulationConfig,
    samples: u32,
) -> Result<BatchStats, SimError> {
    let mut stats = BatchStats { samples, ..Default::default() };
    let mut bouts_total = 0u64;
    let mut duration_total = 0.0;

    for i in 0..samples {
        let mut trial = cfg.clone();
        trial.seed = cfg.seed.wrapping_add(i as u64);
        let report = run_simulation(team_size_a, team_size_b, &trial)?;
        bouts_total += report.bouts() as u64;
        duration_total += report.total_bout_duration();

        match &report {
            SimulationReport::Elimination { result, .. } => {
                match result.winning_side {
                    Corner::A => stats.team_a_wins += 1,
                    Corner::B => stats.team_b_wins += 1,
                }
            }
            SimulationReport::Budget { result, .. } => match result.verdict {
                BudgetVerdict::TeamBTimeExhausted => stats.team_a_wins += 1,
                BudgetVerdict::TeamATimeExhausted => stats.team_b_wins += 1,
                BudgetVerdict::BothExhausted => stats.draws += 1,
                BudgetVerdict::PrematureHalt => stats.premature_halts += 1,
            },
        }
    }

    if samples > 0 {
        stats.mean_bouts = bouts_total as f64 / samples as f64;
        stats.mean_bout_duration = duration_total / samples as f64;
    }
    Ok(stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse and validate a simulation config.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<SimulationConfig> {
    let cfg: SimulationConfig = match format {
        ConfigFormat::Json => serde_json::from_str(text).context("failed to parse config JSON")?,
        ConfigFormat::Yaml => serde_yaml::from_str(text).context("failed to parse config YAML")?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Decode config file bytes: honours a UTF-8/UTF-16 BOM, otherwise UTF-8.
fn decode_text(bytes: Vec<u8>) -> Result<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes).context("config is not valid UTF-8")?)
    }
}

/// Load a JSON or YAML config (by extension) and validate it.
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read config: {}", path.display()))?;
    let text = decode_text(bytes)
        .with_context(|| format!("failed to decode config: {}", path.display()))?;
    parse_config(&text, ConfigFormat::from_path(path))
        .with_context(|| format!("invalid config: {}", path.display()))
}

pub fn builtin_config(id: &str) -> Result<SimulationConfig> {
    let presets = builtin_presets();
    let text = presets
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("preset '{}' not found", id))?;
    parse_config(text, ConfigFormat::Json).with_context(|| format!("invalid preset: {}", id))
}
