use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod bout;
pub mod budget;
pub mod config;
pub mod content;
pub mod elimination;
pub mod error;
pub mod fatigue;
pub mod roster;
pub mod summary;

pub use bout::{resolve_bout, BoutEvent, BoutOutcome, BoutReason, Corner, FinishMethod};
pub use budget::{run_budget, BudgetBout, BudgetEvent, BudgetResult, BudgetVerdict};
pub use config::{BudgetConfig, EliminationConfig, Policy, SimulationConfig};
pub use elimination::{run_elimination, EliminationEngine, EngineState};
pub use error::SimError;
pub use fatigue::fatigue_multiplier;
pub use roster::{BudgetFighter, Combatant, Roster, TeamId};
pub use summary::{summarize, TournamentResult};

/// Randomness the simulation draws from. Every resolver takes one of these
/// by `&mut` so runs are reproducible.
pub trait RandomSource {
    /// Draw from an exponential distribution with the given rate (mean `1/rate`).
    fn exponential(&mut self, rate: f64) -> f64;
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;
    /// Uniform index into a set of `len` items. `len` must be non-zero.
    fn choose(&mut self, len: usize) -> usize;
}

pub struct Dice { rng: ChaCha8Rng }

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for Dice {
    fn exponential(&mut self, rate: f64) -> f64 {
        // Inverse transform; 1 - u is in (0, 1] so the log stays finite.
        let u = self.uniform();
        -(1.0 - u).ln() / rate
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays fixed draws. Each script cycles once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    exponentials: VecDeque<f64>,
    uniforms: VecDeque<f64>,
    choices: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exponentials(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.exponentials = values.into_iter().collect();
        self
    }

    pub fn with_uniforms(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms = values.into_iter().collect();
        self
    }

    pub fn with_choices(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.choices = values.into_iter().collect();
        self
    }
}

fn cycle<T: Copy>(queue: &mut VecDeque<T>) -> Option<T> {
    let value = queue.pop_front()?;
    queue.push_back(value);
    Some(value)
}

impl RandomSource for ScriptedDice {
    fn exponential(&mut self, rate: f64) -> f64 {
        cycle(&mut self.exponentials).unwrap_or(1.0 / rate)
    }

    fn uniform(&mut self) -> f64 {
        cycle(&mut self.uniforms).unwrap_or(0.5)
    }

    fn choose(&mut self, len: usize) -> usize {
        // Out-of-range script entries wrap instead of indexing past the set.
        cycle(&mut self.choices).map_or(0, |i| i % len.max(1))
    }
}
