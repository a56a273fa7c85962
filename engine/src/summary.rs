use serde::{Deserialize, Serialize};

use crate::bout::{BoutEvent, Corner};
use crate::roster::TeamId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub bouts: u32,
    pub total_bout_duration: f64,
    pub total_break_duration: f64,
    /// Side whose roster survived.
    pub winning_side: Corner,
    pub winning_team: TeamId,
}

impl TournamentResult {
    /// Bout time plus rest time.
    pub fn total_duration(&self) -> f64 {
        self.total_bout_duration + self.total_break_duration
    }
}

/// Rest between consecutive bouts: one break fewer than bouts fought, never
/// negative.
pub fn break_duration(bouts: usize, break_seconds: f64) -> f64 {
    bouts.saturating_sub(1) as f64 * break_seconds
}

pub fn summarize(
    log: &[BoutEvent],
    break_seconds: f64,
    winning_side: Corner,
    winning_team: TeamId,
) -> TournamentResult {
    TournamentResult {
        bouts: log.len() as u32,
        total_bout_duration: log.iter().map(|e| e.duration).sum(),
        total_break_duration: break_duration(log.len(), break_seconds),
        winning_side,
        winning_team,
    }
}
