use thiserror::Error;

/// Failures a simulation run reports to its caller instead of producing
/// partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("team {team} has an empty roster")]
    EmptyRosterInput { team: String },

    /// Budget variant: no eligible fighter on one side although both teams
    /// still have time on the clock.
    #[error(
        "simulation halted after round {round} with time left on both sides \
         (A: {time_left_a:.0}s, B: {time_left_b:.0}s)"
    )]
    PrematureHalt {
        round: u32,
        time_left_a: f64,
        time_left_b: f64,
    },
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration { field, reason: reason.into() }
    }
}
