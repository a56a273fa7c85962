use crate::config::EliminationConfig;

/// Rate multiplier for a combatant who has already fought `prior_active`
/// seconds: `1 + (prior_active / round_time) * fatigue_factor`.
///
/// Unclamped: a long winning streak keeps raising the multiplier.
pub fn fatigue_multiplier(prior_active: f64, cfg: &EliminationConfig) -> f64 {
    1.0 + (prior_active / cfg.round_time) * cfg.fatigue_factor
}

/// Finish hazard of a combatant carrying `fatigue` seconds of prior activity.
pub fn hazard_rate(fatigue: f64, cfg: &EliminationConfig) -> f64 {
    cfg.base_lambda * fatigue_multiplier(fatigue, cfg)
}
