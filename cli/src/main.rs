use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use fightsim::api::{builtin_config, load_config, parse_config, run_simulation, ConfigFormat, SimulationReport};
use fightsim::config::DEFAULT_TEAM_SIZE;
use fightsim::content::builtin_presets;
use fightsim::{BudgetConfig, EliminationConfig, Policy, SimulationConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

const DEFAULT_SEED: u64 = 42;

#[derive(Args)]
struct Common {
    /// Fighters on the first team
    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
    team_size_a: usize,
    /// Fighters on the second team
    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
    team_size_b: usize,
    /// Start from a config file (.json, .yaml, .yml); flags below override it
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,
    /// Start from a built-in preset (see `presets`); flags below override it
    #[arg(long)]
    preset: Option<String>,
    /// RNG seed for determinism (42 unless a config or preset sets one)
    #[arg(long)]
    seed: Option<u64>,
    /// First team's name
    #[arg(long)]
    team_a: Option<String>,
    /// Second team's name
    #[arg(long)]
    team_b: Option<String>,
    /// Print the full report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Common {
    /// Base config from `--config`/`--preset` (or `fallback`), with the
    /// seed and team flags applied on top. The loaded policy must be `kind`.
    fn simulation_config(&self, kind: &str, fallback: Policy) -> anyhow::Result<SimulationConfig> {
        let loaded = match (&self.config, &self.preset) {
            (Some(path), _) => Some(load_config(path)?),
            (None, Some(id)) => Some(builtin_config(id)?),
            (None, None) => None,
        };
        let mut cfg = match loaded {
            Some(cfg) if cfg.policy.name() != kind => {
                bail!("config uses the '{}' policy, expected '{}'", cfg.policy.name(), kind)
            }
            Some(cfg) => cfg,
            None => SimulationConfig { policy: fallback, ..Default::default() }.with_seed(DEFAULT_SEED),
        };
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(team) = &self.team_a {
            cfg.team_a = team.clone();
        }
        if let Some(team) = &self.team_b {
            cfg.team_b = team.clone();
        }
        Ok(cfg)
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Fatigue-weighted elimination: losers drop out, winners stay on
    Elimination {
        #[command(flatten)]
        common: Common,
        /// Finish hazard of a fresh fighter, per second [default: 0.005]
        #[arg(long)]
        base_lambda: Option<f64>,
        /// Rate penalty per full round already fought [default: 0.35]
        #[arg(long)]
        fatigue_factor: Option<f64>,
        /// Maximum bout length in seconds [default: 300]
        #[arg(long)]
        round_time: Option<f64>,
        /// Rest between bouts in seconds [default: 60]
        #[arg(long)]
        break_seconds: Option<f64>,
    },
    /// Time-budget league: teams lose when their pooled fight time runs out
    Budget {
        #[command(flatten)]
        common: Common,
        /// Maximum length of one entry in seconds [default: 300]
        #[arg(long)]
        max_time_per_entry: Option<f64>,
        /// Fight time each fighter brings [default: 600]
        #[arg(long)]
        total_fighter_time: Option<f64>,
        /// Entries allowed per fighter [default: 2]
        #[arg(long)]
        max_entries: Option<u32>,
        /// Finish rate per second [default: 0.005]
        #[arg(long)]
        finish_rate: Option<f64>,
    },
    /// Run from a JSON/YAML config file or a built-in preset
    Run {
        /// Config file (.json, .yaml, .yml)
        #[arg(long, conflicts_with = "preset")]
        config: Option<PathBuf>,
        /// Built-in preset id (see `presets`)
        #[arg(long, default_value = "efl_fatigue")]
        preset: String,
        /// Fighters on the first team
        #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
        team_size_a: usize,
        /// Fighters on the second team
        #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
        team_size_b: usize,
        /// Override the config's seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List built-in presets
    Presets,
}

#[derive(Parser)]
#[command(name = "fightsim")]
#[command(about = "Team fight league simulator")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn run_and_print(size_a: usize, size_b: usize, cfg: &SimulationConfig, json: bool) -> anyhow::Result<()> {
    debug!(size_a, size_b, seed = cfg.seed, policy = ?cfg.policy, "starting simulation");
    let report = run_simulation(size_a, size_b, cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    match &report {
        SimulationReport::Elimination { events, result } => {
            render::print_elimination(events, result)
        }
        SimulationReport::Budget { events, result } => render::print_budget(events, result),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Elimination {
            common,
            base_lambda,
            fatigue_factor,
            round_time,
            break_seconds,
        } => {
            let mut cfg = common
                .simulation_config("elimination", Policy::Elimination(EliminationConfig::default()))?;
            if let Policy::Elimination(elim) = &mut cfg.policy {
                elim.base_lambda = base_lambda.unwrap_or(elim.base_lambda);
                elim.fatigue_factor = fatigue_factor.unwrap_or(elim.fatigue_factor);
                elim.round_time = round_time.unwrap_or(elim.round_time);
                elim.break_seconds = break_seconds.unwrap_or(elim.break_seconds);
            }
            run_and_print(common.team_size_a, common.team_size_b, &cfg, common.json)?;
        }
        Cmd::Budget {
            common,
            max_time_per_entry,
            total_fighter_time,
            max_entries,
            finish_rate,
        } => {
            let mut cfg =
                common.simulation_config("budget", Policy::Budget(BudgetConfig::default()))?;
            if let Policy::Budget(budget) = &mut cfg.policy {
                budget.max_time_per_entry = max_time_per_entry.unwrap_or(budget.max_time_per_entry);
                budget.total_fighter_time = total_fighter_time.unwrap_or(budget.total_fighter_time);
                budget.max_entries_per_fighter = max_entries.unwrap_or(budget.max_entries_per_fighter);
                budget.lambda_finish_rate = finish_rate.unwrap_or(budget.lambda_finish_rate);
            }
            run_and_print(common.team_size_a, common.team_size_b, &cfg, common.json)?;
        }
        Cmd::Run {
            config,
            preset,
            team_size_a,
            team_size_b,
            seed,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(&path)?,
                None => builtin_config(&preset)?,
            };
            if let Some(seed) = seed {
                cfg.seed = seed;
            }
            run_and_print(team_size_a, team_size_b, &cfg, json)?;
        }
        Cmd::Presets => {
            for (id, text) in builtin_presets() {
                let cfg = parse_config(text, ConfigFormat::Json)?;
                println!("{:<14} {}", id, cfg.policy.name());
            }
        }
    }
    Ok(())
}
