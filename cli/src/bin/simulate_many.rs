use anyhow::bail;
use clap::{Parser, ValueEnum};
use fightsim::api::{builtin_config, load_config, simulate_many};
use fightsim::config::DEFAULT_TEAM_SIZE;
use std::path::PathBuf;

#[derive(Copy, Clone, ValueEnum)]
enum PolicyKind {
    Elimination,
    Budget,
}

impl PolicyKind {
    fn name(self) -> &'static str {
        match self {
            PolicyKind::Elimination => "elimination",
            PolicyKind::Budget => "budget",
        }
    }

    fn default_preset(self) -> &'static str {
        match self {
            PolicyKind::Elimination => "efl_fatigue",
            PolicyKind::Budget => "efl_budget",
        }
    }
}

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many league runs over consecutive seeds")]
struct Args {
    /// Policy to simulate; picks its stock preset unless --preset/--config is given
    #[arg(long, value_enum)]
    policy: Option<PolicyKind>,

    /// Built-in preset id [default: efl_fatigue]
    #[arg(long, conflicts_with = "config")]
    preset: Option<String>,

    /// Config file (.json, .yaml, .yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of runs
    #[arg(long, default_value_t = 1000)]
    samples: u32,

    /// RNG base seed (run i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
    team_size_a: usize,

    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
    team_size_b: usize,
}

fn pct(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let policy = args.policy.unwrap_or(PolicyKind::Elimination);
    let mut cfg = match (&args.config, &args.preset) {
        (Some(path), _) => load_config(path)?,
        (None, Some(id)) => builtin_config(id)?,
        (None, None) => builtin_config(policy.default_preset())?,
    };
    if let Some(wanted) = args.policy {
        if cfg.policy.name() != wanted.name() {
            bail!("config uses the '{}' policy, expected '{}'", cfg.policy.name(), wanted.name());
        }
    }
    cfg.seed = args.seed;

    let stats = simulate_many(args.team_size_a, args.team_size_b, &cfg, args.samples)?;

    println!("simulate-many results");
    println!("---------------------");
    println!("samples:            {}", stats.samples);
    println!("policy:             {}", cfg.policy.name());
    println!(
        "teams:              {} ({}) vs {} ({})",
        cfg.team_a, args.team_size_a, cfg.team_b, args.team_size_b
    );
    println!();
    println!("{} wins:{:>10.1}%", cfg.team_a, pct(stats.team_a_wins, stats.samples));
    println!("{} wins:{:>10.1}%", cfg.team_b, pct(stats.team_b_wins, stats.samples));
    println!("draws:              {:.1}%", pct(stats.draws, stats.samples));
    println!("premature halts:    {:.1}%", pct(stats.premature_halts, stats.samples));
    println!("avg bouts:          {:.2}", stats.mean_bouts);
    println!("avg fight time:     {:.1}s", stats.mean_bout_duration);

    Ok(())
}
