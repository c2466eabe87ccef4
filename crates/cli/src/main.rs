use anyhow::{Context, Result};
use arctime::api::{
    draw_arc, plan_delivery, search, waypoints_from_beam, DeliveryModel, JerkLimitedOracle,
    MemoOracle, PlanResult, RandomArcCfg, Waypoint,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod config;
mod input;
mod provenance;

use config::RunConfig;
use provenance::{PlanRecord, PlanSummary};

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG: &str = "info";

#[derive(Parser)]
#[command(name = "arctime-cli")]
#[command(about = "Minimum delivery time of rotating-axis arcs", version = arctime::VERSION)]
struct Cmd {
    /// Free-form tag; repeated tags are copied into provenance records
    #[arg(long = "tag", global = true)]
    tags: Vec<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// JSON file with `limits` and `search` sections
    #[arg(long)]
    config: Option<PathBuf>,
    /// Velocity table size, overrides the config file
    #[arg(long)]
    vel_res: Option<usize>,
    /// Largest swept arc per dwell, overrides the config file
    #[arg(long)]
    max_window: Option<f64>,
}

#[derive(Subcommand)]
enum Action {
    /// Plan a waypoint path (JSON array or CSV table) and write the result JSON
    Solve {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Plan an arc beam given as angles, energies and spot weights
    Beam {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Search a seeded random arc and print the profile summary
    Demo {
        #[arg(long, default_value_t = 30)]
        waypoints: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print the code revision, version and default configuration
    Report,
}

/// Where a solve run's waypoints came from.
struct Source<'a> {
    input: &'a Path,
    model: Option<DeliveryModel>,
    tags: &'a [String],
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    SubscriberBuilder::default()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { input, out, search } => {
            let cfg = run_config(&search)?;
            let waypoints = input::load_waypoints(&input)?;
            let source = Source {
                input: &input,
                model: None,
                tags: &cmd.tags,
            };
            solve(&waypoints, &cfg, &out, source)
        }
        Action::Beam { input, out, search } => {
            let cfg = run_config(&search)?;
            let beam = input::load_beam(&input)?;
            let waypoints = waypoints_from_beam(beam.beam_mu, &beam.segments, &beam.model)
                .with_context(|| format!("converting {}", input.display()))?;
            let source = Source {
                input: &input,
                model: Some(beam.model),
                tags: &cmd.tags,
            };
            solve(&waypoints, &cfg, &out, source)
        }
        Action::Demo {
            waypoints,
            seed,
            search,
        } => demo(waypoints, seed, &run_config(&search)?),
        Action::Report => report(cmd.tags),
    }
}

fn run_config(args: &SearchArgs) -> Result<RunConfig> {
    Ok(RunConfig::load(args.config.as_deref())?.with_overrides(args.vel_res, args.max_window))
}

fn solve(waypoints: &[Waypoint], cfg: &RunConfig, out: &Path, source: Source<'_>) -> Result<()> {
    tracing::info!(waypoints = waypoints.len(), out = %out.display(), "solve");
    let mut oracle = MemoOracle::new(JerkLimitedOracle::new());
    let plan = plan_delivery(waypoints, &cfg.limits, &cfg.search, &mut oracle)?;
    tracing::info!(
        total_time = plan.total_time,
        arcs = plan.arcs.len(),
        memo_hits = oracle.hits(),
        memo_misses = oracle.misses(),
        "planned"
    );
    write_result(out, &plan)?;
    let record = PlanRecord {
        code_rev: provenance::code_rev(),
        version: arctime::VERSION,
        oracle: "jerk-limited",
        tags: source.tags,
        input: source.input,
        config: *cfg,
        model: source.model,
        summary: PlanSummary::of(&plan, oracle.hits(), oracle.misses()),
        result: out,
    };
    let path = provenance::write_record(&record)?;
    tracing::debug!(path = %path.display(), "provenance written");
    Ok(())
}

fn write_result(out: &Path, plan: &PlanResult) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(plan)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn demo(waypoints: usize, seed: u64, cfg: &RunConfig) -> Result<()> {
    let arc = draw_arc(
        RandomArcCfg {
            waypoints,
            ..RandomArcCfg::default()
        },
        seed,
    );
    tracing::info!(waypoints, seed, "demo");
    let mut oracle = MemoOracle::new(JerkLimitedOracle::new());
    let profile = search(&arc, &cfg.limits, &cfg.search, &mut oracle)?;
    let summary = json!({
        "seed": seed,
        "waypoints": waypoints,
        "total_time": profile.total_time,
        "velocities": profile.velocities,
        "stats": profile.stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report(tags: Vec<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "version": arctime::VERSION,
        "tags": tags,
        "defaults": RunConfig::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
