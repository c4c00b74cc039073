use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use seidel::gen::{random_bounded_problem, GenCfg, Problem, ReplayToken};
use seidel::geom::GeomCfg;

mod problem;
mod provenance;

use problem::{ProblemFile, SolveReport};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "seidel-cli")]
#[command(about = "Solve small linear programs with Seidel's randomized algorithm")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a JSON or CSV problem; print the result or write it to --out
    Solve {
        #[arg(long)]
        input: String,
        /// Objective direction, comma separated (required for CSV input)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        direction: Option<Vec<f64>>,
        /// RNG seed; drawn at random and recorded when absent
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        eps_feas: Option<f64>,
        #[arg(long)]
        out: Option<String>,
    },
    /// Write a random bounded problem as JSON
    Gen {
        #[arg(long, default_value_t = 2)]
        dim: usize,
        #[arg(long, default_value_t = 16)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            input,
            direction,
            seed,
            eps_feas,
            out,
        } => solve(input, direction, seed, eps_feas, out),
        Action::Gen {
            dim,
            count,
            seed,
            index,
            out,
        } => gen(dim, count, ReplayToken { seed, index }, out),
        Action::Report => report(),
    }
}

fn solve(
    input: String,
    direction: Option<Vec<f64>>,
    seed: Option<u64>,
    eps_feas: Option<f64>,
    out: Option<String>,
) -> Result<()> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(input, seed, "solve");

    let Problem {
        half_spaces,
        direction,
    } = problem::load(Path::new(&input), direction)?.into_problem()?;
    let mut cfg = GeomCfg::default();
    if let Some(eps) = eps_feas {
        cfg.eps_feas = eps;
    }
    let (dim, constraints) = (direction.dim(), half_spaces.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let solution = seidel::solve(half_spaces, direction.clone(), cfg, &mut rng)?;
    let report = SolveReport::new(&solution, &direction, seed);
    tracing::info!(dim, constraints, result = ?report.result, objective = ?report.objective, "solved");

    let body = serde_json::to_string_pretty(&report)?;
    let Some(out) = out else {
        println!("{body}");
        return Ok(());
    };
    write_artifact(&out, &body)?;
    let params = json!({
        "input": input,
        "dim": dim,
        "constraints": constraints,
        "eps_det": cfg.eps_det,
        "eps_feas": cfg.eps_feas,
    });
    provenance::write_sidecar(&out, Payload::new("solve", params).with_seed(seed))?;
    Ok(())
}

fn gen(dim: usize, count: usize, tok: ReplayToken, out: String) -> Result<()> {
    tracing::info!(dim, count, seed = tok.seed, index = tok.index, out, "gen");
    let cfg = GenCfg {
        dim,
        count,
        ..GenCfg::default()
    };
    let problem = random_bounded_problem(cfg, tok)?;
    let body = serde_json::to_string_pretty(&ProblemFile::from_problem(&problem))?;
    write_artifact(&out, &body)?;
    let params = json!({
        "dim": dim,
        "count": count,
        "index": tok.index,
        "radius_jitter": cfg.radius_jitter,
        "box_half_width": cfg.box_half_width,
    });
    provenance::write_sidecar(&out, Payload::new("gen", params).with_seed(tok.seed))?;
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}

fn write_artifact(out: &str, body: &str) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(out_path, body).with_context(|| format!("writing {}", out_path.display()))
}
