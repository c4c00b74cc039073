//! Problem and result files.
//!
//! - JSON: `{ "direction": [..], "constraints": [{ "normal": [..], "offset": d }] }`,
//!   each constraint meaning `normal·x <= offset`.
//! - CSV: one row per constraint, an `offset` column, every other column a
//!   normal coordinate in file order. The direction comes from the command line.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use seidel::gen::Problem;
use seidel::geom::{HalfSpace, Vector};
use seidel::{ResultType, Solution};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRow {
    pub normal: Vec<f64>,
    pub offset: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub direction: Vec<f64>,
    pub constraints: Vec<ConstraintRow>,
}

impl ProblemFile {
    pub fn into_problem(self) -> Result<Problem> {
        let direction = Vector::new(self.direction).context("direction")?;
        let half_spaces = self
            .constraints
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                Vector::new(row.normal)
                    .and_then(|n| HalfSpace::new(n, row.offset))
                    .with_context(|| format!("constraint {i}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Problem {
            half_spaces,
            direction,
        })
    }

    /// Half-spaces are written with their unit normals.
    pub fn from_problem(problem: &Problem) -> Self {
        Self {
            direction: problem.direction.as_slice().to_vec(),
            constraints: problem
                .half_spaces
                .iter()
                .map(|h| ConstraintRow {
                    normal: h.plane().normal().as_slice().to_vec(),
                    offset: h.plane().offset(),
                })
                .collect(),
        }
    }
}

/// Load a `.json` or `.csv` problem. `direction` overrides the file's (JSON)
/// and is required for CSV.
pub fn load(path: &Path, direction: Option<Vec<f64>>) -> Result<ProblemFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let mut file: ProblemFile = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?;
            if let Some(d) = direction {
                file.direction = d;
            }
            Ok(file)
        }
        Some("csv") => {
            let direction =
                direction.ok_or_else(|| anyhow!("--direction is required for CSV input"))?;
            read_csv(path, direction)
        }
        _ => bail!("unsupported input {} (expected .json or .csv)", path.display()),
    }
}

pub fn read_csv(path: &Path, direction: Vec<f64>) -> Result<ProblemFile> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()?;
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !names.iter().any(|n| n == "offset") {
        bail!("{}: missing `offset` column", path.display());
    }
    let offsets = f64_column(&df, "offset")?;
    let coords = names
        .iter()
        .filter(|n| n.as_str() != "offset")
        .map(|n| f64_column(&df, n))
        .collect::<Result<Vec<_>>>()?;
    if coords.is_empty() {
        bail!("{}: no normal columns", path.display());
    }
    tracing::debug!(rows = df.height(), dim = coords.len(), "csv_problem");
    let constraints = (0..df.height())
        .map(|row| ConstraintRow {
            normal: coords.iter().map(|c| c[row]).collect(),
            offset: offsets[row],
        })
        .collect();
    Ok(ProblemFile {
        direction,
        constraints,
    })
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("null in column `{name}` at row {row}")))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Minimum,
    Ambiguous,
    Infeasible,
}

impl From<ResultType> for ResultKind {
    fn from(t: ResultType) -> Self {
        match t {
            ResultType::Minimum => ResultKind::Minimum,
            ResultType::Ambiguous => ResultKind::Ambiguous,
            ResultType::Infeasible => ResultKind::Infeasible,
        }
    }
}

/// What `solve` prints or writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub result: ResultKind,
    pub point: Option<Vec<f64>>,
    pub objective: Option<f64>,
    pub seed: u64,
}

impl SolveReport {
    pub fn new(solution: &Solution, direction: &Vector, seed: u64) -> Self {
        let point = solution.point();
        Self {
            result: solution.result_type().into(),
            point: point.map(|p| p.as_slice().to_vec()),
            objective: point.map(|p| direction.eval(p)),
            seed,
        }
    }
}
