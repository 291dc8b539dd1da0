//! The `drill evaluate` command and problem lookup shared with the menu.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use drill_core::evaluator;
use drill_core::model::ProblemEntry;

use super::App;
use crate::display;

/// Which problem statement a solution is graded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSource {
    /// Most recent history entry.
    Latest,
    /// 1-based position in history, as numbered by review.
    Index(usize),
    File(PathBuf),
}

impl ProblemSource {
    /// Blank means latest, a number is a history index, anything else a path.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            ProblemSource::Latest
        } else if let Ok(n) = input.parse::<usize>() {
            ProblemSource::Index(n)
        } else {
            ProblemSource::File(PathBuf::from(input))
        }
    }
}

/// Resolve a problem statement.
pub fn load_problem(history: &[ProblemEntry], source: &ProblemSource) -> Result<String> {
    match source {
        ProblemSource::Latest => match history.last() {
            Some(entry) => Ok(entry.problem.clone()),
            None => bail!("no problems generated yet; pass a problem file instead"),
        },
        ProblemSource::Index(n) => match n.checked_sub(1).and_then(|i| history.get(i)) {
            Some(entry) => Ok(entry.problem.clone()),
            None => bail!("no problem #{n}; history has {} entries", history.len()),
        },
        ProblemSource::File(path) => read_file(path),
    }
}

pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub async fn execute(
    config: Option<&Path>,
    data_dir: Option<&Path>,
    solution: PathBuf,
    problem: Option<PathBuf>,
) -> Result<()> {
    let solution = read_file(&solution)?;
    let app = App::load(config, data_dir)?;

    let source = problem.map(ProblemSource::File).unwrap_or(ProblemSource::Latest);
    let problem = load_problem(app.session.history(), &source)?;

    let evaluation =
        evaluator::evaluate(app.provider.as_ref(), &app.evaluation, &problem, &solution).await?;
    println!("{}", display::evaluation(&evaluation));
    Ok(())
}
