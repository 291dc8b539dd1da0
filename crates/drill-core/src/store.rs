//! JSON persistence for history and multi-part progress.
//!
//! Each document is rewritten whole on every mutation. Writes land in a
//! sibling `.tmp` file that is renamed over the target, so an interrupted
//! write leaves the previous document intact.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::model::{Difficulty, ProblemEntry, ProgressState};

pub const STATE_DIR: &str = "history-progress";
pub const HISTORY_FILE: &str = "problem_history.json";
pub const PROGRESS_FILE: &str = "multipart_progress.json";
pub const PROBLEMS_DIR: &str = "problems";

/// Root of everything drill writes to disk.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(HISTORY_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(PROGRESS_FILE)
    }

    pub fn problems_dir(&self) -> PathBuf {
        self.root.join(PROBLEMS_DIR)
    }

    /// `problems/<difficulty>/<filename>`.
    pub fn problem_path(&self, difficulty: Difficulty, filename: &str) -> PathBuf {
        self.problems_dir().join(difficulty.dir_name()).join(filename)
    }

    /// Create directories and empty documents on first run.
    pub fn init(&self) -> Result<()> {
        let state_dir = self.root.join(STATE_DIR);
        std::fs::create_dir_all(&state_dir)
            .with_context(|| format!("failed to create {}", state_dir.display()))?;
        std::fs::create_dir_all(self.problems_dir())
            .with_context(|| format!("failed to create {}", self.problems_dir().display()))?;

        if !self.history_path().exists() {
            self.save_history(&[])?;
        }
        if !self.progress_path().exists() {
            self.save_progress(None)?;
        }
        Ok(())
    }

    /// Load the history list. A missing file is an empty history.
    pub fn load_history(&self) -> Result<Vec<ProblemEntry>> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read history from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse history JSON: {}", path.display()))
    }

    pub fn save_history(&self, history: &[ProblemEntry]) -> Result<()> {
        write_json(&self.history_path(), history)
    }

    /// Load the active multi-part sequence. `{}` and a missing file both
    /// mean there is none.
    pub fn load_progress(&self) -> Result<Option<ProgressState>> {
        let path = self.progress_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read progress from {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse progress JSON: {}", path.display()))?;

        if value.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(None);
        }
        let progress = serde_json::from_value(value)
            .with_context(|| format!("malformed progress document: {}", path.display()))?;
        Ok(Some(progress))
    }

    pub fn save_progress(&self, progress: Option<&ProgressState>) -> Result<()> {
        match progress {
            Some(p) => write_json(&self.progress_path(), p),
            None => write_json(&self.progress_path(), &serde_json::json!({})),
        }
    }

    /// Write a generated problem's text, creating the tier directory.
    pub fn save_problem_file(
        &self,
        difficulty: Difficulty,
        filename: &str,
        text: &str,
    ) -> Result<PathBuf> {
        let path = self.problem_path(difficulty, filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, text)
            .with_context(|| format!("failed to write problem to {}", path.display()))?;
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    debug!(path = %path.display(), "saved");
    Ok(())
}
