//! Core data model types for drill.
//!
//! The serialized forms match the JSON documents the tool keeps on disk
//! (`problem_history.json`, `multipart_progress.json`), so field names and
//! enum spellings here are part of the file format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier. Ordered `Easy < Medium < Hard`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The next tier up, saturating at `Hard`.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Directory component under `problems/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Whether a problem stands alone or opens a multi-part sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    #[serde(rename = "single-part")]
    Single,
    #[serde(rename = "multi-part")]
    Multi,
}

impl PartType {
    /// The word used inside the generation prompt ("single" / "multi").
    pub fn prompt_word(&self) -> &'static str {
        match self {
            PartType::Single => "single",
            PartType::Multi => "multi",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartType::Single => write!(f, "single-part"),
            PartType::Multi => write!(f, "multi-part"),
        }
    }
}

impl FromStr for PartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single-part" => Ok(PartType::Single),
            "multi-part" => Ok(PartType::Multi),
            other => Err(format!("unknown part type: {other}")),
        }
    }
}

/// Problem flavor requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "leetcode")]
    Leetcode,
    #[serde(rename = "real-world")]
    RealWorld,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Leetcode => write!(f, "leetcode"),
            Style::RealWorld => write!(f, "real-world"),
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leetcode" => Ok(Style::Leetcode),
            "real-world" => Ok(Style::RealWorld),
            other => Err(format!("unknown style: {other}")),
        }
    }
}

/// What to ask the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSpec {
    pub difficulty: Difficulty,
    pub part_type: PartType,
    pub style: Style,
    /// 1-based part index. Only meaningful for `PartType::Multi`.
    pub part_number: u32,
}

/// One generated problem, as recorded in the history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemEntry {
    /// Full markdown text returned by the model.
    pub problem: String,
    pub difficulty: Difficulty,
    pub part_type: PartType,
    pub style: Style,
    /// Local time, `YYYYMMDD_HHMMSS`.
    pub timestamp: String,
    /// File name under `problems/<difficulty>/`.
    pub filename: String,
}

/// The active multi-part sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Index of the most recently generated part (≥ 1).
    pub current_part: u32,
    pub part_type: PartType,
    pub style: Style,
    pub difficulty: Difficulty,
    /// Parts generated so far, oldest first.
    pub problem_history: Vec<ProblemEntry>,
}

impl ProgressState {
    /// Start a sequence from its first part.
    pub fn start(first: ProblemEntry) -> Self {
        Self {
            current_part: 1,
            part_type: first.part_type,
            style: first.style,
            difficulty: first.difficulty,
            problem_history: vec![first],
        }
    }

    /// Spec for the part after `current_part`.
    pub fn next_spec(&self) -> ProblemSpec {
        ProblemSpec {
            difficulty: self.difficulty,
            part_type: PartType::Multi,
            style: self.style,
            part_number: self.current_part + 1,
        }
    }

    /// Record a newly generated part.
    pub fn push_part(&mut self, part_number: u32, entry: ProblemEntry) {
        self.current_part = part_number;
        self.problem_history.push(entry);
    }
}

/// Graded feedback, split into the three rubric sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "Correctness")]
    pub correctness: String,
    #[serde(rename = "Optimality")]
    pub optimality: String,
    #[serde(rename = "Time and Space Complexity")]
    pub complexity: String,
}

impl EvaluationResult {
    /// True when the reply matched none of the expected headings.
    pub fn is_empty(&self) -> bool {
        self.correctness.is_empty() && self.optimality.is_empty() && self.complexity.is_empty()
    }
}
