//! Best-effort splitting of a grading reply into rubric sections.
//!
//! The reply is classified line by line into headers and content. A known
//! bold header (`**Correctness**`, `**Optimality**`, `**Time and Space
//! Complexity**`) selects the section that following content lines are
//! appended to. Any other line starting with `**` is an unrecognized header
//! and is handled according to [`UnknownHeaderPolicy`].
//!
//! Parsing never fails: sections the reply does not mark stay empty.

use serde::{Deserialize, Serialize};

use crate::model::EvaluationResult;

const CORRECTNESS: &str = "**Correctness**";
const OPTIMALITY: &str = "**Optimality**";
const COMPLEXITY: &str = "**Time and Space Complexity**";

/// One of the three rubric sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Correctness,
    Optimality,
    Complexity,
}

/// A classified reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A bold header. `None` when it is not one of the rubric headings.
    Header(Option<Section>),
    /// Anything else, trimmed.
    Content(&'a str),
}

/// What an unrecognized bold header does to the current section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownHeaderPolicy {
    /// Stop collecting until the next rubric heading.
    #[default]
    Drop,
    /// Keep appending to the section that was active before the header.
    Attach,
}

/// Classify a single line.
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.starts_with(CORRECTNESS) {
        Line::Header(Some(Section::Correctness))
    } else if trimmed.starts_with(OPTIMALITY) {
        Line::Header(Some(Section::Optimality))
    } else if trimmed.starts_with(COMPLEXITY) {
        Line::Header(Some(Section::Complexity))
    } else if trimmed.starts_with("**") {
        Line::Header(None)
    } else {
        Line::Content(trimmed)
    }
}

/// Split `reply` using the default [`UnknownHeaderPolicy::Drop`].
pub fn parse_feedback(reply: &str) -> EvaluationResult {
    parse_feedback_with(reply, UnknownHeaderPolicy::Drop)
}

/// Split `reply` into rubric sections. Content lines are joined with single
/// spaces; blank lines are skipped.
pub fn parse_feedback_with(reply: &str, policy: UnknownHeaderPolicy) -> EvaluationResult {
    let mut result = EvaluationResult::default();
    let mut current: Option<Section> = None;

    for line in reply.lines() {
        match classify(line) {
            Line::Header(Some(section)) => current = Some(section),
            Line::Header(None) => {
                if policy == UnknownHeaderPolicy::Drop {
                    current = None;
                }
            }
            Line::Content("") => {}
            Line::Content(text) => {
                if let Some(section) = current {
                    let slot = section_mut(&mut result, section);
                    if !slot.is_empty() {
                        slot.push(' ');
                    }
                    slot.push_str(text);
                }
            }
        }
    }

    result
}

fn section_mut(result: &mut EvaluationResult, section: Section) -> &mut String {
    match section {
        Section::Correctness => &mut result.correctness,
        Section::Optimality => &mut result.optimality,
        Section::Complexity => &mut result.complexity,
    }
}
