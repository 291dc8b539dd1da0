//! Text rendering for history entries, evaluations and stats.

use comfy_table::{Cell, Table};

use drill_core::difficulty::{TierCounts, ADVANCE_THRESHOLD};
use drill_core::evaluator::Evaluation;
use drill_core::model::{Difficulty, ProblemEntry, ProgressState};

/// One history entry, numbered from 1.
pub fn problem_entry(index: usize, entry: &ProblemEntry) -> String {
    format!(
        "\nProblem {index} ({} - {} - {}):\nTimestamp: {}\nFilename: {}\nProblem:\n{}\n",
        entry.difficulty, entry.part_type, entry.style, entry.timestamp, entry.filename, entry.problem
    )
}

pub fn evaluation(evaluation: &Evaluation) -> String {
    let result = &evaluation.result;
    if result.is_empty() {
        return format!(
            "\nThe grader's reply had none of the expected sections:\n\n{}\n",
            evaluation.raw
        );
    }
    format!(
        "\nEvaluation Results:\n\n**Correctness**\n\n{}\n\n**Optimality**\n\n{}\n\n**Time and Space Complexity**\n\n{}\n",
        result.correctness, result.optimality, result.complexity
    )
}

/// Per-tier counts, marking the tier the next automatic generation uses.
pub fn tier_table(counts: &TierCounts, next: Difficulty) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Difficulty", "Problems", "Until next tier", ""]);

    for tier in Difficulty::ALL {
        let count = counts.get(tier);
        let remaining = if tier == Difficulty::Hard {
            "-".to_string()
        } else {
            ADVANCE_THRESHOLD.saturating_sub(count).to_string()
        };
        table.add_row(vec![
            Cell::new(tier),
            Cell::new(count),
            Cell::new(remaining),
            Cell::new(if tier == next { "next" } else { "" }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(counts.total()),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub fn progress_summary(progress: Option<&ProgressState>) -> String {
    match progress {
        Some(p) => format!(
            "Multi-part problem in progress: part {} ({} - {}).",
            p.current_part, p.difficulty, p.style
        ),
        None => "No multi-part problem in progress.".to_string(),
    }
}
