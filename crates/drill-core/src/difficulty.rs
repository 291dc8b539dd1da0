//! Difficulty progression policy.
//!
//! Three tiers, one transition: once the history holds `ADVANCE_THRESHOLD`
//! problems at the current tier, the next automatic generation moves up one
//! tier. `Hard` is terminal and there is no way back down.

use crate::model::{Difficulty, ProblemEntry};

/// Problems needed at a tier before advancing past it.
pub const ADVANCE_THRESHOLD: usize = 5;

/// Number of history entries per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl TierCounts {
    pub fn from_history(history: &[ProblemEntry]) -> Self {
        let mut counts = Self::default();
        for entry in history {
            *counts.slot(entry.difficulty) += 1;
        }
        counts
    }

    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }

    fn slot(&mut self, difficulty: Difficulty) -> &mut usize {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Tier to use for the next automatic generation.
pub fn advance(current: Difficulty, history: &[ProblemEntry]) -> Difficulty {
    let counts = TierCounts::from_history(history);
    if counts.get(current) >= ADVANCE_THRESHOLD {
        current.next()
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartType, Style};

    fn history(easy: usize, medium: usize, hard: usize) -> Vec<ProblemEntry> {
        let mut out = Vec::new();
        for (difficulty, n) in [
            (Difficulty::Easy, easy),
            (Difficulty::Medium, medium),
            (Difficulty::Hard, hard),
        ] {
            for i in 0..n {
                out.push(ProblemEntry {
                    problem: String::new(),
                    difficulty,
                    part_type: PartType::Single,
                    style: Style::Leetcode,
                    timestamp: format!("20240101_0000{i:02}"),
                    filename: format!("p{i}.md"),
                });
            }
        }
        out
    }

    #[test]
    fn counts_per_tier() {
        let counts = TierCounts::from_history(&history(2, 3, 1));
        assert_eq!(counts.get(Difficulty::Easy), 2);
        assert_eq!(counts.get(Difficulty::Medium), 3);
        assert_eq!(counts.get(Difficulty::Hard), 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn stays_below_threshold() {
        assert_eq!(advance(Difficulty::Easy, &history(4, 0, 0)), Difficulty::Easy);
        assert_eq!(advance(Difficulty::Easy, &[]), Difficulty::Easy);
    }

    #[test]
    fn advances_at_threshold() {
        assert_eq!(advance(Difficulty::Easy, &history(5, 0, 0)), Difficulty::Medium);
        assert_eq!(advance(Difficulty::Medium, &history(5, 7, 0)), Difficulty::Hard);
    }

    #[test]
    fn only_current_tier_counts() {
        // Plenty of Easy history does not push a Medium learner to Hard.
        assert_eq!(advance(Difficulty::Medium, &history(12, 2, 0)), Difficulty::Medium);
    }

    #[test]
    fn hard_saturates() {
        assert_eq!(advance(Difficulty::Hard, &history(0, 0, 20)), Difficulty::Hard);
    }

    #[test]
    fn advances_one_tier_per_call() {
        assert_eq!(advance(Difficulty::Easy, &history(5, 5, 0)), Difficulty::Medium);
    }
}
