//! Prompt templates and topic catalogs.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{PartType, ProblemSpec};

/// Data-structure tags a problem may be built around.
pub const DATA_STRUCTURES: &[&str] = &[
    "Sliding Window",
    "Arrays & Hashing",
    "Two Pointers",
    "Stack",
    "Binary Search",
    "Linked List",
    "Trees",
    "Heap/Priority Queue",
    "Tries",
    "Graphs",
    "Advanced Graphs",
];

/// Algorithm tags a problem may be built around.
pub const ALGORITHMS: &[&str] = &[
    "Searching",
    "Greedy",
    "Dynamic Programming",
    "Recursion",
    "Backtracking",
    "Sorting",
    "Intervals",
    "Math & Geometry",
    "Bit Manipulation",
];

/// System instruction sent with every generation request.
pub const PROBLEM_SYSTEM_PROMPT: &str = "You are an expert in Apple iOS user interface engineering. \
Create real-world technical interview problems covering all aspects of user interface, including layout, \
animations, responsiveness, color contrast, user interaction, gestures, haptics, dynamic type, and anything \
else user interface related. Use Swift syntax and do not include a solution. Do not provide any hints or \
notes on what data structure and/or algorithm to use. Format the problem description in markdown. \
The problem must include a title, problem statement, examples, constraints, function signature, and the \
most optimal time and space complexity.";

/// System instruction for grading and follow-up questions.
pub const EVALUATION_SYSTEM_PROMPT: &str =
    "You are an expert coding assistant proficient in Swift and algorithm analysis.";

/// The two tags interpolated into a generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topics {
    pub data_structure: &'static str,
    pub algorithm: &'static str,
}

/// Pick one data structure and one algorithm uniformly at random.
pub fn choose_topics<R: Rng + ?Sized>(rng: &mut R) -> Topics {
    Topics {
        data_structure: DATA_STRUCTURES
            .choose(rng)
            .copied()
            .unwrap_or("Arrays & Hashing"),
        algorithm: ALGORITHMS.choose(rng).copied().unwrap_or("Sorting"),
    }
}

/// Build the user prompt for a problem (or a continuation part).
pub fn problem_prompt(spec: &ProblemSpec, topics: &Topics) -> String {
    let mut prompt = format!(
        "Create a {} {} {}-part problem focusing on iOS user interface. \
         The problem should involve {} and {}, and be relevant to real-world scenarios. \
         Use Swift syntax and do not provide a solution. \
         Do not provide hints or any detail of what data structure or algorithm to use to solve the problem.",
        spec.difficulty,
        spec.style,
        spec.part_type.prompt_word(),
        topics.data_structure,
        topics.algorithm,
    );
    if spec.part_type == PartType::Multi && spec.part_number > 1 {
        prompt.push_str(&format!(
            " This is part {} of the problem, building upon the previous parts.",
            spec.part_number
        ));
    }
    prompt
}

/// Build the grading prompt. Both texts are embedded verbatim.
pub fn evaluation_prompt(problem: &str, solution: &str) -> String {
    format!(
        "I will provide you with a Swift function and a problem statement. Evaluate it based on the following criteria:\n\n\
         1. **Correctness**: Is the solution correct based on the problem statement? If it is correct, state 'Correct solution.'. \
         If the solution is incorrect, start with 'The solution is incorrect.' and then explain in detail why it is not correct based on the problem requirements.\n\n\
         2. **Optimality**: If the solution is correct, evaluate whether it has the most optimal time and space complexity. \
         If it is optimal, state 'The solution is optimal.'. If it is not, explain why it is not optimal and suggest potential improvements without revealing the full solution.\n\n\
         3. **Time and Space Complexity**: Provide a time and space complexity analysis and suggest improvements if necessary.\n\n\
         Please structure your evaluation using the following headings:\n\
         - **Correctness**\n\
         - **Optimality**\n\
         - **Time and Space Complexity**\n\n\
         **Problem Statement**:\n{problem}\n\n**Swift Code**:\n{solution}\n\nProvide your evaluation:"
    )
}

/// Strip Swift code fences and escaped parentheses from model output.
///
/// Only applied when `clean_output` is enabled; by default generated text is
/// stored exactly as returned.
pub fn clean_text(text: &str) -> String {
    text.replace("```swift", "")
        .replace("```", "")
        .replace("\\(", "")
        .replace("\\)", "")
}
