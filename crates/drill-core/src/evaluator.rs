//! Solution grading.
//!
//! Stateless: each call builds the rubric prompt, asks the model once and
//! splits the reply with [`crate::feedback`].

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::feedback::{parse_feedback_with, UnknownHeaderPolicy};
use crate::model::EvaluationResult;
use crate::prompt::{evaluation_prompt, EVALUATION_SYSTEM_PROMPT};
use crate::traits::{ChatRequest, LlmProvider};

/// Model parameters for grading and follow-up questions.
#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    pub model: String,
    pub temperature: f64,
    pub unknown_headers: UnknownHeaderPolicy,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            unknown_headers: UnknownHeaderPolicy::Drop,
        }
    }
}

/// A graded solution.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The model's reply, trimmed.
    pub raw: String,
    pub result: EvaluationResult,
}

/// Grade `solution` against `problem`.
#[instrument(skip_all, fields(model = %settings.model, solution_len = solution.len()))]
pub async fn evaluate(
    provider: &dyn LlmProvider,
    settings: &EvaluationSettings,
    problem: &str,
    solution: &str,
) -> Result<Evaluation> {
    let request = ChatRequest::new(
        &settings.model,
        EVALUATION_SYSTEM_PROMPT,
        &evaluation_prompt(problem, solution),
        settings.temperature,
    );
    let response = provider
        .complete(&request)
        .await
        .context("evaluation request failed")?;

    let raw = response.content.trim().to_string();
    let result = parse_feedback_with(&raw, settings.unknown_headers);
    info!(
        latency_ms = response.latency_ms,
        parsed_all = !result.correctness.is_empty()
            && !result.optimality.is_empty()
            && !result.complexity.is_empty(),
        "evaluation received"
    );
    Ok(Evaluation { raw, result })
}

/// Ask a free-form question about a solution or problem.
#[instrument(skip_all, fields(model = %settings.model, question_len = question.len()))]
pub async fn follow_up(
    provider: &dyn LlmProvider,
    settings: &EvaluationSettings,
    question: &str,
) -> Result<String> {
    let request = ChatRequest::new(
        &settings.model,
        EVALUATION_SYSTEM_PROMPT,
        question,
        settings.temperature,
    );
    let response = provider
        .complete(&request)
        .await
        .context("follow-up request failed")?;
    Ok(response.content.trim().to_string())
}
