//! The generator's state object.
//!
//! `Session` owns the in-memory mirrors of the history and progress
//! documents and the active difficulty tier. Every operation takes the model
//! provider as an explicit argument; loading happens once in
//! [`Session::open`] and every mutation is written back before returning.
//!
//! Multi-part continuation is a two-state machine: `Idle` while no progress
//! document is active, `AwaitingNextPart` once a multi-part problem has been
//! generated. Nothing moves it back to `Idle` except [`Session::clear_progress`].

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::difficulty::{self, TierCounts};
use crate::error::{ProviderError, SessionError};
use crate::model::{Difficulty, PartType, ProblemEntry, ProblemSpec, ProgressState, Style};
use crate::prompt::{self, PROBLEM_SYSTEM_PROMPT};
use crate::slug;
use crate::store::DataDir;
use crate::traits::{ChatRequest, LlmProvider};

/// Model parameters for problem generation.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    /// Run generated text through [`prompt::clean_text`] before saving.
    pub clean_output: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            clean_output: false,
        }
    }
}

/// How the tier for the next problem is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyChoice {
    /// Apply the progression policy to the current tier.
    Auto,
    /// Use this tier and make it the current one.
    Manual(Difficulty),
}

/// Result of [`Session::select_difficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub from: Difficulty,
    pub to: Difficulty,
}

impl TierChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Where the multi-part state machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationState {
    Idle,
    AwaitingNextPart { current_part: u32 },
}

/// A successfully generated problem.
#[derive(Debug, Clone)]
pub struct Generated {
    pub entry: ProblemEntry,
    pub part_number: u32,
    /// `None` when the problem file could not be written. The history entry
    /// is recorded regardless.
    pub saved_to: Option<PathBuf>,
}

pub struct Session {
    data: DataDir,
    settings: GenerationSettings,
    history: Vec<ProblemEntry>,
    progress: Option<ProgressState>,
    current_difficulty: Difficulty,
    rng: StdRng,
}

impl Session {
    /// Initialize the data directory if needed and load both documents.
    pub fn open(data: DataDir, settings: GenerationSettings) -> Result<Self> {
        data.init()?;
        let history = data.load_history()?;
        let progress = data.load_progress()?;
        info!(
            root = %data.root().display(),
            problems = history.len(),
            in_progress = progress.is_some(),
            "session opened"
        );
        Ok(Self {
            data,
            settings,
            history,
            progress,
            current_difficulty: Difficulty::Easy,
            rng: StdRng::from_entropy(),
        })
    }

    /// Use a deterministic topic picker.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn data_dir(&self) -> &DataDir {
        &self.data
    }

    pub fn history(&self) -> &[ProblemEntry] {
        &self.history
    }

    pub fn progress(&self) -> Option<&ProgressState> {
        self.progress.as_ref()
    }

    pub fn current_difficulty(&self) -> Difficulty {
        self.current_difficulty
    }

    pub fn tier_counts(&self) -> TierCounts {
        TierCounts::from_history(&self.history)
    }

    /// Most recently generated problem.
    pub fn latest_problem(&self) -> Option<&ProblemEntry> {
        self.history.last()
    }

    pub fn continuation_state(&self) -> ContinuationState {
        match &self.progress {
            Some(p) => ContinuationState::AwaitingNextPart {
                current_part: p.current_part,
            },
            None => ContinuationState::Idle,
        }
    }

    /// Settle the tier for the next generation.
    pub fn select_difficulty(&mut self, choice: DifficultyChoice) -> TierChange {
        let from = self.current_difficulty;
        let to = match choice {
            DifficultyChoice::Manual(d) => d,
            DifficultyChoice::Auto => difficulty::advance(from, &self.history),
        };
        if to != from {
            info!(%from, %to, ?choice, "difficulty changed");
        }
        self.current_difficulty = to;
        TierChange { from, to }
    }

    /// Generate part 1 of a new problem at the current tier.
    ///
    /// A multi-part problem replaces any active progress with a fresh
    /// sequence.
    pub async fn generate_problem(
        &mut self,
        provider: &dyn LlmProvider,
        part_type: PartType,
        style: Style,
    ) -> Result<Generated, SessionError> {
        let spec = ProblemSpec {
            difficulty: self.current_difficulty,
            part_type,
            style,
            part_number: 1,
        };

        let text = self.request_problem(provider, &spec).await?;
        let title = slug::extract_title(&text);
        let generated = self.record(text, &spec, &title)?;

        if part_type == PartType::Multi {
            self.progress = Some(ProgressState::start(generated.entry.clone()));
            self.data
                .save_progress(self.progress.as_ref())
                .map_err(SessionError::Persist)?;
        }

        Ok(generated)
    }

    /// Generate the part after the active sequence's current one.
    ///
    /// The part index only advances once the model call succeeds.
    pub async fn generate_next_part(
        &mut self,
        provider: &dyn LlmProvider,
    ) -> Result<Generated, SessionError> {
        let spec = match &self.progress {
            Some(progress) => progress.next_spec(),
            None => return Err(SessionError::NoProgress),
        };

        let text = self.request_problem(provider, &spec).await?;
        let title = slug::part_title(&slug::extract_title(&text), spec.part_number);
        let generated = self.record(text, &spec, &title)?;

        if let Some(progress) = self.progress.as_mut() {
            progress.push_part(spec.part_number, generated.entry.clone());
        }
        self.data
            .save_progress(self.progress.as_ref())
            .map_err(SessionError::Persist)?;

        Ok(generated)
    }

    /// Forget the active multi-part sequence. On a failed write the
    /// sequence stays active.
    pub fn clear_progress(&mut self) -> Result<()> {
        self.data.save_progress(None)?;
        self.progress = None;
        info!("multi-part progress cleared");
        Ok(())
    }

    async fn request_problem(
        &mut self,
        provider: &dyn LlmProvider,
        spec: &ProblemSpec,
    ) -> Result<String, SessionError> {
        let topics = prompt::choose_topics(&mut self.rng);
        let user = prompt::problem_prompt(spec, &topics);
        let request = ChatRequest::new(
            &self.settings.model,
            PROBLEM_SYSTEM_PROMPT,
            &user,
            self.settings.temperature,
        );

        info!(
            provider = provider.name(),
            difficulty = %spec.difficulty,
            part = spec.part_number,
            data_structure = topics.data_structure,
            algorithm = topics.algorithm,
            "requesting problem"
        );

        let response = match provider.complete(&request).await {
            Ok(r) => r,
            Err(e) => {
                if e
                    .downcast_ref::<ProviderError>()
                    .is_some_and(ProviderError::is_permanent)
                {
                    warn!("model call cannot succeed until the provider configuration is fixed");
                }
                error!(provider = provider.name(), error = %format!("{e:#}"), "model call failed");
                return Err(SessionError::GenerationFailed(e));
            }
        };

        if response.content.trim().is_empty() {
            error!(provider = provider.name(), "model returned no text");
            return Err(SessionError::GenerationFailed(
                ProviderError::EmptyResponse.into(),
            ));
        }

        info!(
            model = %response.model,
            latency_ms = response.latency_ms,
            total_tokens = response.usage.total_tokens,
            "problem received"
        );

        Ok(if self.settings.clean_output {
            prompt::clean_text(&response.content)
        } else {
            response.content
        })
    }

    /// Save the problem file, then append and persist the history entry.
    fn record(
        &mut self,
        text: String,
        spec: &ProblemSpec,
        title: &str,
    ) -> Result<Generated, SessionError> {
        let timestamp = slug::timestamp(Local::now());
        let filename = self.unique_filename(spec.difficulty, title, &timestamp);

        let saved_to = match self.data.save_problem_file(spec.difficulty, &filename, &text) {
            Ok(path) => {
                info!(path = %path.display(), "problem saved");
                Some(path)
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), %filename, "failed to save problem file");
                None
            }
        };

        let entry = ProblemEntry {
            problem: text,
            difficulty: spec.difficulty,
            part_type: spec.part_type,
            style: spec.style,
            timestamp,
            filename,
        };
        self.history.push(entry.clone());
        self.data
            .save_history(&self.history)
            .map_err(SessionError::Persist)?;

        Ok(Generated {
            entry,
            part_number: spec.part_number,
            saved_to,
        })
    }

    fn unique_filename(&self, difficulty: Difficulty, title: &str, timestamp: &str) -> String {
        let mut filename = slug::problem_filename(title, timestamp);
        let mut n = 2;
        while self.data.problem_path(difficulty, &filename).exists()
            || self.history.iter().any(|e| e.filename == filename)
        {
            filename = slug::problem_filename(&format!("{title} {n}"), timestamp);
            n += 1;
        }
        filename
    }
}
