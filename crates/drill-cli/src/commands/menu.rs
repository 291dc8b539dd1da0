//! The interactive main menu and the multi-part menu.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::error;

use drill_core::error::SessionError;
use drill_core::evaluator;
use drill_core::model::{Difficulty, PartType, Style};
use drill_core::session::{ContinuationState, DifficultyChoice, Generated};

use super::evaluate::{load_problem, ProblemSource};
use super::App;
use crate::console::Console;
use crate::display;

const INVALID_SELECTION: &str = "Invalid selection. Please try again.";
const NO_PROGRESS: &str = "No multi-part problem in progress.";
const GOODBYE: &str = "Exiting. Good luck with your preparation!";

/// Whether the caller should keep looping. `Quit` also covers end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn execute(config: Option<&Path>, data_dir: Option<&Path>) -> Result<()> {
    let mut app = App::load(config, data_dir)?;
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    run(&mut app, &mut console).await
}

/// Main menu loop. Returns on Exit or end of input.
pub async fn run<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.say("\nMain Menu")?;
        console.say("1. Generate New Problem")?;
        console.say("2. Review Past Problems")?;
        console.say("3. Continue Multi-Part Problem")?;
        console.say("4. Evaluate Solution")?;
        console.say("5. Exit")?;

        let Some(choice) = console.prompt("Choose an option: ")? else {
            return Ok(());
        };

        let flow = match choice.trim() {
            "1" => generate(app, console).await?,
            "2" => {
                review(app, console)?;
                Flow::Continue
            }
            "3" => multi_part_menu(app, console).await?,
            "4" => evaluate(app, console).await?,
            "5" => {
                console.say(GOODBYE)?;
                Flow::Quit
            }
            _ => {
                console.say(INVALID_SELECTION)?;
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

async fn generate<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    let Some(manual) = console.prompt("Do you want to select a difficulty level? (y/n): ")? else {
        return Ok(Flow::Quit);
    };

    let choice = if manual.trim().eq_ignore_ascii_case("y") {
        let Some(level) = console.prompt("Choose difficulty (Easy, Medium, Hard): ")? else {
            return Ok(Flow::Quit);
        };
        match level.parse::<Difficulty>() {
            Ok(d) => DifficultyChoice::Manual(d),
            Err(_) => {
                console.say("Invalid difficulty level selected. Defaulting to Easy.")?;
                DifficultyChoice::Manual(Difficulty::Easy)
            }
        }
    } else {
        DifficultyChoice::Auto
    };

    let change = app.session.select_difficulty(choice);
    if choice == DifficultyChoice::Auto && change.changed() {
        console.say(format!("Moving to {} problems.", change.to))?;
    }

    let Some(part_type) = console.prompt("Select problem type (single-part, multi-part): ")? else {
        return Ok(Flow::Quit);
    };
    let Some(style) = console.prompt("Select style (leetcode, real-world): ")? else {
        return Ok(Flow::Quit);
    };

    let (part_type, style) = match (part_type.parse::<PartType>(), style.parse::<Style>()) {
        (Ok(p), Ok(s)) => (p, s),
        _ => {
            console.say(INVALID_SELECTION)?;
            return Ok(Flow::Continue);
        }
    };

    match app
        .session
        .generate_problem(app.provider.as_ref(), part_type, style)
        .await
    {
        Ok(generated) => {
            console.say(format!(
                "\nGenerated Problem ({}):\n{}\n",
                generated.entry.difficulty, generated.entry.problem
            ))?;
            report_saved(console, &generated)?;
            if part_type == PartType::Multi {
                return multi_part_menu(app, console).await;
            }
        }
        Err(e) => report_failure(console, &e, "Failed to generate problem. Please try again.")?,
    }
    Ok(Flow::Continue)
}

fn review<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> Result<()> {
    let history = app.session.history();
    if history.is_empty() {
        console.say("No problems to review.")?;
        return Ok(());
    }
    for (idx, entry) in history.iter().enumerate() {
        console.say(display::problem_entry(idx + 1, entry))?;
    }
    Ok(())
}

async fn multi_part_menu<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    if app.session.continuation_state() == ContinuationState::Idle {
        console.say(NO_PROGRESS)?;
        return Ok(Flow::Continue);
    }

    loop {
        console.say("\nMulti-Part Problem Menu")?;
        console.say("1. Generate Next Part")?;
        console.say("2. Return to Main Menu")?;
        console.say("3. Clear Progress")?;

        let Some(choice) = console.prompt("Choose an option: ")? else {
            return Ok(Flow::Quit);
        };

        match choice.trim() {
            "1" => match app.session.generate_next_part(app.provider.as_ref()).await {
                Ok(generated) => {
                    console.say(format!(
                        "\nGenerated Part {}:\n{}\n",
                        generated.part_number, generated.entry.problem
                    ))?;
                    report_saved(console, &generated)?;
                }
                Err(e) => report_failure(
                    console,
                    &e,
                    "Failed to generate the next part. Please try again.",
                )?,
            },
            "2" => return Ok(Flow::Continue),
            "3" => {
                match app.session.clear_progress() {
                    Ok(()) => console.say("Multi-part progress cleared.")?,
                    Err(e) => {
                        error!(error = %format!("{e:#}"), "failed to clear progress");
                        console.say(format!("Failed to clear progress: {e:#}"))?;
                    }
                }
                return Ok(Flow::Continue);
            }
            _ => console.say(INVALID_SELECTION)?,
        }
    }
}

async fn evaluate<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    let Some(path) = console.prompt("Enter the path to your Swift code .txt file: ")? else {
        return Ok(Flow::Quit);
    };
    let path = PathBuf::from(path.trim());
    if !path.is_file() {
        console.say("File not found.")?;
        return Ok(Flow::Continue);
    }
    let solution = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            console.say(format!("Could not read {}: {e}", path.display()))?;
            return Ok(Flow::Continue);
        }
    };

    let Some(selector) = console
        .prompt("Problem to grade against (Enter for latest, a number from Review, or a file path): ")?
    else {
        return Ok(Flow::Quit);
    };
    let problem = match load_problem(app.session.history(), &ProblemSource::parse(&selector)) {
        Ok(p) => p,
        Err(e) => {
            console.say(format!("{e:#}"))?;
            return Ok(Flow::Continue);
        }
    };

    match evaluator::evaluate(app.provider.as_ref(), &app.evaluation, &problem, &solution).await {
        Ok(evaluation) => console.say(display::evaluation(&evaluation))?,
        Err(e) => {
            error!(error = %format!("{e:#}"), "evaluation failed");
            console.say("Failed to evaluate solution. Please try again.")?;
            return Ok(Flow::Continue);
        }
    }

    loop {
        console.say("\nOptions:")?;
        console.say("1. Ask a follow-up question")?;
        console.say("2. Return to Main Menu")?;

        let Some(choice) = console.prompt("Enter your choice (1 or 2): ")? else {
            return Ok(Flow::Quit);
        };
        match choice.trim() {
            "1" => {
                let Some(question) = console.prompt("Please enter your question: ")? else {
                    return Ok(Flow::Quit);
                };
                match evaluator::follow_up(app.provider.as_ref(), &app.evaluation, &question).await
                {
                    Ok(answer) => console.say(format!("\nAnswer:\n{answer}\n"))?,
                    Err(e) => {
                        error!(error = %format!("{e:#}"), "follow-up failed");
                        console.say("Failed to get an answer. Please try again.")?;
                    }
                }
            }
            "2" => return Ok(Flow::Continue),
            _ => console.say("Invalid choice. Please enter 1 or 2.")?,
        }
    }
}

fn report_saved<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    generated: &Generated,
) -> io::Result<()> {
    match &generated.saved_to {
        Some(path) => console.say(format!("Problem saved to file: {}", path.display())),
        None => console.say("Error saving problem to file. It is still recorded in history."),
    }
}

fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &SessionError,
    generation_message: &str,
) -> io::Result<()> {
    match err {
        SessionError::GenerationFailed(_) => console.say(generation_message),
        SessionError::NoProgress => console.say(NO_PROGRESS),
        SessionError::Persist(e) => console.say(format!("Failed to save progress: {e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use drill_core::evaluator::EvaluationSettings;
    use drill_core::session::{GenerationSettings, Session};
    use drill_core::store::DataDir;
    use drill_providers::mock::MockProvider;

    fn app(dir: &tempfile::TempDir, replies: &[&str]) -> App {
        App {
            provider: Box::new(MockProvider::new(
                replies.iter().map(|r| r.to_string()).collect(),
            )),
            session: Session::open(DataDir::new(dir.path()), GenerationSettings::default())
                .unwrap()
                .with_seed(7),
            evaluation: EvaluationSettings::default(),
        }
    }

    async fn drive(app: &mut App, input: &str) -> String {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        run(app, &mut console).await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[tokio::test]
    async fn exit_says_goodbye() {
        let dir = tempfile::tempdir().unwrap();
        let out = drive(&mut app(&dir, &[]), "5\n").await;
        assert!(out.contains("Main Menu"));
        assert!(out.contains(GOODBYE));
    }

    #[tokio::test]
    async fn invalid_selection_reprompts_until_eof() {
        let dir = tempfile::tempdir().unwrap();
        let out = drive(&mut app(&dir, &[]), "9\nabc\n").await;
        assert_eq!(out.matches(INVALID_SELECTION).count(), 2);
        assert_eq!(out.matches("\nMain Menu").count(), 3);
        assert!(!out.contains(GOODBYE));
    }

    #[tokio::test]
    async fn review_without_history() {
        let dir = tempfile::tempdir().unwrap();
        let out = drive(&mut app(&dir, &[]), "2\n5\n").await;
        assert!(out.contains("No problems to review."));
    }

    #[tokio::test]
    async fn generate_single_part_then_review() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Tap Counter\nCount taps."]);
        let out = drive(&mut app, "1\nn\nsingle-part\nleetcode\n2\n5\n").await;

        assert!(out.contains("Generated Problem (Easy):\n# Tap Counter"));
        assert!(out.contains("Problem saved to file:"));
        assert!(out.contains("Problem 1 (Easy - single-part - leetcode):"));
        assert_eq!(app.session.history().len(), 1);
        assert!(app.session.progress().is_none());
    }

    #[tokio::test]
    async fn invalid_part_type_aborts_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Unused"]);
        let out = drive(&mut app, "1\nn\nboth\nleetcode\n5\n").await;
        assert!(out.contains(INVALID_SELECTION));
        assert!(!out.contains("Generated Problem"));
        assert!(app.session.history().is_empty());
    }

    #[tokio::test]
    async fn invalid_difficulty_defaults_to_easy() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Grid\nbody"]);
        let out = drive(&mut app, "1\ny\nextreme\nsingle-part\nreal-world\n5\n").await;
        assert!(out.contains("Invalid difficulty level selected. Defaulting to Easy."));
        assert_eq!(app.session.history()[0].difficulty, Difficulty::Easy);
    }

    #[tokio::test]
    async fn failed_generation_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &[]);
        let out = drive(&mut app, "1\nn\nsingle-part\nleetcode\n5\n").await;
        assert!(out.contains("Failed to generate problem. Please try again."));
        assert!(out.contains(GOODBYE));
    }

    #[tokio::test]
    async fn multi_part_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Feed\npart one", "# Feed\npart two"]);
        let out = drive(&mut app, "1\ny\nhard\nmulti-part\nreal-world\n1\n2\n5\n").await;

        assert!(out.contains("Generated Problem (Hard):"));
        assert!(out.contains("Multi-Part Problem Menu"));
        assert!(out.contains("Generated Part 2:\n# Feed\npart two"));

        let progress = app.session.progress().unwrap();
        assert_eq!(progress.current_part, 2);
        assert_eq!(progress.difficulty, Difficulty::Hard);
        assert_eq!(app.session.history().len(), 2);
    }

    #[tokio::test]
    async fn continue_without_progress() {
        let dir = tempfile::tempdir().unwrap();
        let out = drive(&mut app(&dir, &[]), "3\n5\n").await;
        assert!(out.contains(NO_PROGRESS));
        assert!(!out.contains("Multi-Part Problem Menu"));
    }

    #[tokio::test]
    async fn clear_progress_from_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Feed\none"]);
        let out = drive(&mut app, "1\nn\nmulti-part\nleetcode\n2\n3\n3\n5\n").await;
        assert!(out.contains("Multi-part progress cleared."));
        assert!(app.session.progress().is_none());
        assert_eq!(app.session.history().len(), 1);
    }

    #[tokio::test]
    async fn failed_clear_is_reported_and_menu_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, &["# Feed\none"]);
        drive(&mut app, "1\nn\nmulti-part\nleetcode\n2\n5\n").await;

        let mut tmp = app.session.data_dir().progress_path().into_os_string();
        tmp.push(".tmp");
        std::fs::create_dir(&tmp).unwrap();

        let out = drive(&mut app, "3\n3\n5\n").await;
        assert!(out.contains("Failed to clear progress"));
        assert!(out.contains(GOODBYE));
        assert!(app.session.progress().is_some());
    }

    #[tokio::test]
    async fn evaluate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = format!("4\n{}\n5\n", dir.path().join("nope.swift").display());
        let out = drive(&mut app(&dir, &[]), &input).await;
        assert!(out.contains("File not found."));
    }

    #[tokio::test]
    async fn evaluate_with_follow_up() {
        let dir = tempfile::tempdir().unwrap();
        let solution = dir.path().join("solution.txt");
        std::fs::write(&solution, "func solve() {}").unwrap();

        let mut app = app(
            &dir,
            &[
                "# Two Sum\nFind a pair.",
                "**Correctness**\nCorrect solution.\n**Optimality**\nOptimal.\n**Time and Space Complexity**\nO(n) time.",
                "Use a dictionary.",
            ],
        );
        let input = format!(
            "1\nn\nsingle-part\nleetcode\n4\n{}\n\n1\nCan it be faster?\n2\n5\n",
            solution.display()
        );
        let out = drive(&mut app, &input).await;

        assert!(out.contains("Evaluation Results:"));
        assert!(out.contains("Correct solution."));
        assert!(out.contains("O(n) time."));
        assert!(out.contains("Answer:\nUse a dictionary."));
        assert!(out.contains(GOODBYE));
    }

    #[tokio::test]
    async fn evaluate_without_problem() {
        let dir = tempfile::tempdir().unwrap();
        let solution = dir.path().join("solution.txt");
        std::fs::write(&solution, "func solve() {}").unwrap();

        let input = format!("4\n{}\n\n5\n", solution.display());
        let out = drive(&mut app(&dir, &[]), &input).await;
        assert!(out.contains("no problems generated yet"));
        assert!(!out.contains("Evaluation Results:"));
    }
}
