//! The `symcheck run` command: an interactive terminal session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use symcheck_core::engine::{QuizEngine, Selection, SessionState};
use symcheck_core::export::AssessmentResult;
use symcheck_core::loader;
use symcheck_core::model::{Question, QuestionKind, QuizDefinition};
use symcheck_core::traits::{Announcer, FileSource, NoopTelemetry};

/// Delay before a scheduled auto-advance fires.
const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// Mirrors accessibility announcements onto stderr.
struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&self, message: &str) {
        eprintln!("  {message}");
    }
}

pub async fn execute(
    definition_path: PathBuf,
    output: Option<PathBuf>,
    no_auto_advance: bool,
) -> Result<()> {
    let mut definition = loader::load(&FileSource::new(&definition_path)).await?;
    if no_auto_advance {
        definition.auto_advance_enabled = false;
    }
    let definition = Arc::new(definition);

    let mut engine = QuizEngine::with_observers(
        Arc::clone(&definition),
        Arc::new(ConsoleAnnouncer),
        Arc::new(NoopTelemetry),
    );

    println!("{}", definition.title);
    if let Some(description) = &definition.description {
        println!("{description}");
    }
    println!("(number = select, Enter = next, b = back, r = restart, q = quit)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let index = match engine.state() {
            SessionState::AtQuestion(i) => i,
            SessionState::Completed => break,
        };
        let Some(question) = definition.question(index) else {
            break;
        };
        print_question(question, definition.question_count());

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            anyhow::bail!("input closed before the assessment completed");
        };
        let input = line?.trim().to_string();

        match input.as_str() {
            "q" => return Ok(()),
            "r" => {
                engine.restart();
                continue;
            }
            "b" => {
                engine.previous();
                continue;
            }
            "" => {
                if !engine.next() {
                    println!("Answer this question first.");
                }
                continue;
            }
            _ => {}
        }

        let Ok(choice) = input.parse::<usize>() else {
            println!("Enter an option number, or b/r/q.");
            continue;
        };
        let option = if choice >= 1 {
            question.options.get(choice - 1)
        } else {
            None
        };
        let Some(option) = option else {
            println!("No such option.");
            continue;
        };

        match engine.select_answer(index, &option.value) {
            Selection::Recorded {
                auto_advance: Some(token),
            } => {
                tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
                engine.fire_auto_advance(token);
            }
            Selection::Recorded { auto_advance: None } => {
                println!("Recorded. Press Enter to continue.");
            }
            Selection::Rejected => {
                println!("That option cannot be selected right now.");
            }
        }
    }

    let result = engine
        .export_results()
        .context("session ended without a result")?;
    print_result(&result, &definition);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        println!("Result saved to: {}", path.display());
    }

    Ok(())
}

fn print_question(question: &Question, total: usize) {
    println!();
    println!(
        "Question {} of {}: {}",
        question.index + 1,
        total,
        question.prompt
    );
    if let Some(description) = &question.description {
        println!("  {description}");
    }
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.display_text());
    }
    if question.kind == QuestionKind::Scale {
        if let Some(labels) = &question.scale_labels {
            println!(
                "  (1 = {}, {} = {})",
                labels.min,
                question.options.len(),
                labels.max
            );
        }
    }
}

fn print_result(result: &AssessmentResult, definition: &QuizDefinition) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Weight"]);
    for (index, answer) in &result.answers {
        let prompt = definition
            .question(*index)
            .map(|q| q.prompt.clone())
            .unwrap_or_else(|| format!("#{index}"));
        table.add_row(vec![
            Cell::new(prompt),
            Cell::new(&answer.display_text),
            Cell::new(answer.weight),
        ]);
    }
    println!("\n{table}");

    println!(
        "\nScore: {} / {} ({})",
        result.score, definition.max_score, result.label
    );

    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }
}
