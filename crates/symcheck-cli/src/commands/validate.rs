//! The `symcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use symcheck_core::loader;
use symcheck_core::traits::FileSource;

pub async fn execute(definition_path: PathBuf) -> Result<()> {
    let definition = loader::load(&FileSource::new(&definition_path)).await?;

    println!(
        "Definition: {} ({} questions)",
        definition.title,
        definition.question_count()
    );

    let mut table = comfy_table::Table::new();
    table.set_header(vec!["Level", "Max score", "Label"]);
    for bucket in definition.scoring.buckets() {
        table.add_row(vec![
            bucket.level.to_string(),
            bucket.max_score.to_string(),
            bucket.label.clone(),
        ]);
    }
    println!("{table}");

    let warnings = loader::validate_definition(&definition);
    for w in &warnings {
        let prefix = w
            .question_index
            .map(|i| format!("  [question {i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Definition valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
