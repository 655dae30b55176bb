//! Convert command handler

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};

use csv2glozz::cli::Cli;
use csv2glozz::{convert_file, Config};

/// Convert the transcript named on the command line and report the pair.
#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli) -> Result<()> {
    let input = cli.input_path();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let creation_date = cli
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    tracing::debug!(input = %input.display(), creation_date, "Starting conversion");

    let converted = convert_file(&input, &config, cli.output_dir.as_deref(), creation_date)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!(
        "{} ({})",
        converted.paths.text.display(),
        format_size(converted.sizes.text_bytes, DECIMAL)
    );
    println!(
        "{} ({})",
        converted.paths.annotations.display(),
        format_size(converted.sizes.annotation_bytes, DECIMAL)
    );

    let stats = converted.stats;
    println!(
        "{} turns, {} segments, {} dialogues",
        stats.turns, stats.segments, stats.dialogues
    );
    if stats.unbalanced_turns > 0 {
        eprintln!(
            "warning: segments skipped for {} turn(s) with unbalanced borders",
            stats.unbalanced_turns
        );
    }

    Ok(())
}
