//! csv2glozz - convert segmented game-dialogue transcripts into Glozz
//! annotation pairs.
//!
//! The pipeline runs in three stages:
//!
//! 1. [`transcript`] loads delimited rows into [`TurnRecord`]s.
//! 2. [`document`] flattens the turns into one text buffer and builds the
//!    Dialogue / Turn / Segment units over it.
//! 3. [`glozz`] writes the buffer (`.ac`) and the units (`.aa`).

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod glozz;
pub mod transcript;

use std::path::Path;

pub use config::Config;
pub use document::{convert, ConversionStats, Document};
pub use error::{ConversionError, Result};
pub use glozz::{OutputPaths, WrittenSizes};
pub use transcript::TurnRecord;

/// Outcome of converting one transcript file.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub paths: OutputPaths,
    pub sizes: WrittenSizes,
    pub stats: ConversionStats,
}

/// Load, convert and write one transcript.
///
/// Output files are only created once the whole document has been built.
pub fn convert_file(
    input: &Path,
    config: &Config,
    output_dir: Option<&Path>,
    creation_date: i64,
) -> Result<ConvertedFile> {
    let paths = OutputPaths::for_input(input, output_dir)?;
    let rows = transcript::load_path(input, &config.transcript)?;
    let document = convert(&rows, config, creation_date)?;
    let sizes = glozz::write_document(&document, &paths)?;

    Ok(ConvertedFile {
        paths,
        sizes,
        stats: document.stats(),
    })
}
