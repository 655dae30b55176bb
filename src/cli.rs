//! Command-line definition.
//!
//! Lives in the library so the man page generator can reach it.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Version string including build metadata from `build.rs`.
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("CSV2GLOZZ_BUILD_DATE"),
    ")"
);

/// Version string including build metadata from `build.rs`.
#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("CSV2GLOZZ_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "csv2glozz")]
#[command(version = LONG_VERSION)]
#[command(about = "Convert a segmented game transcript into a Glozz (.ac, .aa) pair")]
#[command(long_about = "Convert a segmented game transcript into a Glozz (.ac, .aa) pair.\n\n\
The .ac file holds the dialogue text with segment markers removed; the .aa file \
holds Dialogue, Turn and Segment annotations addressing it by character offsets. \
Output names are the input file name up to its first '.', e.g. game1.soclog.seg.csv \
gives game1.ac and game1.aa.")]
pub struct Cli {
    /// Input transcript (several words are joined with spaces)
    #[arg(short, long = "file", value_name = "FILE", num_args = 1.., required = true)]
    pub file: Vec<String>,

    /// Configuration file (default: <config dir>/csv2glozz/config.toml if present)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the output pair (default: beside the input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Creation date stamped on every unit, in seconds since the epoch (default: now)
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub timestamp: Option<i64>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The input path, rebuilt from its words.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(self.file.join(" "))
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
