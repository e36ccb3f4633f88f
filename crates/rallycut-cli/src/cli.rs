//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rallycut::DurationConvention;

#[derive(Parser)]
#[command(name = "rallycut")]
#[command(version, about = "Pickleball rally tracker and segment exporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay an event script and export the resulting rallies
    Replay {
        /// TOML event script
        script: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Tsv)]
        format: ExportFormat,

        /// Duration convention for tsv/json rows; cues are always exclusive
        #[arg(long, value_enum, default_value_t = Convention::Exclusive)]
        convention: Convention,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the resulting session
        #[arg(long)]
        session: Option<PathBuf>,
    },

    /// Place a segment list on the output timeline under both conventions
    Timeline {
        /// JSON segment list (`[{"in": .., "out": .., "score": ..}]`)
        segments: PathBuf,

        #[arg(long, env = "RALLYCUT_FPS", default_value_t = 60.0)]
        fps: f64,
    },

    /// Summarize a saved session
    Inspect {
        session: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Json,
    Segments,
    Cues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Convention {
    Exclusive,
    Inclusive,
}

impl From<Convention> for DurationConvention {
    fn from(convention: Convention) -> Self {
        match convention {
            Convention::Exclusive => DurationConvention::Exclusive,
            Convention::Inclusive => DurationConvention::Inclusive,
        }
    }
}
