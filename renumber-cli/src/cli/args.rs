use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, StrategyArg};

/// Collision-safe shifting, moving and zero-padding of numbered files
#[derive(Parser, Debug)]
#[command(name = "renumber")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <PATH> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Read configuration from this file instead of the user config directory
    #[arg(long, global = true, value_name = "FILE", env = "RENUMBER_CONFIG")]
    pub config: Option<PathBuf>,

    /// How a batch reacts to a file it cannot renumber (defaults from config)
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Log more detail to stderr. Repeat for more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the directory in renumbering order
    List {
        /// Only show entries whose name matches this regex (defaults from config)
        #[arg(long)]
        filter: Option<String>,

        /// Render a table with parsed numbers and flags
        #[arg(long, conflicts_with = "output")]
        table: bool,

        /// Include entries whose name starts with a dot
        #[arg(long)]
        hidden: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Add an amount to the number of every selected file
    ///
    /// With a single argument, every file is shifted by that amount.
    /// Otherwise TARGET is `all`, a `<start>-<end>` range or a position.
    #[command(verbatim_doc_comment)]
    Shift {
        /// Files to shift, or the amount when no second argument is given
        #[arg(allow_negative_numbers = true)]
        target: String,

        /// Amount to add, may be negative
        #[arg(allow_negative_numbers = true)]
        amount: Option<i64>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Move a block of files to a new position, renumbering everything between
    Insert {
        /// A `<start>-<end>` range or a single position
        selection: String,

        /// Position the block moves to
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Zero-pad every numbered name to a common width
    Normalize {
        /// Pad to this many digits instead of the widest number present
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        width: Option<usize>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Apply `+`/`-` flag groups, then strip the flags
    ///
    /// A name like `4++.jpg` shifts itself and every later file up by two.
    /// A name like `2-.jpg` shifts itself and every earlier file down by one.
    #[command(verbatim_doc_comment)]
    Parse {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Print a shell completion script to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
