use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "partkit: split files into parts and join them back", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Either a part count or a chunk size, never both.
#[derive(Args, Clone, Copy, Debug)]
#[group(required = true, multiple = false)]
pub struct SizeArgs {
    /// Number of parts; chunk size is ceil(size / parts)
    #[arg(long)]
    pub parts: Option<u64>,
    /// Chunk size in bytes
    #[arg(long)]
    pub bytes: Option<u64>,
}

#[derive(Args, Clone, Copy, Debug)]
pub struct IoArgs {
    /// Read/copy buffer size in bytes (default 1 MiB)
    #[arg(long, default_value_t = 0)]
    pub buf_size: usize,
    /// fsync written files before reporting them
    #[arg(long)]
    pub sync: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a file into `<PREFIX>_0`, `<PREFIX>_1`, ...
    Split {
        src: PathBuf,
        prefix: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
        #[command(flatten)]
        io: IoArgs,
        /// Print a JSON report instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Show how a file would be split, without writing anything
    Plan {
        src: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
        #[arg(long)]
        json: bool,
    },

    /// Concatenate parts, in the given order, into DEST
    Join {
        dest: PathBuf,
        /// Part files in order
        parts: Vec<PathBuf>,
        /// Use `<PREFIX>_0`, `<PREFIX>_1`, ... up to the first missing index
        #[arg(long, conflicts_with = "parts")]
        prefix: Option<PathBuf>,
        #[command(flatten)]
        io: IoArgs,
    },

    /// Stream the concatenated parts to stdout
    Cat {
        parts: Vec<PathBuf>,
        #[arg(long, conflicts_with = "parts")]
        prefix: Option<PathBuf>,
        /// Read buffer size in bytes (default 1 MiB)
        #[arg(long, default_value_t = 0)]
        buf_size: usize,
    },
}
