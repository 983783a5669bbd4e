pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use partkit_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Split {
            src,
            prefix,
            size,
            io,
            json,
        } => handlers::handle_split(src, prefix, size, io, json),
        Commands::Plan { src, size, json } => handlers::handle_plan(src, size, json),
        Commands::Join {
            dest,
            parts,
            prefix,
            io,
        } => handlers::handle_join(dest, parts, prefix, io),
        Commands::Cat {
            parts,
            prefix,
            buf_size,
        } => handlers::handle_cat(parts, prefix, buf_size),
    }
}
