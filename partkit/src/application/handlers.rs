use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use partkit_core::error::{IoOp, PartkitError, Result};
use partkit_core::source::SourceFile;
use partkit_core::{
    ChunkPlan, ConcatReader, PartRange, StreamOptions, discover_parts, merge_into_one,
    part_path, split_by_bytes,
};
use serde::Serialize;
use tracing::debug;

use crate::presentation::cli::{IoArgs, SizeArgs};

#[derive(Serialize)]
struct SplitReport<'a> {
    src: &'a Path,
    plan: ChunkPlan,
    parts: &'a [PathBuf],
}

#[derive(Serialize)]
struct PlanReport<'a> {
    src: &'a Path,
    plan: ChunkPlan,
    part_count: u64,
    ranges: Vec<PartRange>,
}

fn stream_options(io: IoArgs) -> StreamOptions {
    StreamOptions {
        buf_size: io.buf_size,
        sync: io.sync,
    }
}

fn stdout_error(e: std::io::Error) -> PartkitError {
    PartkitError::Io {
        op: IoOp::Write,
        path: PathBuf::from("<stdout>"),
        source: e,
    }
}

fn plan_for(src: &Path, size: SizeArgs) -> Result<ChunkPlan> {
    let source = SourceFile::stat(src)?;
    match (size.parts, size.bytes) {
        (Some(parts), _) => ChunkPlan::for_part_count(source.size, parts),
        (None, Some(bytes)) => ChunkPlan::for_chunk_size(source.size, bytes),
        (None, None) => Err(PartkitError::InvalidInput(
            "one of --parts or --bytes is required".into(),
        )),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).map_err(|e| stdout_error(e.into()))?;
    writeln!(out).map_err(stdout_error)
}

/// Explicit list wins; otherwise the list is rebuilt from `prefix`.
fn resolve_parts(parts: Vec<PathBuf>, prefix: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let Some(prefix) = prefix else {
        return Ok(parts);
    };
    let found = discover_parts(&prefix);
    if found.is_empty() {
        return Err(PartkitError::NotFound {
            path: part_path(&prefix, 0),
            source: None,
        });
    }
    debug!(prefix = %prefix.display(), parts = found.len(), "discovered parts");
    Ok(found)
}

pub fn handle_split(
    src: PathBuf,
    prefix: PathBuf,
    size: SizeArgs,
    io: IoArgs,
    json: bool,
) -> Result<()> {
    let opts = stream_options(io);
    let plan = plan_for(&src, size)?;
    debug!(
        src = %src.display(),
        chunk_size = plan.chunk_size,
        parts = plan.part_count(),
        "planned split"
    );
    let parts = split_by_bytes(&src, plan.chunk_size, &prefix, Some(&opts))?;

    if json {
        return print_json(&SplitReport {
            src: &src,
            plan,
            parts: &parts,
        });
    }
    let mut out = std::io::stdout().lock();
    for p in &parts {
        writeln!(out, "{}", p.display()).map_err(stdout_error)?;
    }
    Ok(())
}

pub fn handle_plan(src: PathBuf, size: SizeArgs, json: bool) -> Result<()> {
    let plan = plan_for(&src, size)?;
    if json {
        return print_json(&PlanReport {
            src: &src,
            plan,
            part_count: plan.part_count(),
            ranges: plan.ranges().collect(),
        });
    }
    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "{}  size={} chunk={} parts={}",
        src.display(),
        plan.source_size,
        plan.chunk_size,
        plan.part_count()
    )
    .map_err(stdout_error)?;
    for r in plan.ranges() {
        writeln!(out, "#{:<5} off={:<12} len={}", r.index, r.offset, r.len)
            .map_err(stdout_error)?;
    }
    Ok(())
}

pub fn handle_join(
    dest: PathBuf,
    parts: Vec<PathBuf>,
    prefix: Option<PathBuf>,
    io: IoArgs,
) -> Result<()> {
    let parts = resolve_parts(parts, prefix)?;
    let opts = stream_options(io);
    let dest = merge_into_one(&parts, &dest, Some(&opts))?;
    println!("{}", dest.display());
    Ok(())
}

pub fn handle_cat(parts: Vec<PathBuf>, prefix: Option<PathBuf>, buf_size: usize) -> Result<()> {
    let parts = resolve_parts(parts, prefix)?;
    if parts.is_empty() {
        return Err(PartkitError::InvalidInput("No parts to merge".into()));
    }
    let opts = StreamOptions {
        buf_size,
        sync: false,
    };
    let mut reader = ConcatReader::new(&parts);
    let mut out = std::io::stdout().lock();
    let mut buf = vec![0u8; opts.effective_buf_size()];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PartkitError::from_io(e)),
        };
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n]).map_err(stdout_error)?;
    }
    out.flush().map_err(stdout_error)
}
