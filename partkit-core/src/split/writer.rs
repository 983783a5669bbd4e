use super::chunker::{Chunker, PartSink};
use crate::error::{IoOp, PartkitError, Result};
use crate::naming::part_path;
use crate::options::{StreamOptions, effective_buf_size, wants_sync};
use crate::plan::ChunkPlan;
use crate::source::SourceFile;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writes parts as `${prefix}_${index}` files.
pub struct FsPartSink {
    prefix: PathBuf,
    sync: bool,
    current: Option<(PathBuf, BufWriter<File>)>,
    done: Vec<PathBuf>,
}

impl FsPartSink {
    pub fn new(prefix: &Path, sync: bool) -> Self {
        Self {
            prefix: prefix.to_path_buf(),
            sync,
            current: None,
            done: Vec::new(),
        }
    }

    /// Paths of the parts that were fully written and closed.
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.done
    }
}

impl PartSink for FsPartSink {
    fn begin(&mut self, index: u64) -> Result<()> {
        let path = part_path(&self.prefix, index);
        let f = File::create(&path).map_err(|e| PartkitError::io(IoOp::Create, &path, e))?;
        self.current = Some((path, BufWriter::new(f)));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let Some((path, w)) = self.current.as_mut() else {
            return Err(PartkitError::InvalidInput("write with no open part".into()));
        };
        w.write_all(bytes)
            .map_err(|e| PartkitError::io(IoOp::Write, path.as_path(), e))
    }

    fn end(&mut self) -> Result<()> {
        let Some((path, w)) = self.current.take() else {
            return Ok(());
        };
        let f = w
            .into_inner()
            .map_err(|e| PartkitError::io(IoOp::Flush, &path, e.into_error()))?;
        if self.sync {
            f.sync_all()
                .map_err(|e| PartkitError::io(IoOp::Flush, &path, e))?;
        }
        drop(f);
        debug!(part = %path.display(), "part written");
        self.done.push(path);
        Ok(())
    }
}

/// Splits `src` into `parts` parts of `ceil(size / parts)` bytes each
/// (the last one holds the remainder).
pub fn split_into_parts(
    src: &Path,
    parts: u64,
    prefix: &Path,
    opts: Option<&StreamOptions>,
) -> Result<Vec<PathBuf>> {
    let source = SourceFile::stat(src)?;
    let plan = ChunkPlan::for_part_count(source.size, parts)?;
    debug!(
        src = %src.display(),
        size = source.size,
        parts,
        chunk_size = plan.chunk_size,
        "planned split"
    );
    split_by_bytes(src, plan.chunk_size, prefix, opts)
}

/// Splits `src` into parts of exactly `chunk_size` bytes, except the last.
///
/// Parts already written are left on disk if the split fails.
pub fn split_by_bytes(
    src: &Path,
    chunk_size: u64,
    prefix: &Path,
    opts: Option<&StreamOptions>,
) -> Result<Vec<PathBuf>> {
    let source = SourceFile::stat(src)?;
    let chunker = Chunker::new(chunk_size, effective_buf_size(opts))?;

    let mut f = File::open(src).map_err(|e| PartkitError::open(IoOp::Open, src, e))?;
    let mut sink = FsPartSink::new(prefix, wants_sync(opts));
    let sizes = chunker.run(&mut f, src, &mut sink)?;
    if sizes.is_empty() {
        return Err(PartkitError::EmptyFile {
            path: src.to_path_buf(),
        });
    }

    let total: u64 = sizes.iter().sum();
    if total != source.size {
        warn!(
            src = %src.display(),
            expected = source.size,
            read = total,
            "source size changed during split"
        );
    }
    let paths = sink.into_paths();
    info!(
        src = %src.display(),
        parts = paths.len(),
        chunk_size,
        bytes = total,
        "split complete"
    );
    Ok(paths)
}
