use super::parts::open_parts;
use crate::error::{IoOp, PartkitError, Result};
use crate::options::{StreamOptions, effective_buf_size, wants_sync};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Concatenates `parts`, in list order, into a fresh file at `dest`.
///
/// The list is trusted as given: no size or completeness checks. On
/// failure `dest` may be left partially written.
pub fn merge_into_one<P: AsRef<Path>>(
    parts: &[P],
    dest: &Path,
    opts: Option<&StreamOptions>,
) -> Result<PathBuf> {
    if parts.is_empty() {
        return Err(PartkitError::InvalidInput("No parts to merge".into()));
    }

    let out_f = File::create(dest).map_err(|e| PartkitError::io(IoOp::Create, dest, e))?;
    let mut out = BufWriter::new(out_f);
    let mut buf = vec![0u8; effective_buf_size(opts)];
    let mut total = 0u64;

    for part in open_parts(parts) {
        let mut part = part?;
        let mut copied = 0u64;
        loop {
            let n = match part.file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PartkitError::io(IoOp::Read, &part.path, e)),
            };
            out.write_all(&buf[..n])
                .map_err(|e| PartkitError::io(IoOp::Write, dest, e))?;
            copied += n as u64;
        }
        debug!(part = %part.path.display(), index = part.index, bytes = copied, "part merged");
        total += copied;
    }

    let out_f = out
        .into_inner()
        .map_err(|e| PartkitError::io(IoOp::Flush, dest, e.into_error()))?;
    if wants_sync(opts) {
        out_f
            .sync_all()
            .map_err(|e| PartkitError::io(IoOp::Flush, dest, e))?;
    }
    drop(out_f);

    info!(dest = %dest.display(), parts = parts.len(), bytes = total, "merge complete");
    Ok(dest.to_path_buf())
}
