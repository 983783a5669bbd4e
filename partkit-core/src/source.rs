use crate::error::{IoOp, PartkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A source file that passed the split preconditions: it exists, is a
/// regular file and is not empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
}

impl SourceFile {
    pub fn stat(path: &Path) -> Result<Self> {
        let md = fs::metadata(path).map_err(|e| PartkitError::open(IoOp::Stat, path, e))?;
        if !md.is_file() {
            return Err(PartkitError::NotFound {
                path: path.to_path_buf(),
                source: None,
            });
        }
        if md.len() == 0 {
            return Err(PartkitError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            size: md.len(),
        })
    }
}
