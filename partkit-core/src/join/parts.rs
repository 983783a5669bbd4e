use crate::error::{IoOp, PartkitError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// A part opened for reading.
pub struct OpenPart {
    pub index: usize,
    pub path: PathBuf,
    pub file: File,
}

/// Opens each part only when the iterator is advanced; one pass, in list order.
pub struct PartSources<'a, P: AsRef<Path>> {
    paths: std::iter::Enumerate<std::slice::Iter<'a, P>>,
}

pub fn open_parts<P: AsRef<Path>>(paths: &[P]) -> PartSources<'_, P> {
    PartSources {
        paths: paths.iter().enumerate(),
    }
}

impl<P: AsRef<Path>> Iterator for PartSources<'_, P> {
    type Item = Result<OpenPart>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, p) = self.paths.next()?;
        let path = p.as_ref();
        Some(
            File::open(path)
                .map(|file| OpenPart {
                    index,
                    path: path.to_path_buf(),
                    file,
                })
                .map_err(|e| PartkitError::open(IoOp::Open, path, e)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}
