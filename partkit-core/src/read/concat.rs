use crate::error::{IoOp, PartkitError};
use crate::join::parts::{OpenPart, PartSources, open_parts};
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Reads a part list as one continuous stream. Parts are opened on
/// demand; the next one is opened only after the current one hit EOF.
///
/// Failures are `io::Error`s wrapping a [`PartkitError`] that names the
/// part; recover it with [`PartkitError::from_io`].
pub struct ConcatReader<'a, P: AsRef<Path>> {
    parts: PartSources<'a, P>,
    cur: Option<OpenPart>,
}

impl<'a, P: AsRef<Path>> ConcatReader<'a, P> {
    pub fn new(paths: &'a [P]) -> Self {
        Self {
            parts: open_parts(paths),
            cur: None,
        }
    }
}

impl<P: AsRef<Path>> Read for ConcatReader<'_, P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if let Some(part) = self.cur.as_mut() {
                let n = part.file.read(buf).map_err(|e| {
                    if e.kind() == ErrorKind::Interrupted {
                        e
                    } else {
                        PartkitError::io(IoOp::Read, &part.path, e).into_io()
                    }
                })?;
                if n > 0 {
                    return Ok(n);
                }
                self.cur = None;
            }
            match self.parts.next() {
                None => return Ok(0),
                Some(Ok(part)) => self.cur = Some(part),
                Some(Err(e)) => return Err(e.into_io()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn reads_parts_back_to_back() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["a", "b", "c"];
        for (i, n) in names.iter().enumerate() {
            fs::write(dir.path().join(n), vec![b'0' + i as u8; i + 1]).unwrap();
        }
        // an empty part contributes nothing
        fs::write(dir.path().join("e"), b"").unwrap();

        let list: Vec<PathBuf> = ["a", "e", "b", "c"]
            .iter()
            .map(|n| dir.path().join(n))
            .collect();
        let mut out = Vec::new();
        ConcatReader::new(&list).read_to_end(&mut out).unwrap();
        assert_eq!(out, b"011222");
    }

    #[test]
    fn missing_part_keeps_path_and_os_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        fs::write(&a, b"ok").unwrap();
        let gone = dir.path().join("gone");
        let list = vec![a, gone.clone()];

        let mut out = Vec::new();
        let err = ConcatReader::new(&list).read_to_end(&mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(out, b"ok");

        let err = PartkitError::from_io(err);
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some(gone.as_path()));
        // the path is reported once, by the outer error only
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(!cause.contains("gone"), "{cause}");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_part_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let list = vec![sub.clone()];
        let mut out = Vec::new();
        let err = ConcatReader::new(&list).read_to_end(&mut out).unwrap_err();
        match PartkitError::from_io(err) {
            PartkitError::Io { op, path, .. } => {
                assert_eq!(op, IoOp::Read);
                assert_eq!(path, sub);
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
