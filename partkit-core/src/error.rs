use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which filesystem call failed, for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
    Stat,
    Open,
    Create,
    Read,
    Write,
    Flush,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IoOp::Stat => "stat",
            IoOp::Open => "open",
            IoOp::Create => "create",
            IoOp::Read => "read",
            IoOp::Write => "write",
            IoOp::Flush => "flush",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum PartkitError {
    /// Missing path, or a path that is not a regular file. When the OS
    /// reported the condition, its error is kept as the source.
    #[error("File does not exist: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    #[error("{0}")]
    InvalidInput(String),

    #[error("I/O error ({op} {})", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PartkitError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PartkitError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Like [`PartkitError::io`], but an OS not-found becomes `NotFound`.
    pub(crate) fn open(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            PartkitError::NotFound {
                path: path.into(),
                source: Some(source),
            }
        } else {
            PartkitError::io(op, path, source)
        }
    }

    /// Wraps `self` in an `io::Error` of the matching kind, for `Read` impls.
    pub(crate) fn into_io(self) -> std::io::Error {
        let kind = match &self {
            PartkitError::NotFound { .. } => std::io::ErrorKind::NotFound,
            PartkitError::Io { source, .. } => source.kind(),
            PartkitError::EmptyFile { .. } | PartkitError::InvalidInput(_) => {
                std::io::ErrorKind::InvalidInput
            }
        };
        std::io::Error::new(kind, self)
    }

    /// Recovers the error carried by a stream error. Any other `io::Error`
    /// becomes a read failure on an unnamed stream.
    pub fn from_io(e: std::io::Error) -> Self {
        let wrapped = e
            .get_ref()
            .is_some_and(|inner| inner.is::<PartkitError>());
        if wrapped {
            if let Some(Ok(err)) = e.into_inner().map(|inner| inner.downcast::<PartkitError>()) {
                return *err;
            }
            return PartkitError::InvalidInput("unrecoverable stream error".into());
        }
        PartkitError::io(IoOp::Read, "<stream>", e)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PartkitError::NotFound { .. })
    }

    /// Path the failure refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PartkitError::NotFound { path, .. }
            | PartkitError::EmptyFile { path }
            | PartkitError::Io { path, .. } => Some(path),
            PartkitError::InvalidInput(_) => None,
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PartkitError>;
