/// Read/copy buffer used when the caller does not pick one (1 MiB).
pub const DEFAULT_BUF_SIZE: usize = 1024 * 1024;

#[derive(Clone, Debug, Default)]
pub struct StreamOptions {
    /// Size of the bounded read buffer. 0 means [`DEFAULT_BUF_SIZE`].
    pub buf_size: usize,
    /// fsync every written file before reporting its path.
    pub sync: bool,
}

impl StreamOptions {
    /// `buf_size`, with 0 mapped to [`DEFAULT_BUF_SIZE`].
    pub fn effective_buf_size(&self) -> usize {
        if self.buf_size == 0 {
            DEFAULT_BUF_SIZE
        } else {
            self.buf_size
        }
    }
}

pub(crate) fn effective_buf_size(opts: Option<&StreamOptions>) -> usize {
    opts.map(StreamOptions::effective_buf_size)
        .unwrap_or(DEFAULT_BUF_SIZE)
}

pub(crate) fn wants_sync(opts: Option<&StreamOptions>) -> bool {
    opts.map(|o| o.sync).unwrap_or(false)
}
