use crate::error::{IoOp, PartkitError, Result};
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Destination for the parts produced by a [`Chunker`].
///
/// Calls arrive strictly as `begin(0) write* end() begin(1) write* end() ...`;
/// a part is only begun once there is at least one byte to put in it.
pub trait PartSink {
    fn begin(&mut self, index: u64) -> Result<()>;
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
    /// Flush and close the active part.
    fn end(&mut self) -> Result<()>;
}

/// Fixed-size chunker over a byte stream, using one bounded read buffer.
#[derive(Clone, Copy, Debug)]
pub struct Chunker {
    chunk_size: u64,
    buf_size: usize,
}

impl Chunker {
    pub fn new(chunk_size: u64, buf_size: usize) -> Result<Self> {
        if chunk_size < 1 {
            return Err(PartkitError::InvalidInput("Chunk is less than 1 byte".into()));
        }
        Ok(Self {
            chunk_size,
            buf_size: buf_size.max(1),
        })
    }

    /// Streams `src` into `sink`, returning the length of every part in order.
    /// `origin` only labels read errors.
    pub fn run<R: Read, S: PartSink>(
        &self,
        src: &mut R,
        origin: &Path,
        sink: &mut S,
    ) -> Result<Vec<u64>> {
        let mut buf = vec![0u8; self.buf_size];
        let mut sizes = Vec::new();
        let mut index = 0u64;
        let mut fill = 0u64;
        let mut open = false;

        loop {
            let n = match src.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PartkitError::io(IoOp::Read, origin, e)),
            };

            let mut rest = &buf[..n];
            while !rest.is_empty() {
                if !open {
                    sink.begin(index)?;
                    open = true;
                    fill = 0;
                }
                let room = self.chunk_size - fill;
                let take = room.min(rest.len() as u64) as usize;
                sink.write(&rest[..take])?;
                rest = &rest[take..];
                fill += take as u64;

                if fill == self.chunk_size {
                    sink.end()?;
                    sizes.push(fill);
                    index += 1;
                    open = false;
                }
            }
        }

        // tail shorter than chunk_size
        if open {
            sink.end()?;
            sizes.push(fill);
        }
        Ok(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory sink that also checks the call protocol.
    #[derive(Default)]
    struct MemSink {
        parts: Vec<Vec<u8>>,
        active: bool,
    }

    impl PartSink for MemSink {
        fn begin(&mut self, index: u64) -> Result<()> {
            assert!(!self.active, "begin while a part is open");
            assert_eq!(index as usize, self.parts.len());
            self.parts.push(Vec::new());
            self.active = true;
            Ok(())
        }
        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            assert!(self.active, "write to a closed part");
            self.parts.last_mut().unwrap().extend_from_slice(bytes);
            Ok(())
        }
        fn end(&mut self) -> Result<()> {
            assert!(self.active);
            self.active = false;
            Ok(())
        }
    }

    fn chunk(data: &[u8], chunk_size: u64, buf_size: usize) -> MemSink {
        let mut sink = MemSink::default();
        let c = Chunker::new(chunk_size, buf_size).unwrap();
        let sizes = c.run(&mut &data[..], Path::new("mem"), &mut sink).unwrap();
        let lens: Vec<u64> = sink.parts.iter().map(|p| p.len() as u64).collect();
        assert_eq!(sizes, lens);
        sink
    }

    #[test]
    fn remainder_goes_to_last_part() {
        let data: Vec<u8> = (0..10).collect();
        let sink = chunk(&data, 4, 3);
        assert_eq!(sink.parts, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
    }

    #[test]
    fn exact_boundary_has_no_empty_tail() {
        let data = vec![7u8; 12];
        let sink = chunk(&data, 4, 5);
        assert_eq!(sink.parts.len(), 3);
        assert!(sink.parts.iter().all(|p| p.len() == 4));
    }

    #[test]
    fn read_buffer_aligned_with_chunk() {
        // each read ends exactly on a part boundary
        let data: Vec<u8> = (0..16).collect();
        let sink = chunk(&data, 4, 4);
        assert_eq!(sink.parts.len(), 4);
        assert_eq!(sink.parts.concat(), data);
    }

    #[test]
    fn chunk_larger_than_buffer() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let sink = chunk(&data, 300, 7);
        let lens: Vec<usize> = sink.parts.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![300, 300, 300, 100]);
        assert_eq!(sink.parts.concat(), data);
    }

    #[test]
    fn one_byte_chunks() {
        let data = b"abcdef";
        let sink = chunk(data, 1, 4);
        assert_eq!(sink.parts.len(), data.len());
        assert!(sink.parts.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn empty_input_produces_nothing() {
        let sink = chunk(b"", 4, 4);
        assert!(sink.parts.is_empty());
    }

    #[test]
    fn zero_chunk_rejected() {
        assert!(matches!(
            Chunker::new(0, 16).unwrap_err(),
            PartkitError::InvalidInput(_)
        ));
    }

    /// Accepts part 0, then fails the first write into `fail_at`.
    struct FailingSink {
        fail_at: u64,
        active: Option<u64>,
        ended: Vec<u64>,
    }

    impl PartSink for FailingSink {
        fn begin(&mut self, index: u64) -> Result<()> {
            self.active = Some(index);
            Ok(())
        }
        fn write(&mut self, _bytes: &[u8]) -> Result<()> {
            match self.active {
                Some(i) if i == self.fail_at => Err(PartkitError::io(
                    IoOp::Write,
                    format!("part_{i}"),
                    std::io::Error::from(ErrorKind::StorageFull),
                )),
                _ => Ok(()),
            }
        }
        fn end(&mut self) -> Result<()> {
            if let Some(i) = self.active.take() {
                self.ended.push(i);
            }
            Ok(())
        }
    }

    #[test]
    fn write_error_stops_the_split() {
        let data = [5u8; 10];
        let mut sink = FailingSink {
            fail_at: 1,
            active: None,
            ended: Vec::new(),
        };
        let c = Chunker::new(4, 3).unwrap();
        let err = c
            .run(&mut &data[..], Path::new("src.bin"), &mut sink)
            .unwrap_err();
        match err {
            PartkitError::Io { op, path, .. } => {
                assert_eq!(op, IoOp::Write);
                assert_eq!(path, Path::new("part_1"));
            }
            other => panic!("unexpected: {other}"),
        }
        // part 0 was finished; nothing was begun after the failure
        assert_eq!(sink.ended, vec![0]);
        assert_eq!(sink.active, Some(1));
    }

    struct FailingReader {
        left: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.left == 0 {
                return Err(std::io::Error::other("device error"));
            }
            let n = buf.len().min(self.left);
            buf[..n].fill(1);
            self.left -= n;
            Ok(n)
        }
    }

    #[test]
    fn read_error_aborts_with_source_path() {
        let mut sink = MemSink::default();
        let c = Chunker::new(4, 3).unwrap();
        let err = c
            .run(&mut FailingReader { left: 6 }, Path::new("src.bin"), &mut sink)
            .unwrap_err();
        match err {
            PartkitError::Io { op, path, .. } => {
                assert_eq!(op, IoOp::Read);
                assert_eq!(path, Path::new("src.bin"));
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
