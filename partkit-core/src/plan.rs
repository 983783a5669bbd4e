use crate::error::{PartkitError, Result};
use serde::{Deserialize, Serialize};

/// How a source of `source_size` bytes is cut into parts of `chunk_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPlan {
    pub source_size: u64,
    pub chunk_size: u64,
}

/// Byte range of one part within the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRange {
    pub index: u64,
    pub offset: u64,
    pub len: u64,
}

impl ChunkPlan {
    /// `chunk_size = ceil(source_size / parts)`.
    pub fn for_part_count(source_size: u64, parts: u64) -> Result<Self> {
        if parts == 0 {
            return Err(PartkitError::InvalidInput(
                "Number of parts must be at least 1".into(),
            ));
        }
        Self::for_chunk_size(source_size, source_size.div_ceil(parts))
    }

    pub fn for_chunk_size(source_size: u64, chunk_size: u64) -> Result<Self> {
        if chunk_size < 1 {
            return Err(PartkitError::InvalidInput("Chunk is less than 1 byte".into()));
        }
        Ok(Self {
            source_size,
            chunk_size,
        })
    }

    pub fn part_count(&self) -> u64 {
        self.source_size.div_ceil(self.chunk_size)
    }

    pub fn last_part_len(&self) -> u64 {
        match self.source_size % self.chunk_size {
            0 if self.source_size == 0 => 0,
            0 => self.chunk_size,
            rem => rem,
        }
    }

    pub fn part_len(&self, index: u64) -> Option<u64> {
        let count = self.part_count();
        if index >= count {
            None
        } else if index + 1 == count {
            Some(self.last_part_len())
        } else {
            Some(self.chunk_size)
        }
    }

    pub fn ranges(&self) -> impl Iterator<Item = PartRange> + '_ {
        (0..self.part_count()).map(move |index| PartRange {
            index,
            offset: index * self.chunk_size,
            len: self.part_len(index).unwrap_or(0),
        })
    }
}
