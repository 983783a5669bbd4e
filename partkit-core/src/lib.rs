#![forbid(unsafe_code)]

pub mod error;
pub mod naming;
pub mod options;
pub mod plan;
pub mod source;

pub mod split {
    pub mod chunker;
    pub mod writer;
}

pub mod join {
    pub mod merge;
    pub mod parts;
}

pub mod read {
    pub mod concat;
}

// Re-exports: stable API surface
pub use error::{PartkitError, Result};
pub use join::merge::merge_into_one;
pub use naming::{discover_parts, part_path};
pub use options::StreamOptions;
pub use plan::{ChunkPlan, PartRange};
pub use read::concat::ConcatReader;
pub use split::writer::{split_by_bytes, split_into_parts};
