//! Error types for view construction.
//!
//! Only constructors and validators return errors. The read path is total:
//! lookups report failure through empty values and zero sizes, never through
//! this type.

use thiserror::Error;

/// Main error type for property view construction.
#[derive(Error, Debug)]
pub enum Error {
    /// Byte buffer does not divide evenly into elements
    #[error("Buffer of {len} bytes does not divide into {element_size}-byte elements")]
    BufferSizeMismatch { len: usize, element_size: usize },

    /// Array count must be positive
    #[error("Invalid fixed array count: {count}")]
    InvalidArrayCount { count: i64 },

    /// Value buffer length is not a multiple of the fixed array count
    #[error("{len} values do not divide into arrays of {count}")]
    ValueCountMismatch { len: usize, count: usize },

    /// Array offsets must start at 0, increase monotonically, and end at the
    /// value buffer length
    #[error("Invalid array offset at index {index}")]
    InvalidArrayOffsets { index: usize },
}

/// Result type alias for view construction.
pub type Result<T> = std::result::Result<T, Error>;
