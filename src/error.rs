//! Error types for the bit I/O layer and both codecs.
//!
//! Nothing here is retried. Every variant is a hard failure of the current
//! compress/decompress call; output already flushed to the sink stays there.

use thiserror::Error;

/// Errors raised by the bitstream primitives and the codecs built on them.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A value outside its domain: byte outside 0-255, bit outside 0/1, position outside 0-7.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A bit was written after the writer was closed.
    #[error("stream is closed")]
    ClosedStream,

    /// A code or character is missing from an encoding table.
    #[error("not found: {0}")]
    NotFound(String),

    /// A minimum was requested from an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// The bit stream ended in the middle of a tree header or a character code.
    #[error("unexpected end of bit stream")]
    UnexpectedEndOfStream,

    /// Failure reported by the underlying byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
