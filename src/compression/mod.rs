//! The compression module holds both stream codecs and the file-level drivers.
//!
//! - rle: bit-level run-length encoding, (1 bit value, 1 byte count) pairs.
//! - huffman: a self-describing Huffman container (fill count, tree header, payload).
//! - compress / decompress: open files (or stdin/stdout) and run the selected codec.
//!
//! Every codec reads from a byte source and writes to a byte sink through the bitstream
//! module. Closing a codec flushes pending bits and releases both streams.
//!

pub mod compress;
pub mod decompress;
pub mod huffman;
pub mod rle;

use crate::error::Result;

/// A codec that compresses its whole input into its output in one call.
pub trait Compressor {
    fn compress(&mut self) -> Result<()>;
}

/// A codec that restores the original data from a compressed stream in one call.
pub trait Decompressor {
    fn decompress(&mut self) -> Result<()>;
}
