//! Bit-granular I/O plus two stream compressors built on it.
//!
//! Provides run-length encoding of bit runs and Huffman coding of UTF-8 text, both
//! reading from any `std::io::Read` and writing to any `std::io::Write`.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> bitpress -z test.txt`
//!
//! This will compress the file with Huffman coding and create the file test.txt.huf.
//! The original file will be deleted unless `-k` is given. Use `--rle` for run-length
//! encoding (test.txt.rle) and `-d` to decompress.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{CodecError, Result};
