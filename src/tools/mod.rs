//! The tools module provides helpers around the codecs.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - freq_count: Character frequency count for Huffman coding.
//!
pub mod cli;
pub mod freq_count;
