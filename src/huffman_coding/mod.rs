//! The huffman_coding module builds prefix codes for text.
//!
//! - tree: a child-owned binary tree.
//! - huffman: greedy tree construction from a frequency table.
//! - encoding_table: the character <-> code mapping and the serialized tree header.
//!
//! Codes are derived from the tree shape only; there are no canonical codes and no
//! length limits. The tree travels with the compressed data in its header.
//!

pub mod encoding_table;
pub mod huffman;
pub mod tree;
