//! Character <-> code mapping derived from a Huffman tree, and the tree's header format.
//!
//! Codes are strings of '0' and '1': '0' for every step to the left, '1' for every step
//! to the right. Only leaves carry characters, so no code is a prefix of another. The
//! character -> code map is built the first time it is needed and cached afterwards.
//!
//! Header format (pre-order, most significant bit first):
//! - leaf: bit 1, then the character's code point as a 4 byte big endian word.
//! - internal node: bit 0, then the header of the left child, then the right child.

use std::cell::OnceCell;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};

use log::trace;
use rustc_hash::FxHashMap;

use super::tree::TreeNode;
use crate::bitstream::bit::Bit;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{CodecError, Result};

/// Header bits used by one leaf: the marker bit plus a 32 bit code point.
const LEAF_HEADER_BITS: usize = 1 + 32;
/// Deepest tree accepted when reading a header.
const MAX_TREE_DEPTH: usize = 1024;

#[derive(Debug)]
pub struct EncodingTable {
    root: TreeNode<char>,
    encodings: OnceCell<FxHashMap<char, String>>,
}

impl EncodingTable {
    pub fn new(root: TreeNode<char>) -> Self {
        Self {
            root,
            encodings: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &TreeNode<char> {
        &self.root
    }

    /// The character -> code map, built on first use.
    pub fn encodings(&self) -> &FxHashMap<char, String> {
        self.encodings.get_or_init(|| self.build_encodings())
    }

    fn build_encodings(&self) -> FxHashMap<char, String> {
        let mut encodings = FxHashMap::default();
        collect_codes(&self.root, &mut String::new(), &mut encodings);
        // A lone leaf has an empty path. Give it a one bit code so it still costs a bit.
        if encodings.len() == 1 {
            encodings.values_mut().for_each(|code| *code = "1".to_string());
        }
        trace!("Encoding table built with {} entries", encodings.len());
        encodings
    }

    pub fn get_code(&self, character: char) -> Result<&str> {
        self.encodings()
            .get(&character)
            .map(String::as_str)
            .ok_or_else(|| CodecError::NotFound(format!("'{}'", character)))
    }

    /// Walk the tree along `code` and return the first leaf reached.
    pub fn get_character(&self, code: &str) -> Result<char> {
        let mut current = &self.root;
        if let Some(&value) = leaf_value(current) {
            return Ok(value);
        }
        for c in code.chars() {
            let next = match c {
                '0' => current.left(),
                '1' => current.right(),
                other => {
                    return Err(CodecError::InvalidArgument(format!(
                        "code may only contain 0 and 1: {}",
                        other
                    )))
                }
            };
            current = next.ok_or_else(|| CodecError::NotFound(code.to_string()))?;
            if let Some(&value) = leaf_value(current) {
                return Ok(value);
            }
        }
        Err(CodecError::NotFound(code.to_string()))
    }

    pub fn get_character_bits<I>(&self, bits: I) -> Result<char>
    where
        I: IntoIterator<Item = Bit>,
    {
        self.get_character(&join_bits(bits))
    }

    pub fn contains_character(&self, character: char) -> bool {
        self.encodings().contains_key(&character)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.get_character(code).is_ok()
    }

    pub fn contains_code_bits<I>(&self, bits: I) -> bool
    where
        I: IntoIterator<Item = Bit>,
    {
        self.contains_code(&join_bits(bits))
    }

    /// Number of bits `write_header` produces for this tree.
    pub fn header_size(&self) -> usize {
        header_size(&self.root)
    }

    /// Number of payload bits needed to encode `text`.
    pub fn text_size(&self, text: &str) -> Result<usize> {
        text.chars()
            .map(|c| self.get_code(c).map(str::len))
            .sum()
    }

    /// Serialize the tree, pre-order.
    pub fn write_header<W: Write>(&self, out: &mut BitWriter<W>) -> Result<()> {
        write_node(&self.root, out)
    }

    /// Rebuild a table from a serialized tree.
    pub fn read_header<R: Read>(input: &mut BitReader<R>) -> Result<EncodingTable> {
        Ok(EncodingTable::new(read_node(input, 0)?))
    }

    /// Decode one character from the stream by walking the tree from the root.
    ///
    /// Returns None if the stream ends before the first bit of a code. Running out of bits
    /// after that is an UnexpectedEndOfStream error.
    pub fn decode_next<R: Read>(&self, input: &mut BitReader<R>) -> Result<Option<char>> {
        let first = match input.read_bit()? {
            Some(bit) => bit,
            None => return Ok(None),
        };
        // A lone leaf uses the code "1": one bit per character.
        if let Some(&value) = leaf_value(&self.root) {
            return Ok(Some(value));
        }
        let mut current = &self.root;
        let mut bit = first;
        loop {
            let next = match bit {
                Bit::Zero => current.left(),
                Bit::One => current.right(),
            };
            current = next.ok_or(CodecError::UnexpectedEndOfStream)?;
            if let Some(&value) = leaf_value(current) {
                return Ok(Some(value));
            }
            bit = input
                .read_bit()?
                .ok_or(CodecError::UnexpectedEndOfStream)?;
        }
    }
}

impl PartialEq for EncodingTable {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Display for EncodingTable {
    /// Entries in character order, e.g. `{a=1, b=0}`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<(&char, &String)> = self.encodings().iter().collect();
        entries.sort_unstable();
        let body = entries
            .iter()
            .map(|(c, code)| format!("{}={}", c, code))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", body)
    }
}

fn leaf_value(node: &TreeNode<char>) -> Option<&char> {
    if node.is_leaf() {
        node.value()
    } else {
        None
    }
}

fn join_bits<I: IntoIterator<Item = Bit>>(bits: I) -> String {
    bits.into_iter().map(Bit::as_char).collect()
}

/// Pre-order walk recording the path to every leaf.
fn collect_codes(node: &TreeNode<char>, path: &mut String, out: &mut FxHashMap<char, String>) {
    if let Some(&value) = leaf_value(node) {
        out.insert(value, path.clone());
        return;
    }
    if let Some(left) = node.left() {
        path.push('0');
        collect_codes(left, path, out);
        path.pop();
    }
    if let Some(right) = node.right() {
        path.push('1');
        collect_codes(right, path, out);
        path.pop();
    }
}

fn header_size(node: &TreeNode<char>) -> usize {
    if node.is_leaf() {
        return LEAF_HEADER_BITS;
    }
    1 + node.left().map_or(0, header_size) + node.right().map_or(0, header_size)
}

fn write_node<W: Write>(node: &TreeNode<char>, out: &mut BitWriter<W>) -> Result<()> {
    match (leaf_value(node), node.left(), node.right()) {
        (Some(&value), _, _) => {
            out.write_bit(Bit::One)?;
            out.write_u32(value as u32)
        }
        (None, Some(left), Some(right)) => {
            out.write_bit(Bit::Zero)?;
            write_node(left, out)?;
            write_node(right, out)
        }
        _ => Err(CodecError::InvalidArgument(
            "tree node has exactly one child or a valueless leaf".to_string(),
        )),
    }
}

fn read_node<R: Read>(input: &mut BitReader<R>, depth: usize) -> Result<TreeNode<char>> {
    if depth > MAX_TREE_DEPTH {
        return Err(CodecError::InvalidArgument(format!(
            "tree header deeper than {}",
            MAX_TREE_DEPTH
        )));
    }
    match input.read_bit()? {
        None => Err(CodecError::UnexpectedEndOfStream),
        Some(Bit::One) => {
            let code_point = input.read_u32()?;
            let value = char::from_u32(code_point).ok_or_else(|| {
                CodecError::InvalidArgument(format!("invalid code point {:#x}", code_point))
            })?;
            Ok(TreeNode::leaf(value))
        }
        Some(Bit::Zero) => {
            let left = read_node(input, depth + 1)?;
            let right = read_node(input, depth + 1)?;
            Ok(TreeNode::internal(left, right))
        }
    }
}
