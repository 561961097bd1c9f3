//! Huffman tree construction.
//!
//! The tree is built greedily: every character becomes a leaf, then the two lightest
//! elements are repeatedly merged until one remains. The greedy loop is generic over the
//! element type so the same code can build trees, total weights or code lengths.
//!
//! Tie-break policy: the working collection starts in ascending character order, merged
//! elements are appended at the end, and `remove_min` takes the first minimal element it
//! finds. The resulting tree is therefore the same on every run.

use std::cmp::Ordering;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::encoding_table::EncodingTable;
use super::tree::TreeNode;
use crate::error::{CodecError, Result};

/// A tree node carrying the combined frequency of all leaves below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanNode {
    pub frequency: u64,
    pub node: TreeNode<char>,
}

impl HuffmanNode {
    pub fn leaf(value: char, frequency: u32) -> Self {
        Self {
            frequency: frequency as u64,
            node: TreeNode::leaf(value),
        }
    }

    /// Merge two nodes. The first becomes the left child.
    pub fn combine(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self {
            frequency: left.frequency + right.frequency,
            node: TreeNode::internal(left.node, right.node),
        }
    }
}

/// Remove and return the first element that is <= all others.
pub fn remove_min<T, C>(items: &mut Vec<T>, cmp: C) -> Result<T>
where
    C: Fn(&T, &T) -> Ordering,
{
    if items.is_empty() {
        return Err(CodecError::EmptyCollection);
    }
    let mut min = 0;
    for i in 1..items.len() {
        if cmp(&items[i], &items[min]) == Ordering::Less {
            min = i;
        }
    }
    Ok(items.remove(min))
}

/// Greedy bottom-up construction.
///
/// Each (character, count) entry is turned into an element by `leaf_maker`. The two
/// minimal elements per `cmp` are then replaced by `combiner(first, second)` until one
/// element is left. An empty frequency table fails with EmptyCollection.
pub fn build<T, F, G, C>(
    frequency: &FxHashMap<char, u32>,
    mut leaf_maker: F,
    mut combiner: G,
    cmp: C,
) -> Result<T>
where
    F: FnMut(char, u32) -> T,
    G: FnMut(T, T) -> T,
    C: Fn(&T, &T) -> Ordering,
{
    let mut entries: Vec<(char, u32)> = frequency.iter().map(|(&c, &f)| (c, f)).collect();
    entries.sort_unstable_by_key(|&(c, _)| c);

    let mut items: Vec<T> = entries
        .into_iter()
        .map(|(c, f)| leaf_maker(c, f))
        .collect();

    while items.len() > 1 {
        let first = remove_min(&mut items, &cmp)?;
        let second = remove_min(&mut items, &cmp)?;
        items.push(combiner(first, second));
    }
    remove_min(&mut items, &cmp)
}

/// Build the Huffman tree for a frequency table.
pub fn build_tree(frequency: &FxHashMap<char, u32>) -> Result<TreeNode<char>> {
    let root = build(
        frequency,
        HuffmanNode::leaf,
        |left, right| {
            trace!(
                "Merging weights {} + {}",
                left.frequency,
                right.frequency
            );
            HuffmanNode::combine(left, right)
        },
        |a, b| a.frequency.cmp(&b.frequency),
    )?;
    debug!(
        "Built huffman tree: {} leaves, depth {}, total weight {}",
        root.node.leaf_count(),
        root.node.depth(),
        root.frequency
    );
    Ok(root.node)
}

/// Build the tree for a frequency table and wrap it in an encoding table.
pub fn build_encoding_table(frequency: &FxHashMap<char, u32>) -> Result<EncodingTable> {
    Ok(EncodingTable::new(build_tree(frequency)?))
}
