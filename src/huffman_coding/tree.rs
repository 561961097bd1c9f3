//! A plain binary tree used for prefix codes.
//!
//! Children are owned by their parent and there are no parent links. Code that needs the
//! path to a node carries it along while descending.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode<T> {
    left: Option<Box<TreeNode<T>>>,
    right: Option<Box<TreeNode<T>>>,
    value: Option<T>,
}

impl<T> TreeNode<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            left: None,
            right: None,
            value: Some(value),
        }
    }

    pub fn internal(left: TreeNode<T>, right: TreeNode<T>) -> Self {
        Self {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
            value: None,
        }
    }

    pub fn left(&self) -> Option<&TreeNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode<T>> {
        self.right.as_deref()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children().map(|c| c.leaf_count()).sum()
    }

    /// Length of the longest root to leaf path.
    pub fn depth(&self) -> usize {
        self.children().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Leaf values in pre-order (left before right).
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        if self.is_leaf() {
            out.extend(self.value());
            return;
        }
        self.children().for_each(|c| c.collect_leaves(out));
    }

    fn children(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.left().into_iter().chain(self.right())
    }
}

#[cfg(test)]
mod test {
    use super::TreeNode;

    fn sample() -> TreeNode<char> {
        TreeNode::internal(
            TreeNode::leaf('a'),
            TreeNode::internal(TreeNode::leaf('b'), TreeNode::leaf('c')),
        )
    }

    #[test]
    fn leaf_test() {
        let leaf = TreeNode::leaf('x');
        assert!(leaf.is_leaf());
        assert_eq!(leaf.value(), Some(&'x'));
        assert_eq!(leaf.depth(), 0);
        assert_eq!(leaf.leaf_count(), 1);
    }

    #[test]
    fn internal_test() {
        let tree = sample();
        assert!(!tree.is_leaf());
        assert_eq!(tree.value(), None);
        assert_eq!(tree.left().and_then(|n| n.value()), Some(&'a'));
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.leaves(), vec![&'a', &'b', &'c']);
    }
}
