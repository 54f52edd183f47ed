//! Tree nodes, cached subtree aggregates and AVL rotations

use super::WeightedWord;

/// An owned, possibly absent, subtree
pub(crate) type Link = Option<Box<Node>>;

/// Which child slot of a parent a subtree hangs from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A node in the weighted word tree
///
/// The cached aggregates describe the subtree rooted here, this node included.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) entry: WeightedWord,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Edge count of the longest path to a leaf, plus one
    pub(crate) height: u32,
    /// Number of distinct words
    pub(crate) size: usize,
    /// Sum of all weights
    pub(crate) total_weight: i64,
}

impl Node {
    /// Create a detached leaf
    pub(crate) fn leaf(entry: WeightedWord) -> Box<Self> {
        Box::new(Self {
            total_weight: entry.weight,
            entry,
            left: None,
            right: None,
            height: 1,
            size: 1,
        })
    }

    /// Create a node over existing subtrees with aggregates computed
    pub(crate) fn with_children(entry: WeightedWord, left: Link, right: Link) -> Box<Self> {
        let mut node = Box::new(Self {
            entry,
            left,
            right,
            height: 0,
            size: 0,
            total_weight: 0,
        });
        node.update();
        node
    }

    /// Recompute the cached aggregates from the children
    pub(crate) fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.size = 1 + size(&self.left) + size(&self.right);
        self.total_weight = self.entry.weight + total_weight(&self.left) + total_weight(&self.right);
    }

    /// Positive when the right subtree is taller, negative when the left is
    pub(crate) fn imbalance(&self) -> i64 {
        i64::from(height(&self.right)) - i64::from(height(&self.left))
    }

    /// Total weight of this subtree once `bias` is added to every word
    pub(crate) fn weighted_total(&self, bias: i64) -> i64 {
        self.total_weight + bias * self.size as i64
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

pub(crate) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

pub(crate) fn size(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

pub(crate) fn total_weight(link: &Link) -> i64 {
    link.as_ref().map_or(0, |n| n.total_weight)
}

/// Single left rotation around `n`
///
/// ```text
///     n               p
///    / \             / \
///   A   p    ==>    n   C
///      / \         / \
///     B   C       A   B
/// ```
pub(crate) fn rotate_left(mut n: Box<Node>) -> Box<Node> {
    match n.right.take() {
        Some(mut p) => {
            n.right = p.left.take();
            n.update();
            p.left = Some(n);
            p.update();
            p
        }
        None => n,
    }
}

/// Single right rotation around `n`
///
/// ```text
///       n             p
///      / \           / \
///     p   C   ==>   A   n
///    / \               / \
///   A   B             B   C
/// ```
pub(crate) fn rotate_right(mut n: Box<Node>) -> Box<Node> {
    match n.left.take() {
        Some(mut p) => {
            n.left = p.right.take();
            n.update();
            p.right = Some(n);
            p.update();
            p
        }
        None => n,
    }
}

/// Refresh the aggregates of `n` and restore its balance
///
/// Expects both children to already be balanced with correct aggregates and
/// their heights to differ by at most two.
pub(crate) fn rebalance(mut n: Box<Node>) -> Box<Node> {
    n.update();
    let imbalance = n.imbalance();

    if imbalance < -1 {
        // Left-right case first straightens the left child.
        if let Some(left) = n.left.take() {
            n.left = Some(if left.imbalance() > 0 {
                rotate_left(left)
            } else {
                left
            });
        }
        rotate_right(n)
    } else if imbalance > 1 {
        if let Some(right) = n.right.take() {
            n.right = Some(if right.imbalance() < 0 {
                rotate_right(right)
            } else {
                right
            });
        }
        rotate_left(n)
    } else {
        n
    }
}

/// Reattach a detached insertion path bottom-up, rebalancing each ancestor
///
/// `path` holds every ancestor of `subtree` from the root down, each paired
/// with the side its next descendant was taken from.
pub(crate) fn reattach(mut path: Vec<(Box<Node>, Side)>, subtree: Box<Node>) -> Box<Node> {
    let mut subtree = rebalance(subtree);
    while let Some((mut parent, side)) = path.pop() {
        parent.set_child(side, Some(subtree));
        subtree = rebalance(parent);
    }
    subtree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str, weight: i64) -> WeightedWord {
        WeightedWord::new(w, weight)
    }

    #[test]
    fn test_leaf_aggregates() {
        let leaf = Node::leaf(word("a", 7));
        assert_eq!(leaf.height, 1);
        assert_eq!(leaf.size, 1);
        assert_eq!(leaf.total_weight, 7);
        assert_eq!(leaf.imbalance(), 0);
        assert_eq!(leaf.weighted_total(3), 10);
    }

    #[test]
    fn test_rotate_right_recomputes_aggregates() {
        // c <- b <- a chain leaning left
        let a = Node::leaf(word("a", 1));
        let b = Node::with_children(word("b", 2), Some(a), None);
        let c = Node::with_children(word("c", 4), Some(b), None);
        assert_eq!(c.imbalance(), -2);

        let root = rotate_right(c);
        assert_eq!(root.entry.word, "b");
        assert_eq!(root.height, 2);
        assert_eq!(root.size, 3);
        assert_eq!(root.total_weight, 7);
        assert_eq!(root.left.as_ref().unwrap().entry.word, "a");
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.entry.word, "c");
        assert_eq!(right.height, 1);
        assert_eq!(right.total_weight, 4);
    }

    #[test]
    fn test_rebalance_left_right_case() {
        // c has left child a, which has right child b
        let b = Node::leaf(word("b", 1));
        let a = Node::with_children(word("a", 1), None, Some(b));
        let c = Node {
            entry: word("c", 1),
            left: Some(a),
            right: None,
            height: 0,
            size: 0,
            total_weight: 0,
        };

        let root = rebalance(Box::new(c));
        assert_eq!(root.entry.word, "b");
        assert_eq!(root.left.as_ref().unwrap().entry.word, "a");
        assert_eq!(root.right.as_ref().unwrap().entry.word, "c");
        assert_eq!(root.height, 2);
        assert_eq!(root.size, 3);
    }

    #[test]
    fn test_rebalance_right_left_case() {
        let b = Node::leaf(word("b", 1));
        let c = Node::with_children(word("c", 1), Some(b), None);
        let a = Box::new(Node {
            entry: word("a", 1),
            left: None,
            right: Some(c),
            height: 0,
            size: 0,
            total_weight: 0,
        });

        let root = rebalance(a);
        assert_eq!(root.entry.word, "b");
        assert_eq!(root.left.as_ref().unwrap().entry.word, "a");
        assert_eq!(root.right.as_ref().unwrap().entry.word, "c");
        assert_eq!(root.imbalance(), 0);
    }

    #[test]
    fn test_rotation_without_child_is_identity() {
        let leaf = Node::leaf(word("solo", 3));
        let rotated = rotate_left(leaf);
        assert_eq!(rotated.entry.word, "solo");
        let rotated = rotate_right(rotated);
        assert_eq!(rotated.entry.word, "solo");
    }
}
