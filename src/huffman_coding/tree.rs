//! Huffman tree construction.
//!
//! The tree is built bottom-up with a min-priority queue. The two lightest nodes are popped,
//! the first popped becomes the zero branch and the second the one branch, and the merged
//! node is pushed back until a single root remains.
//!
//! Ties are broken by a sequence number. Leaves are numbered in the order their symbols first
//! appear in the input, and every merged node takes the next free number when it is created.
//! Among equal weights the lower number is popped first, so leaves leave the queue in input
//! order and before any merged node created after them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use log::{debug, trace, warn};

use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

/// Label on the edge from an internal node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Zero,
    One,
}

impl Branch {
    /// The branch taken when reading `bit`.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Branch::One
        } else {
            Branch::Zero
        }
    }

    /// The bit emitted when descending this branch.
    pub fn bit(self) -> bool {
        self == Branch::One
    }

    /// '0' or '1'
    pub fn label(self) -> char {
        match self {
            Branch::Zero => '0',
            Branch::One => '1',
        }
    }
}

/// A node of a Huffman tree. Internal nodes exclusively own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: Box<Node<S>>,
        one: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    /// Merge two nodes under a new internal node. Its weight is the sum of theirs.
    pub fn merge(zero: Node<S>, one: Node<S>) -> Self {
        Node::Internal {
            weight: zero.weight() + one.weight(),
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    /// Symbol count of a leaf, combined count of an internal node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol of a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// The child reached through `branch`, None for leaves.
    pub fn child(&self, branch: Branch) -> Option<&Node<S>> {
        match (self, branch) {
            (Node::Leaf { .. }, _) => None,
            (Node::Internal { zero, .. }, Branch::Zero) => Some(zero),
            (Node::Internal { one, .. }, Branch::One) => Some(one),
        }
    }

    /// Both children with their branch labels, zero branch first. None for leaves.
    pub fn children(&self) -> Option<[(Branch, &Node<S>); 2]> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { zero, one, .. } => Some([(Branch::Zero, zero), (Branch::One, one)]),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { zero, one, .. } => zero.leaf_count() + one.leaf_count(),
        }
    }

    /// Number of internal nodes below (and including) this node.
    pub fn internal_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { zero, one, .. } => 1 + zero.internal_count() + one.internal_count(),
        }
    }

    /// Length of the longest root-to-leaf path. A lone leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { zero, one, .. } => 1 + zero.height().max(one.height()),
        }
    }
}

/// Queue entry for the merge loop.
struct Pending<S> {
    weight: u64,
    seq: usize,
    node: Node<S>,
}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<S> Eq for Pending<S> {}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Pending<S> {
    /// Reversed on weight then sequence, so the max-heap pops the lightest, oldest node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A built Huffman tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Eq + Hash + Clone> HuffmanTree<S> {
    /// Build the tree for a frequency table. Fails with EmptyInput if the table is empty.
    pub fn build(freqs: &FrequencyTable<S>) -> Result<Self> {
        let mut queue: BinaryHeap<Pending<S>> = freqs
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| Pending {
                weight,
                seq,
                node: Node::Leaf {
                    symbol: symbol.clone(),
                    weight,
                },
            })
            .collect();
        let mut next_seq = queue.len();

        if queue.len() == 1 {
            warn!("Only one distinct symbol; it will be coded with a single bit.");
        }

        while queue.len() > 1 {
            // Both pops succeed while the queue holds two or more nodes.
            let (zero, one) = match (queue.pop(), queue.pop()) {
                (Some(zero), Some(one)) => (zero, one),
                _ => unreachable!("merge queue holds at least two nodes"),
            };
            trace!(
                "merge #{} (w {}) + #{} (w {}) -> #{}",
                zero.seq,
                zero.weight,
                one.seq,
                one.weight,
                next_seq
            );
            let node = Node::merge(zero.node, one.node);
            queue.push(Pending {
                weight: node.weight(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }

        let root = queue.pop().ok_or(HuffError::EmptyInput)?.node;
        debug!(
            "Built tree: {} leaves, {} internal nodes, height {}, weight {}",
            root.leaf_count(),
            root.internal_count(),
            root.height(),
            root.weight()
        );
        Ok(Self { root })
    }

    /// Count `symbols` and build their tree.
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self> {
        Self::build(&FrequencyTable::count(symbols))
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    pub fn into_root(self) -> Node<S> {
        self.root
    }
}

impl<S> AsRef<Node<S>> for HuffmanTree<S> {
    fn as_ref(&self) -> &Node<S> {
        &self.root
    }
}

#[cfg(test)]
mod test {
    use super::{Branch, HuffmanTree, Node};
    use crate::error::HuffError;
    use crate::tools::freq_count::FrequencyTable;

    fn leaf_weights(node: &Node<char>, out: &mut Vec<(char, u64)>) {
        match node {
            Node::Leaf { symbol, weight } => out.push((*symbol, *weight)),
            Node::Internal { zero, one, .. } => {
                leaf_weights(zero, out);
                leaf_weights(one, out);
            }
        }
    }

    #[test]
    fn empty_input_test() {
        let err = HuffmanTree::<char>::from_symbols("".chars()).unwrap_err();
        assert!(matches!(err, HuffError::EmptyInput));
    }

    #[test]
    fn single_symbol_test() {
        let tree = HuffmanTree::from_symbols("aaaa".chars()).unwrap();
        assert_eq!(
            tree.root(),
            &Node::Leaf {
                symbol: 'a',
                weight: 4
            }
        );
        assert_eq!(tree.root().internal_count(), 0);
        assert!(tree.root().children().is_none());
    }

    #[test]
    fn aaabbc_shape_test() {
        // c(1) and b(2) merge first, then a(3) is popped before the merged node of weight 3.
        let tree = HuffmanTree::from_symbols("aaabbc".chars()).unwrap();
        let root = tree.root();
        assert_eq!(root.weight(), 6);
        assert_eq!(root.child(Branch::Zero).and_then(Node::symbol), Some(&'a'));
        let inner = root.child(Branch::One).unwrap();
        assert_eq!(inner.weight(), 3);
        assert_eq!(inner.child(Branch::Zero).and_then(Node::symbol), Some(&'c'));
        assert_eq!(inner.child(Branch::One).and_then(Node::symbol), Some(&'b'));
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn tie_break_uses_first_appearance_test() {
        // All weights equal: "ab" merge first (zero = a), then "cd", then the two merged nodes.
        let tree = HuffmanTree::from_symbols("abcd".chars()).unwrap();
        let mut leaves = vec![];
        leaf_weights(tree.root(), &mut leaves);
        assert_eq!(leaves, vec![('a', 1), ('b', 1), ('c', 1), ('d', 1)]);

        // Same counts, different first appearance order, different tree.
        let tree = HuffmanTree::from_symbols("dcba".chars()).unwrap();
        let mut leaves = vec![];
        leaf_weights(tree.root(), &mut leaves);
        assert_eq!(leaves, vec![('d', 1), ('c', 1), ('b', 1), ('a', 1)]);
    }

    #[test]
    fn build_is_deterministic_test() {
        let text = "the quick brown fox jumps over the lazy dog";
        let a = HuffmanTree::from_symbols(text.chars()).unwrap();
        let b = HuffmanTree::from_symbols(text.chars()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shape_and_conservation_test() {
        let text = "mississippi river";
        let freqs = FrequencyTable::count(text.chars());
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(tree.root().leaf_count(), freqs.len());
        assert_eq!(tree.root().internal_count(), freqs.len() - 1);

        let mut leaves = vec![];
        leaf_weights(tree.root(), &mut leaves);
        assert_eq!(leaves.iter().map(|(_, w)| w).sum::<u64>(), text.chars().count() as u64);
        for (symbol, weight) in leaves {
            assert_eq!(freqs.get(&symbol), Some(weight));
        }
    }

    #[test]
    fn branch_test() {
        assert_eq!(Branch::from_bit(false), Branch::Zero);
        assert_eq!(Branch::from_bit(true), Branch::One);
        assert!(Branch::One.bit());
        assert_eq!(Branch::Zero.label(), '0');
    }
}
