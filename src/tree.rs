use {
    crate::{
        error::{Error, Result},
        frequency::FrequencyTable,
    },
    std::{cmp::Reverse, collections::BinaryHeap},
};

/// A node of the prefix-code tree.
///
/// Internal nodes own their two children outright; there are no parent
/// links, so the tree is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: usize,
    },
    Branch {
        left: Box<Node>,
        right: Box<Node>,
        weight: usize,
    },
}

impl Node {
    pub fn weight(&self) -> usize {
        match *self {
            Node::Leaf { weight, .. } | Node::Branch { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self {
            Node::Leaf { .. } => true,
            Node::Branch { .. } => false,
        }
    }

    /// The character of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Branch { left, right, .. } => Some((left, right)),
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Branch {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A finished Huffman tree. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node extracted becomes the left child of the merge and the
    /// second one the right child. Ties go to the node created first: leaves
    /// are created in ascending character order, merges after them in the
    /// order they happen. Entries with a zero count get no leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if no character has a non-zero count.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        log::trace!("Building tree from frequencies: {:?}", frequencies);

        let leaves: Vec<Node> = frequencies
            .iter()
            .filter(|&(_, weight)| weight > 0)
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();

        // Min-heap of (weight, creation order); the node itself lives in
        // `slots[order]` until it is extracted.
        let mut heap: BinaryHeap<Reverse<(usize, usize)>> = leaves
            .iter()
            .enumerate()
            .map(|(order, node)| Reverse((node.weight(), order)))
            .collect();
        let mut slots: Vec<Option<Node>> = leaves.into_iter().map(Some).collect();

        loop {
            let left = match extract_min(&mut heap, &mut slots) {
                Some(node) => node,
                None => return Err(Error::EmptyInput),
            };
            let right = match extract_min(&mut heap, &mut slots) {
                Some(node) => node,
                None => {
                    let tree = HuffmanTree { root: left };
                    log::trace!("Huffman tree: {:?}", tree);
                    return Ok(tree);
                }
            };

            let node = Node::merge(left, right);
            heap.push(Reverse((node.weight(), slots.len())));
            slots.push(Some(node));
        }
    }

    /// Counts `text` and builds its tree.
    pub fn of(text: &str) -> Result<Self> {
        Self::build(&FrequencyTable::of(text))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the number of characters the tree was built from.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    /// All leaves as `(symbol, weight)`, left to right.
    pub fn leaves(&self) -> Vec<(char, usize)> {
        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                &Node::Leaf { symbol, weight } => leaves.push((symbol, weight)),
                Node::Branch { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }
}

fn extract_min(
    heap: &mut BinaryHeap<Reverse<(usize, usize)>>,
    slots: &mut [Option<Node>],
) -> Option<Node> {
    let Reverse((_, order)) = heap.pop()?;
    slots.get_mut(order)?.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            HuffmanTree::build(&FrequencyTable::new()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn zero_counts_are_ignored() {
        let mut table = FrequencyTable::new();
        table.insert('a', 0);
        assert!(matches!(HuffmanTree::build(&table), Err(Error::EmptyInput)));

        table.insert('b', 3);
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.leaves(), vec![('b', 3)]);
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = HuffmanTree::of("aaaa").unwrap();
        assert_eq!(
            tree.root(),
            &Node::Leaf {
                symbol: 'a',
                weight: 4
            }
        );
    }

    #[test]
    fn lightest_nodes_merge_first() {
        let tree = HuffmanTree::of("aabbbcccc").unwrap();
        // a(2) + b(3) = 5 merges first, then c(4) + 5.
        let (left, right) = tree.root().children().unwrap();
        assert_eq!(left.symbol(), Some('c'));
        assert_eq!(right.weight(), 5);
        let (ll, rr) = right.children().unwrap();
        assert_eq!(ll.symbol(), Some('a'));
        assert_eq!(rr.symbol(), Some('b'));
    }

    #[test]
    fn ties_go_to_the_earlier_node() {
        let table: FrequencyTable = vec![('x', 1), ('y', 1), ('z', 1)].into_iter().collect();
        let tree = HuffmanTree::build(&table).unwrap();
        // x and y merge; z (weight 1) beats the merge (weight 2).
        let (left, right) = tree.root().children().unwrap();
        assert_eq!(left.symbol(), Some('z'));
        assert_eq!(tree.leaves(), vec![('z', 1), ('x', 1), ('y', 1)]);
        assert_eq!(right.weight(), 2);
    }

    #[test]
    fn internal_weights_are_child_sums() {
        fn check(node: &Node) {
            if let Some((left, right)) = node.children() {
                assert_eq!(node.weight(), left.weight() + right.weight());
                check(left);
                check(right);
            }
        }
        let tree = HuffmanTree::of("mississippi river").unwrap();
        check(tree.root());
        assert_eq!(tree.weight(), "mississippi river".chars().count());
    }
}
