//! Arena-based byte trie with per-node next-byte frequency tables.
//!
//! Each path of depth `k` from the root spells a `k`-byte context. The node at
//! the end of that path records how often each byte was observed to follow the
//! context. Nodes are stored in a contiguous arena (`Vec<TrieNode>`) and
//! referenced by opaque [`NodeRef`] handles, which are plain indices, so the
//! whole trie is released in one go when it is dropped.
//!
//! Children and observations of each node are kept sorted by byte for
//! O(log n) binary search. Walking the observations in order visits symbols in
//! ascending byte order, exactly as a dense 256-entry table scan would (minus
//! the zero entries).

/// Opaque handle into the trie's node arena.
///
/// This is a plain index; it does not borrow the trie.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct NodeRef(u32);

impl NodeRef {
    /// Convert to usize for indexing into the arena.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The arena is capped at `u32::MAX + 1` nodes; larger indices are not
    /// representable.
    #[inline]
    fn from_usize(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok());
        NodeRef(index as u32)
    }
}

/// How many times `symbol` followed the context of the owning node.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Observation {
    pub symbol: u8,
    pub count: u32,
}

/// A single node: one context byte plus the statistics of what came next.
///
/// Invariant: `total_count` equals the sum of `count` over `observations`.
#[derive(Debug)]
pub struct TrieNode {
    /// The context byte on the edge leading into this node (0 for the root).
    pub symbol: u8,
    /// Total observations recorded at this node.
    pub total_count: u32,
    /// Next-byte counts, sorted by symbol, zero counts never stored.
    observations: Vec<Observation>,
    /// Child node references, kept sorted by their edge byte.
    children: Vec<NodeRef>,
}

impl TrieNode {
    fn new(symbol: u8) -> Self {
        TrieNode {
            symbol,
            total_count: 0,
            observations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Next-byte observations in ascending byte order.
    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}

/// Arena-based byte trie.
///
/// The root node is always at index 0 and represents the empty context.
///
/// # Example
///
/// ```
/// use byte_trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert_gram(b"th", b'e');
/// trie.insert_gram(b"th", b'e');
/// trie.insert_gram(b"th", b'a');
///
/// let node = trie.walk(b"th").unwrap();
/// assert_eq!(trie.node(node).total_count, 3);
/// assert_eq!(trie.node(node).observations()[1].count, 2);
/// assert!(trie.walk(b"tx").is_none());
/// ```
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    /// Create a new trie holding only the root node.
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::new(0)],
        }
    }

    /// Reference to the root node.
    #[inline]
    pub fn root(&self) -> NodeRef {
        NodeRef(0)
    }

    /// Access a node by reference.
    #[inline]
    pub fn node(&self, r: NodeRef) -> &TrieNode {
        &self.nodes[r.as_usize()]
    }

    /// Find an existing child of `parent` reached through `symbol`.
    pub fn find_child(&self, parent: NodeRef, symbol: u8) -> Option<NodeRef> {
        let children = &self.nodes[parent.as_usize()].children;

        children
            .binary_search_by(|child_ref| self.nodes[child_ref.as_usize()].symbol.cmp(&symbol))
            .ok()
            .map(|idx| children[idx])
    }

    /// Find or lazily create the child of `parent` reached through `symbol`.
    ///
    /// Unlike counting, traversal never touches frequencies.
    pub fn child_or_insert(&mut self, parent: NodeRef, symbol: u8) -> NodeRef {
        let search_result = self.nodes[parent.as_usize()]
            .children
            .binary_search_by(|child_ref| self.nodes[child_ref.as_usize()].symbol.cmp(&symbol));

        match search_result {
            Ok(idx) => self.nodes[parent.as_usize()].children[idx],
            Err(idx) => {
                let child_ref = NodeRef::from_usize(self.nodes.len());
                self.nodes.push(TrieNode::new(symbol));
                self.nodes[parent.as_usize()].children.insert(idx, child_ref);
                child_ref
            }
        }
    }

    /// Record one observation of `next` at `node`.
    ///
    /// Counts saturate at `u32::MAX`; once a symbol's count is saturated
    /// neither it nor the node total move, so the sum invariant holds.
    pub fn observe(&mut self, node: NodeRef, next: u8) {
        let node = &mut self.nodes[node.as_usize()];
        match node
            .observations
            .binary_search_by(|obs| obs.symbol.cmp(&next))
        {
            Ok(idx) => {
                let obs = &mut node.observations[idx];
                if obs.count < u32::MAX && node.total_count < u32::MAX {
                    obs.count += 1;
                    node.total_count += 1;
                }
            }
            Err(idx) => {
                if node.total_count < u32::MAX {
                    node.observations.insert(
                        idx,
                        Observation {
                            symbol: next,
                            count: 1,
                        },
                    );
                    node.total_count += 1;
                }
            }
        }
    }

    /// Walk (creating as needed) one child per context byte, then record that
    /// `next` followed the context. Returns the terminal node.
    pub fn insert_gram(&mut self, context: &[u8], next: u8) -> NodeRef {
        let mut node = self.root();
        for &symbol in context {
            node = self.child_or_insert(node, symbol);
        }
        self.observe(node, next);
        node
    }

    /// Follow `context` from the root without creating anything.
    /// Returns `None` as soon as a hop is missing.
    pub fn walk(&self, context: &[u8]) -> Option<NodeRef> {
        context
            .iter()
            .try_fold(self.root(), |node, &symbol| self.find_child(node, symbol))
    }

    /// Total number of nodes in the trie (including root).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the trie has never seen a context byte or an observation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].total_count == 0
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
