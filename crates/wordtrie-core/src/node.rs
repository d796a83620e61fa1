//! Trie vertex

use std::collections::BTreeMap;
use std::fmt;

/// A single trie vertex.
///
/// Each vertex exclusively owns its children, so the trie is a tree: dropping
/// a vertex frees its whole subtree. Children are keyed by one byte of the
/// stored word.
///
/// Subtrees can be as deep as the longest stored word, so nothing here walks
/// them recursively: `Drop` uses an explicit stack and `Debug` prints only
/// this vertex.
#[derive(Default)]
pub struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    /// Create a vertex with no children that ends no word
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some inserted word ends at this vertex
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub(crate) fn mark_terminal(&mut self) -> bool {
        !std::mem::replace(&mut self.terminal, true)
    }

    /// Child reached over the edge labelled `byte`, if any
    pub fn child(&self, byte: u8) -> Option<&TrieNode> {
        self.children.get(&byte)
    }

    /// Child over `byte`, created if absent. The flag reports whether a new
    /// vertex was allocated.
    pub(crate) fn child_or_insert(&mut self, byte: u8) -> (&mut TrieNode, bool) {
        let mut created = false;
        let child = self.children.entry(byte).or_insert_with(|| {
            created = true;
            TrieNode::new()
        });
        (child, created)
    }

    /// Outgoing edges. Iteration order is not part of the contract.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (u8, &TrieNode)> {
        self.children.iter().map(|(&byte, node)| (byte, node))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Detach all children, leaving this vertex a leaf
    pub(crate) fn take_children(&mut self) -> BTreeMap<u8, TrieNode> {
        std::mem::take(&mut self.children)
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("terminal", &self.terminal)
            .field("edges", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = self.take_children().into_values().collect();
        while let Some(mut node) = pending.pop() {
            // `node` is a leaf once its children are moved out, so its own
            // drop returns immediately
            pending.extend(node.take_children().into_values());
        }
    }
}
