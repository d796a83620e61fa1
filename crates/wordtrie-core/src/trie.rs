//! Trie - insert, exact search, prefix enumeration and keyword scanning
//!
//! Words are byte sequences. Anything implementing `AsRef<[u8]>` (`&str`,
//! `String`, `&[u8]`, `Vec<u8>`) can be inserted or queried.
//!
//! Enumeration order of [`Trie::search_prefix`] is not part of the contract.
//! The current vertex layout happens to yield ascending byte order, but
//! callers should compare results as sets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrieResult;
use crate::node::TrieNode;

/// A keyword found by [`Trie::find_matches`], as a byte range of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub start: usize,
    pub end: usize,
}

impl KeywordMatch {
    /// Bytes of `text` covered by this match, or `None` if the range does
    /// not fit `text` (it was produced by scanning some other text)
    pub fn slice<'a>(&self, text: &'a [u8]) -> Option<&'a [u8]> {
        text.get(self.start..self.end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Prefix tree owning all of its vertices
///
/// The root represents the empty prefix and lives as long as the trie.
/// Vertices are only ever added; dropping the trie frees all of them.
pub struct Trie {
    root: TrieNode,
    len: usize,
    nodes: usize,
}

struct Frame<'a> {
    node: &'a TrieNode,
    depth: usize,
    edge: Option<u8>,
}

impl Trie {
    /// Create an empty trie (root only)
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
            nodes: 1,
        }
    }

    /// Insert a word, creating vertices along its path as needed.
    ///
    /// Never fails. The empty word marks the root terminal. Returns `true` if
    /// the word was not stored before; inserting it again changes nothing.
    pub fn insert(&mut self, word: impl AsRef<[u8]>) -> bool {
        let mut node = &mut self.root;
        for &byte in word.as_ref() {
            let (child, created) = node.child_or_insert(byte);
            if created {
                self.nodes += 1;
            }
            node = child;
        }

        let added = node.mark_terminal();
        if added {
            self.len += 1;
        }
        added
    }

    /// Exact membership.
    ///
    /// Consuming every byte is not enough: the landing vertex must end an
    /// inserted word, so strict prefixes of stored words are not members.
    pub fn search(&self, word: impl AsRef<[u8]>) -> bool {
        self.descend(word.as_ref())
            .is_some_and(TrieNode::is_terminal)
    }

    /// Whether any stored word begins with `prefix`
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        match self.descend(prefix.as_ref()) {
            Some(node) => node.is_terminal() || !node.is_leaf(),
            None => false,
        }
    }

    /// All stored words beginning with `prefix`, including `prefix` itself
    /// when it was inserted. An unknown prefix yields an empty vec; the empty
    /// prefix yields every word.
    pub fn search_prefix(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        let prefix = prefix.as_ref();
        let mut words = Vec::new();
        if let Some(start) = self.descend(prefix) {
            collect_words(start, prefix, &mut words);
        }
        words
    }

    /// [`search_prefix`](Self::search_prefix) with every word decoded as UTF-8
    pub fn search_prefix_str(&self, prefix: &str) -> TrieResult<Vec<String>> {
        self.search_prefix(prefix)
            .into_iter()
            .map(|word| String::from_utf8(word).map_err(Into::into))
            .collect()
    }

    /// Scan `text` for stored keywords.
    ///
    /// At every byte offset the shortest keyword starting there is reported,
    /// so there is at most one match per offset and matches may overlap.
    /// Results are in ascending offset order. The empty word never matches.
    pub fn find_matches(&self, text: impl AsRef<[u8]>) -> Vec<KeywordMatch> {
        let text = text.as_ref();
        (0..text.len())
            .filter_map(|start| self.shortest_match_at(text, start))
            .collect()
    }

    /// Number of distinct stored words
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated vertices, root included
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    fn descend(&self, path: &[u8]) -> Option<&TrieNode> {
        path.iter()
            .try_fold(&self.root, |node, &byte| node.child(byte))
    }

    fn shortest_match_at(&self, text: &[u8], start: usize) -> Option<KeywordMatch> {
        let mut node = &self.root;
        for (offset, &byte) in text[start..].iter().enumerate() {
            node = node.child(byte)?;
            if node.is_terminal() {
                return Some(KeywordMatch {
                    start,
                    end: start + offset + 1,
                });
            }
        }
        None
    }
}

/// Depth-first walk below `start`, sharing one path buffer across the whole
/// traversal instead of concatenating strings per level.
fn collect_words(start: &TrieNode, prefix: &[u8], words: &mut Vec<Vec<u8>>) {
    let mut path = prefix.to_vec();
    let mut stack = vec![Frame {
        node: start,
        depth: path.len(),
        edge: None,
    }];

    while let Some(Frame { node, depth, edge }) = stack.pop() {
        path.truncate(depth);
        if let Some(byte) = edge {
            path.push(byte);
        }
        if node.is_terminal() {
            words.push(path.clone());
        }

        let depth = path.len();
        // Reversed so the smallest edge is popped first
        stack.extend(node.children().rev().map(|(byte, child)| Frame {
            node: child,
            depth,
            edge: Some(byte),
        }));
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.len)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: AsRef<[u8]>> Extend<W> for Trie {
    fn extend<I: IntoIterator<Item = W>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl<W: AsRef<[u8]>> FromIterator<W> for Trie {
    fn from_iter<I: IntoIterator<Item = W>>(words: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(words);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(mut words: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
        words.sort();
        words
    }

    fn sample() -> Trie {
        ["cat", "car", "cart", "dog"].into_iter().collect()
    }

    #[test]
    fn test_new_trie_is_empty() {
        let trie = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.search(""));
        assert!(trie.search_prefix("").is_empty());
    }

    #[test]
    fn test_insert_and_search() {
        let trie = sample();

        assert!(trie.search("cat"));
        assert!(trie.search("car"));
        assert!(trie.search("cart"));
        assert!(trie.search("dog"));
        assert!(!trie.search("ca"));
        assert!(!trie.search("carts"));
        assert!(!trie.search("z"));
        assert!(!trie.search(""));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = Trie::new();
        assert!(trie.insert("hello"));
        let nodes = trie.node_count();

        assert!(!trie.insert("hello"));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.node_count(), nodes);
        assert!(trie.search("hello"));
    }

    #[test]
    fn test_node_count_shares_prefixes() {
        let trie = sample();
        // root + c,a,t,r,t + d,o,g
        assert_eq!(trie.node_count(), 9);
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_empty_word_marks_root() {
        let mut trie = Trie::new();
        assert!(trie.insert(""));
        assert!(trie.search(""));
        assert!(trie.root().is_terminal());
        assert_eq!(trie.search_prefix(""), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_search_prefix() {
        let trie = sample();

        assert_eq!(
            sorted(trie.search_prefix("ca")),
            vec![b"car".to_vec(), b"cart".to_vec(), b"cat".to_vec()]
        );
        assert_eq!(trie.search_prefix("do"), vec![b"dog".to_vec()]);
        assert!(trie.search_prefix("z").is_empty());
        assert!(trie.search_prefix("dogs").is_empty());
    }

    #[test]
    fn test_search_prefix_includes_prefix_itself() {
        let trie = sample();
        assert_eq!(
            sorted(trie.search_prefix("car")),
            vec![b"car".to_vec(), b"cart".to_vec()]
        );
    }

    #[test]
    fn test_empty_prefix_enumerates_everything() {
        let trie = sample();
        assert_eq!(
            sorted(trie.search_prefix("")),
            vec![
                b"car".to_vec(),
                b"cart".to_vec(),
                b"cat".to_vec(),
                b"dog".to_vec()
            ]
        );
    }

    #[test]
    fn test_starts_with() {
        let trie = sample();
        assert!(trie.starts_with(""));
        assert!(trie.starts_with("ca"));
        assert!(trie.starts_with("cart"));
        assert!(!trie.starts_with("cartz"));
        assert!(!Trie::new().starts_with(""));
    }

    #[test]
    fn test_bytes_are_not_normalised() {
        let mut trie = Trie::new();
        trie.insert("Cat");
        trie.insert([0xffu8, 0x00, 0x7f]);

        assert!(trie.search("Cat"));
        assert!(!trie.search("cat"));
        assert!(trie.search([0xffu8, 0x00, 0x7f]));
        assert_eq!(trie.search_prefix([0xffu8]), vec![vec![0xff, 0x00, 0x7f]]);
    }

    #[test]
    fn test_multibyte_utf8_words() {
        let trie: Trie = ["日本", "日本語", "中文"].into_iter().collect();

        let mut words = trie.search_prefix_str("日").unwrap();
        words.sort();
        assert_eq!(words, vec!["日本", "日本語"]);
        // A partial code point is still a valid byte prefix
        assert!(trie.starts_with(&"日".as_bytes()[..1]));
    }

    #[test]
    fn test_search_prefix_str_rejects_invalid_utf8() {
        let mut trie = Trie::new();
        trie.insert([b'a', 0xff]);
        assert!(trie.search_prefix_str("a").is_err());
    }

    #[test]
    fn test_find_matches() {
        let trie: Trie = ["cat", "car", "cart"].into_iter().collect();
        let text = "the cat sat on the cart";

        let matches = trie.find_matches(text);
        assert_eq!(
            matches,
            vec![
                KeywordMatch { start: 4, end: 7 },
                KeywordMatch { start: 19, end: 22 },
            ]
        );
        assert_eq!(matches[0].slice(text.as_bytes()), Some(&b"cat"[..]));
        assert_eq!(matches[1].slice(text.as_bytes()), Some(&b"car"[..]));
    }

    #[test]
    fn test_keyword_match_slice_out_of_range() {
        let m = KeywordMatch { start: 4, end: 7 };
        assert_eq!(m.slice(b"cat"), None);
        assert_eq!(m.slice(b"the cat"), Some(&b"cat"[..]));
    }

    #[test]
    fn test_find_matches_overlapping() {
        let trie: Trie = ["ab", "bc"].into_iter().collect();
        let matches = trie.find_matches("abc");
        assert_eq!(
            matches,
            vec![
                KeywordMatch { start: 0, end: 2 },
                KeywordMatch { start: 1, end: 3 },
            ]
        );
    }

    #[test]
    fn test_find_matches_ignores_empty_word() {
        let mut trie = Trie::new();
        trie.insert("");
        assert!(trie.find_matches("anything").is_empty());
        assert!(trie.find_matches("").is_empty());
    }

    #[test]
    fn test_keyword_match_serializes() {
        let m = KeywordMatch { start: 1, end: 4 };
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());

        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"start":1,"end":4}"#);
        let back: KeywordMatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_deep_word_drops_without_overflow() {
        let word = vec![b'x'; 50_000];
        let mut trie = Trie::new();
        trie.insert(&word);

        assert!(trie.search(&word));
        assert_eq!(trie.search_prefix(&word[..10]).len(), 1);
        assert_eq!(format!("{:?}", trie), "Trie { len: 1, nodes: 50001 }");
        assert_eq!(
            format!("{:?}", trie.root()),
            "TrieNode { terminal: false, edges: [120] }"
        );
        drop(trie);
    }
}
