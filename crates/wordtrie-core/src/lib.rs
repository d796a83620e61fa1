//! wordtrie core
//!
//! A prefix tree over raw bytes, designed to run identically natively and in
//! WASM. Each edge is labelled by one byte of the stored word, so any byte
//! sequence is a valid word: there is no case folding and no Unicode
//! segmentation.
//!
//! # Example
//!
//! ```rust
//! use wordtrie_core::Trie;
//!
//! let mut trie = Trie::new();
//! for word in ["cat", "car", "cart", "dog"] {
//!     trie.insert(word);
//! }
//!
//! assert!(trie.search("cat"));
//! assert!(!trie.search("ca"));
//!
//! let mut words = trie.search_prefix_str("ca").unwrap();
//! words.sort();
//! assert_eq!(words, vec!["car", "cart", "cat"]);
//! ```

pub mod error;
pub mod node;
pub mod trie;

// Re-export main types at crate root
pub use error::{TrieError, TrieResult};
pub use node::TrieNode;
pub use trie::{KeywordMatch, Trie};
