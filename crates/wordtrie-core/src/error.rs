//! Trie error types

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors produced by the UTF-8 views over the trie.
///
/// The byte-level operations themselves cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// A stored word is not valid UTF-8
    #[error("stored word is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Result type for trie operations
pub type TrieResult<T> = Result<T, TrieError>;
