//! Browser bindings using wasm-bindgen
//!
//! Unlike the C ABI in `wordtrie-ffi`, which passes NUL-terminated strings
//! through linear memory, this class takes and returns JavaScript strings
//! directly. Returned arrays and JSON strings are copies owned by JavaScript,
//! so there is no release call for results. The trie itself is released by
//! the generated `free()` method:
//!
//! ```js
//! const trie = new WordTrie();
//! trie.insertMany(["cat", "car", "cart", "dog"]);
//! trie.searchPrefix("ca"); // ["car", "cart", "cat"] in some order
//! trie.free();
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wordtrie_core::Trie;

/// A keyword occurrence as returned to JavaScript. Offsets are UTF-8 byte
/// offsets into the scanned text.
#[derive(Debug, Serialize)]
struct KeywordHit<'a> {
    start: usize,
    end: usize,
    keyword: &'a str,
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct WordTrie {
    inner: Trie,
}

#[wasm_bindgen]
impl WordTrie {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WordTrie {
        // Route Rust panics to console.error instead of "RuntimeError: unreachable"
        console_error_panic_hook::set_once();
        WordTrie { inner: Trie::new() }
    }

    /// Insert a word. Returns false if it was already stored.
    pub fn insert(&mut self, word: &str) -> bool {
        self.inner.insert(word)
    }

    /// Insert every word, returning how many were new
    #[wasm_bindgen(js_name = insertMany)]
    pub fn insert_many(&mut self, words: Vec<String>) -> usize {
        words.iter().filter(|word| self.inner.insert(word)).count()
    }

    pub fn search(&self, word: &str) -> bool {
        self.inner.search(word)
    }

    #[wasm_bindgen(js_name = startsWith)]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.inner.starts_with(prefix)
    }

    /// Stored words beginning with `prefix`. Order is unspecified.
    #[wasm_bindgen(js_name = searchPrefix)]
    pub fn search_prefix(&self, prefix: &str) -> Result<Vec<String>, JsValue> {
        self.inner
            .search_prefix_str(prefix)
            .map_err(|e| JsValue::from_str(&format!("Prefix search failed: {}", e)))
    }

    /// Scan `text` for stored keywords.
    ///
    /// Returns: `[{"start":4,"end":7,"keyword":"cat"}, ...]`
    #[wasm_bindgen(js_name = findMatches)]
    pub fn find_matches(&self, text: &str) -> Result<String, JsValue> {
        serde_json::to_string(&self.keyword_hits(text))
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize matches: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for WordTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl WordTrie {
    // Every stored word came in as &str, so matches fall on char boundaries;
    // `get` keeps a bad range from panicking all the same.
    fn keyword_hits<'a>(&self, text: &'a str) -> Vec<KeywordHit<'a>> {
        self.inner
            .find_matches(text)
            .into_iter()
            .filter_map(|m| {
                text.get(m.start..m.end).map(|keyword| KeywordHit {
                    start: m.start,
                    end: m.end,
                    keyword,
                })
            })
            .collect()
    }
}
