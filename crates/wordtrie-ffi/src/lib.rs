//! wordtrie C ABI
//!
//! Exposes the byte-keyed prefix tree from `wordtrie-core` to hosts that can
//! only speak the C calling convention: native programs linking the cdylib or
//! staticlib, and WASM runtimes (such as a browser) instantiating the module
//! built for a wasm target.
//!
//! ## Usage from C
//!
//! ```c
//! WordTrie *trie = wordtrie_new();
//! wordtrie_insert(trie, "cat");
//! wordtrie_insert(trie, "car");
//!
//! size_t count = 0;
//! char **words = wordtrie_search_prefix(trie, "ca", &count);
//! for (size_t i = 0; i < count; i++) puts(words[i]);
//! wordtrie_string_array_free(words, count);
//!
//! wordtrie_free(trie);
//! ```
//!
//! WASM hosts without their own allocator reserve input strings and the
//! `count` out-parameter with [`memory::wordtrie_alloc`] and release them
//! with [`memory::wordtrie_dealloc`].

// Import logging macros
#[macro_use]
extern crate log;

pub mod ffi;
pub mod memory;

/// Initialize the logger for the wordtrie library.
///
/// Safe to call any number of times. If the host process already installed a
/// `log` backend, that backend is kept.
///
/// The log level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=wordtrie_ffi=debug
/// - RUST_LOG=wordtrie_ffi=trace
pub fn init_logger() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        if env_logger::Builder::from_default_env().try_init().is_ok() {
            info!("wordtrie library initialized");
            debug!("Logging is enabled at debug level");
        }
    });
}

// Re-export the handle type for Rust consumers of the rlib
pub use wordtrie_core::Trie;
