//! C-compatible FFI interface for Trie
//!
//! # Memory Ownership Rules
//!
//! - `wordtrie_new()` allocates on Rust heap, caller owns the handle
//! - `wordtrie_free()` must be called exactly once to deallocate it, together
//!   with every vertex it owns
//! - String arrays returned by `wordtrie_search_prefix()` and
//!   `wordtrie_find_matches()` are owned by the caller, strings and array
//!   alike, and must be released with `wordtrie_string_array_free()` exactly
//!   once, passing back the count reported with them
//! - Strings passed in are copied; the caller keeps ownership
//!
//! Using a handle or array after releasing it is undefined behaviour. NULL
//! arguments are logged and treated as an absent word.

use std::os::raw::c_char;
use std::ptr;

use wordtrie_core::Trie;
use wordtrie_ffi_common::{
    convert_byte_string_array, cstr_to_bytes, free_boxed, free_cstring_array, strings_into_raw,
};

// ============================================================================
// Trie Lifecycle
// ============================================================================

#[no_mangle]
pub extern "C" fn wordtrie_init_logger() {
    crate::init_logger();
}

#[no_mangle]
pub extern "C" fn wordtrie_new() -> *mut Trie {
    let trie = Box::into_raw(Box::new(Trie::new()));
    debug!("Created trie {:p}", trie);
    trie
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_free(trie: *mut Trie) {
    if !trie.is_null() {
        debug!("Freeing trie {:p}", trie);
    }
    unsafe { free_boxed(trie) };
}

// ============================================================================
// Insertion
// ============================================================================

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_insert(trie: *mut Trie, word: *const c_char) {
    let Some(trie) = (unsafe { trie.as_mut() }) else {
        warn!("wordtrie_insert: null trie pointer");
        return;
    };

    match unsafe { cstr_to_bytes(word, "word") } {
        Ok(word) => {
            let added = trie.insert(word);
            trace!("insert {} bytes (new: {})", word.len(), added);
        }
        Err(e) => warn!("wordtrie_insert: {}", e),
    }
}

/// Insert `len` words at once. Returns how many of them were not stored before.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_insert_many(
    trie: *mut Trie,
    words: *const *const c_char,
    len: usize,
) -> usize {
    let Some(trie) = (unsafe { trie.as_mut() }) else {
        warn!("wordtrie_insert_many: null trie pointer");
        return 0;
    };

    let words = match unsafe { convert_byte_string_array(words, len) } {
        Ok(words) => words,
        Err(e) => {
            warn!("wordtrie_insert_many: {}", e);
            return 0;
        }
    };

    let added = words.into_iter().filter(|word| trie.insert(word)).count();
    debug!("insert_many: {} of {} words added", added, len);
    added
}

// ============================================================================
// Queries
// ============================================================================

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_search(trie: *const Trie, word: *const c_char) -> bool {
    let Some(trie) = (unsafe { trie.as_ref() }) else {
        warn!("wordtrie_search: null trie pointer");
        return false;
    };

    match unsafe { cstr_to_bytes(word, "word") } {
        Ok(word) => trie.search(word),
        Err(e) => {
            warn!("wordtrie_search: {}", e);
            false
        }
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_starts_with(trie: *const Trie, prefix: *const c_char) -> bool {
    let Some(trie) = (unsafe { trie.as_ref() }) else {
        warn!("wordtrie_starts_with: null trie pointer");
        return false;
    };

    match unsafe { cstr_to_bytes(prefix, "prefix") } {
        Ok(prefix) => trie.starts_with(prefix),
        Err(e) => {
            warn!("wordtrie_starts_with: {}", e);
            false
        }
    }
}

/// Every stored word beginning with `prefix`.
///
/// Writes the number of words to `count` and returns the array, or NULL with
/// `count` set to 0 when nothing matches. Release with
/// `wordtrie_string_array_free(array, count)`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_search_prefix(
    trie: *const Trie,
    prefix: *const c_char,
    count: *mut usize,
) -> *mut *mut c_char {
    if count.is_null() {
        warn!("wordtrie_search_prefix: null count pointer");
        return ptr::null_mut();
    }
    unsafe { *count = 0 };

    let Some(trie) = (unsafe { trie.as_ref() }) else {
        warn!("wordtrie_search_prefix: null trie pointer");
        return ptr::null_mut();
    };

    let prefix = match unsafe { cstr_to_bytes(prefix, "prefix") } {
        Ok(prefix) => prefix,
        Err(e) => {
            warn!("wordtrie_search_prefix: {}", e);
            return ptr::null_mut();
        }
    };

    hand_over(trie.search_prefix(prefix), count, "wordtrie_search_prefix")
}

/// Stored keywords occurring in `text`, in order of their start offset.
///
/// At each offset only the shortest keyword starting there is reported; the
/// same keyword appears once per occurrence. Same ownership contract as
/// `wordtrie_search_prefix`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_find_matches(
    trie: *const Trie,
    text: *const c_char,
    count: *mut usize,
) -> *mut *mut c_char {
    if count.is_null() {
        warn!("wordtrie_find_matches: null count pointer");
        return ptr::null_mut();
    }
    unsafe { *count = 0 };

    let Some(trie) = (unsafe { trie.as_ref() }) else {
        warn!("wordtrie_find_matches: null trie pointer");
        return ptr::null_mut();
    };

    let text = match unsafe { cstr_to_bytes(text, "text") } {
        Ok(text) => text,
        Err(e) => {
            warn!("wordtrie_find_matches: {}", e);
            return ptr::null_mut();
        }
    };

    let keywords = trie
        .find_matches(text)
        .into_iter()
        .filter_map(|m| m.slice(text));
    hand_over(keywords, count, "wordtrie_find_matches")
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_len(trie: *const Trie) -> usize {
    match unsafe { trie.as_ref() } {
        Some(trie) => trie.len(),
        None => {
            warn!("wordtrie_len: null trie pointer");
            0
        }
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_node_count(trie: *const Trie) -> usize {
    match unsafe { trie.as_ref() } {
        Some(trie) => trie.node_count(),
        None => {
            warn!("wordtrie_node_count: null trie pointer");
            0
        }
    }
}

// ============================================================================
// Result Release
// ============================================================================

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_string_array_free(strings: *mut *mut c_char, count: usize) {
    if !strings.is_null() {
        trace!("Releasing {} strings at {:p}", count, strings);
    }
    unsafe { free_cstring_array(strings, count) };
}

wordtrie_ffi_common::define_version_fn!(wordtrie_version);

// ============================================================================
// Helpers
// ============================================================================

/// Convert `words` into a caller-owned C array and report its length through
/// `count`, which must be non-null.
fn hand_over<I>(words: I, count: *mut usize, caller: &str) -> *mut *mut c_char
where
    I: IntoIterator,
    I::Item: Into<Vec<u8>>,
{
    match strings_into_raw(words) {
        Ok((strings, len)) => {
            unsafe { *count = len };
            debug!("{}: handing over {} strings", caller, len);
            strings
        }
        Err(e) => {
            warn!("{}: {}", caller, e);
            ptr::null_mut()
        }
    }
}
