//! Host-side buffers in module memory
//!
//! A WASM host has no `malloc` of its own inside the module's linear memory.
//! It reserves room for NUL-terminated arguments and for the `count`
//! out-parameter with [`wordtrie_alloc`], writes into it, calls the query,
//! then returns the buffer with [`wordtrie_dealloc`] using the same size.
//!
//! Buffers are aligned for `usize` so one can hold the `count` written by
//! `wordtrie_search_prefix` and `wordtrie_find_matches`.

use std::alloc::{self, Layout};
use std::mem;
use std::ptr;

fn buffer_layout(size: usize) -> Option<Layout> {
    if size == 0 {
        return None;
    }
    Layout::from_size_align(size, mem::align_of::<usize>()).ok()
}

/// Allocate `size` bytes. Returns NULL for a zero size or an impossible layout.
/// The host must call [`wordtrie_dealloc`] with the same size to release.
#[no_mangle]
pub extern "C" fn wordtrie_alloc(size: usize) -> *mut u8 {
    let Some(layout) = buffer_layout(size) else {
        return ptr::null_mut();
    };
    unsafe { alloc::alloc(layout) }
}

/// Free a buffer previously returned by [`wordtrie_alloc`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn wordtrie_dealloc(ptr: *mut u8, size: usize) {
    if ptr.is_null() {
        return;
    }
    let Some(layout) = buffer_layout(size) else {
        warn!("wordtrie_dealloc: invalid size {} for {:p}", size, ptr);
        return;
    };
    unsafe { alloc::dealloc(ptr, layout) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{
        wordtrie_free, wordtrie_insert, wordtrie_new, wordtrie_search_prefix,
        wordtrie_string_array_free,
    };
    use std::os::raw::c_char;

    /// Write `s` plus a terminator into a fresh module buffer, as a host would
    fn host_string(s: &str) -> (*mut u8, usize) {
        let size = s.len() + 1;
        let buf = wordtrie_alloc(size);
        assert!(!buf.is_null());
        unsafe {
            ptr::copy_nonoverlapping(s.as_ptr(), buf, s.len());
            *buf.add(s.len()) = 0;
        }
        (buf, size)
    }

    #[test]
    fn test_zero_size_alloc_is_null() {
        assert!(wordtrie_alloc(0).is_null());
        wordtrie_dealloc(ptr::null_mut(), 0);
    }

    #[test]
    fn test_host_driven_prefix_query() {
        let trie = wordtrie_new();
        for word in ["tea", "ten", "to"] {
            let (buf, size) = host_string(word);
            wordtrie_insert(trie, buf as *const c_char);
            wordtrie_dealloc(buf, size);
        }

        let (prefix, prefix_size) = host_string("te");
        let count_size = mem::size_of::<usize>();
        let count = wordtrie_alloc(count_size) as *mut usize;

        let strings = wordtrie_search_prefix(trie, prefix as *const c_char, count);
        let n = unsafe { *count };
        assert_eq!(n, 2);

        wordtrie_string_array_free(strings, n);
        wordtrie_dealloc(count as *mut u8, count_size);
        wordtrie_dealloc(prefix, prefix_size);
        wordtrie_free(trie);
    }
}
