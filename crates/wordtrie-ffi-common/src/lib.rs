//! Common FFI utilities for the wordtrie C-compatible interface.
//!
//! Strings cross the boundary as NUL-terminated byte sequences. Decoding
//! borrows the bytes verbatim: no UTF-8 validation, no re-encoding, so every
//! byte the host passes becomes one trie edge.
//!
//! # Memory Ownership
//!
//! - Functions returning `*mut c_char` or `*mut *mut c_char` transfer
//!   ownership to the caller
//! - Callers must hand those pointers back to the matching `free_*` function
//!   exactly once
//! - NULL pointers are handled safely (no-op for free functions)

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use thiserror::Error;

/// Errors raised while marshalling values across the C boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FfiError {
    /// A required pointer argument was NULL
    #[error("null {0} pointer")]
    NullPointer(&'static str),

    /// A string contains NUL at the given byte offset and cannot become a C string
    #[error("interior NUL byte at offset {0}")]
    InteriorNul(usize),

    /// A string array contains a NULL entry
    #[error("null string at index {0}")]
    NullEntry(usize),
}

/// Result type for marshalling helpers
pub type FfiResult<T> = Result<T, FfiError>;

/// Borrow the bytes of a NUL-terminated C string, excluding the terminator.
///
/// # Arguments
/// * `ptr` - Pointer to a NUL-terminated string
/// * `what` - Argument name used in the error when `ptr` is NULL
///
/// # Safety
/// The pointer must be NULL or point to a NUL-terminated string that stays
/// valid and unmodified for `'a`.
pub unsafe fn cstr_to_bytes<'a>(ptr: *const c_char, what: &'static str) -> FfiResult<&'a [u8]> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(what));
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

/// Copy `bytes` into a newly allocated C string owned by the caller.
///
/// Fails if `bytes` contains NUL, since the copy would be silently truncated
/// on the host side.
pub fn cstring_from_bytes(bytes: impl Into<Vec<u8>>) -> FfiResult<*mut c_char> {
    CString::new(bytes)
        .map(CString::into_raw)
        .map_err(|e| FfiError::InteriorNul(e.nul_position()))
}

/// Release one string produced by [`cstring_from_bytes`]. NULL is ignored.
///
/// # Safety
/// `ptr` must come from `CString::into_raw()` and not have been freed yet.
#[inline]
pub unsafe fn free_cstring(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

/// Drop a value previously leaked to the host with `Box::into_raw()`,
/// such as a trie handle. NULL is ignored.
///
/// # Safety
/// `ptr` must come from `Box::into_raw()` for the same `T` and not have been
/// freed yet.
#[inline]
pub unsafe fn free_boxed<T>(ptr: *mut T) {
    if !ptr.is_null() {
        unsafe {
            let _ = Box::from_raw(ptr);
        }
    }
}

/// Drop a boxed slice handed out by [`vec_into_raw`]. `(NULL, 0)` is ignored.
///
/// # Safety
/// `ptr` and `len` must be exactly the pair returned by [`vec_into_raw`].
#[inline]
pub unsafe fn free_boxed_slice<T>(ptr: *mut T, len: usize) {
    if !ptr.is_null() && len > 0 {
        unsafe {
            let _ = Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len));
        }
    }
}

/// Leak `vec` to the caller as a `(pointer, length)` pair, shrinking it to
/// an exact-size allocation first. Empty vectors become `(NULL, 0)` so no
/// allocation is handed out for them.
#[inline]
pub fn vec_into_raw<T>(vec: Vec<T>) -> (*mut T, usize) {
    let len = vec.len();
    if len == 0 {
        (ptr::null_mut(), 0)
    } else {
        (Box::into_raw(vec.into_boxed_slice()) as *mut T, len)
    }
}

/// Hand a list of words to the caller as a C array of C strings.
///
/// One C string is allocated per word, then one array referencing them. An
/// empty list yields `(NULL, 0)`. If any word cannot be converted, every
/// string allocated so far is released before the error is returned.
///
/// Release the result with [`free_cstring_array`].
pub fn strings_into_raw<I>(words: I) -> FfiResult<(*mut *mut c_char, usize)>
where
    I: IntoIterator,
    I::Item: Into<Vec<u8>>,
{
    let words = words.into_iter();
    let mut c_strings: Vec<*mut c_char> = Vec::with_capacity(words.size_hint().0);

    for word in words {
        match cstring_from_bytes(word) {
            Ok(ptr) => c_strings.push(ptr),
            Err(e) => {
                for ptr in c_strings {
                    unsafe { free_cstring(ptr) };
                }
                return Err(e);
            }
        }
    }

    Ok(vec_into_raw(c_strings))
}

/// Release every string of an array built by [`strings_into_raw`], then the
/// array itself.
///
/// # Safety
/// - `arr` must have been produced by [`strings_into_raw`] with this `len`
///   (or be null)
/// - The array must not be used or freed again afterwards
pub unsafe fn free_cstring_array(arr: *mut *mut c_char, len: usize) {
    if arr.is_null() || len == 0 {
        return;
    }

    let slice = unsafe { slice::from_raw_parts_mut(arr, len) };
    for s in slice.iter() {
        unsafe { free_cstring(*s) };
    }
    unsafe { free_boxed_slice(arr, len) };
}

/// Borrow each entry of a host-provided array of C strings as raw bytes.
///
/// # Safety
/// - `arr` must point to `len` C string pointers, or be null (if len is 0)
/// - Each string must be NUL-terminated and outlive `'a`
pub unsafe fn convert_byte_string_array<'a>(
    arr: *const *const c_char,
    len: usize,
) -> FfiResult<Vec<&'a [u8]>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if arr.is_null() {
        return Err(FfiError::NullPointer("string array"));
    }

    let slice = unsafe { slice::from_raw_parts(arr, len) };
    slice
        .iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(FfiError::NullEntry(i));
            }
            Ok(unsafe { CStr::from_ptr(ptr) }.to_bytes())
        })
        .collect()
}

/// Generate a version function that returns a static C string.
///
/// # Example
/// ```ignore
/// wordtrie_ffi_common::define_version_fn!(wordtrie_version);
/// // Expands to:
/// // #[no_mangle]
/// // pub extern "C" fn wordtrie_version() -> *const c_char {
/// //     concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
/// // }
/// ```
#[macro_export]
macro_rules! define_version_fn {
    ($fn_name:ident) => {
        #[no_mangle]
        pub extern "C" fn $fn_name() -> *const std::os::raw::c_char {
            concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const std::os::raw::c_char
        }
    };
}
