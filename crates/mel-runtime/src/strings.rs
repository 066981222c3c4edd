//! String operations

use std::borrow::Cow;
use std::ptr;

/// Concatenate two strings with no separator.
pub fn concat(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    out
}

/// Compare two strings by Unicode code point.
///
/// The sign orders `a` against `b`. The magnitude is the difference of the
/// first differing code points, or the difference in length when one string
/// is a prefix of the other.
pub fn compare(a: &str, b: &str) -> i64 {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) if x != y => return x as i64 - y as i64,
            (Some(_), Some(_)) => {}
            (Some(_), None) => return 1 + left.count() as i64,
            (None, Some(_)) => return -(1 + right.count() as i64),
            (None, None) => return 0,
        }
    }
}

/// MelString - the runtime string handed back to generated code
#[repr(C)]
pub struct MelString {
    pub data: *mut u8,
    pub len: i64,
    pub cap: i64,
}

impl MelString {
    /// Copy `bytes` into a fresh NUL-terminated heap string.
    pub fn alloc(bytes: &[u8]) -> *mut MelString {
        let cap = bytes.len() + 1;
        let data = unsafe {
            let buf = libc::malloc(cap) as *mut u8;
            if !buf.is_null() {
                ptr::copy_nonoverlapping(bytes.as_ptr(), buf, bytes.len());
                *buf.add(bytes.len()) = 0;
            }
            buf
        };
        let len = if data.is_null() { 0 } else { bytes.len() as i64 };
        let cap = if data.is_null() { 0 } else { cap as i64 };
        Box::into_raw(Box::new(MelString { data, len, cap }))
    }

    pub fn from_text(s: &str) -> *mut MelString {
        Self::alloc(s.as_bytes())
    }
}

/// View a `(ptr, len)` pair from generated code as bytes.
pub(crate) fn bytes_from_raw<'a>(ptr: *const u8, len: i64) -> &'a [u8] {
    if ptr.is_null() || len <= 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len as usize) }
    }
}

pub(crate) fn str_from_raw<'a>(ptr: *const u8, len: i64) -> Cow<'a, str> {
    String::from_utf8_lossy(bytes_from_raw(ptr, len))
}

/// Release a string returned by the runtime
#[no_mangle]
pub extern "C" fn mel_string_free(s: *mut MelString) {
    if s.is_null() {
        return;
    }
    unsafe {
        let owned = Box::from_raw(s);
        if !owned.data.is_null() {
            libc::free(owned.data as *mut libc::c_void);
        }
    }
}

/// String concatenation
#[no_mangle]
pub extern "C" fn mel_string_concat(
    a: *const u8,
    alen: i64,
    b: *const u8,
    blen: i64,
) -> *mut MelString {
    let a = str_from_raw(a, alen);
    let b = str_from_raw(b, blen);
    MelString::from_text(&concat(&a, &b))
}

/// Lexicographic comparison (negative, zero or positive)
#[no_mangle]
pub extern "C" fn mel_string_compare(a: *const u8, alen: i64, b: *const u8, blen: i64) -> i64 {
    compare(&str_from_raw(a, alen), &str_from_raw(b, blen))
}
