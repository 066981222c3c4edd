//! Text to number conversions.
//!
//! Both parsers trim surrounding whitespace and then require the whole
//! remainder to be a literal of the target type.

use crate::error::{settle, NumericKind, Result, RuntimeError};
use crate::strings::{str_from_raw, MelString};
use crate::value::to_text;

/// Parse a signed integer literal.
pub fn parse_int(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| RuntimeError::parse(NumericKind::Int, text))
}

/// Parse a floating-point literal.
pub fn parse_float(text: &str) -> Result<f64> {
    text.trim()
        .parse()
        .map_err(|_| RuntimeError::parse(NumericKind::Float, text))
}

/// String to integer (0 and error code 2 on failure)
#[no_mangle]
pub extern "C" fn mel_parse_int(ptr: *const u8, len: i64) -> i64 {
    settle(parse_int(&str_from_raw(ptr, len)))
}

/// String to float (0.0 and error code 2 on failure)
#[no_mangle]
pub extern "C" fn mel_parse_float(ptr: *const u8, len: i64) -> f64 {
    settle(parse_float(&str_from_raw(ptr, len)))
}

/// Integer to string
#[no_mangle]
pub extern "C" fn mel_int_to_string(value: i64) -> *mut MelString {
    MelString::from_text(&to_text(value))
}

/// Float to string
#[no_mangle]
pub extern "C" fn mel_float_to_string(value: f64) -> *mut MelString {
    MelString::from_text(&to_text(value))
}

/// Boolean to string
#[no_mangle]
pub extern "C" fn mel_bool_to_string(value: i8) -> *mut MelString {
    MelString::from_text(&to_text(value != 0))
}
