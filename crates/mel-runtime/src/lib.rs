//! MEL Runtime Library
//!
//! Printing, input and primitive conversions for programs produced by the
//! MEL compiler. [`Runtime`] is the safe facade; the `mel_*` functions expose
//! the same operations with C ABI over a process-wide instance bound to
//! standard input and output.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

mod config;
mod convert;
mod error;
mod input;
mod io;
mod runtime;
mod strings;
mod value;

#[cfg(test)]
mod test_util;

pub use config::*;
pub use convert::*;
pub use error::*;
pub use input::*;
pub use io::*;
pub use runtime::*;
pub use strings::*;
pub use value::*;
